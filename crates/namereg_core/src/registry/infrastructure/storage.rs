//! Concurrent document store with a per-scope unique slug index.
//!
//! The store is the only stateful component of the registry. It keeps two
//! concurrent maps behind `Arc` so cloned service handles share one state:
//!
//! - **documents**: entity records keyed by [`EntityId`]
//! - **index**: the `(Scope, slug)` unique index keyed back to the owning id
//!
//! ## Atomicity
//!
//! `insert` reserves the index entry before writing the document, using the
//! map's entry API as a compare-and-swap on the `(scope, slug)` key. Two
//! racing inserts with the same key therefore resolve to exactly one success
//! and one [`StoreError::DuplicateKey`], regardless of how stale the
//! caller's slug snapshot was. A failed insert performs no partial write.
//!
//! `update` applies a field-level merge and re-keys the index through the
//! same reservation path when the patch changes the slug, holding the
//! document's lock for the whole re-key so racing slug updates serialize and
//! the loser's key is always released. Concurrent updates to one entity are
//! last-write-wins; the store carries no version token.
//!
//! ## Ownership of fields
//!
//! Ids (monotonic, never reused) and both timestamps are assigned here and
//! are read-only to every caller.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use dashmap::{DashMap, Entry};
use thiserror::Error;

use crate::registry::infrastructure::naming::{Entity, EntityId, Scope};

/// Storage-level failures.
///
/// `DuplicateKey` is the marker the conflict translator keys on; every other
/// variant is an unexpected failure that must not leak verbatim to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store error, duplicate key on {scope} index ({field}: '{value}')")]
    DuplicateKey { scope: Scope, field: &'static str, value: String },

    #[error("store error, system clock before unix epoch")]
    Clock,
}

/// Partial field merge applied by [`DocumentStore::update`].
///
/// Only fields present are changed; an explicit `slug` is the single path
/// that can re-key the unique index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPatch {
    pub pretty_name: Option<String>,
    pub slug: Option<String>,
    pub active: Option<bool>,
}

impl EntityPatch {
    pub const fn is_empty(&self) -> bool {
        self.pretty_name.is_none() && self.slug.is_none() && self.active.is_none()
    }

    /// Patch flipping only the lifecycle flag, used by toggle operations.
    pub const fn active(active: bool) -> Self {
        Self { pretty_name: None, slug: None, active: Some(active) }
    }
}

/// In-memory document store shared by all cloned registry handles.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    documents: Arc<DashMap<EntityId, Entity>>,
    index: Arc<DashMap<(Scope, String), EntityId>>,
    next_id: Arc<AtomicU64>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn now_ms() -> Result<u64, StoreError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .map_err(|_| StoreError::Clock)
    }

    /// Inserts a new document under the given slug.
    ///
    /// The `(scope, slug)` index entry is reserved first; on a duplicate key
    /// nothing is written and the existing entity is untouched.
    pub fn insert(
        &self,
        scope: Scope,
        pretty_name: String,
        slug: String,
        created_by: String,
    ) -> Result<Entity, StoreError> {
        let now = Self::now_ms()?;
        let id = EntityId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);

        match self.index.entry((scope, slug.clone())) {
            Entry::Occupied(_) => {
                return Err(StoreError::DuplicateKey { scope, field: "slug", value: slug });
            }
            Entry::Vacant(reservation) => {
                reservation.insert(id);
            }
        }

        let entity = Entity {
            id,
            pretty_name,
            slug,
            scope,
            active: true,
            created_by,
            created_at_ms: now,
            updated_at_ms: now,
        };
        self.documents.insert(id, entity.clone());
        Ok(entity)
    }

    /// Returns the entity if the id resolves within the scope.
    pub fn get(&self, scope: Scope, id: EntityId) -> Option<Entity> {
        self.documents.get(&id).filter(|entity| entity.scope == scope).map(|e| e.to_owned())
    }

    /// Returns every entity in the scope, in no particular order.
    pub fn list(&self, scope: Scope) -> Vec<Entity> {
        self.documents
            .iter()
            .filter(|entry| entry.scope == scope)
            .map(|entry| entry.to_owned())
            .collect()
    }

    /// Snapshot of the slugs currently taken within the scope.
    ///
    /// Advisory only; the authoritative check is the index reservation at
    /// insert time.
    pub fn slugs_in(&self, scope: Scope) -> std::collections::HashSet<String> {
        self.index
            .iter()
            .filter(|entry| entry.key().0 == scope)
            .map(|entry| entry.key().1.clone())
            .collect()
    }

    /// Applies a field-level merge to the entity.
    ///
    /// Returns `Ok(None)` when the id does not resolve within the scope, so
    /// callers decide existence from the outcome of the update itself. A slug
    /// change goes through the same index reservation as `insert` and fails
    /// with [`StoreError::DuplicateKey`] without touching the document.
    pub fn update(
        &self,
        scope: Scope,
        id: EntityId,
        patch: &EntityPatch,
    ) -> Result<Option<Entity>, StoreError> {
        let now = Self::now_ms()?;
        let Some(mut entity) = self.documents.get_mut(&id) else {
            return Ok(None);
        };
        if entity.scope != scope {
            return Ok(None);
        }

        // Re-keying happens under the document's lock, so concurrent slug
        // updates on one entity serialize and the old key read here is
        // authoritative.
        if let Some(slug) = &patch.slug
            && *slug != entity.slug
        {
            match self.index.entry((scope, slug.clone())) {
                Entry::Occupied(_) => {
                    return Err(StoreError::DuplicateKey {
                        scope,
                        field: "slug",
                        value: slug.clone(),
                    });
                }
                Entry::Vacant(reservation) => {
                    reservation.insert(id);
                }
            }
            self.index.remove_if(&(scope, entity.slug.clone()), |_, owner| *owner == id);
            entity.slug = slug.clone();
        }

        if let Some(pretty_name) = &patch.pretty_name {
            entity.pretty_name = pretty_name.clone();
        }
        if let Some(active) = patch.active {
            entity.active = active;
        }
        entity.updated_at_ms = now;
        Ok(Some(entity.to_owned()))
    }

    /// Hard-deletes the entity and its index entry.
    ///
    /// Returns the removed record, or `None` when the id does not resolve
    /// within the scope. Removal is terminal; the id never resolves again.
    pub fn remove(&self, scope: Scope, id: EntityId) -> Option<Entity> {
        let (_, entity) = self.documents.remove_if(&id, |_, entity| entity.scope == scope)?;
        self.index.remove(&(scope, entity.slug.clone()));
        Some(entity)
    }
}

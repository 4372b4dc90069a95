//! # Registry service
//!
//! The generic entity state machine behind both registry resources. One
//! implementation, parameterized by [`Scope`], covers icons and every role
//! kind; there are no per-resource copies of the CRUD logic.
//!
//! ## Operations
//!
//! - **Create**: derive a slug from the display name, then insert
//!   atomically. A duplicate key is rewritten into a domain conflict; any
//!   other store failure is logged in full and surfaced as an opaque
//!   internal error. Suffix disambiguation against the scope's current
//!   slugs is available as an opt-in ([`RegistryService::with_slug_suffixing`]).
//! - **List**: scope listing with filters, ordered by display name
//!   ascending. An empty scope is an empty listing, not an error.
//! - **Get / Update / Toggle / Remove**: existence is always decided by the
//!   outcome of the store operation, and a missing target is uniformly
//!   `NotFound` across all four.
//!
//! ## Lifecycle
//!
//! `Created → Active ⇄ Inactive → Removed (terminal)`. Toggling is a pure
//! field mutation and idempotent; removal hard-deletes the document and
//! frees its slug.
//!
//! ## Concurrency
//!
//! The service is a cheap `Clone` handle over the shared store, so each
//! request executes as an independent unit of work. Slug derivation reads an
//! advisory snapshot; the store's index reservation is the authoritative
//! uniqueness check. Updates carry no version token; concurrent writers are
//! last-write-wins.

use std::{pin::Pin, task::Poll};

use tower::Service;
use tracing::{info, warn};

use crate::registry::{
    api::types::{ListFilters, NewEntity, RegistryRequest, RegistryResponse},
    error::RegistryError,
    infrastructure::{
        conflict,
        naming::{ActorContext, EntityId, Scope},
        storage::{DocumentStore, EntityPatch, StoreError},
    },
    services::slug,
};

/// Entity registry service shared by all resources.
#[derive(Debug, Default, Clone)]
pub struct RegistryService {
    store: DocumentStore,
    suffix_slugs: bool,
}

impl RegistryService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store, suffix_slugs: false }
    }

    /// Enables numeric suffix disambiguation (`-2`, `-3`, …) when a derived
    /// base slug is already taken within the scope.
    ///
    /// Disabled by default: a colliding base slug then surfaces as a
    /// conflict from the unique index, so creating twice with an identical
    /// display name yields exactly one success and one conflict.
    pub fn with_slug_suffixing(self, suffix_slugs: bool) -> Self {
        Self { suffix_slugs, ..self }
    }

    /// Rewrites a store failure into the domain taxonomy.
    ///
    /// Uniqueness violations become conflicts; everything else is logged
    /// with full detail here and leaves as an opaque internal error.
    fn rewrite_failure(scope: Scope, error: StoreError) -> RegistryError {
        match conflict::translate(&error) {
            Some(conflict) => {
                warn!("[registry] duplicate key on {scope}: {conflict}");
                conflict
            }
            None => {
                warn!("[registry] unexpected store failure on {scope}: {error}");
                RegistryError::Internal
            }
        }
    }

    fn create(
        &self,
        scope: Scope,
        actor: &ActorContext,
        new: NewEntity,
    ) -> Result<RegistryResponse, RegistryError> {
        let pretty_name = new.pretty_name.trim().to_string();
        let derived = if self.suffix_slugs {
            slug::generate(&pretty_name, &self.store.slugs_in(scope))
        } else {
            slug::slugify(&pretty_name)
        };
        if derived.is_empty() {
            return Err(RegistryError::EmptyName);
        }

        match self.store.insert(scope, pretty_name, derived, actor.actor_id.clone()) {
            Ok(entity) => {
                let message = format!(
                    "{} '{}' was successfully created",
                    scope.label(),
                    entity.pretty_name
                );
                info!("[registry] {message} (slug: {}, actor: {actor})", entity.slug);
                Ok(RegistryResponse::Created { message, entity })
            }
            Err(error) => Err(Self::rewrite_failure(scope, error)),
        }
    }

    fn list(&self, scope: Scope, filters: &ListFilters) -> RegistryResponse {
        let mut entities: Vec<_> =
            self.store.list(scope).into_iter().filter(|entity| filters.matches(entity)).collect();
        entities.sort_by(|a, b| {
            a.pretty_name.cmp(&b.pretty_name).then_with(|| a.slug.cmp(&b.slug))
        });
        RegistryResponse::Listing(entities)
    }

    fn get(&self, scope: Scope, id: EntityId) -> Result<RegistryResponse, RegistryError> {
        self.store.get(scope, id).map(RegistryResponse::Entity).ok_or_else(|| {
            warn!("[registry] lookup of unknown id {id} on {scope}");
            RegistryError::NotFound { label: scope.label(), id: id.to_string() }
        })
    }

    fn update(
        &self,
        scope: Scope,
        actor: &ActorContext,
        id: EntityId,
        patch: &EntityPatch,
    ) -> Result<RegistryResponse, RegistryError> {
        if patch.is_empty() {
            return Err(RegistryError::EmptyPatch);
        }
        // An explicit slug goes through the same derivation as create, so the
        // index never holds a value slugify could not have produced.
        let mut patch = patch.clone();
        if let Some(raw) = &patch.slug {
            let normalized = slug::slugify(raw);
            if normalized.is_empty() {
                return Err(RegistryError::EmptySlug);
            }
            patch.slug = Some(normalized);
        }
        // Existence is judged by the outcome of the store update, never by
        // inspecting the incoming patch.
        match self.store.update(scope, id, &patch) {
            Ok(Some(entity)) => {
                let message =
                    format!("{} with id '{id}' was successfully updated", scope.label());
                info!("[registry] {message} (actor: {actor})");
                Ok(RegistryResponse::Updated { message, entity })
            }
            Ok(None) => {
                warn!("[registry] update of unknown id {id} on {scope}");
                Err(RegistryError::NotFound { label: scope.label(), id: id.to_string() })
            }
            Err(error) => Err(Self::rewrite_failure(scope, error)),
        }
    }

    fn remove(
        &self,
        scope: Scope,
        actor: &ActorContext,
        id: EntityId,
    ) -> Result<RegistryResponse, RegistryError> {
        match self.store.remove(scope, id) {
            Some(entity) => {
                let message =
                    format!("{} with id '{id}' was successfully deleted", scope.label());
                info!("[registry] {message} (actor: {actor})");
                Ok(RegistryResponse::Removed { message, entity })
            }
            None => {
                warn!("[registry] removal of unknown id {id} on {scope}");
                Err(RegistryError::NotFound { label: scope.label(), id: id.to_string() })
            }
        }
    }
}

impl Service<RegistryRequest> for RegistryService {
    type Response = RegistryResponse;
    type Error = RegistryError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: RegistryRequest) -> Self::Future {
        let this = self.clone();
        Box::pin(async move {
            match request {
                RegistryRequest::Create { scope, actor, new } => {
                    info!("[registry] Create: scope: {scope}, actor: {actor}");
                    this.create(scope, &actor, new)
                }
                RegistryRequest::List { scope, actor, filters } => {
                    info!("[registry] List: scope: {scope}, actor: {actor}");
                    Ok(this.list(scope, &filters))
                }
                RegistryRequest::Get { scope, actor, id } => {
                    info!("[registry] Get: scope: {scope}, id: {id}, actor: {actor}");
                    this.get(scope, id)
                }
                RegistryRequest::Update { scope, actor, id, patch } => {
                    info!("[registry] Update: scope: {scope}, id: {id}, actor: {actor}");
                    this.update(scope, &actor, id, &patch)
                }
                RegistryRequest::Toggle { scope, actor, id, active } => {
                    info!(
                        "[registry] Toggle: scope: {scope}, id: {id}, active: {active}, actor: {actor}"
                    );
                    this.update(scope, &actor, id, &EntityPatch::active(active))
                }
                RegistryRequest::Remove { scope, actor, id } => {
                    info!("[registry] Remove: scope: {scope}, id: {id}, actor: {actor}");
                    this.remove(scope, &actor, id)
                }
            }
        })
    }
}

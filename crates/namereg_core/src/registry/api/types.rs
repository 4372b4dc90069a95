//! Registry API type definitions.
//!
//! Two request/response pairs cross the registry's seams:
//!
//! - [`RegistryRequest`] / [`RegistryResponse`]: the typed core API. Scopes
//!   and ids are already validated members of the closed enumerations, and
//!   every variant carries the caller's [`ActorContext`] explicitly.
//! - [`AdminRequest`] / [`AdminResponse`]: the boundary API spoken by
//!   transports. Resource, role-kind and id arrive as raw string tokens and
//!   are validated exactly once before dispatch to the core.

use crate::registry::infrastructure::{
    naming::{ActorContext, Entity, EntityId, Scope},
    storage::EntityPatch,
};

/// Creation payload; everything else on the record is derived or
/// store-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntity {
    /// Human-supplied display label the slug is derived from.
    pub pretty_name: String,
}

/// Listing filters; all absent means the whole scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// Keep only entities with this lifecycle flag.
    pub active: Option<bool>,
    /// Keep only entities whose display name contains this fragment,
    /// case-insensitively.
    pub name_contains: Option<String>,
}

impl ListFilters {
    pub fn matches(&self, entity: &Entity) -> bool {
        if let Some(active) = self.active
            && entity.active != active
        {
            return false;
        }
        if let Some(fragment) = &self.name_contains
            && !entity.pretty_name.to_lowercase().contains(&fragment.to_lowercase())
        {
            return false;
        }
        true
    }
}

/// Core registry operations over validated scopes and ids.
#[derive(Debug, Clone)]
pub enum RegistryRequest {
    /// Create an entity in the scope; the slug is derived server side.
    Create { scope: Scope, actor: ActorContext, new: NewEntity },
    /// List the scope, filtered and ordered by display name ascending.
    List { scope: Scope, actor: ActorContext, filters: ListFilters },
    /// Resolve one entity by id within the scope.
    Get { scope: Scope, actor: ActorContext, id: EntityId },
    /// Field-level merge; only fields present in the patch change.
    Update { scope: Scope, actor: ActorContext, id: EntityId, patch: EntityPatch },
    /// Flip the lifecycle flag; idempotent for an already-matching state.
    Toggle { scope: Scope, actor: ActorContext, id: EntityId, active: bool },
    /// Hard delete, terminal for the id.
    Remove { scope: Scope, actor: ActorContext, id: EntityId },
}

/// Core registry responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryResponse {
    /// Created entity plus a confirmation message.
    Created { message: String, entity: Entity },
    /// Scope listing, ordered by display name ascending.
    Listing(Vec<Entity>),
    /// Single resolved entity.
    Entity(Entity),
    /// Post-update entity plus a confirmation message.
    Updated { message: String, entity: Entity },
    /// Removed entity plus a confirmation message.
    Removed { message: String, entity: Entity },
}

/// Boundary operations carrying raw string tokens from transports.
///
/// The admin API service validates `resource`/`role_kind` against the closed
/// enumerations and parses `id` before any core dispatch.
#[derive(Debug, Clone)]
pub enum AdminRequest {
    Create {
        resource: String,
        role_kind: String,
        actor: ActorContext,
        pretty_name: String,
    },
    List {
        resource: String,
        role_kind: String,
        actor: ActorContext,
        filters: ListFilters,
    },
    Get {
        resource: String,
        role_kind: String,
        actor: ActorContext,
        id: String,
    },
    Update {
        resource: String,
        role_kind: String,
        actor: ActorContext,
        id: String,
        patch: EntityPatch,
    },
    Toggle {
        resource: String,
        role_kind: String,
        actor: ActorContext,
        id: String,
        active: bool,
    },
    Remove {
        resource: String,
        role_kind: String,
        actor: ActorContext,
        id: String,
    },
}

/// Boundary responses mirroring the core shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminResponse {
    Created { message: String, entity: Entity },
    Listing(Vec<Entity>),
    Entity(Entity),
    Updated { message: String, entity: Entity },
    Removed { message: String, entity: Entity },
}

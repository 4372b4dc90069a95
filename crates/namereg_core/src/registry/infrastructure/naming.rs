//! Entity naming and identification.
//!
//! This module defines the identifiers shared by every registry component:
//! the opaque [`EntityId`] assigned by the store, the closed [`Scope`]
//! enumeration that partitions slug uniqueness and listing, the persisted
//! [`Entity`] record, and the [`ActorContext`] value carrying the caller's
//! identity through every operation.
//!
//! ## Scopes
//!
//! A scope is the partition within which slugs are unique and listings are
//! evaluated. Icons share a single scope; roles are partitioned further by
//! the closed [`RoleKind`] enumeration, so the same slug may exist once per
//! role kind without conflict.
//!
//! ## Token parsing
//!
//! Scopes and role kinds parse from the raw path tokens carried by transport
//! requests (`TryFrom<&str>`). Parsing is the only place raw tokens are
//! interpreted; everything downstream works with the enums.

use std::fmt::{self, Display};

use crate::registry::error::RegistryError;

/// Opaque unique identifier assigned by the store at insert time.
///
/// Ids are never reused; a removed id stays unresolvable forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl TryFrom<&str> for EntityId {
    type Error = RegistryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.len() != 16 {
            return Err(RegistryError::InvalidEntityId(s.to_string()));
        }
        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| RegistryError::InvalidEntityId(s.to_string()))
    }
}

/// Closed enumeration of role kinds.
///
/// Role slugs are unique per kind, not globally across all roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleKind {
    Admin,
    Manager,
    Member,
}

impl RoleKind {
    pub const ALL: [Self; 3] = [Self::Admin, Self::Manager, Self::Member];

    pub const fn token(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Member => "member",
        }
    }
}

impl Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl TryFrom<&str> for RoleKind {
    type Error = RegistryError;

    fn try_from(token: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.token() == token)
            .ok_or_else(|| RegistryError::InvalidRoleKind(token.to_string()))
    }
}

/// Uniqueness and listing partition for entities.
///
/// Fixed at creation; no operation changes the scope of an existing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// The single shared scope for icon entities.
    Icons,
    /// Role entities, partitioned per role kind.
    Roles(RoleKind),
}

impl Scope {
    /// Human-readable entity label used in confirmation and error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Icons => "Icon",
            Self::Roles(_) => "Role",
        }
    }

    /// Resource path token for this scope.
    pub const fn resource_token(self) -> &'static str {
        match self {
            Self::Icons => "icons",
            Self::Roles(_) => "roles",
        }
    }

    /// Role kind token, empty for scopes without a kind segment.
    pub const fn kind_token(self) -> &'static str {
        match self {
            Self::Icons => "",
            Self::Roles(kind) => kind.token(),
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Icons => write!(f, "icons"),
            Self::Roles(kind) => write!(f, "roles/{kind}"),
        }
    }
}

/// Identity of the caller, resolved upstream and threaded explicitly into
/// every registry operation.
///
/// The registry never reads caller identity from ambient state; scoping and
/// audit decisions use only the context carried by the request itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    /// Stable identifier of the acting caller.
    pub actor_id: String,
    /// Display label for logs, not used for scoping decisions.
    pub display: String,
}

impl ActorContext {
    pub fn new(actor_id: impl Into<String>, display: impl Into<String>) -> Self {
        Self { actor_id: actor_id.into(), display: display.into() }
    }
}

impl Display for ActorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.actor_id)
    }
}

/// Persisted entity record.
///
/// `id`, `created_by` and both timestamps are owned by the store; callers
/// only ever mutate `pretty_name`, `slug` and `active` through patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub pretty_name: String,
    pub slug: String,
    pub scope: Scope,
    pub active: bool,
    pub created_by: String,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_roundtrip() {
        let id = EntityId::from_raw(42);
        assert_eq!(id.to_string(), "000000000000002a");
        assert_eq!(EntityId::try_from(id.to_string().as_str()).unwrap(), id);
    }

    #[test]
    fn test_entity_id_rejects_malformed_tokens() {
        for token in ["", "2a", "not-an-id-at-all", "zzzzzzzzzzzzzzzz"] {
            assert_eq!(
                EntityId::try_from(token),
                Err(RegistryError::InvalidEntityId(token.to_string()))
            );
        }
    }

    #[test]
    fn test_role_kind_tokens() {
        for kind in RoleKind::ALL {
            assert_eq!(RoleKind::try_from(kind.token()).unwrap(), kind);
        }
        assert_eq!(
            RoleKind::try_from("superuser"),
            Err(RegistryError::InvalidRoleKind("superuser".to_string()))
        );
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::Icons.to_string(), "icons");
        assert_eq!(Scope::Roles(RoleKind::Manager).to_string(), "roles/manager");
        assert_eq!(Scope::Icons.label(), "Icon");
        assert_eq!(Scope::Roles(RoleKind::Admin).label(), "Role");
    }
}

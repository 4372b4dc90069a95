//! Boundary validation of raw request tokens.
//!
//! Transport requests carry resource and role-kind tokens as plain strings.
//! This module is the gatekeeper that turns them into a [`Scope`] before any
//! registry logic runs; downstream components may assume every scope they see
//! is a valid member of the closed enumerations.
//!
//! Validation runs exactly once per request, in the admin API layer. Unknown
//! tokens are rejected with descriptive validation errors and never reach the
//! store.

use crate::registry::{
    error::RegistryError,
    infrastructure::naming::{RoleKind, Scope},
};

/// Parses the resource and role-kind path tokens into a scope.
///
/// The kind token is only consulted for the role resource; icons carry no
/// kind segment and any non-empty kind token is rejected there.
pub fn parse_scope(resource: &str, role_kind: &str) -> Result<Scope, RegistryError> {
    match resource {
        "icons" => {
            if role_kind.is_empty() {
                Ok(Scope::Icons)
            } else {
                Err(RegistryError::InvalidResource(format!("{resource}/{role_kind}")))
            }
        }
        "roles" => Ok(Scope::Roles(RoleKind::try_from(role_kind)?)),
        _ => Err(RegistryError::InvalidResource(resource.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_validation_accepts_known_tokens() {
        assert_eq!(parse_scope("icons", "").unwrap(), Scope::Icons);
        assert_eq!(parse_scope("roles", "admin").unwrap(), Scope::Roles(RoleKind::Admin));
        assert_eq!(parse_scope("roles", "member").unwrap(), Scope::Roles(RoleKind::Member));
    }

    #[test]
    fn unit_validation_rejects_unknown_tokens() {
        assert_eq!(
            parse_scope("widgets", ""),
            Err(RegistryError::InvalidResource("widgets".to_string()))
        );
        assert_eq!(
            parse_scope("roles", "superuser"),
            Err(RegistryError::InvalidRoleKind("superuser".to_string()))
        );
        assert_eq!(
            parse_scope("icons", "admin"),
            Err(RegistryError::InvalidResource("icons/admin".to_string()))
        );
        assert_eq!(
            parse_scope("roles", ""),
            Err(RegistryError::InvalidRoleKind(String::new()))
        );
    }
}

//! Translation of storage failures into the domain error taxonomy.
//!
//! The registry is the only component that interprets store errors, and this
//! module is where it does so. A duplicate-key failure carries the offending
//! field and value and is rewritten into a human-readable
//! [`RegistryError::Conflict`]; any other store failure stays untranslated so
//! the caller can log it in full and surface an opaque internal error. Store
//! internals never reach clients verbatim.

use crate::registry::{error::RegistryError, infrastructure::storage::StoreError};

/// Rewrites uniqueness violations into domain conflicts.
///
/// Returns `None` for store failures that are not uniqueness violations;
/// those are logged by the caller and reported as [`RegistryError::Internal`].
pub fn translate(error: &StoreError) -> Option<RegistryError> {
    match error {
        StoreError::DuplicateKey { scope, field, value } => Some(RegistryError::Conflict {
            label: scope.label(),
            field,
            value: value.clone(),
        }),
        _ => None,
    }
}

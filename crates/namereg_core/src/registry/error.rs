use thiserror::Error;

/// Domain error taxonomy for registry operations.
///
/// Four classes leave the registry: validation failures raised at the API
/// boundary before any operation runs, `Conflict` for uniqueness violations,
/// `NotFound` whenever a target id does not resolve within the caller's
/// scope (uniformly across get/update/toggle/remove), and an opaque
/// `Internal` for unexpected store failures whose detail only reaches the
/// logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Registry error, unknown resource '{0}'")]
    InvalidResource(String),

    #[error("Registry error, unknown role kind '{0}'")]
    InvalidRoleKind(String),

    #[error("Registry error, malformed entity id '{0}'")]
    InvalidEntityId(String),

    #[error("Registry error, entity name must not be empty")]
    EmptyName,

    #[error("Registry error, update patch contains no fields")]
    EmptyPatch,

    #[error("Registry error, slug must contain at least one alphanumeric character")]
    EmptySlug,

    #[error("{label} with {field} '{value}' already exists")]
    Conflict { label: &'static str, field: &'static str, value: String },

    #[error("{label} with id '{id}' not found")]
    NotFound { label: &'static str, id: String },

    #[error("Registry error, internal registry failure")]
    Internal,
}

//! External-facing APIs for the registry.
//!
//! - **Admin API**: the boundary layer spoken by transports, carrying raw
//!   resource/role-kind/id tokens that are validated before dispatch
//! - **Types**: request and response definitions for both the boundary and
//!   the typed core API

pub mod admin;
pub mod types;

// Re-export all types for convenience
pub use types::*;

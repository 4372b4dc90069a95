//! Infrastructure underneath the registry services: entity naming and
//! identification, the concurrent document store, storage-error translation,
//! and boundary token validation.

pub mod conflict;
pub mod naming;
pub mod storage;
pub mod validation;

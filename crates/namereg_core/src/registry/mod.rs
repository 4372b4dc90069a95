//! Registry module.
//!
//! A typed, actor-scoped entity registry: one generic mechanism for
//! creating, listing, updating, toggling and deleting named entities, shared
//! by the icon and role resources.
//!
//! ## Core architecture
//!
//! Requests enter through the **Admin API**, which validates raw resource
//! and role-kind tokens against the closed enumerations and parses target
//! ids. Validated operations dispatch to the **Registry service**, the
//! generic state machine executing them against the **document store**. The
//! store enforces slug uniqueness per scope at insert time; duplicate-key
//! failures are rewritten into domain conflicts by the conflict translator,
//! and every other store failure is logged and surfaced as an opaque
//! internal error.
//!
//! ## Guarantees
//!
//! - Slugs are unique within their scope and stable across renames.
//! - Toggling the lifecycle flag never deletes or recreates an entity.
//! - Removal is terminal; a removed id never resolves again.
//! - A missing target is `NotFound` uniformly across get/update/toggle/remove.
//! - The caller's actor context is threaded explicitly through every
//!   operation; nothing reads identity from ambient state.

pub mod api;
pub mod error;
pub mod infrastructure;
pub mod services;

/// Standard admin API stack over the default registry service.
pub type AdminDefaultStack = api::admin::AdminApiService<services::registry::RegistryService>;

/// Initialize a registry stack over a fresh in-memory store.
///
/// Returns the boundary admin service ready to be wrapped by a transport.
pub fn init_registry() -> AdminDefaultStack {
    init_registry_with_store(infrastructure::storage::DocumentStore::new())
}

/// Initialize a registry stack over an existing store.
///
/// Useful when several surfaces (or tests) must share one state.
pub fn init_registry_with_store(
    store: infrastructure::storage::DocumentStore,
) -> AdminDefaultStack {
    api::admin::AdminApiService::new(services::registry::RegistryService::new(store))
}

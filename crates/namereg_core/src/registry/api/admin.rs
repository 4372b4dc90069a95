//! Admin API service implementation.
//!
//! This is the boundary layer every transport dispatches through. It accepts
//! [`AdminRequest`] values carrying raw resource, role-kind and id tokens,
//! runs the scope gate exactly once, parses the target id, and forwards a
//! typed [`RegistryRequest`] to the inner registry service. The inner
//! registry may therefore assume every scope and id it sees is valid.
//!
//! Response shapes are checked on the way back out; a mismatch between the
//! operation and the inner response is an internal error, never a panic.

use std::{pin::Pin, task::Poll};

use tower::Service;
use tracing::info;

use crate::registry::{
    api::types::{AdminRequest, AdminResponse, NewEntity, RegistryRequest, RegistryResponse},
    error::RegistryError,
    infrastructure::{naming::EntityId, validation},
};

/// Boundary service gating raw tokens before registry dispatch.
#[derive(Debug, Clone)]
pub struct AdminApiService<R> {
    /// Inner registry service executing the validated operations.
    registry: R,
}

impl<R> AdminApiService<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }
}

impl<R> Service<AdminRequest> for AdminApiService<R>
where
    R: Service<RegistryRequest, Response = RegistryResponse, Error = RegistryError>
        + Clone
        + Send
        + 'static,
    R::Future: Send,
{
    type Response = AdminResponse;
    type Error = RegistryError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: AdminRequest) -> Self::Future {
        let mut registry = self.registry.clone();
        Box::pin(async move {
            match request {
                AdminRequest::Create { resource, role_kind, actor, pretty_name } => {
                    let scope = validation::parse_scope(&resource, &role_kind)?;
                    info!("[admin] Create: scope: {scope}, actor: {actor}");
                    match registry
                        .call(RegistryRequest::Create { scope, actor, new: NewEntity { pretty_name } })
                        .await?
                    {
                        RegistryResponse::Created { message, entity } => {
                            Ok(AdminResponse::Created { message, entity })
                        }
                        _ => Err(RegistryError::Internal),
                    }
                }
                AdminRequest::List { resource, role_kind, actor, filters } => {
                    let scope = validation::parse_scope(&resource, &role_kind)?;
                    info!("[admin] List: scope: {scope}, actor: {actor}");
                    match registry.call(RegistryRequest::List { scope, actor, filters }).await? {
                        RegistryResponse::Listing(entities) => Ok(AdminResponse::Listing(entities)),
                        _ => Err(RegistryError::Internal),
                    }
                }
                AdminRequest::Get { resource, role_kind, actor, id } => {
                    let scope = validation::parse_scope(&resource, &role_kind)?;
                    let id = EntityId::try_from(id.as_str())?;
                    info!("[admin] Get: scope: {scope}, id: {id}, actor: {actor}");
                    match registry.call(RegistryRequest::Get { scope, actor, id }).await? {
                        RegistryResponse::Entity(entity) => Ok(AdminResponse::Entity(entity)),
                        _ => Err(RegistryError::Internal),
                    }
                }
                AdminRequest::Update { resource, role_kind, actor, id, patch } => {
                    let scope = validation::parse_scope(&resource, &role_kind)?;
                    let id = EntityId::try_from(id.as_str())?;
                    info!("[admin] Update: scope: {scope}, id: {id}, actor: {actor}");
                    match registry
                        .call(RegistryRequest::Update { scope, actor, id, patch })
                        .await?
                    {
                        RegistryResponse::Updated { message, entity } => {
                            Ok(AdminResponse::Updated { message, entity })
                        }
                        _ => Err(RegistryError::Internal),
                    }
                }
                AdminRequest::Toggle { resource, role_kind, actor, id, active } => {
                    let scope = validation::parse_scope(&resource, &role_kind)?;
                    let id = EntityId::try_from(id.as_str())?;
                    info!("[admin] Toggle: scope: {scope}, id: {id}, active: {active}, actor: {actor}");
                    match registry
                        .call(RegistryRequest::Toggle { scope, actor, id, active })
                        .await?
                    {
                        RegistryResponse::Updated { message, entity } => {
                            Ok(AdminResponse::Updated { message, entity })
                        }
                        _ => Err(RegistryError::Internal),
                    }
                }
                AdminRequest::Remove { resource, role_kind, actor, id } => {
                    let scope = validation::parse_scope(&resource, &role_kind)?;
                    let id = EntityId::try_from(id.as_str())?;
                    info!("[admin] Remove: scope: {scope}, id: {id}, actor: {actor}");
                    match registry.call(RegistryRequest::Remove { scope, actor, id }).await? {
                        RegistryResponse::Removed { message, entity } => {
                            Ok(AdminResponse::Removed { message, entity })
                        }
                        _ => Err(RegistryError::Internal),
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{
        api::types::ListFilters,
        infrastructure::naming::ActorContext,
        services::registry::RegistryService,
    };

    fn service() -> AdminApiService<RegistryService> {
        AdminApiService::new(RegistryService::default())
    }

    fn actor() -> ActorContext {
        ActorContext::new("actor-1", "Test Actor")
    }

    #[tokio::test]
    async fn unit_admin_gates_tokens_before_dispatch() {
        let mut admin = service();

        assert_eq!(
            admin
                .call(AdminRequest::Create {
                    resource: "widgets".to_string(),
                    role_kind: String::new(),
                    actor: actor(),
                    pretty_name: "Home".to_string(),
                })
                .await
                .unwrap_err(),
            RegistryError::InvalidResource("widgets".to_string())
        );

        assert_eq!(
            admin
                .call(AdminRequest::List {
                    resource: "roles".to_string(),
                    role_kind: "superuser".to_string(),
                    actor: actor(),
                    filters: ListFilters::default(),
                })
                .await
                .unwrap_err(),
            RegistryError::InvalidRoleKind("superuser".to_string())
        );
    }

    #[tokio::test]
    async fn unit_admin_rejects_malformed_ids() {
        let mut admin = service();
        assert_eq!(
            admin
                .call(AdminRequest::Get {
                    resource: "icons".to_string(),
                    role_kind: String::new(),
                    actor: actor(),
                    id: "not-an-id".to_string(),
                })
                .await
                .unwrap_err(),
            RegistryError::InvalidEntityId("not-an-id".to_string())
        );
    }

    #[tokio::test]
    async fn unit_admin_dispatches_validated_requests() {
        let mut admin = service();
        let AdminResponse::Created { entity, .. } = admin
            .call(AdminRequest::Create {
                resource: "roles".to_string(),
                role_kind: "manager".to_string(),
                actor: actor(),
                pretty_name: "Shift Lead".to_string(),
            })
            .await
            .unwrap()
        else {
            panic!("Expected AdminResponse::Created");
        };
        assert_eq!(entity.slug, "shift-lead");

        let AdminResponse::Entity(found) = admin
            .call(AdminRequest::Get {
                resource: "roles".to_string(),
                role_kind: "manager".to_string(),
                actor: actor(),
                id: entity.id.to_string(),
            })
            .await
            .unwrap()
        else {
            panic!("Expected AdminResponse::Entity");
        };
        assert_eq!(found, entity);
    }
}

//! # gRPC transport implementation
//!
//! Wire surface for the registry's admin API, built on Tonic and Protocol
//! Buffers.
//!
//! ## Components
//!
//! - **RegistryRouter**: server implementation routing incoming gRPC requests
//!   into an admin API service
//! - **Protocol Buffer conversions**: translations between proto messages and
//!   the admin request/response types
//! - **Status mapping**: the domain error taxonomy mapped onto gRPC status
//!   codes (conflict → `ALREADY_EXISTS`, missing target → `NOT_FOUND`,
//!   validation → `INVALID_ARGUMENT`, everything internal → `INTERNAL` with
//!   an opaque message)
//!
//! Raw resource and role-kind tokens cross the wire as plain strings; the
//! admin API service validates them against the closed enumerations, so the
//! transport performs no token interpretation of its own beyond requiring an
//! actor on every request.

use tonic::{Request, Response, Status};
use tower::Service;

/// Default port for the registry gRPC server.
pub const DEFAULT_GRPC_PORT: u16 = 50061;

/// Protocol Buffer definitions and descriptor set for the registry service.
pub mod proto {
    tonic::include_proto!("namereg");

    /// Pre-compiled descriptor set for service reflection.
    pub const REGISTRY_DESCRIPTOR_SET: &[u8] =
        include_bytes!(concat!(env!("OUT_DIR"), "/namereg_descriptor.bin"));
}

use crate::registry::{
    api::types::{AdminRequest, AdminResponse, ListFilters},
    error::RegistryError,
    infrastructure::{
        naming::{ActorContext, Entity},
        storage::EntityPatch,
    },
};

/// Maps domain errors onto gRPC status codes for wire transmission.
impl From<RegistryError> for Status {
    fn from(error: RegistryError) -> Self {
        match &error {
            RegistryError::Conflict { .. } => Status::already_exists(error.to_string()),
            RegistryError::NotFound { .. } => Status::not_found(error.to_string()),
            RegistryError::InvalidResource(_)
            | RegistryError::InvalidRoleKind(_)
            | RegistryError::InvalidEntityId(_)
            | RegistryError::EmptyName
            | RegistryError::EmptyPatch
            | RegistryError::EmptySlug => Status::invalid_argument(error.to_string()),
            RegistryError::Internal => Status::internal(error.to_string()),
        }
    }
}

impl From<Entity> for proto::EntityMessage {
    fn from(entity: Entity) -> Self {
        Self {
            id: entity.id.to_string(),
            pretty_name: entity.pretty_name,
            slug: entity.slug,
            resource: entity.scope.resource_token().to_string(),
            role_kind: entity.scope.kind_token().to_string(),
            active: entity.active,
            created_by: entity.created_by,
            created_at_ms: entity.created_at_ms,
            updated_at_ms: entity.updated_at_ms,
        }
    }
}

/// Every request must carry an actor; the registry never invents one.
fn required_actor(actor: Option<proto::Actor>) -> Result<ActorContext, Status> {
    actor
        .map(|actor| ActorContext::new(actor.actor_id, actor.display))
        .ok_or_else(|| Status::invalid_argument("missing actor context"))
}

impl TryFrom<proto::CreateRequest> for AdminRequest {
    type Error = Status;

    fn try_from(req: proto::CreateRequest) -> Result<Self, Self::Error> {
        Ok(Self::Create {
            resource: req.resource,
            role_kind: req.role_kind,
            actor: required_actor(req.actor)?,
            pretty_name: req.pretty_name,
        })
    }
}

impl TryFrom<proto::ListRequest> for AdminRequest {
    type Error = Status;

    fn try_from(req: proto::ListRequest) -> Result<Self, Self::Error> {
        Ok(Self::List {
            resource: req.resource,
            role_kind: req.role_kind,
            actor: required_actor(req.actor)?,
            filters: ListFilters { active: req.active, name_contains: req.name_contains },
        })
    }
}

impl TryFrom<proto::GetRequest> for AdminRequest {
    type Error = Status;

    fn try_from(req: proto::GetRequest) -> Result<Self, Self::Error> {
        Ok(Self::Get {
            resource: req.resource,
            role_kind: req.role_kind,
            actor: required_actor(req.actor)?,
            id: req.id,
        })
    }
}

impl TryFrom<proto::UpdateRequest> for AdminRequest {
    type Error = Status;

    fn try_from(req: proto::UpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self::Update {
            resource: req.resource,
            role_kind: req.role_kind,
            actor: required_actor(req.actor)?,
            id: req.id,
            patch: EntityPatch {
                pretty_name: req.pretty_name,
                slug: req.slug,
                active: req.active,
            },
        })
    }
}

impl TryFrom<proto::ToggleRequest> for AdminRequest {
    type Error = Status;

    fn try_from(req: proto::ToggleRequest) -> Result<Self, Self::Error> {
        Ok(Self::Toggle {
            resource: req.resource,
            role_kind: req.role_kind,
            actor: required_actor(req.actor)?,
            id: req.id,
            active: req.active,
        })
    }
}

impl TryFrom<proto::RemoveRequest> for AdminRequest {
    type Error = Status;

    fn try_from(req: proto::RemoveRequest) -> Result<Self, Self::Error> {
        Ok(Self::Remove {
            resource: req.resource,
            role_kind: req.role_kind,
            actor: required_actor(req.actor)?,
            id: req.id,
        })
    }
}

fn mutation_reply(message: String, entity: Entity) -> Response<proto::MutationReply> {
    Response::new(proto::MutationReply { message, entity: Some(entity.into()) })
}

/// gRPC server router for the registry.
///
/// Accepts incoming requests, converts them into admin API requests and
/// forwards them to the wrapped service. Response shapes are re-checked on
/// the way out; a mismatch is an internal status, never a panic.
#[derive(Debug, Clone)]
pub struct RegistryRouter<A> {
    admin: A,
}

impl<A> RegistryRouter<A> {
    pub fn new(admin: A) -> Self {
        Self { admin }
    }
}

#[tonic::async_trait]
impl<A> proto::registry_grpc_server::RegistryGrpc for RegistryRouter<A>
where
    A: Service<AdminRequest, Response = AdminResponse, Error = RegistryError>
        + Clone
        + Sync
        + Send
        + 'static,
    A::Future: Send,
{
    async fn create(
        &self,
        request: Request<proto::CreateRequest>,
    ) -> Result<Response<proto::MutationReply>, Status> {
        let mut admin = self.admin.clone();
        match admin.call(request.into_inner().try_into()?).await? {
            AdminResponse::Created { message, entity } => Ok(mutation_reply(message, entity)),
            _ => Err(Status::internal("Internal registry API error")),
        }
    }

    async fn list(
        &self,
        request: Request<proto::ListRequest>,
    ) -> Result<Response<proto::ListReply>, Status> {
        let mut admin = self.admin.clone();
        match admin.call(request.into_inner().try_into()?).await? {
            AdminResponse::Listing(entities) => Ok(Response::new(proto::ListReply {
                entities: entities.into_iter().map(Into::into).collect(),
            })),
            _ => Err(Status::internal("Internal registry API error")),
        }
    }

    async fn get(
        &self,
        request: Request<proto::GetRequest>,
    ) -> Result<Response<proto::EntityMessage>, Status> {
        let mut admin = self.admin.clone();
        match admin.call(request.into_inner().try_into()?).await? {
            AdminResponse::Entity(entity) => Ok(Response::new(entity.into())),
            _ => Err(Status::internal("Internal registry API error")),
        }
    }

    async fn update(
        &self,
        request: Request<proto::UpdateRequest>,
    ) -> Result<Response<proto::MutationReply>, Status> {
        let mut admin = self.admin.clone();
        match admin.call(request.into_inner().try_into()?).await? {
            AdminResponse::Updated { message, entity } => Ok(mutation_reply(message, entity)),
            _ => Err(Status::internal("Internal registry API error")),
        }
    }

    async fn toggle(
        &self,
        request: Request<proto::ToggleRequest>,
    ) -> Result<Response<proto::MutationReply>, Status> {
        let mut admin = self.admin.clone();
        match admin.call(request.into_inner().try_into()?).await? {
            AdminResponse::Updated { message, entity } => Ok(mutation_reply(message, entity)),
            _ => Err(Status::internal("Internal registry API error")),
        }
    }

    async fn remove(
        &self,
        request: Request<proto::RemoveRequest>,
    ) -> Result<Response<proto::MutationReply>, Status> {
        let mut admin = self.admin.clone();
        match admin.call(request.into_inner().try_into()?).await? {
            AdminResponse::Removed { message, entity } => Ok(mutation_reply(message, entity)),
            _ => Err(Status::internal("Internal registry API error")),
        }
    }
}

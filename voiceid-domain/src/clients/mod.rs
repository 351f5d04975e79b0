//! Clients for the domain control plane.
//!
//! Handlers only see the [`DomainApi`] trait:
//! - grpc: tonic client for the control-plane `DomainService`

pub mod grpc;

pub use grpc::GrpcDomainClient;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{
    CreateDomainInput, CreatedDomain, DomainPage, DomainStatus, RemoteDomain, UpdateDomainInput,
    WireTag,
};

/// Result type for control-plane calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Remote operations on domains and their tags.
///
/// Every call either succeeds or fails with a classified [`ServiceError`].
#[async_trait]
pub trait DomainApi: Send + Sync {
    /// Create a domain.
    async fn create_domain(&self, input: CreateDomainInput) -> ServiceResult<CreatedDomain>;

    /// Describe a domain by ID. Suspended domains are still returned.
    async fn describe_domain(&self, domain_id: &str) -> ServiceResult<RemoteDomain>;

    /// Update a domain. May return before a KMS key change has been applied.
    async fn update_domain(&self, input: UpdateDomainInput) -> ServiceResult<DomainStatus>;

    /// Delete a domain (it enters the suspended grace period).
    async fn delete_domain(&self, domain_id: &str) -> ServiceResult<()>;

    /// List one page of domains.
    async fn list_domains(&self, next_token: Option<&str>) -> ServiceResult<DomainPage>;

    /// List tags of a resource by ARN.
    async fn list_tags(&self, resource_arn: &str) -> ServiceResult<Vec<WireTag>>;

    /// Add or overwrite tags on a resource.
    async fn tag_resource(&self, resource_arn: &str, tags: Vec<WireTag>) -> ServiceResult<()>;

    /// Remove tags from a resource by key.
    async fn untag_resource(&self, resource_arn: &str, keys: Vec<String>) -> ServiceResult<()>;
}

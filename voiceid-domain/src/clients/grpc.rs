//! gRPC client for the domain control plane.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::{Code, Status};
use tracing::{debug, info};

use super::{DomainApi, ServiceResult};
use crate::error::{ServiceError, ServiceErrorKind};
use crate::model::{
    CreateDomainInput, CreatedDomain, DomainPage, DomainStatus, EncryptionUpdateDetails,
    EncryptionUpdateStatus, RemoteDomain, UpdateDomainInput, WireTag,
};
use crate::proto;
use crate::proto::domain_service_client::DomainServiceClient;

/// Metadata entry naming the service exception behind a failed call.
const ERROR_TYPE_KEY: &str = "error-type";

/// Client for the control-plane `DomainService`.
#[derive(Clone)]
pub struct GrpcDomainClient {
    inner: DomainServiceClient<Channel>,
}

impl GrpcDomainClient {
    /// Connect to the control plane.
    pub async fn connect(endpoint: &str) -> Result<Self> {
        info!("Connecting to control plane: {}", endpoint);
        let channel = Channel::from_shared(endpoint.to_string())
            .context("Invalid control-plane endpoint")?
            .connect()
            .await
            .context("Failed to connect to control plane")?;

        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            inner: DomainServiceClient::new(channel),
        }
    }

    fn client(&self) -> DomainServiceClient<Channel> {
        self.inner.clone()
    }
}

#[async_trait]
impl DomainApi for GrpcDomainClient {
    async fn create_domain(&self, input: CreateDomainInput) -> ServiceResult<CreatedDomain> {
        debug!("Creating domain {}", input.name);
        let resp = self
            .client()
            .create_domain(proto::CreateDomainRequest {
                name: input.name,
                description: input.description,
                server_side_encryption_configuration: Some(
                    proto::ServerSideEncryptionConfiguration {
                        kms_key_id: input.kms_key_id,
                    },
                ),
                tags: input.tags.into_iter().map(Into::into).collect(),
                client_token: input.client_token,
            })
            .await?
            .into_inner();

        let domain = require_domain(resp.domain)?;
        Ok(CreatedDomain {
            status: domain_status(domain.domain_status),
            domain_id: domain.domain_id,
            arn: domain.arn,
        })
    }

    async fn describe_domain(&self, domain_id: &str) -> ServiceResult<RemoteDomain> {
        debug!("Describing domain {}", domain_id);
        let resp = self
            .client()
            .describe_domain(proto::DescribeDomainRequest {
                domain_id: domain_id.to_string(),
            })
            .await?
            .into_inner();

        Ok(require_domain(resp.domain)?.into())
    }

    async fn update_domain(&self, input: UpdateDomainInput) -> ServiceResult<DomainStatus> {
        debug!("Updating domain {}", input.domain_id);
        let resp = self
            .client()
            .update_domain(proto::UpdateDomainRequest {
                domain_id: input.domain_id,
                name: input.name,
                description: input.description,
                server_side_encryption_configuration: Some(
                    proto::ServerSideEncryptionConfiguration {
                        kms_key_id: input.kms_key_id,
                    },
                ),
            })
            .await?
            .into_inner();

        // The response may carry an empty domain; only the status is used.
        Ok(resp
            .domain
            .map(|d| domain_status(d.domain_status))
            .unwrap_or(DomainStatus::Unrecognized(0)))
    }

    async fn delete_domain(&self, domain_id: &str) -> ServiceResult<()> {
        debug!("Deleting domain {}", domain_id);
        self.client()
            .delete_domain(proto::DeleteDomainRequest {
                domain_id: domain_id.to_string(),
            })
            .await?;
        Ok(())
    }

    async fn list_domains(&self, next_token: Option<&str>) -> ServiceResult<DomainPage> {
        debug!("Listing domains (token: {:?})", next_token);
        let resp = self
            .client()
            .list_domains(proto::ListDomainsRequest {
                next_token: next_token.map(str::to_string),
                max_results: None,
            })
            .await?
            .into_inner();

        Ok(DomainPage {
            domains: resp.domain_summaries.into_iter().map(Into::into).collect(),
            next_token: resp.next_token.filter(|t| !t.is_empty()),
        })
    }

    async fn list_tags(&self, resource_arn: &str) -> ServiceResult<Vec<WireTag>> {
        let resp = self
            .client()
            .list_tags_for_resource(proto::ListTagsForResourceRequest {
                resource_arn: resource_arn.to_string(),
            })
            .await?
            .into_inner();

        Ok(resp.tags.into_iter().map(Into::into).collect())
    }

    async fn tag_resource(&self, resource_arn: &str, tags: Vec<WireTag>) -> ServiceResult<()> {
        self.client()
            .tag_resource(proto::TagResourceRequest {
                resource_arn: resource_arn.to_string(),
                tags: tags.into_iter().map(Into::into).collect(),
            })
            .await?;
        Ok(())
    }

    async fn untag_resource(&self, resource_arn: &str, keys: Vec<String>) -> ServiceResult<()> {
        self.client()
            .untag_resource(proto::UntagResourceRequest {
                resource_arn: resource_arn.to_string(),
                tag_keys: keys,
            })
            .await?;
        Ok(())
    }
}

fn require_domain(domain: Option<proto::Domain>) -> ServiceResult<proto::Domain> {
    domain.ok_or_else(|| {
        ServiceError::new(
            ServiceErrorKind::GenericServiceError,
            "control plane response did not contain a domain",
        )
    })
}

// =============================================================================
// Conversions
// =============================================================================

/// Classify a failed call.
///
/// The `error-type` metadata entry wins when the server sets one; otherwise
/// the gRPC code decides. No code maps to [`ServiceErrorKind::Throttled`]:
/// `RESOURCE_EXHAUSTED` is a quota failure, and throttling is only recognized
/// through `error-type`.
pub fn classify_status(status: &Status) -> ServiceErrorKind {
    let error_type = status
        .metadata()
        .get(ERROR_TYPE_KEY)
        .and_then(|v| v.to_str().ok());

    if let Some(kind) = error_type.and_then(classify_error_type) {
        return kind;
    }

    match status.code() {
        Code::PermissionDenied | Code::Unauthenticated => ServiceErrorKind::AccessDenied,
        Code::AlreadyExists | Code::Aborted | Code::FailedPrecondition => {
            ServiceErrorKind::Conflict
        }
        Code::NotFound => ServiceErrorKind::NotFound,
        Code::ResourceExhausted => ServiceErrorKind::QuotaExceeded,
        Code::InvalidArgument | Code::OutOfRange => ServiceErrorKind::ValidationFailed,
        Code::Internal | Code::Unavailable | Code::DataLoss => {
            ServiceErrorKind::GenericServiceError
        }
        _ => ServiceErrorKind::Unclassified,
    }
}

fn classify_error_type(error_type: &str) -> Option<ServiceErrorKind> {
    let kind = match error_type {
        "AccessDeniedException" => ServiceErrorKind::AccessDenied,
        "ConflictException" => ServiceErrorKind::Conflict,
        "ResourceNotFoundException" => ServiceErrorKind::NotFound,
        "ServiceQuotaExceededException" => ServiceErrorKind::QuotaExceeded,
        "ThrottlingException" => ServiceErrorKind::Throttled,
        "ValidationException" => ServiceErrorKind::ValidationFailed,
        "InternalServerException" => ServiceErrorKind::GenericServiceError,
        _ => return None,
    };
    Some(kind)
}

impl From<Status> for ServiceError {
    fn from(status: Status) -> Self {
        ServiceError::new(classify_status(&status), status.message())
    }
}

fn domain_status(value: i32) -> DomainStatus {
    match proto::DomainStatus::try_from(value) {
        Ok(proto::DomainStatus::Active) => DomainStatus::Active,
        Ok(proto::DomainStatus::Pending) => DomainStatus::Pending,
        Ok(proto::DomainStatus::Suspended) => DomainStatus::Suspended,
        Ok(proto::DomainStatus::Unspecified) | Err(_) => DomainStatus::Unrecognized(value),
    }
}

fn encryption_update_status(value: i32) -> EncryptionUpdateStatus {
    use proto::ServerSideEncryptionUpdateStatus as Sse;
    match Sse::try_from(value) {
        Ok(Sse::InProgress) => EncryptionUpdateStatus::InProgress,
        Ok(Sse::Completed) => EncryptionUpdateStatus::Completed,
        Ok(Sse::Failed) => EncryptionUpdateStatus::Failed,
        Ok(Sse::NotApplicable) => EncryptionUpdateStatus::NotApplicable,
        Ok(Sse::Unspecified) | Err(_) => EncryptionUpdateStatus::Unrecognized(value),
    }
}

impl From<proto::Domain> for RemoteDomain {
    fn from(d: proto::Domain) -> Self {
        RemoteDomain {
            status: domain_status(d.domain_status),
            kms_key_id: d
                .server_side_encryption_configuration
                .map(|c| c.kms_key_id)
                .filter(|k| !k.is_empty()),
            encryption_update: d.server_side_encryption_update_details.map(|u| {
                EncryptionUpdateDetails {
                    update_status: encryption_update_status(u.update_status),
                    old_kms_key_id: u.old_kms_key_id,
                    message: u.message,
                }
            }),
            domain_id: d.domain_id,
            arn: d.arn,
            name: d.name,
            description: d.description,
        }
    }
}

impl From<WireTag> for proto::Tag {
    fn from(t: WireTag) -> Self {
        proto::Tag {
            key: t.key,
            value: t.value,
        }
    }
}

impl From<proto::Tag> for WireTag {
    fn from(t: proto::Tag) -> Self {
        WireTag {
            key: t.key,
            value: t.value,
        }
    }
}

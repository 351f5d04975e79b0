//! Domain resource model and the records exchanged with the control plane.
//!
//! [`Domain`] is the handler-facing resource state, serialized in the host
//! envelope format. The remaining types are what the [`DomainApi`] speaks;
//! they are independent of the gRPC wire representation.
//!
//! [`DomainApi`]: crate::clients::DomainApi

use serde::{Deserialize, Serialize};

// =============================================================================
// Resource State
// =============================================================================

/// Encryption configuration of a domain (a single KMS key reference).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerSideEncryptionConfiguration {
    pub kms_key_id: String,
}

/// Resource tag as it appears in the resource model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Observable state of a Voice ID domain.
///
/// `domain_id` is assigned by the control plane on create and never changes
/// afterwards; it is `None` only before the first successful create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Domain {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_side_encryption_configuration: Option<ServerSideEncryptionConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
}

impl Domain {
    /// Identifier-only model, as returned by list.
    pub fn reference(domain_id: impl Into<String>) -> Self {
        Self {
            domain_id: Some(domain_id.into()),
            ..Default::default()
        }
    }

    /// The identifier, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.domain_id.as_deref().filter(|id| !id.is_empty())
    }

    /// The KMS key id from the encryption configuration, if set.
    pub fn kms_key_id(&self) -> Option<&str> {
        self.server_side_encryption_configuration
            .as_ref()
            .map(|c| c.kms_key_id.as_str())
            .filter(|k| !k.is_empty())
    }
}

// =============================================================================
// Remote State
// =============================================================================

/// Lifecycle phase of a domain as reported by the control plane.
///
/// `Suspended` is the grace period after a delete. Values this handler does
/// not know are kept as `Unrecognized` and treated as transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    Active,
    Pending,
    Suspended,
    Unrecognized(i32),
}

/// Phase of an asynchronous server-side encryption (KMS key) update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionUpdateStatus {
    NotApplicable,
    InProgress,
    Completed,
    Failed,
    Unrecognized(i32),
}

/// Present only on domains whose encryption key is changing or has changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptionUpdateDetails {
    pub update_status: EncryptionUpdateStatus,
    pub old_kms_key_id: Option<String>,
    pub message: Option<String>,
}

/// A domain as returned by describe and list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDomain {
    pub domain_id: String,
    pub arn: String,
    pub name: String,
    pub description: Option<String>,
    pub status: DomainStatus,
    pub kms_key_id: Option<String>,
    pub encryption_update: Option<EncryptionUpdateDetails>,
}

impl RemoteDomain {
    /// Project the remote fields into a resource model with the given tags.
    pub fn into_model(self, tags: Vec<Tag>) -> Domain {
        Domain {
            domain_id: Some(self.domain_id),
            name: Some(self.name),
            description: self.description,
            server_side_encryption_configuration: self
                .kms_key_id
                .map(|kms_key_id| ServerSideEncryptionConfiguration { kms_key_id }),
            tags: Some(tags),
        }
    }
}

/// Tag in the control-plane representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WireTag {
    pub key: String,
    pub value: String,
}

// =============================================================================
// Request / Response Records
// =============================================================================

/// Input for creating a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDomainInput {
    pub name: String,
    pub description: Option<String>,
    pub kms_key_id: String,
    pub tags: Vec<WireTag>,
    /// Idempotency token; retries of the same create reuse it.
    pub client_token: String,
}

/// Result of a create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDomain {
    pub domain_id: String,
    pub arn: String,
    pub status: DomainStatus,
}

/// Input for updating a domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDomainInput {
    pub domain_id: String,
    pub name: String,
    pub description: Option<String>,
    pub kms_key_id: String,
}

/// One page of a domain listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainPage {
    pub domains: Vec<RemoteDomain>,
    pub next_token: Option<String>,
}

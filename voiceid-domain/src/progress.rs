//! Host framework envelope: the request a handler receives, the context
//! threaded through re-invocations, and the progress event it returns.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, HandlerError};
use crate::model::Domain;
use crate::tags::TagMap;

/// A handler invocation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceHandlerRequest {
    #[serde(default)]
    pub desired_resource_state: Domain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_state: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_resource_tags: Option<TagMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_resource_tags: Option<TagMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_tags: Option<TagMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Host token that stays the same across retries of one request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_request_token: Option<String>,
}

impl ResourceHandlerRequest {
    pub fn new(desired: Domain) -> Self {
        Self {
            desired_resource_state: desired,
            ..Default::default()
        }
    }
}

/// State carried between invocations of the same operation.
///
/// A fresh (default) context is valid at the start of any attempt. Every
/// field is written before it is relied on, so replaying a stage with a
/// populated context is harmless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationContext {
    /// Resource ARN captured from describe; addresses tag operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    /// The update call has been accepted by the control plane.
    pub update_submitted: bool,
    /// The delete call has been accepted by the control plane.
    pub delete_submitted: bool,
    /// Stabilization time spent in earlier invocations.
    pub stabilization_elapsed_ms: u64,
    /// Stabilization probes issued so far.
    pub probes: u32,
}

/// Outcome status of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    InProgress,
    Failed,
}

/// What a handler returns to the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: OperationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<Domain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_models: Option<Vec<Domain>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_context: Option<OperationContext>,
    #[serde(default)]
    pub callback_delay_seconds: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProgressEvent {
    fn with_status(status: OperationStatus) -> Self {
        Self {
            status,
            resource_model: None,
            resource_models: None,
            next_token: None,
            callback_context: None,
            callback_delay_seconds: 0,
            error_code: None,
            message: None,
        }
    }

    /// Success carrying the resource state.
    pub fn success(model: Domain) -> Self {
        Self {
            resource_model: Some(model),
            ..Self::with_status(OperationStatus::Success)
        }
    }

    /// Success without resource state (the resource was removed).
    pub fn removed() -> Self {
        Self::with_status(OperationStatus::Success)
    }

    /// Success carrying one page of a listing.
    pub fn page(models: Vec<Domain>, next_token: Option<String>) -> Self {
        Self {
            resource_models: Some(models),
            next_token,
            ..Self::with_status(OperationStatus::Success)
        }
    }

    /// The host should re-invoke after `delay_seconds` with `context`.
    pub fn in_progress(model: Domain, context: OperationContext, delay_seconds: u64) -> Self {
        Self {
            resource_model: Some(model),
            callback_context: Some(context),
            callback_delay_seconds: delay_seconds,
            ..Self::with_status(OperationStatus::InProgress)
        }
    }

    pub fn failed(err: &HandlerError) -> Self {
        Self {
            error_code: Some(err.code()),
            message: Some(err.to_string()),
            ..Self::with_status(OperationStatus::Failed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope_parses() {
        let json = r#"{
            "desiredResourceState": {
                "DomainId": "dom-1",
                "Name": "callers",
                "ServerSideEncryptionConfiguration": { "KmsKeyId": "key-1" }
            },
            "desiredResourceTags": { "env": "prod", "empty": null },
            "nextToken": "t1",
            "clientRequestToken": "4b90a7e4-b790-456b-a937-0cfdfa211dfe"
        }"#;
        let request: ResourceHandlerRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.desired_resource_state.id(), Some("dom-1"));
        assert_eq!(request.desired_resource_state.kms_key_id(), Some("key-1"));
        let tags = request.desired_resource_tags.unwrap();
        assert_eq!(tags.get("env"), Some(&Some("prod".to_string())));
        assert_eq!(tags.get("empty"), Some(&None));
        assert_eq!(request.next_token.as_deref(), Some("t1"));
        assert_eq!(
            request.client_request_token.as_deref(),
            Some("4b90a7e4-b790-456b-a937-0cfdfa211dfe")
        );
    }

    #[test]
    fn test_context_round_trips_through_json() {
        let ctx = OperationContext {
            resource_arn: Some("arn:domain/dom-1".to_string()),
            update_submitted: true,
            stabilization_elapsed_ms: 65_000,
            probes: 2,
            ..Default::default()
        };
        let json = serde_json::to_string(&ctx).unwrap();
        let back: OperationContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);

        let empty: OperationContext = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, OperationContext::default());
    }

    #[test]
    fn test_failed_event_serialization() {
        let event = ProgressEvent::failed(&HandlerError::NotStabilized("timed out".into()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["status"], "FAILED");
        assert_eq!(json["errorCode"], "NotStabilized");
        assert_eq!(json["message"], "not stabilized: timed out");
        assert!(json.get("resourceModel").is_none());
    }
}

//! Error types.
//!
//! [`ServiceError`] is what the control-plane client raises, classified by
//! [`ServiceErrorKind`]. Handlers translate it into [`HandlerError`] at the
//! call site; the handler error is what ends up in a failed progress event.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TYPE_NAME;

/// Failure categories reported by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    AccessDenied,
    Conflict,
    NotFound,
    QuotaExceeded,
    Throttled,
    ValidationFailed,
    /// The service reported an error of its own that fits no other kind.
    GenericServiceError,
    /// Transport failures and anything else that could not be classified.
    Unclassified,
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceErrorKind::AccessDenied => "access denied",
            ServiceErrorKind::Conflict => "conflict",
            ServiceErrorKind::NotFound => "resource not found",
            ServiceErrorKind::QuotaExceeded => "service quota exceeded",
            ServiceErrorKind::Throttled => "throttled",
            ServiceErrorKind::ValidationFailed => "validation failed",
            ServiceErrorKind::GenericServiceError => "service error",
            ServiceErrorKind::Unclassified => "unclassified error",
        };
        f.write_str(s)
    }
}

/// A failed control-plane call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Error code reported to the host framework in a failed progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    AccessDenied,
    #[serde(rename = "ResourceConflict")]
    Conflict,
    NotFound,
    #[serde(rename = "ServiceLimitExceeded")]
    QuotaExceeded,
    #[serde(rename = "Throttling")]
    Throttled,
    InvalidRequest,
    NotStabilized,
    InternalFailure,
}

/// Errors that end a handler invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Caller is not allowed to perform the call.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Resource busy, already exists, or a stabilization that failed remotely.
    #[error("resource conflict: {0}")]
    Conflict(String),

    /// Resource does not exist (including domains in their deletion grace period).
    #[error("{0}")]
    NotFound(String),

    /// Service quota exceeded.
    #[error("service limit exceeded: {0}")]
    QuotaExceeded(String),

    /// Request rate exceeded.
    #[error("throttled: {0}")]
    Throttled(String),

    /// Malformed input.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The mutation was accepted but convergence was not confirmed in time.
    #[error("not stabilized: {0}")]
    NotStabilized(String),

    /// Unclassified or generic remote error.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl HandlerError {
    /// NotFound for a domain identifier.
    pub fn not_found(domain_id: Option<&str>) -> Self {
        HandlerError::NotFound(format!(
            "Resource of type '{}' with identifier '{}' was not found.",
            TYPE_NAME,
            domain_id.unwrap_or_default()
        ))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            HandlerError::AccessDenied(_) => ErrorCode::AccessDenied,
            HandlerError::Conflict(_) => ErrorCode::Conflict,
            HandlerError::NotFound(_) => ErrorCode::NotFound,
            HandlerError::QuotaExceeded(_) => ErrorCode::QuotaExceeded,
            HandlerError::Throttled(_) => ErrorCode::Throttled,
            HandlerError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            HandlerError::NotStabilized(_) => ErrorCode::NotStabilized,
            HandlerError::InternalFailure(_) => ErrorCode::InternalFailure,
        }
    }
}

impl From<ServiceError> for HandlerError {
    fn from(e: ServiceError) -> Self {
        let msg = e.message;
        match e.kind {
            ServiceErrorKind::AccessDenied => HandlerError::AccessDenied(msg),
            ServiceErrorKind::Conflict => HandlerError::Conflict(msg),
            ServiceErrorKind::NotFound => HandlerError::NotFound(msg),
            ServiceErrorKind::QuotaExceeded => HandlerError::QuotaExceeded(msg),
            ServiceErrorKind::Throttled => HandlerError::Throttled(msg),
            ServiceErrorKind::ValidationFailed => HandlerError::InvalidRequest(msg),
            ServiceErrorKind::GenericServiceError | ServiceErrorKind::Unclassified => {
                HandlerError::InternalFailure(msg)
            }
        }
    }
}

/// Result type for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;

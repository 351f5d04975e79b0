//! Resource handler for Voice ID domains.
//!
//! Implements create/read/update/delete/list for a domain against the
//! control-plane API: remote calls, stabilization polling after asynchronous
//! KMS key updates and deletes, tag reconciliation, and translation of remote
//! failures into handler error codes.

pub mod clients;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod progress;
pub mod stabilize;
pub mod tags;

mod proto;

/// Resource type name used in messages.
pub const TYPE_NAME: &str = "VoiceID::Domain";

pub use clients::{DomainApi, GrpcDomainClient};
pub use config::{HandlerConfig, StabilizationConfig};
pub use error::{ErrorCode, HandlerError, ServiceError, ServiceErrorKind};
pub use handler::{handle_request, Action, Handler};
pub use model::{Domain, DomainStatus, EncryptionUpdateStatus, RemoteDomain, Tag, WireTag};
pub use progress::{OperationContext, OperationStatus, ProgressEvent, ResourceHandlerRequest};

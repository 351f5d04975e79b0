//! Lifecycle handlers for the domain resource.
//!
//! Each handler runs one operation as a short sequence of stages against the
//! control plane. Any stage failure is translated at the call site and ends
//! the operation; the error becomes a failed progress event.

pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;

pub use create::CreateHandler;
pub use delete::DeleteHandler;
pub use list::ListHandler;
pub use read::ReadHandler;
pub use update::UpdateHandler;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::clients::DomainApi;
use crate::config::HandlerConfig;
use crate::error::{HandlerError, Result};
use crate::model::{Domain, DomainStatus, RemoteDomain};
use crate::progress::{OperationContext, ProgressEvent, ResourceHandlerRequest};

/// Trait for lifecycle handlers.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Run the operation for `request`, resuming from `context`.
    async fn handle(
        &self,
        request: &ResourceHandlerRequest,
        context: OperationContext,
        client: &dyn DomainApi,
    ) -> Result<ProgressEvent>;
}

/// Lifecycle operation requested by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

/// Run `action` and map any failure into a failed progress event.
pub async fn handle_request(
    action: Action,
    request: &ResourceHandlerRequest,
    context: OperationContext,
    client: &dyn DomainApi,
    config: &HandlerConfig,
) -> ProgressEvent {
    let result = match action {
        Action::Create => CreateHandler.handle(request, context, client).await,
        Action::Read => ReadHandler.handle(request, context, client).await,
        Action::Update => {
            UpdateHandler::new(config.update_stabilization)
                .handle(request, context, client)
                .await
        }
        Action::Delete => {
            DeleteHandler::new(config.delete_stabilization)
                .handle(request, context, client)
                .await
        }
        Action::List => ListHandler.handle(request, context, client).await,
    };

    match result {
        Ok(event) => event,
        Err(e) => {
            error!("{:?} failed: {}", action, e);
            ProgressEvent::failed(&e)
        }
    }
}

/// The model's identifier, or NotFound when there is none to address.
pub(crate) fn require_id(model: &Domain) -> Result<&str> {
    model.id().ok_or_else(|| HandlerError::not_found(None))
}

/// Describe a domain, treating the suspended grace period as absence.
///
/// The control plane still answers describe for a deleted domain until its
/// grace period ends; callers must see it as gone.
pub(crate) async fn describe_active(
    client: &dyn DomainApi,
    domain_id: &str,
) -> Result<RemoteDomain> {
    let domain = client.describe_domain(domain_id).await?;
    match domain.status {
        DomainStatus::Suspended => {
            debug!("Domain {} is suspended, reporting not found", domain_id);
            Err(HandlerError::not_found(Some(domain_id)))
        }
        DomainStatus::Active | DomainStatus::Pending | DomainStatus::Unrecognized(_) => Ok(domain),
    }
}

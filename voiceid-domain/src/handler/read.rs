//! Read handler - describes a domain and attaches its tags.

use async_trait::async_trait;
use tracing::info;

use super::{describe_active, require_id, Handler};
use crate::clients::DomainApi;
use crate::error::Result;
use crate::model::Domain;
use crate::progress::{OperationContext, ProgressEvent, ResourceHandlerRequest};
use crate::tags::to_domain_tags;
use crate::TYPE_NAME;

pub struct ReadHandler;

#[async_trait]
impl Handler for ReadHandler {
    async fn handle(
        &self,
        request: &ResourceHandlerRequest,
        _context: OperationContext,
        client: &dyn DomainApi,
    ) -> Result<ProgressEvent> {
        let domain_id = require_id(&request.desired_resource_state)?;
        let model = read_domain(client, domain_id).await?;
        Ok(ProgressEvent::success(model))
    }
}

/// Current state of a domain, fresh from the control plane.
///
/// Create and update finish through here so every operation returns the same
/// shape of state.
pub(crate) async fn read_domain(client: &dyn DomainApi, domain_id: &str) -> Result<Domain> {
    let remote = describe_active(client, domain_id).await?;
    let tags = client.list_tags(&remote.arn).await?;
    info!("{} {} has successfully been read", TYPE_NAME, domain_id);
    Ok(remote.into_model(to_domain_tags(&tags)))
}

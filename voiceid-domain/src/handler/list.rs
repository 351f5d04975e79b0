//! List handler - one page of active domains.

use async_trait::async_trait;
use tracing::{debug, info};

use super::Handler;
use crate::clients::DomainApi;
use crate::error::Result;
use crate::model::{Domain, DomainStatus, RemoteDomain};
use crate::progress::{OperationContext, ProgressEvent, ResourceHandlerRequest};
use crate::TYPE_NAME;

pub struct ListHandler;

#[async_trait]
impl Handler for ListHandler {
    async fn handle(
        &self,
        request: &ResourceHandlerRequest,
        _context: OperationContext,
        client: &dyn DomainApi,
    ) -> Result<ProgressEvent> {
        let page = client.list_domains(request.next_token.as_deref()).await?;
        let total = page.domains.len();
        let models = active_references(page.domains);
        info!(
            "{} has successfully been listed ({} of {} active)",
            TYPE_NAME,
            models.len(),
            total
        );
        Ok(ProgressEvent::page(models, page.next_token))
    }
}

/// Identifier-only models of the active domains, in listing order.
fn active_references(domains: Vec<RemoteDomain>) -> Vec<Domain> {
    domains
        .into_iter()
        .filter(|d| match d.status {
            DomainStatus::Active => true,
            DomainStatus::Pending | DomainStatus::Suspended | DomainStatus::Unrecognized(_) => {
                debug!("Skipping domain {} ({:?})", d.domain_id, d.status);
                false
            }
        })
        .map(|d| Domain::reference(d.domain_id))
        .collect()
}

//! Delete handler.
//!
//! A deleted domain is not removed at once: it enters a suspended grace
//! period. The handler waits for that transition so that a successful delete
//! is always followed by reads that report the domain as not found.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{describe_active, require_id, Handler};
use crate::clients::DomainApi;
use crate::config::StabilizationConfig;
use crate::error::{HandlerError, Result, ServiceErrorKind};
use crate::progress::{OperationContext, ProgressEvent, ResourceHandlerRequest};
use crate::stabilize::{classify_deletion, PollOutcome, Probe, Stabilizer};
use crate::TYPE_NAME;

pub struct DeleteHandler {
    stabilizer: Stabilizer,
}

impl DeleteHandler {
    pub fn new(stabilization: StabilizationConfig) -> Self {
        Self {
            stabilizer: Stabilizer::new(stabilization),
        }
    }
}

#[async_trait]
impl Handler for DeleteHandler {
    async fn handle(
        &self,
        request: &ResourceHandlerRequest,
        mut context: OperationContext,
        client: &dyn DomainApi,
    ) -> Result<ProgressEvent> {
        let model = &request.desired_resource_state;
        let domain_id = require_id(model)?;

        if context.delete_submitted {
            // The pre-deletion check would now see the domain as suspended.
            debug!("Delete of {} already submitted, resuming stabilization", domain_id);
        } else {
            // Pre-deletion check: cannot delete what is already gone.
            describe_active(client, domain_id).await?;

            client.delete_domain(domain_id).await?;
            context.delete_submitted = true;
            info!("{} {} successfully deleted", TYPE_NAME, domain_id);
        }

        let outcome = self
            .stabilizer
            .poll(&mut context, || async move {
                match client.describe_domain(domain_id).await {
                    Ok(domain) => Ok(classify_deletion(domain.status)),
                    // Grace period already over.
                    Err(e) if e.kind == ServiceErrorKind::NotFound => Ok(Probe::Stable(())),
                    Err(e) => Err(HandlerError::from(e)),
                }
            })
            .await?;

        match outcome {
            PollOutcome::Stable(()) => Ok(ProgressEvent::removed()),
            PollOutcome::Suspended { delay } => Ok(ProgressEvent::in_progress(
                model.clone(),
                context,
                delay.as_secs(),
            )),
        }
    }
}

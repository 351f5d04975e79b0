//! Update handler.
//!
//! Stages:
//! 1. Pre-update check: the domain must exist (and not be suspended). Its ARN
//!    is captured into the context for the tag stage.
//! 2. Update call. The control plane may accept it before a KMS key change
//!    has been applied.
//! 3. Stabilize until the key change completes or fails.
//! 4. Reconcile tags against the previous tags.
//! 5. Read back the final state.

use async_trait::async_trait;
use tracing::{debug, info};

use super::read::read_domain;
use super::{describe_active, require_id, Handler};
use crate::clients::DomainApi;
use crate::config::StabilizationConfig;
use crate::error::{HandlerError, Result};
use crate::model::{Domain, UpdateDomainInput};
use crate::progress::{OperationContext, ProgressEvent, ResourceHandlerRequest};
use crate::stabilize::{classify_encryption_update, PollOutcome, Stabilizer};
use crate::tags::{tags_to_add, tags_to_remove, to_wire_list};
use crate::TYPE_NAME;

pub struct UpdateHandler {
    stabilizer: Stabilizer,
}

impl UpdateHandler {
    pub fn new(stabilization: StabilizationConfig) -> Self {
        Self {
            stabilizer: Stabilizer::new(stabilization),
        }
    }
}

#[async_trait]
impl Handler for UpdateHandler {
    async fn handle(
        &self,
        request: &ResourceHandlerRequest,
        mut context: OperationContext,
        client: &dyn DomainApi,
    ) -> Result<ProgressEvent> {
        let model = &request.desired_resource_state;
        let domain_id = require_id(model)?;

        // 1. Pre-update check
        let current = describe_active(client, domain_id).await?;
        context.resource_arn = Some(current.arn);

        // 2. Update
        if context.update_submitted {
            debug!("Update of {} already submitted, resuming stabilization", domain_id);
        } else {
            client.update_domain(update_input(domain_id, model)?).await?;
            context.update_submitted = true;
            info!("{} {} has successfully been updated", TYPE_NAME, domain_id);
        }

        // 3. Stabilize
        let outcome = self
            .stabilizer
            .poll(&mut context, || async move {
                let domain = describe_active(client, domain_id).await?;
                classify_encryption_update(&domain)
            })
            .await?;
        match outcome {
            PollOutcome::Stable(Some(arn)) => context.resource_arn = Some(arn),
            PollOutcome::Stable(None) => {}
            PollOutcome::Suspended { delay } => {
                return Ok(ProgressEvent::in_progress(
                    model.clone(),
                    context,
                    delay.as_secs(),
                ));
            }
        }

        // 4. Tags
        let resource_arn = context
            .resource_arn
            .as_deref()
            .ok_or_else(|| HandlerError::InternalFailure("resource ARN was not captured".into()))?;
        reconcile_tags(client, request, resource_arn).await?;

        // 5. Final state
        read_domain(client, domain_id)
            .await
            .map(ProgressEvent::success)
    }
}

async fn reconcile_tags(
    client: &dyn DomainApi,
    request: &ResourceHandlerRequest,
    resource_arn: &str,
) -> Result<()> {
    let previous = request.previous_resource_tags.as_ref();
    let desired = request.desired_resource_tags.as_ref();

    // Null-valued entries are dropped here, so an add-set of only nulls
    // issues no call.
    let to_add = to_wire_list(Some(&tags_to_add(previous, desired)));
    if !to_add.is_empty() {
        info!("Adding {} tag(s) to {}", to_add.len(), resource_arn);
        client.tag_resource(resource_arn, to_add).await?;
    }

    let to_remove = tags_to_remove(previous, desired);
    if !to_remove.is_empty() {
        info!("Removing {} tag(s) from {}", to_remove.len(), resource_arn);
        client
            .untag_resource(resource_arn, to_remove.into_iter().collect())
            .await?;
    }

    Ok(())
}

fn update_input(domain_id: &str, model: &Domain) -> Result<UpdateDomainInput> {
    let name = model
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| HandlerError::InvalidRequest("Name is required".to_string()))?;
    let kms_key_id = model.kms_key_id().ok_or_else(|| {
        HandlerError::InvalidRequest(
            "ServerSideEncryptionConfiguration.KmsKeyId is required".to_string(),
        )
    })?;

    Ok(UpdateDomainInput {
        domain_id: domain_id.to_string(),
        name,
        description: model.description.clone(),
        kms_key_id: kms_key_id.to_string(),
    })
}

//! Create handler - creates a domain, then reads it back.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use super::read::read_domain;
use super::Handler;
use crate::clients::DomainApi;
use crate::error::{HandlerError, Result};
use crate::model::{CreateDomainInput, Domain, WireTag};
use crate::progress::{OperationContext, ProgressEvent, ResourceHandlerRequest};
use crate::tags::{tags_for_create, to_wire_list};
use crate::TYPE_NAME;

pub struct CreateHandler;

#[async_trait]
impl Handler for CreateHandler {
    async fn handle(
        &self,
        request: &ResourceHandlerRequest,
        _context: OperationContext,
        client: &dyn DomainApi,
    ) -> Result<ProgressEvent> {
        let model = &request.desired_resource_state;
        let token = client_token(request);

        let tags = tags_for_create(
            request.system_tags.as_ref(),
            request.desired_resource_tags.as_ref(),
        );
        let input = create_input(model, to_wire_list(Some(&tags)), token)?;

        info!("Creating {} {}", TYPE_NAME, input.name);
        let created = client.create_domain(input).await?;
        info!("{} {} successfully created", TYPE_NAME, created.domain_id);

        // Later stages address the domain by its service-generated ID.
        read_domain(client, &created.domain_id)
            .await
            .map(ProgressEvent::success)
    }
}

/// Idempotency token for the create call.
///
/// Retries of one host request carry the same request token, so a create
/// that succeeded remotely is not repeated. Without one the token is derived
/// from the account and domain name.
fn client_token(request: &ResourceHandlerRequest) -> String {
    if let Some(token) = request
        .client_request_token
        .as_deref()
        .filter(|t| !t.is_empty())
    {
        return token.to_string();
    }
    let seed = format!(
        "{}/{}/{}",
        TYPE_NAME,
        request.account_id.as_deref().unwrap_or_default(),
        request.desired_resource_state.name.as_deref().unwrap_or_default()
    );
    Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()).to_string()
}

fn create_input(
    model: &Domain,
    tags: Vec<WireTag>,
    client_token: String,
) -> Result<CreateDomainInput> {
    if let Some(id) = model.id() {
        return Err(HandlerError::InvalidRequest(format!(
            "DomainId is read-only and cannot be set on create (got '{}')",
            id
        )));
    }
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

    Ok(CreateDomainInput {
        name,
        description: model.description.clone(),
        kms_key_id: kms_key_id.to_string(),
        tags,
        client_token,
    })
}

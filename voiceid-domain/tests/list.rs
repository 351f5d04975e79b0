//! List handler tests.

mod common;

use common::{Call, MockDomainApi};
use voiceid_domain::model::{Domain, DomainPage, DomainStatus, RemoteDomain};
use voiceid_domain::{
    handle_request, Action, ErrorCode, OperationContext, OperationStatus, ProgressEvent,
    ResourceHandlerRequest, ServiceErrorKind,
};

fn domain(id: &str, status: DomainStatus) -> RemoteDomain {
    RemoteDomain {
        domain_id: id.to_string(),
        arn: format!("arn:voiceid:domain/{}", id),
        ..common::remote_domain(status)
    }
}

async fn list(api: &MockDomainApi, next_token: Option<&str>) -> ProgressEvent {
    let mut request = ResourceHandlerRequest::new(Domain::default());
    request.next_token = next_token.map(str::to_string);
    handle_request(
        Action::List,
        &request,
        OperationContext::default(),
        api,
        &common::config(),
    )
    .await
}

#[tokio::test]
async fn test_list_keeps_only_active_domains_in_order() {
    let api = MockDomainApi::new();
    api.on_list(Ok(DomainPage {
        domains: vec![
            domain("A", DomainStatus::Active),
            domain("B", DomainStatus::Suspended),
            domain("C", DomainStatus::Active),
        ],
        next_token: Some("page-2".to_string()),
    }));

    let event = list(&api, None).await;

    assert_eq!(event.status, OperationStatus::Success);
    assert_eq!(
        event.resource_models,
        Some(vec![Domain::reference("A"), Domain::reference("C")])
    );
    assert_eq!(event.next_token.as_deref(), Some("page-2"));
}

#[tokio::test]
async fn test_list_skips_pending_and_unrecognized_domains() {
    let api = MockDomainApi::new();
    api.on_list(Ok(DomainPage {
        domains: vec![
            domain("A", DomainStatus::Pending),
            domain("B", DomainStatus::Unrecognized(42)),
            domain("C", DomainStatus::Active),
        ],
        next_token: None,
    }));

    let event = list(&api, None).await;

    assert_eq!(event.resource_models, Some(vec![Domain::reference("C")]));
    assert_eq!(event.next_token, None);
}

#[tokio::test]
async fn test_list_passes_token_through() {
    let api = MockDomainApi::new();
    api.on_list(Ok(DomainPage::default()));

    let event = list(&api, Some("page-2")).await;

    assert_eq!(api.calls(), vec![Call::List(Some("page-2".to_string()))]);
    assert_eq!(event.resource_models, Some(vec![]));
}

#[tokio::test]
async fn test_list_failure_is_translated() {
    let api = MockDomainApi::new();
    api.on_list(common::service_error(ServiceErrorKind::Throttled));

    let event = list(&api, None).await;

    assert_eq!(event.status, OperationStatus::Failed);
    assert_eq!(event.error_code, Some(ErrorCode::Throttled));
    assert_eq!(event.resource_models, None);
}

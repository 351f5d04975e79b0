//! Shared test utilities for handler integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use voiceid_domain::clients::{DomainApi, ServiceResult};
use voiceid_domain::model::{
    CreateDomainInput, CreatedDomain, Domain, DomainPage, DomainStatus, EncryptionUpdateDetails,
    EncryptionUpdateStatus, RemoteDomain, ServerSideEncryptionConfiguration, Tag,
    UpdateDomainInput, WireTag,
};
use voiceid_domain::tags::TagMap;
use voiceid_domain::{
    HandlerConfig, ResourceHandlerRequest, ServiceError, ServiceErrorKind, StabilizationConfig,
};

pub const DOMAIN_ID: &str = "DomainId";
pub const DOMAIN_ARN: &str = "arn:voiceid:domain/DomainId";
pub const NAME: &str = "Name";
pub const DESCRIPTION: &str = "Description";
pub const KMS_KEY_ID: &str = "KmsKeyId";

/// A call recorded by [`MockDomainApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(CreateDomainInput),
    Describe(String),
    Update(UpdateDomainInput),
    Delete(String),
    List(Option<String>),
    ListTags(String),
    Tag(String, Vec<WireTag>),
    Untag(String, Vec<String>),
}

#[derive(Default)]
struct State {
    describe: VecDeque<ServiceResult<RemoteDomain>>,
    create: Option<ServiceResult<CreatedDomain>>,
    update: Option<ServiceResult<DomainStatus>>,
    delete: Option<ServiceResult<()>>,
    list: Option<ServiceResult<DomainPage>>,
    tags: Vec<WireTag>,
    tag_result: Option<ServiceResult<()>>,
    calls: Vec<Call>,
}

/// Scripted control plane.
///
/// Describe responses are replayed in order; the last one repeats for any
/// further call. Every call is recorded.
#[derive(Default)]
pub struct MockDomainApi {
    state: Mutex<State>,
}

impl MockDomainApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_describe(&self, responses: Vec<ServiceResult<RemoteDomain>>) {
        self.state.lock().unwrap().describe = responses.into();
    }

    pub fn on_create(&self, response: ServiceResult<CreatedDomain>) {
        self.state.lock().unwrap().create = Some(response);
    }

    pub fn on_update(&self, response: ServiceResult<DomainStatus>) {
        self.state.lock().unwrap().update = Some(response);
    }

    pub fn on_delete(&self, response: ServiceResult<()>) {
        self.state.lock().unwrap().delete = Some(response);
    }

    pub fn on_list(&self, response: ServiceResult<DomainPage>) {
        self.state.lock().unwrap().list = Some(response);
    }

    pub fn on_tag(&self, response: ServiceResult<()>) {
        self.state.lock().unwrap().tag_result = Some(response);
    }

    pub fn with_tags(&self, tags: &[(&str, &str)]) {
        self.state.lock().unwrap().tags = wire_tags(tags);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn describes(&self) -> usize {
        self.count(|c| matches!(c, Call::Describe(_)))
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn unscripted<T>(what: &str) -> ServiceResult<T> {
    Err(ServiceError::new(
        ServiceErrorKind::Unclassified,
        format!("unexpected {} call", what),
    ))
}

#[async_trait]
impl DomainApi for MockDomainApi {
    async fn create_domain(&self, input: CreateDomainInput) -> ServiceResult<CreatedDomain> {
        self.record(Call::Create(input));
        self.state
            .lock()
            .unwrap()
            .create
            .clone()
            .unwrap_or_else(|| unscripted("create"))
    }

    async fn describe_domain(&self, domain_id: &str) -> ServiceResult<RemoteDomain> {
        self.record(Call::Describe(domain_id.to_string()));
        let mut state = self.state.lock().unwrap();
        if state.describe.len() > 1 {
            return state.describe.pop_front().unwrap();
        }
        state.describe.front().cloned().unwrap_or_else(|| {
            Err(ServiceError::new(ServiceErrorKind::NotFound, "no such domain"))
        })
    }

    async fn update_domain(&self, input: UpdateDomainInput) -> ServiceResult<DomainStatus> {
        self.record(Call::Update(input));
        self.state
            .lock()
            .unwrap()
            .update
            .clone()
            .unwrap_or_else(|| unscripted("update"))
    }

    async fn delete_domain(&self, domain_id: &str) -> ServiceResult<()> {
        self.record(Call::Delete(domain_id.to_string()));
        self.state
            .lock()
            .unwrap()
            .delete
            .clone()
            .unwrap_or_else(|| unscripted("delete"))
    }

    async fn list_domains(&self, next_token: Option<&str>) -> ServiceResult<DomainPage> {
        self.record(Call::List(next_token.map(str::to_string)));
        self.state
            .lock()
            .unwrap()
            .list
            .clone()
            .unwrap_or_else(|| unscripted("list"))
    }

    async fn list_tags(&self, resource_arn: &str) -> ServiceResult<Vec<WireTag>> {
        self.record(Call::ListTags(resource_arn.to_string()));
        Ok(self.state.lock().unwrap().tags.clone())
    }

    async fn tag_resource(&self, resource_arn: &str, tags: Vec<WireTag>) -> ServiceResult<()> {
        self.record(Call::Tag(resource_arn.to_string(), tags));
        self.state
            .lock()
            .unwrap()
            .tag_result
            .clone()
            .unwrap_or(Ok(()))
    }

    async fn untag_resource(&self, resource_arn: &str, keys: Vec<String>) -> ServiceResult<()> {
        self.record(Call::Untag(resource_arn.to_string(), keys));
        Ok(())
    }
}

// =============================================================================
// Test Data
// =============================================================================

pub fn remote_domain(status: DomainStatus) -> RemoteDomain {
    RemoteDomain {
        domain_id: DOMAIN_ID.to_string(),
        arn: DOMAIN_ARN.to_string(),
        name: NAME.to_string(),
        description: Some(DESCRIPTION.to_string()),
        status,
        kms_key_id: Some(KMS_KEY_ID.to_string()),
        encryption_update: None,
    }
}

pub fn active() -> ServiceResult<RemoteDomain> {
    Ok(remote_domain(DomainStatus::Active))
}

pub fn suspended() -> ServiceResult<RemoteDomain> {
    Ok(remote_domain(DomainStatus::Suspended))
}

/// An active domain whose KMS key update is in the given phase.
pub fn encryption(update_status: EncryptionUpdateStatus) -> ServiceResult<RemoteDomain> {
    let mut domain = remote_domain(DomainStatus::Active);
    domain.encryption_update = Some(EncryptionUpdateDetails {
        update_status,
        old_kms_key_id: Some("OldKmsKeyId".to_string()),
        message: None,
    });
    Ok(domain)
}

pub fn service_error<T>(kind: ServiceErrorKind) -> ServiceResult<T> {
    Err(ServiceError::new(kind, format!("{} from control plane", kind)))
}

pub fn wire_tags(tags: &[(&str, &str)]) -> Vec<WireTag> {
    tags.iter()
        .map(|(k, v)| WireTag {
            key: k.to_string(),
            value: v.to_string(),
        })
        .collect()
}

pub fn tag_map(tags: &[(&str, Option<&str>)]) -> TagMap {
    tags.iter()
        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
        .collect::<HashMap<_, _>>()
}

/// The model the handlers are expected to read back.
pub fn resource_model() -> Domain {
    Domain {
        domain_id: Some(DOMAIN_ID.to_string()),
        name: Some(NAME.to_string()),
        description: Some(DESCRIPTION.to_string()),
        server_side_encryption_configuration: Some(ServerSideEncryptionConfiguration {
            kms_key_id: KMS_KEY_ID.to_string(),
        }),
        tags: Some(vec![
            Tag {
                key: "Key1".to_string(),
                value: "Value1".to_string(),
            },
            Tag {
                key: "Key2".to_string(),
                value: "Value2".to_string(),
            },
        ]),
    }
}

pub fn request() -> ResourceHandlerRequest {
    ResourceHandlerRequest::new(resource_model())
}

/// Short stabilization budget: probes at t=0, 5s and 10s.
pub fn short_stabilization() -> StabilizationConfig {
    StabilizationConfig::new(Duration::from_secs(10), Duration::from_secs(5))
}

/// Handler configuration with short budgets for both stabilizations.
pub fn config() -> HandlerConfig {
    HandlerConfig {
        update_stabilization: short_stabilization(),
        delete_stabilization: short_stabilization(),
    }
}

#![forbid(unsafe_code)]

use std::time::Duration;

use contact_contracts::{
    Contact, ContactDraft, ContactFilter, ContactId, ContactOrder, ContactSummary, ContactUpdate,
    ContractViolation, PageRequest, Validate,
};
use serde_json::Value;

use crate::decode;
use crate::documents;
use crate::error::{RemoteError, RemoteErrorKind};

pub const DEFAULT_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_USER_AGENT: &str = "contact_client/0.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStoreConfig {
    pub endpoint: String,
    pub timeout_ms: u32,
    pub user_agent: String,
}

impl ContactStoreConfig {
    pub fn v1(
        endpoint: String,
        timeout_ms: u32,
        user_agent: String,
    ) -> Result<Self, ContractViolation> {
        let config = Self {
            endpoint,
            timeout_ms,
            user_agent,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn defaults(endpoint: String) -> Result<Self, ContractViolation> {
        Self::v1(endpoint, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT.to_string())
    }
}

impl Validate for ContactStoreConfig {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.endpoint.trim().is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "contact_store_config.endpoint",
                reason: "must not be empty",
            });
        }
        if self.timeout_ms == 0 {
            return Err(ContractViolation::InvalidValue {
                field: "contact_store_config.timeout_ms",
                reason: "must be > 0",
            });
        }
        Ok(())
    }
}

/// The five contact operations. The flows layer depends on this seam so it
/// can run against an in-memory fake in tests.
pub trait ContactStore {
    fn list_contacts(
        &self,
        page: PageRequest,
        order: ContactOrder,
        filter: &ContactFilter,
    ) -> Result<Vec<Contact>, RemoteError>;

    fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, RemoteError>;

    fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, RemoteError>;

    fn update_contact(
        &self,
        id: ContactId,
        update: &ContactUpdate,
    ) -> Result<Option<Contact>, RemoteError>;

    fn delete_contact(&self, id: ContactId) -> Result<Option<ContactSummary>, RemoteError>;
}

/// Blocking GraphQL client. One round trip per operation, no retries, no
/// response caching.
pub struct ContactStoreClient {
    config: ContactStoreConfig,
    agent: ureq::Agent,
}

impl ContactStoreClient {
    pub fn new(config: ContactStoreConfig) -> Result<Self, ContractViolation> {
        config.validate()?;
        let timeout = Duration::from_millis(u64::from(config.timeout_ms).max(100));
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .user_agent(&config.user_agent)
            .build();
        Ok(Self { config, agent })
    }

    pub fn config(&self) -> &ContactStoreConfig {
        &self.config
    }

    fn post_operation(&self, document: &str, variables: Value) -> Result<Value, RemoteError> {
        let envelope = documents::request_envelope(document, variables);
        let response = self
            .agent
            .post(&self.config.endpoint)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_json(envelope)
            .map_err(RemoteError::from_ureq)?;
        serde_json::from_reader(response.into_reader())
            .map_err(|_| RemoteError::new(RemoteErrorKind::Decode))
    }
}

impl ContactStore for ContactStoreClient {
    fn list_contacts(
        &self,
        page: PageRequest,
        order: ContactOrder,
        filter: &ContactFilter,
    ) -> Result<Vec<Contact>, RemoteError> {
        let body = self.post_operation(
            documents::GET_CONTACT_LIST,
            documents::list_variables(page, order, filter),
        )?;
        let mut contacts = decode::contact_list(&body)?;
        // The window is server-enforced; truncating keeps the at-most-limit
        // property even against a misbehaving store.
        contacts.truncate(page.limit as usize);
        Ok(contacts)
    }

    fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, RemoteError> {
        let body = self.post_operation(
            documents::GET_CONTACT_DETAIL,
            documents::detail_variables(id),
        )?;
        decode::contact_by_pk(&body, "contact_by_pk")
    }

    fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, RemoteError> {
        let body = self.post_operation(
            documents::CREATE_CONTACT,
            documents::create_variables(draft),
        )?;
        decode::created_contact(&body)
    }

    fn update_contact(
        &self,
        id: ContactId,
        update: &ContactUpdate,
    ) -> Result<Option<Contact>, RemoteError> {
        let body = self.post_operation(
            documents::UPDATE_CONTACT,
            documents::update_variables(id, update),
        )?;
        decode::contact_by_pk(&body, "update_contact_by_pk")
    }

    fn delete_contact(&self, id: ContactId) -> Result<Option<ContactSummary>, RemoteError> {
        let body = self.post_operation(
            documents::DELETE_CONTACT,
            documents::delete_variables(id),
        )?;
        decode::deleted_summary(&body)
    }
}

//! Data-loading capabilities injected into the services.
//!
//! The collaborator API is untyped, so readers hand back raw JSON and leave
//! normalization to [`crate::projection`].
#![allow(async_fn_in_trait)]

use serde_json::Value;

use crate::domain::agent::NewAgent;
use crate::domain::lead::{NewComment, NewLead};
use crate::domain::types::{AgentId, LeadId};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;

pub use http::HttpRepository;

pub trait LeadReader {
    async fn list_leads(&self) -> RepositoryResult<Value>;
    async fn get_lead(&self, id: &LeadId) -> RepositoryResult<Value>;
}

pub trait LeadWriter {
    async fn create_lead(&self, lead: &NewLead) -> RepositoryResult<Value>;
    async fn update_lead(&self, id: &LeadId, lead: &NewLead) -> RepositoryResult<Value>;
    async fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()>;
    /// Appends a comment and returns the server's response, whose `data`
    /// holds the full, ordered comment list.
    async fn add_comment(&self, id: &LeadId, comment: &NewComment) -> RepositoryResult<Value>;
}

pub trait AgentReader {
    async fn list_agents(&self) -> RepositoryResult<Value>;
    async fn get_agent(&self, id: &AgentId) -> RepositoryResult<Value>;
}

pub trait AgentWriter {
    async fn create_agent(&self, agent: &NewAgent) -> RepositoryResult<Value>;
    async fn delete_agent(&self, id: &AgentId) -> RepositoryResult<()>;
}

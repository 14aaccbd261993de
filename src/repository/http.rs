//! Collaborator API client backed by `reqwest`.

use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::domain::agent::NewAgent;
use crate::domain::lead::{NewComment, NewLead};
use crate::domain::types::{AgentId, LeadId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AgentReader, AgentWriter, LeadReader, LeadWriter};

/// HTTP implementation of the repository traits.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    base_url: Url,
    client: Client,
}

impl HttpRepository {
    /// Fails when `base_url` is not an absolute URL that can carry a path.
    pub fn new(base_url: &str) -> RepositoryResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| RepositoryError::InvalidBaseUrl(format!("{base_url}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    /// Absolute URL for an API path given as segments.
    ///
    /// Each segment is percent-encoded, so identifiers cannot add path levels,
    /// a query or a fragment. `.` and `..` never name a record and are
    /// reported as not found.
    pub fn url(&self, segments: &[&str]) -> RepositoryResult<Url> {
        if segments.iter().any(|segment| matches!(*segment, "." | "..")) {
            return Err(RepositoryError::NotFound);
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RepositoryError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RepositoryError::from_status(status.as_u16(), &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get(&self, segments: &[&str]) -> RepositoryResult<Value> {
        self.send(self.client.get(self.url(segments)?)).await
    }

    async fn delete(&self, segments: &[&str]) -> RepositoryResult<()> {
        self.send(self.client.delete(self.url(segments)?)).await?;
        Ok(())
    }
}

impl LeadReader for HttpRepository {
    async fn list_leads(&self) -> RepositoryResult<Value> {
        self.get(&["leads"]).await
    }

    async fn get_lead(&self, id: &LeadId) -> RepositoryResult<Value> {
        self.get(&["leads", id.as_str()]).await
    }
}

impl LeadWriter for HttpRepository {
    async fn create_lead(&self, lead: &NewLead) -> RepositoryResult<Value> {
        self.send(self.client.post(self.url(&["leads"])?).json(lead))
            .await
    }

    async fn update_lead(&self, id: &LeadId, lead: &NewLead) -> RepositoryResult<Value> {
        self.send(self.client.put(self.url(&["leads", id.as_str()])?).json(lead))
            .await
    }

    async fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()> {
        self.delete(&["leads", id.as_str()]).await
    }

    async fn add_comment(&self, id: &LeadId, comment: &NewComment) -> RepositoryResult<Value> {
        self.send(
            self.client
                .post(self.url(&["leads", id.as_str(), "comments"])?)
                .json(comment),
        )
        .await
    }
}

impl AgentReader for HttpRepository {
    async fn list_agents(&self) -> RepositoryResult<Value> {
        self.get(&["api", "agent"]).await
    }

    async fn get_agent(&self, id: &AgentId) -> RepositoryResult<Value> {
        self.get(&["api", "agents", id.as_str()]).await
    }
}

impl AgentWriter for HttpRepository {
    async fn create_agent(&self, agent: &NewAgent) -> RepositoryResult<Value> {
        self.send(self.client.post(self.url(&["api", "agents"])?).json(agent))
            .await
    }

    async fn delete_agent(&self, id: &AgentId) -> RepositoryResult<()> {
        self.delete(&["api", "agents", id.as_str()]).await
    }
}

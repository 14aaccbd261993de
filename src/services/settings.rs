//! Services for the settings page, where leads and agents are removed.

use crate::domain::types::{AgentId, LeadId};
use crate::dto::agents::AgentRow;
use crate::dto::leads::LeadRow;
use crate::dto::settings::SettingsPageData;
use crate::projection::{agents_from_response, leads_from_response};
use crate::repository::{AgentReader, AgentWriter, LeadReader, LeadWriter};
use crate::services::ServiceResult;

/// Loads every agent and lead so they can be deleted.
pub async fn load_settings<R>(repo: &R) -> ServiceResult<SettingsPageData>
where
    R: LeadReader + AgentReader + ?Sized,
{
    let raw_agents = repo.list_agents().await.map_err(|err| {
        log::error!("Failed to load agents: {err}");
        err
    })?;
    let raw_leads = repo.list_leads().await.map_err(|err| {
        log::error!("Failed to load leads: {err}");
        err
    })?;

    let agents = agents_from_response(&raw_agents);
    let leads = leads_from_response(&raw_leads);

    Ok(SettingsPageData {
        agents: agents.records.iter().map(AgentRow::from).collect(),
        leads: leads.records.iter().map(LeadRow::from).collect(),
    })
}

pub async fn delete_agent<R>(repo: &R, agent_id: &str) -> ServiceResult<()>
where
    R: AgentWriter + ?Sized,
{
    let agent_id = AgentId::new(agent_id)?;

    repo.delete_agent(&agent_id).await.map_err(|err| {
        log::error!("Failed to delete agent {agent_id}: {err}");
        err
    })?;

    Ok(())
}

pub async fn delete_lead<R>(repo: &R, lead_id: &str) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    let lead_id = LeadId::new(lead_id)?;

    repo.delete_lead(&lead_id).await.map_err(|err| {
        log::error!("Failed to delete lead {lead_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::{Value, json};

    use super::*;
    use crate::domain::agent::NewAgent;
    use crate::domain::lead::{NewComment, NewLead};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::services::ServiceError;

    #[derive(Default)]
    struct MockRepo {
        deleted: RefCell<Vec<String>>,
    }

    impl LeadReader for MockRepo {
        async fn list_leads(&self) -> RepositoryResult<Value> {
            Ok(json!([{"_id": "l1", "name": "Acme"}]))
        }

        async fn get_lead(&self, _id: &LeadId) -> RepositoryResult<Value> {
            Err(RepositoryError::NotFound)
        }
    }

    impl LeadWriter for MockRepo {
        async fn create_lead(&self, _lead: &NewLead) -> RepositoryResult<Value> {
            Ok(Value::Null)
        }

        async fn update_lead(&self, _id: &LeadId, _lead: &NewLead) -> RepositoryResult<Value> {
            Ok(Value::Null)
        }

        async fn delete_lead(&self, id: &LeadId) -> RepositoryResult<()> {
            if id.as_str() == "missing" {
                return Err(RepositoryError::NotFound);
            }
            self.deleted.borrow_mut().push(format!("lead:{id}"));
            Ok(())
        }

        async fn add_comment(&self, _id: &LeadId, _comment: &NewComment) -> RepositoryResult<Value> {
            Ok(Value::Null)
        }
    }

    impl AgentReader for MockRepo {
        async fn list_agents(&self) -> RepositoryResult<Value> {
            Ok(json!({"agents": [{"_id": "a1", "name": "Priya"}]}))
        }

        async fn get_agent(&self, _id: &AgentId) -> RepositoryResult<Value> {
            Err(RepositoryError::NotFound)
        }
    }

    impl AgentWriter for MockRepo {
        async fn create_agent(&self, _agent: &NewAgent) -> RepositoryResult<Value> {
            Ok(Value::Null)
        }

        async fn delete_agent(&self, id: &AgentId) -> RepositoryResult<()> {
            self.deleted.borrow_mut().push(format!("agent:{id}"));
            Ok(())
        }
    }

    #[actix_web::test]
    async fn settings_lists_agents_and_leads() {
        let repo = MockRepo::default();

        let page = load_settings(&repo).await.unwrap();

        assert_eq!(page.agents.len(), 1);
        assert_eq!(page.agents[0].name, "Priya");
        assert_eq!(page.leads[0].name, "Acme");
    }

    #[actix_web::test]
    async fn deletes_are_forwarded() {
        let repo = MockRepo::default();

        delete_agent(&repo, "a1").await.unwrap();
        delete_lead(&repo, "l1").await.unwrap();

        assert_eq!(*repo.deleted.borrow(), vec!["agent:a1", "lead:l1"]);
    }

    #[actix_web::test]
    async fn deleting_unknown_lead_is_not_found() {
        let repo = MockRepo::default();

        let result = delete_lead(&repo, "missing").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn blank_id_is_rejected() {
        let repo = MockRepo::default();

        let result = delete_agent(&repo, " ").await;

        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
        assert!(repo.deleted.borrow().is_empty());
    }
}

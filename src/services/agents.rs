//! Services for listing, inspecting and creating sales agents.

use crate::domain::agent::{Agent, NewAgent};
use crate::domain::types::AgentId;
use crate::dto::agents::{
    AgentDetailData, AgentRow, AgentsPageData, NO_AGENT_LEADS_MESSAGE, NO_AGENTS_MESSAGE,
};
use crate::dto::leads::{FilterState, LeadFilterQuery, LeadRow, empty_state_message};
use crate::forms::agent::AddAgentForm;
use crate::projection::{
    Projection, ProjectionCriteria, agents_from_response, apply_criteria, leads_from_response,
    normalize_record,
};
use crate::repository::{AgentReader, AgentWriter};
use crate::services::{ServiceError, ServiceResult};

pub async fn load_agents_page<R>(repo: &R) -> ServiceResult<AgentsPageData>
where
    R: AgentReader + ?Sized,
{
    let raw = repo.list_agents().await.map_err(|err| {
        log::error!("Failed to load agents: {err}");
        err
    })?;

    let agents = agents_from_response(&raw);

    Ok(AgentsPageData {
        agents: agents.records.iter().map(AgentRow::from).collect(),
        empty_message: empty_state_message(&agents, NO_AGENTS_MESSAGE),
    })
}

/// Loads an agent and the leads assigned to them, projected with the
/// criteria from the query string.
///
/// A record without a `leads` field has no assigned leads.
pub async fn load_agent_detail<R>(
    repo: &R,
    agent_id: &str,
    query: &LeadFilterQuery,
) -> ServiceResult<AgentDetailData>
where
    R: AgentReader + ?Sized,
{
    let agent_id = AgentId::new(agent_id)?;

    let raw = repo.get_agent(&agent_id).await.map_err(|err| {
        log::error!("Failed to load agent {agent_id}: {err}");
        err
    })?;

    let record = normalize_record(&raw).ok_or_else(|| {
        log::warn!("Agent {agent_id} response has no record");
        ServiceError::InvalidFormat
    })?;

    let agent = Agent::from_value(1, record);
    let leads = record
        .get("leads")
        .map(leads_from_response)
        .unwrap_or(Projection {
            records: Vec::new(),
            invalid_format: false,
        });

    let criteria = ProjectionCriteria::from(query);
    let projection = Projection {
        records: apply_criteria(&leads.records, &criteria),
        invalid_format: leads.invalid_format,
    };

    Ok(AgentDetailData {
        agent: AgentRow::from(&agent),
        leads: projection.records.iter().map(LeadRow::from).collect(),
        empty_message: empty_state_message(&projection, NO_AGENT_LEADS_MESSAGE),
        filter: FilterState::from(&criteria),
    })
}

/// Validates the form and creates a new agent.
pub async fn add_agent<R>(repo: &R, form: AddAgentForm) -> ServiceResult<()>
where
    R: AgentWriter + ?Sized,
{
    let payload = NewAgent::try_from(form).map_err(|err| {
        log::error!("Failed to validate agent form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_agent(&payload).await.map_err(|err| {
        log::error!("Failed to create agent: {err}");
        err
    })?;

    Ok(())
}

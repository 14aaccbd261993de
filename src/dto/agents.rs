//! DTOs used by the sales agent pages.

use serde::Serialize;

use crate::domain::agent::Agent;
use crate::dto::leads::{FilterState, LeadRow};

pub const NO_AGENTS_MESSAGE: &str = "No agents found";
pub const NO_AGENT_LEADS_MESSAGE: &str = "No leads match the selected filters";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AgentRow {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: String,
}

impl From<&Agent> for AgentRow {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.clone(),
            name: agent.name.clone(),
            email: agent.email.clone(),
            phone: agent.phone.clone(),
            role: agent.role_label().to_string(),
        }
    }
}

/// Data required to render the agents list.
#[derive(Debug, Serialize)]
pub struct AgentsPageData {
    pub agents: Vec<AgentRow>,
    pub empty_message: Option<&'static str>,
}

/// Data required to render a single agent with its leads.
#[derive(Debug, Serialize)]
pub struct AgentDetailData {
    pub agent: AgentRow,
    pub leads: Vec<LeadRow>,
    pub empty_message: Option<&'static str>,
    pub filter: FilterState,
}

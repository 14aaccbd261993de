//! DTOs used by the settings page.

use serde::Serialize;

use crate::dto::agents::AgentRow;
use crate::dto::leads::LeadRow;

/// Agents and leads listed with delete actions.
#[derive(Debug, Serialize)]
pub struct SettingsPageData {
    pub agents: Vec<AgentRow>,
    pub leads: Vec<LeadRow>,
}

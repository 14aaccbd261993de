//! Add/edit lead form.

use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::NewLead;
use crate::domain::types::{AgentId, LeadName, LeadSource, LeadStatus, Priority};
use crate::forms::FormError;
use crate::forms::multi_select::{MultiSelect, SelectionKind};

/// Form data submitted by the add-lead and edit-lead pages.
///
/// `salesAgent` and `priority` are multi-valued and must be decoded with
/// `serde_html_form`.
#[derive(Debug, Deserialize, Validate)]
pub struct LeadForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub source: String,
    #[serde(default, rename = "salesAgent")]
    #[validate(length(min = 1))]
    pub sales_agent: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "timeToClose")]
    #[validate(range(min = 1))]
    pub time_to_close: i64,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub priority: Vec<String>,
}

impl LeadForm {
    /// Selected agents as a multi-select state.
    pub fn agent_selection(&self) -> MultiSelect {
        MultiSelect::with_selected(SelectionKind::Agents, self.sales_agent.iter().cloned())
    }

    /// Selected priorities as a multi-select state.
    pub fn priority_selection(&self) -> MultiSelect {
        MultiSelect::with_selected(SelectionKind::Priority, self.priority.iter().cloned())
    }
}

impl TryFrom<LeadForm> for NewLead {
    type Error = FormError;

    fn try_from(form: LeadForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let sales_agent = form
            .agent_selection()
            .serialize()
            .into_iter()
            .map(|id| AgentId::new(id).map_err(|_| FormError::InvalidAgentId))
            .collect::<Result<Vec<_>, _>>()?;

        let priority = form
            .priority_selection()
            .serialize()
            .into_iter()
            .map(Priority::from)
            .collect();

        let status = match form.status.trim() {
            "" => LeadStatus::New,
            status => LeadStatus::from(status),
        };

        Ok(NewLead {
            name: LeadName::new(form.name).map_err(|_| FormError::InvalidName)?,
            source: LeadSource::from(form.source.trim()),
            sales_agent,
            status,
            time_to_close: form.time_to_close,
            priority,
        })
    }
}

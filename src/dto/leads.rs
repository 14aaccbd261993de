//! DTOs shaped for the lead list, detail and form templates.

use serde::{Deserialize, Serialize};

use crate::domain::lead::{Comment, Lead};
use crate::forms::multi_select::{MultiSelect, SelectCandidate};
use crate::projection::report::StatusSummary;
use crate::projection::{Projection, ProjectionCriteria};

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid data format received";
pub const NO_LEADS_MESSAGE: &str = "No leads found";
pub const NO_AGENTS_ASSIGNED: &str = "No agents assigned";

/// Query parameters accepted by the lead list pages.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LeadFilterQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort: Option<String>,
}

impl From<&LeadFilterQuery> for ProjectionCriteria {
    fn from(query: &LeadFilterQuery) -> Self {
        ProjectionCriteria::from_raw(
            query.status.as_deref(),
            query.priority.as_deref(),
            query.sort.as_deref(),
        )
    }
}

/// Current criteria echoed back to the filter controls.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FilterState {
    pub status: String,
    pub priority: String,
    pub sort: String,
}

impl From<&ProjectionCriteria> for FilterState {
    fn from(criteria: &ProjectionCriteria) -> Self {
        Self {
            status: criteria.status.as_str().to_string(),
            priority: criteria
                .priority
                .as_ref()
                .map(|priority| priority.as_str().to_string())
                .unwrap_or_default(),
            sort: criteria.sort.as_str().to_string(),
        }
    }
}

/// One rendered row of a lead list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadRow {
    pub id: Option<String>,
    pub name: String,
    pub status: String,
    pub priority: String,
    pub agents: String,
    pub source: Option<String>,
    pub time_to_close: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

impl From<&Lead> for LeadRow {
    fn from(lead: &Lead) -> Self {
        let agents = if lead.sales_agents.is_empty() {
            NO_AGENTS_ASSIGNED.to_string()
        } else {
            lead.sales_agents
                .iter()
                .map(|agent| agent.label())
                .collect::<Vec<_>>()
                .join(", ")
        };

        Self {
            id: lead.id.clone(),
            name: lead.name.clone(),
            status: lead.status_label().to_string(),
            priority: lead.priority_labels().join(", "),
            agents,
            source: lead.source.as_ref().map(ToString::to_string),
            time_to_close: lead.time_to_close,
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
        }
    }
}

/// Message shown instead of an empty list, distinguishing a bad response
/// from a legitimately empty one.
pub fn empty_state_message<T>(
    projection: &Projection<T>,
    empty: &'static str,
) -> Option<&'static str> {
    if projection.invalid_format {
        Some(INVALID_FORMAT_MESSAGE)
    } else if projection.is_empty() {
        Some(empty)
    } else {
        None
    }
}

/// Data required to render the dashboard and the leads list.
#[derive(Debug, Serialize)]
pub struct LeadsPageData {
    pub leads: Vec<LeadRow>,
    pub empty_message: Option<&'static str>,
    pub summary: StatusSummary,
    pub filter: FilterState,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentRow {
    pub author: String,
    pub text: String,
    pub date: Option<String>,
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            author: comment.author.clone(),
            text: comment.text.clone(),
            date: comment
                .date
                .map(|date| date.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

/// Data required to render the lead detail page.
#[derive(Debug, Serialize)]
pub struct LeadDetailData {
    pub lead: LeadRow,
    pub comments: Vec<CommentRow>,
}

/// Checkbox option inside a rendered multi-select.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectOptionView {
    pub token: String,
    pub label: String,
    pub selected: bool,
}

/// Rendered multi-select: summary line plus the candidate checkboxes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SelectionView {
    pub summary: String,
    pub options: Vec<SelectOptionView>,
}

impl SelectionView {
    pub fn new<C: SelectCandidate>(select: &MultiSelect, candidates: &[C]) -> Self {
        let options = candidates
            .iter()
            .filter_map(|candidate| {
                let token = candidate.token()?;
                Some(SelectOptionView {
                    token: token.to_string(),
                    label: candidate.label().to_string(),
                    selected: select.contains(token),
                })
            })
            .collect();

        Self {
            summary: select.summarize(candidates),
            options,
        }
    }
}

/// Data required to render the add/edit lead form.
#[derive(Debug, Serialize)]
pub struct LeadFormPageData {
    /// `None` on the add form.
    pub lead_id: Option<String>,
    pub name: String,
    pub source: String,
    pub status: String,
    pub time_to_close: i64,
    pub agents: SelectionView,
    pub priorities: SelectionView,
    pub sources: Vec<String>,
    pub statuses: Vec<String>,
}

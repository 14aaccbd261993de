//! Record projection: turns a raw collaborator response plus user-chosen
//! criteria into the exact ordered list of records to render.
//!
//! Everything here is pure and synchronous. Recomputing a projection with the
//! same inputs always yields the same output, so it is safe to call on every
//! request.

use serde_json::Value;

use crate::domain::agent::Agent;
use crate::domain::lead::Lead;
use crate::domain::types::{LeadStatus, Priority};

pub mod normalize;
pub mod report;

pub use normalize::{NormalizedResponse, Resource, normalize_record, normalize_response};

/// Status criterion of a projection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Exact(LeadStatus),
}

impl StatusFilter {
    /// Parses the raw select value. `all` and the empty string mean no filter.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "all" => StatusFilter::All,
            status => StatusFilter::Exact(LeadStatus::from(status)),
        }
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Exact(status) => lead.status.as_ref() == Some(status),
        }
    }

    /// Value to echo back into the filter select.
    pub fn as_str(&self) -> &str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Exact(status) => status.as_str(),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the server order.
    #[default]
    Unsorted,
    /// Ascending by days to close.
    TimeToClose,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "timeToClose" => SortKey::TimeToClose,
            _ => SortKey::Unsorted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Unsorted => "",
            SortKey::TimeToClose => "timeToClose",
        }
    }
}

/// Filter and sort criteria held for a single view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectionCriteria {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub sort: SortKey,
}

impl ProjectionCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Builds criteria from raw select values; empty values disable a criterion.
    pub fn from_raw(status: Option<&str>, priority: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            status: status.map(StatusFilter::parse).unwrap_or_default(),
            priority: priority.filter(|p| !p.is_empty()).map(Priority::from),
            sort: sort.map(SortKey::parse).unwrap_or_default(),
        }
    }

    /// Returns `true` when the lead passes both the status and the priority filter.
    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.matches(lead)
            && self
                .priority
                .as_ref()
                .is_none_or(|priority| lead.has_priority(priority))
    }
}

/// Ordered records derived from a response, plus the invalid-format signal.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection<T> {
    pub records: Vec<T>,
    /// Set when the response had no recognizable record sequence.
    pub invalid_format: bool,
}

impl<T> Projection<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Normalizes a leads response into display-safe records, keeping server order.
pub fn leads_from_response(raw: &Value) -> Projection<Lead> {
    let normalized = normalize_response(raw, Resource::Leads);
    Projection {
        records: normalized
            .records()
            .iter()
            .enumerate()
            .map(|(index, value)| Lead::from_value(index + 1, value))
            .collect(),
        invalid_format: normalized.is_invalid_format(),
    }
}

/// Normalizes an agents response into display-safe records.
pub fn agents_from_response(raw: &Value) -> Projection<Agent> {
    let normalized = normalize_response(raw, Resource::Agents);
    Projection {
        records: normalized
            .records()
            .iter()
            .enumerate()
            .map(|(index, value)| Agent::from_value(index + 1, value))
            .collect(),
        invalid_format: normalized.is_invalid_format(),
    }
}

/// Filters and sorts already-normalized leads without touching the source.
pub fn apply_criteria(leads: &[Lead], criteria: &ProjectionCriteria) -> Vec<Lead> {
    let mut selected: Vec<Lead> = leads
        .iter()
        .filter(|lead| criteria.matches(lead))
        .cloned()
        .collect();

    if criteria.sort == SortKey::TimeToClose {
        // `sort_by_key` is stable: ties keep their server order.
        selected.sort_by_key(|lead| lead.time_to_close);
    }

    selected
}

/// Full projection of a leads response: normalize, filter, sort.
pub fn project_leads(raw: &Value, criteria: &ProjectionCriteria) -> Projection<Lead> {
    let normalized = leads_from_response(raw);
    Projection {
        records: apply_criteria(&normalized.records, criteria),
        invalid_format: normalized.invalid_format,
    }
}

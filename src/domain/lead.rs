//! Lead records as seen by the dashboard.
//!
//! The collaborator API gives no schema guarantees, so [`Lead::from_value`]
//! never fails: every record the server returned becomes a [`Lead`], with
//! placeholder values standing in for missing or malformed fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{
    AgentId, CommentText, LeadName, LeadSource, LeadStatus, Priority,
};

/// Label shown for leads without a status.
pub const NO_STATUS_LABEL: &str = "No Status";

/// Reference from a lead to one of its sales agents.
///
/// Before expansion the API sends bare identifiers; after expansion it sends
/// `{_id, name}` summaries.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AgentRef {
    Id(String),
    Summary { id: Option<String>, name: String },
}

impl AgentRef {
    /// Identifier of the referenced agent, when known.
    pub fn id(&self) -> Option<&str> {
        match self {
            AgentRef::Id(id) => Some(id),
            AgentRef::Summary { id, .. } => id.as_deref(),
        }
    }

    /// Human readable label: the agent name when expanded, the identifier otherwise.
    pub fn label(&self) -> &str {
        match self {
            AgentRef::Id(id) => id,
            AgentRef::Summary { name, .. } => name,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let id = record_id(value);
                let name = map
                    .get("name")
                    .and_then(non_empty_str)
                    .map(str::to_string)
                    .or_else(|| id.clone())?;
                Some(AgentRef::Summary { id, name })
            }
            other => scalar_string(other).map(AgentRef::Id),
        }
    }
}

/// Single comment left on a lead. Order is owned by the server.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Comment {
    pub author: String,
    pub text: String,
    pub date: Option<DateTime<Utc>>,
}

impl Comment {
    fn from_value(value: &Value) -> Self {
        let author = value
            .get("author")
            .and_then(non_empty_str)
            .unwrap_or("Unknown")
            .to_string();
        let text = value
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let date = value
            .get("date")
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|date| date.with_timezone(&Utc));
        Self { author, text, date }
    }
}

/// Parses a comments array, tolerating a missing or malformed field.
fn comments_from_value(value: &Value) -> Vec<Comment> {
    value
        .as_array()
        .map(|items| items.iter().map(Comment::from_value).collect())
        .unwrap_or_default()
}

/// Normalized lead record, safe to render.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Lead {
    pub id: Option<String>,
    /// Always populated: falls back to `fullName`, then to `Lead {n}`.
    pub name: String,
    pub status: Option<LeadStatus>,
    pub priority: Vec<Priority>,
    pub sales_agents: Vec<AgentRef>,
    pub source: Option<LeadSource>,
    pub time_to_close: i64,
    pub comments: Vec<Comment>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

impl Lead {
    /// Builds a lead from an arbitrary JSON value.
    ///
    /// `position` is the 1-based position of the record in the normalized
    /// response and only feeds the name placeholder.
    pub fn from_value(position: usize, value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(present_str).map(str::to_string);

        let name = field("name")
            .or_else(|| field("fullName"))
            .unwrap_or_else(|| format!("Lead {position}"));

        Self {
            id: record_id(value),
            name,
            status: field("status").map(LeadStatus::from),
            priority: value
                .get("priority")
                .map(string_collection)
                .unwrap_or_default()
                .into_iter()
                .map(Priority::from)
                .collect(),
            sales_agents: value
                .get("salesAgent")
                .map(agent_refs)
                .unwrap_or_default(),
            source: field("source").map(LeadSource::from),
            time_to_close: value
                .get("timeToClose")
                .map(parse_days)
                .unwrap_or_default(),
            comments: value
                .get("comments")
                .map(comments_from_value)
                .unwrap_or_default(),
            email: field("email"),
            phone: field("phone"),
            company: field("company"),
        }
    }

    /// Status label for display, `No Status` when absent.
    pub fn status_label(&self) -> &str {
        self.status
            .as_ref()
            .map(LeadStatus::as_str)
            .unwrap_or(NO_STATUS_LABEL)
    }

    /// Returns `true` when the priority collection contains `priority` exactly.
    pub fn has_priority(&self, priority: &Priority) -> bool {
        self.priority.contains(priority)
    }

    /// Identifiers of the referenced agents, in server order.
    pub fn agent_ids(&self) -> Vec<String> {
        self.sales_agents
            .iter()
            .filter_map(AgentRef::id)
            .map(str::to_string)
            .collect()
    }

    /// Priority labels, in server order.
    pub fn priority_labels(&self) -> Vec<String> {
        self.priority
            .iter()
            .map(|priority| priority.as_str().to_string())
            .collect()
    }
}

/// Outbound payload for creating or updating a lead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub name: LeadName,
    pub source: LeadSource,
    pub sales_agent: Vec<AgentId>,
    pub status: LeadStatus,
    pub time_to_close: i64,
    pub priority: Vec<Priority>,
}

/// Outbound payload for appending a comment to a lead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub author: String,
    pub text: CommentText,
}

impl NewComment {
    /// Author recorded for comments posted from the dashboard.
    pub const DASHBOARD_AUTHOR: &'static str = "You";

    #[must_use]
    pub fn new(text: CommentText) -> Self {
        Self {
            author: Self::DASHBOARD_AUTHOR.to_string(),
            text,
        }
    }
}

/// Extracts the record identifier, preferring `_id` over `id`.
pub(crate) fn record_id(value: &Value) -> Option<String> {
    value
        .get("_id")
        .and_then(scalar_string)
        .or_else(|| value.get("id").and_then(scalar_string))
}

pub(crate) fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Returns the string untouched unless it is blank. Exact-match filters
/// compare against this value.
fn present_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty_str(value).map(|_| s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_collection(value: &Value) -> Vec<String> {
    let label = |item: &Value| match item {
        Value::String(_) => present_str(item).map(str::to_string),
        other => scalar_string(other),
    };
    match value {
        Value::Array(items) => items.iter().filter_map(label).collect(),
        other => label(other).into_iter().collect(),
    }
}

fn agent_refs(value: &Value) -> Vec<AgentRef> {
    match value {
        Value::Array(items) => items.iter().filter_map(AgentRef::from_value).collect(),
        other => AgentRef::from_value(other).into_iter().collect(),
    }
}

/// Parses a day count; anything that is not a number yields 0.
fn parse_days(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn complete_record_is_parsed() {
        let lead = Lead::from_value(
            1,
            &json!({
                "_id": "l1",
                "name": "Acme",
                "status": "Qualified",
                "priority": ["High", "Low"],
                "salesAgent": [{"_id": "a1", "name": "Priya"}],
                "source": "Website",
                "timeToClose": 12,
                "comments": [{"author": "Sam", "text": "hi", "date": "2025-01-02T03:04:05Z"}],
                "email": "ops@acme.test",
            }),
        );

        assert_eq!(lead.id.as_deref(), Some("l1"));
        assert_eq!(lead.status, Some(LeadStatus::Qualified));
        assert_eq!(lead.priority, vec![Priority::High, Priority::Low]);
        assert_eq!(lead.agent_ids(), vec!["a1"]);
        assert_eq!(lead.sales_agents[0].label(), "Priya");
        assert_eq!(lead.source, Some(LeadSource::Website));
        assert_eq!(lead.time_to_close, 12);
        assert_eq!(lead.comments.len(), 1);
        assert!(lead.comments[0].date.is_some());
        assert_eq!(lead.email.as_deref(), Some("ops@acme.test"));
        assert_eq!(lead.phone, None);
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let lead = Lead::from_value(3, &json!({"name": "  "}));

        assert_eq!(lead.name, "Lead 3");
        assert_eq!(lead.status_label(), NO_STATUS_LABEL);
        assert_eq!(lead.time_to_close, 0);
        assert!(lead.priority.is_empty());
        assert!(lead.sales_agents.is_empty());
    }

    #[test]
    fn status_is_kept_verbatim_unless_blank() {
        let padded = Lead::from_value(1, &json!({"status": "New "}));
        assert_eq!(padded.status, Some(LeadStatus::Other("New ".to_string())));

        let blank = Lead::from_value(2, &json!({"status": "  "}));
        assert_eq!(blank.status, None);
    }

    #[test]
    fn non_object_record_is_kept_with_placeholders() {
        let lead = Lead::from_value(2, &json!("garbage"));
        assert_eq!(lead.name, "Lead 2");
        assert_eq!(lead.id, None);
    }

    #[test]
    fn full_name_is_second_choice() {
        let lead = Lead::from_value(1, &json!({"fullName": "Jane Roe", "id": 7}));
        assert_eq!(lead.name, "Jane Roe");
        assert_eq!(lead.id.as_deref(), Some("7"));
    }

    #[test]
    fn single_valued_priority_and_agent_are_collections() {
        let lead = Lead::from_value(1, &json!({"priority": "Medium", "salesAgent": "a9"}));
        assert_eq!(lead.priority, vec![Priority::Medium]);
        assert_eq!(lead.sales_agents, vec![AgentRef::Id("a9".to_string())]);
    }

    #[test]
    fn unparsable_time_to_close_defaults_to_zero() {
        assert_eq!(Lead::from_value(1, &json!({"timeToClose": "soon"})).time_to_close, 0);
        assert_eq!(Lead::from_value(1, &json!({"timeToClose": "14"})).time_to_close, 14);
        assert_eq!(Lead::from_value(1, &json!({"timeToClose": 4.7})).time_to_close, 4);
    }

    #[test]
    fn new_lead_serializes_in_api_shape() {
        let payload = NewLead {
            name: LeadName::new("Acme").unwrap(),
            source: LeadSource::ColdCall,
            sales_agent: vec![AgentId::new("a1").unwrap()],
            status: LeadStatus::New,
            time_to_close: 30,
            priority: vec![Priority::High],
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "Acme",
                "source": "Cold Call",
                "salesAgent": ["a1"],
                "status": "New",
                "timeToClose": 30,
                "priority": ["High"],
            })
        );
    }
}

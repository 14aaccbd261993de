use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::lead::{non_empty_str, record_id};
use crate::domain::types::{AgentEmail, AgentName, AgentRole, PhoneNumber};

/// Label shown for agents without a role.
pub const NO_ROLE_LABEL: &str = "No Role";

/// Normalized sales agent record, safe to render.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Agent {
    pub id: Option<String>,
    /// Always populated: falls back to `Agent {n}`.
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

impl Agent {
    /// Builds an agent from an arbitrary JSON value; never fails.
    pub fn from_value(position: usize, value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(non_empty_str).map(str::to_string);

        Self {
            id: record_id(value),
            name: field("name").unwrap_or_else(|| format!("Agent {position}")),
            email: field("email"),
            phone: field("phone"),
            role: field("role"),
        }
    }

    pub fn role_label(&self) -> &str {
        self.role.as_deref().unwrap_or(NO_ROLE_LABEL)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewAgent {
    pub name: AgentName,
    pub email: AgentEmail,
    pub phone: PhoneNumber,
    pub role: AgentRole,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn agent_fallbacks() {
        let agent = Agent::from_value(4, &json!({"id": "a4", "email": "x@y.z"}));
        assert_eq!(agent.id.as_deref(), Some("a4"));
        assert_eq!(agent.name, "Agent 4");
        assert_eq!(agent.role_label(), NO_ROLE_LABEL);
    }

    #[test]
    fn prefers_underscore_id() {
        let agent = Agent::from_value(1, &json!({"_id": "mongo", "id": "plain", "name": "Priya"}));
        assert_eq!(agent.id.as_deref(), Some("mongo"));
        assert_eq!(agent.name, "Priya");
    }
}

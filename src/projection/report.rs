//! Aggregates over normalized leads for the dashboard cards and the report page.

use serde::Serialize;

use crate::domain::lead::Lead;
use crate::domain::types::LeadStatus;

/// Label used for closed leads without an assigned agent.
pub const UNKNOWN_AGENT_LABEL: &str = "Unknown";

/// Label/count pair, kept in first-seen order.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

fn bump(buckets: &mut Vec<Bucket>, label: &str) {
    match buckets.iter_mut().find(|bucket| bucket.label == label) {
        Some(bucket) => bucket.count += 1,
        None => buckets.push(Bucket {
            label: label.to_string(),
            count: 1,
        }),
    }
}

/// Per-status lead counts shown on the dashboard cards.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct StatusSummary {
    pub new: usize,
    pub contracted: usize,
    pub qualified: usize,
    pub total: usize,
}

impl StatusSummary {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let count = |status: LeadStatus| {
            leads
                .iter()
                .filter(|lead| lead.status.as_ref() == Some(&status))
                .count()
        };

        Self {
            new: count(LeadStatus::New),
            contracted: count(LeadStatus::Contracted),
            qualified: count(LeadStatus::Qualified),
            total: leads.len(),
        }
    }
}

/// Data behind the report charts.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct LeadReport {
    pub closed: usize,
    pub in_pipeline: usize,
    /// Closed leads per agent display name.
    pub closed_by_agent: Vec<Bucket>,
    /// Leads per status label, `No Status` included.
    pub status_distribution: Vec<Bucket>,
}

impl LeadReport {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let mut report = LeadReport::default();

        for lead in leads {
            bump(&mut report.status_distribution, lead.status_label());

            if lead.status != Some(LeadStatus::Closed) {
                continue;
            }
            report.closed += 1;

            if lead.sales_agents.is_empty() {
                bump(&mut report.closed_by_agent, UNKNOWN_AGENT_LABEL);
            }
            for agent in &lead.sales_agents {
                bump(&mut report.closed_by_agent, agent.label());
            }
        }

        report.in_pipeline = leads.len() - report.closed;
        report
    }
}

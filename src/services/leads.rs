//! Services backing the dashboard, the lead list and the lead pages.

use crate::domain::agent::Agent;
use crate::domain::lead::{Lead, NewComment, NewLead};
use crate::domain::types::{LeadId, LeadSource, LeadStatus, Priority};
use crate::dto::leads::{
    CommentRow, FilterState, LeadDetailData, LeadFilterQuery, LeadFormPageData, LeadRow,
    LeadsPageData, NO_LEADS_MESSAGE, SelectionView, empty_state_message,
};
use crate::forms::comment::AddCommentForm;
use crate::forms::lead::LeadForm;
use crate::forms::multi_select::{MultiSelect, SelectionKind};
use crate::projection::report::StatusSummary;
use crate::projection::{
    Projection, ProjectionCriteria, agents_from_response, apply_criteria, leads_from_response,
    normalize_record,
};
use crate::repository::{AgentReader, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the lead list with the filter criteria taken from the query string.
///
/// The status summary always counts the unfiltered leads.
pub async fn load_leads_page<R>(repo: &R, query: &LeadFilterQuery) -> ServiceResult<LeadsPageData>
where
    R: LeadReader + ?Sized,
{
    let raw = repo.list_leads().await.map_err(|err| {
        log::error!("Failed to load leads: {err}");
        err
    })?;

    let all = leads_from_response(&raw);
    let criteria = ProjectionCriteria::from(query);
    let projection = Projection {
        records: apply_criteria(&all.records, &criteria),
        invalid_format: all.invalid_format,
    };

    Ok(LeadsPageData {
        leads: projection.records.iter().map(LeadRow::from).collect(),
        empty_message: empty_state_message(&projection, NO_LEADS_MESSAGE),
        summary: StatusSummary::from_leads(&all.records),
        filter: FilterState::from(&criteria),
    })
}

async fn fetch_lead<R>(repo: &R, lead_id: &LeadId) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    let raw = repo.get_lead(lead_id).await.map_err(|err| {
        log::error!("Failed to load lead {lead_id}: {err}");
        err
    })?;

    let record = normalize_record(&raw).ok_or_else(|| {
        log::warn!("Lead {lead_id} response has no record");
        ServiceError::InvalidFormat
    })?;

    Ok(Lead::from_value(1, record))
}

/// Loads a single lead together with its comments.
pub async fn load_lead_detail<R>(repo: &R, lead_id: &str) -> ServiceResult<LeadDetailData>
where
    R: LeadReader + ?Sized,
{
    let lead_id = LeadId::new(lead_id)?;
    let lead = fetch_lead(repo, &lead_id).await?;

    Ok(LeadDetailData {
        comments: lead.comments.iter().map(CommentRow::from).collect(),
        lead: LeadRow::from(&lead),
    })
}

/// Loads the add form when `lead_id` is `None`, the edit form otherwise.
pub async fn load_lead_form<R>(repo: &R, lead_id: Option<&str>) -> ServiceResult<LeadFormPageData>
where
    R: LeadReader + AgentReader + ?Sized,
{
    let lead = match lead_id {
        Some(lead_id) => {
            let lead_id = LeadId::new(lead_id)?;
            Some(fetch_lead(repo, &lead_id).await?)
        }
        None => None,
    };

    let raw_agents = repo.list_agents().await.map_err(|err| {
        log::error!("Failed to load agents: {err}");
        err
    })?;
    let agents = agents_from_response(&raw_agents);
    if agents.invalid_format {
        log::warn!("Agent options unavailable: invalid agents response");
    }

    Ok(build_form_page(lead.as_ref(), &agents.records))
}

fn build_form_page(lead: Option<&Lead>, agents: &[Agent]) -> LeadFormPageData {
    let agent_select = match lead {
        Some(lead) => MultiSelect::with_selected(SelectionKind::Agents, lead.agent_ids()),
        None => MultiSelect::new(SelectionKind::Agents),
    };
    let priority_select = match lead {
        Some(lead) => MultiSelect::with_selected(SelectionKind::Priority, lead.priority_labels()),
        None => MultiSelect::new(SelectionKind::Priority),
    };

    let status = lead
        .and_then(|lead| lead.status.clone())
        .unwrap_or(LeadStatus::New);
    let mut statuses: Vec<String> = LeadStatus::CHOICES.iter().map(ToString::to_string).collect();
    if !statuses.iter().any(|choice| choice == status.as_str()) {
        statuses.push(status.to_string());
    }

    LeadFormPageData {
        lead_id: lead.and_then(|lead| lead.id.clone()),
        name: lead.map(|lead| lead.name.clone()).unwrap_or_default(),
        source: lead
            .and_then(|lead| lead.source.as_ref())
            .map(ToString::to_string)
            .unwrap_or_default(),
        status: status.to_string(),
        time_to_close: lead.map(|lead| lead.time_to_close).unwrap_or(1),
        agents: SelectionView::new(&agent_select, agents),
        priorities: SelectionView::new(&priority_select, &Priority::CHOICES),
        sources: LeadSource::CHOICES.iter().map(ToString::to_string).collect(),
        statuses,
    }
}

/// Validates the form and creates a new lead.
pub async fn add_lead<R>(repo: &R, form: LeadForm) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    let payload = NewLead::try_from(form).map_err(|err| {
        log::error!("Failed to validate lead form: {err}");
        ServiceError::from(err)
    })?;

    repo.create_lead(&payload).await.map_err(|err| {
        log::error!("Failed to create lead: {err}");
        err
    })?;

    Ok(())
}

/// Validates the form and replaces the editable fields of an existing lead.
pub async fn update_lead<R>(repo: &R, lead_id: &str, form: LeadForm) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    let lead_id = LeadId::new(lead_id)?;
    let payload = NewLead::try_from(form).map_err(|err| {
        log::error!("Failed to validate lead form: {err}");
        ServiceError::from(err)
    })?;

    repo.update_lead(&lead_id, &payload).await.map_err(|err| {
        log::error!("Failed to update lead {lead_id}: {err}");
        err
    })?;

    Ok(())
}

/// Appends a comment to a lead. The detail page reloads the comment list.
pub async fn add_comment<R>(repo: &R, lead_id: &str, form: AddCommentForm) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    let lead_id = LeadId::new(lead_id)?;
    let comment = NewComment::try_from(form)?;

    repo.add_comment(&lead_id, &comment).await.map_err(|err| {
        log::error!("Failed to add comment to lead {lead_id}: {err}");
        err
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::{Value, json};

    use super::*;
    use crate::domain::types::AgentId;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    #[derive(Default)]
    struct MockRepo {
        leads: Value,
        lead: Option<Value>,
        agents: Value,
        created: RefCell<Vec<NewLead>>,
        updated: RefCell<Vec<(String, NewLead)>>,
        comments: RefCell<Vec<String>>,
    }

    impl LeadReader for MockRepo {
        async fn list_leads(&self) -> RepositoryResult<Value> {
            Ok(self.leads.clone())
        }

        async fn get_lead(&self, _id: &LeadId) -> RepositoryResult<Value> {
            self.lead.clone().ok_or(RepositoryError::NotFound)
        }
    }

    impl LeadWriter for MockRepo {
        async fn create_lead(&self, lead: &NewLead) -> RepositoryResult<Value> {
            self.created.borrow_mut().push(lead.clone());
            Ok(json!({"message": "Lead created"}))
        }

        async fn update_lead(&self, id: &LeadId, lead: &NewLead) -> RepositoryResult<Value> {
            self.updated
                .borrow_mut()
                .push((id.to_string(), lead.clone()));
            Ok(Value::Null)
        }

        async fn delete_lead(&self, _id: &LeadId) -> RepositoryResult<()> {
            Ok(())
        }

        async fn add_comment(&self, _id: &LeadId, comment: &NewComment) -> RepositoryResult<Value> {
            self.comments
                .borrow_mut()
                .push(comment.text.to_string());
            Ok(json!({"message": "Comment added"}))
        }
    }

    impl AgentReader for MockRepo {
        async fn list_agents(&self) -> RepositoryResult<Value> {
            Ok(self.agents.clone())
        }

        async fn get_agent(&self, _id: &AgentId) -> RepositoryResult<Value> {
            Err(RepositoryError::NotFound)
        }
    }

    fn lead_form() -> LeadForm {
        LeadForm {
            name: "Acme".to_string(),
            source: "Website".to_string(),
            sales_agent: vec!["a1".to_string(), "a1".to_string()],
            status: String::new(),
            time_to_close: 10,
            priority: vec!["High".to_string()],
        }
    }

    #[actix_web::test]
    async fn leads_page_filters_but_summarizes_everything() {
        let repo = MockRepo {
            leads: json!({"data": [
                {"_id": "1", "name": "A", "status": "New", "priority": ["High"]},
                {"_id": "2", "name": "B", "status": "Qualified", "priority": ["Low"]},
                {"_id": "3", "name": "C", "status": "New", "priority": ["Low"]},
            ]}),
            ..Default::default()
        };
        let query = LeadFilterQuery {
            status: Some("New".to_string()),
            priority: Some("Low".to_string()),
            sort: None,
        };

        let page = load_leads_page(&repo, &query).await.unwrap();

        assert_eq!(page.leads.len(), 1);
        assert_eq!(page.leads[0].name, "C");
        assert_eq!(page.empty_message, None);
        assert_eq!(page.summary.new, 2);
        assert_eq!(page.summary.qualified, 1);
        assert_eq!(page.filter.status, "New");
    }

    #[actix_web::test]
    async fn leads_page_reports_invalid_format() {
        let repo = MockRepo {
            leads: json!({"unexpected": true}),
            ..Default::default()
        };

        let page = load_leads_page(&repo, &LeadFilterQuery::default())
            .await
            .unwrap();

        assert!(page.leads.is_empty());
        assert_eq!(page.empty_message, Some("Invalid data format received"));
    }

    #[actix_web::test]
    async fn leads_page_reports_empty_list() {
        let repo = MockRepo {
            leads: json!([]),
            ..Default::default()
        };

        let page = load_leads_page(&repo, &LeadFilterQuery::default())
            .await
            .unwrap();

        assert_eq!(page.empty_message, Some("No leads found"));
    }

    #[actix_web::test]
    async fn lead_detail_reads_wrapped_record() {
        let repo = MockRepo {
            lead: Some(json!({"data": {
                "_id": "l1",
                "name": "Acme",
                "status": "Contracted",
                "comments": [{"author": "You", "text": "Called"}],
            }})),
            ..Default::default()
        };

        let detail = load_lead_detail(&repo, "l1").await.unwrap();

        assert_eq!(detail.lead.name, "Acme");
        assert_eq!(detail.lead.status, "Contracted");
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.comments[0].text, "Called");
    }

    #[actix_web::test]
    async fn lead_detail_maps_missing_lead_to_not_found() {
        let repo = MockRepo::default();

        let result = load_lead_detail(&repo, "missing").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn lead_detail_rejects_non_object_response() {
        let repo = MockRepo {
            lead: Some(json!(["not", "a", "record"])),
            ..Default::default()
        };

        let result = load_lead_detail(&repo, "l1").await;

        assert!(matches!(result, Err(ServiceError::InvalidFormat)));
    }

    #[actix_web::test]
    async fn edit_form_prepopulates_selections() {
        let repo = MockRepo {
            lead: Some(json!({
                "_id": "l1",
                "name": "Acme",
                "status": "Closed",
                "salesAgent": [{"_id": "a2", "name": "Ravi"}],
                "priority": ["Medium"],
                "timeToClose": 7,
            })),
            agents: json!({"agents": [
                {"_id": "a1", "name": "Priya"},
                {"_id": "a2", "name": "Ravi"},
            ]}),
            ..Default::default()
        };

        let page = load_lead_form(&repo, Some("l1")).await.unwrap();

        assert_eq!(page.lead_id.as_deref(), Some("l1"));
        assert_eq!(page.agents.summary, "Ravi");
        assert!(page.agents.options[1].selected);
        assert!(!page.agents.options[0].selected);
        assert_eq!(page.priorities.summary, "Medium");
        assert_eq!(page.status, "Closed");
        assert!(page.statuses.contains(&"Closed".to_string()));
        assert_eq!(page.time_to_close, 7);
    }

    #[actix_web::test]
    async fn add_form_starts_with_placeholders() {
        let repo = MockRepo {
            agents: json!({"agents": [{"_id": "a1", "name": "Priya"}]}),
            ..Default::default()
        };

        let page = load_lead_form(&repo, None).await.unwrap();

        assert_eq!(page.lead_id, None);
        assert_eq!(page.agents.summary, "Select Agents");
        assert_eq!(page.priorities.summary, "Select Priority");
        assert_eq!(page.priorities.options.len(), 3);
        assert_eq!(page.status, "New");
    }

    #[actix_web::test]
    async fn add_lead_sends_deduplicated_payload() {
        let repo = MockRepo::default();

        add_lead(&repo, lead_form()).await.unwrap();

        let created = repo.created.borrow();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].sales_agent.len(), 1);
        assert_eq!(created[0].status, LeadStatus::New);
    }

    #[actix_web::test]
    async fn add_lead_rejects_missing_priority() {
        let repo = MockRepo::default();
        let mut form = lead_form();
        form.priority.clear();

        let result = add_lead(&repo, form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.created.borrow().is_empty());
    }

    #[actix_web::test]
    async fn update_lead_targets_the_given_id() {
        let repo = MockRepo::default();

        update_lead(&repo, "l9", lead_form()).await.unwrap();

        let updated = repo.updated.borrow();
        assert_eq!(updated[0].0, "l9");
        assert_eq!(updated[0].1.name.as_str(), "Acme");
    }

    #[actix_web::test]
    async fn add_comment_sends_text_as_typed() {
        let repo = MockRepo::default();
        let form = AddCommentForm {
            text: "  Q3 & Q4 budget < 10k ".to_string(),
        };

        add_comment(&repo, "l1", form).await.unwrap();

        assert_eq!(*repo.comments.borrow(), vec!["Q3 & Q4 budget < 10k"]);
    }

    #[actix_web::test]
    async fn blank_comment_is_not_sent() {
        let repo = MockRepo::default();
        let form = AddCommentForm {
            text: "   ".to_string(),
        };

        let result = add_comment(&repo, "l1", form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert!(repo.comments.borrow().is_empty());
    }
}

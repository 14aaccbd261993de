use crate::projection::leads_from_response;
use crate::projection::report::LeadReport;
use crate::repository::LeadReader;
use crate::services::ServiceResult;

/// Aggregates all leads into the pipeline report.
pub async fn load_report<R>(repo: &R) -> ServiceResult<LeadReport>
where
    R: LeadReader + ?Sized,
{
    let raw = repo.list_leads().await.map_err(|err| {
        log::error!("Failed to load leads for report: {err}");
        err
    })?;

    let leads = leads_from_response(&raw);
    if leads.invalid_format {
        log::warn!("Report built from an invalid leads response");
    }

    Ok(LeadReport::from_leads(&leads.records))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::types::LeadId;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    struct MockRepo(Value);

    impl LeadReader for MockRepo {
        async fn list_leads(&self) -> RepositoryResult<Value> {
            Ok(self.0.clone())
        }

        async fn get_lead(&self, _id: &LeadId) -> RepositoryResult<Value> {
            Err(RepositoryError::NotFound)
        }
    }

    #[actix_web::test]
    async fn report_counts_closed_and_pipeline() {
        let repo = MockRepo(json!({"leads": [
            {"status": "Closed", "salesAgent": [{"_id": "a1", "name": "Priya"}]},
            {"status": "Closed"},
            {"status": "New"},
        ]}));

        let report = load_report(&repo).await.unwrap();

        assert_eq!(report.closed, 2);
        assert_eq!(report.in_pipeline, 1);
        let agents: Vec<_> = report
            .closed_by_agent
            .iter()
            .map(|bucket| (bucket.label.as_str(), bucket.count))
            .collect();
        assert_eq!(agents, vec![("Priya", 1), ("Unknown", 1)]);
    }

    #[actix_web::test]
    async fn invalid_response_gives_empty_report() {
        let repo = MockRepo(json!(42));

        let report = load_report(&repo).await.unwrap();

        assert_eq!(report.closed, 0);
        assert!(report.status_distribution.is_empty());
    }
}

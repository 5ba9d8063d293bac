use std::sync::Arc;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::dto::{JobFilter, JobPatch, NewJob};
use super::models::Job;
use crate::api::validation::{ErrorResponse, field_errors};
use crate::db::JobStore;

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input was missing or malformed
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: serde_json::Map<String, serde_json::Value>,
    },

    /// No job has the requested id
    #[error("Job not found: {0}")]
    NotFound(Uuid),

    /// Store or other unexpected failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    fn invalid(field: &str, message: String) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert(field.to_string(), serde_json::json!({"errors": [message.clone()]}));
        ServiceError::Validation { message, fields }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation {
            message: errors.to_string(),
            fields: field_errors(&errors),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Internal(e) => {
                error!("Internal error: {:#}", e);
                HttpResponse::InternalServerError().json(ErrorResponse::message(
                    "Failed to process request",
                    "An internal error occurred",
                ))
            }
            ServiceError::Validation { message, fields } => {
                warn!("Validation error: {}", message);
                HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::Value::Object(fields.clone()),
                })
            }
            ServiceError::NotFound(id) => {
                warn!("Job not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse::message(
                    "Not found",
                    format!("Job with id {} not found", id),
                ))
            }
        }
    }
}

/// Job service containing business logic
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Create a single job
    ///
    /// Validates the input, then stores it with a generated id and
    /// fresh timestamps. Nothing is stored when validation fails.
    pub async fn create_job(&self, input: NewJob) -> Result<Job, ServiceError> {
        input.check()?;

        info!("Service: Creating job with title={}", input.title);
        let job = self.store.insert(&input.into_job(Utc::now())).await?;
        info!("Service: Job created successfully with id={}", job.id);

        Ok(job)
    }

    /// List jobs matching the filter, newest first
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, ServiceError> {
        filter.validate()?;
        if let Some(message) = filter.salary_window_error() {
            return Err(ServiceError::invalid("minSalary", message));
        }

        let jobs = self.store.list(filter).await?;
        info!("Service: Listed {} jobs", jobs.len());
        Ok(jobs)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Merge the supplied fields over an existing job
    ///
    /// There is no concurrency check: of two overlapping updates, the later
    /// write wins.
    pub async fn update_job(&self, id: Uuid, patch: JobPatch) -> Result<Job, ServiceError> {
        patch.check()?;

        let mut job = self.get_job(id).await?;
        job.apply(patch);
        job.touch(Utc::now());

        // the row may have been deleted since it was read
        let job = self
            .store
            .update(&job)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        info!("Service: Job {} updated", id);
        Ok(job)
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(id));
        }

        info!("Service: Job {} deleted", id);
        Ok(())
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> anyhow::Result<()> {
        self.store.ping().await
    }

    pub async fn close(&self) {
        self.store.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::JobType;
    use crate::db::MemoryJobStore;
    use chrono::NaiveDate;

    fn service() -> JobService {
        JobService::new(Arc::new(MemoryJobStore::new()))
    }

    fn new_job(title: &str, location: &str, job_type: JobType, salary_range: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            company_name: "Acme".to_string(),
            location: location.to_string(),
            job_type,
            salary_range: salary_range.to_string(),
            description: "Build the job board".to_string(),
            requirements: "Rust".to_string(),
            responsibilities: "Ship features".to_string(),
            application_deadline: NaiveDate::from_ymd_opt(2030, 6, 30).unwrap(),
        }
    }

    #[tokio::test]
    async fn create_echoes_input_and_populates_system_fields() {
        let service = service();
        let input = new_job("Engineer", "Chennai", JobType::FullTime, "500000-900000");

        let job = service.create_job(input.clone()).await.unwrap();

        assert!(!job.id.is_nil());
        assert_eq!(job.title, input.title);
        assert_eq!(job.company_name, input.company_name);
        assert_eq!(job.location, input.location);
        assert_eq!(job.job_type, input.job_type);
        assert_eq!(job.salary_range, input.salary_range);
        assert_eq!(job.application_deadline, input.application_deadline);
        assert_eq!(job.created_at, job.updated_at);
    }

    #[tokio::test]
    async fn create_keeps_text_exactly_as_given() {
        let service = service();
        let mut input = new_job(" Engineer ", "Chennai", JobType::FullTime, "500000-900000");
        input.description = "  - build\n  - ship\n".to_string();

        let job = service.create_job(input.clone()).await.unwrap();
        assert_eq!(job.title, input.title);
        assert_eq!(job.description, input.description);

        let fetched = service.get_job(job.id).await.unwrap();
        assert_eq!(fetched, job);
    }

    #[tokio::test]
    async fn create_with_blank_field_persists_nothing() {
        let service = service();
        let mut input = new_job("Engineer", "Chennai", JobType::FullTime, "500000-900000");
        input.company_name = "  ".to_string();

        let err = service.create_job(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let jobs = service.list_jobs(&JobFilter::default()).await.unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn get_returns_created_job_and_not_found_for_unknown_id() {
        let service = service();
        let job = service
            .create_job(new_job("Engineer", "Chennai", JobType::FullTime, "1-2"))
            .await
            .unwrap();

        assert_eq!(service.get_job(job.id).await.unwrap(), job);

        let missing = Uuid::new_v4();
        let err = service.get_job(missing).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields_and_bumps_updated_at() {
        let service = service();
        let job = service
            .create_job(new_job("Engineer", "Chennai", JobType::FullTime, "500000-900000"))
            .await
            .unwrap();

        let patch = JobPatch {
            title: Some("Senior Engineer".to_string()),
            salary_range: Some("900000-1200000".to_string()),
            ..JobPatch::default()
        };
        let updated = service.update_job(job.id, patch).await.unwrap();

        assert_eq!(updated.title, "Senior Engineer");
        assert_eq!(updated.salary_range, "900000-1200000");
        assert_eq!(updated.id, job.id);
        assert_eq!(updated.company_name, job.company_name);
        assert_eq!(updated.location, job.location);
        assert_eq!(updated.job_type, job.job_type);
        assert_eq!(updated.description, job.description);
        assert_eq!(updated.application_deadline, job.application_deadline);
        assert_eq!(updated.created_at, job.created_at);
        assert!(updated.updated_at > job.updated_at);

        assert_eq!(service.get_job(job.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn invalid_update_changes_nothing() {
        let service = service();
        let job = service
            .create_job(new_job("Engineer", "Chennai", JobType::FullTime, "1-2"))
            .await
            .unwrap();

        let patch = JobPatch {
            title: Some(String::new()),
            location: Some("Madurai".to_string()),
            ..JobPatch::default()
        };
        let err = service.update_job(job.id, patch).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation { .. }));
        assert_eq!(service.get_job(job.id).await.unwrap(), job);
    }

    #[tokio::test]
    async fn update_unknown_job_is_not_found() {
        let err = service()
            .update_job(Uuid::new_v4(), JobPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_twice_fails_the_second_time() {
        let service = service();
        let job = service
            .create_job(new_job("Engineer", "Chennai", JobType::FullTime, "1-2"))
            .await
            .unwrap();

        service.delete_job(job.id).await.unwrap();
        assert!(matches!(
            service.get_job(job.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.delete_job(job.id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn list_by_job_type_is_exact_and_newest_first() {
        let service = service();
        for (title, job_type) in [
            ("Contract A", JobType::Contract),
            ("Intern", JobType::Internship),
            ("Contract B", JobType::Contract),
            ("Full", JobType::FullTime),
            ("Contract C", JobType::Contract),
        ] {
            service
                .create_job(new_job(title, "Chennai", job_type, "1-2"))
                .await
                .unwrap();
        }

        let filter = JobFilter {
            job_type: Some(JobType::Contract),
            ..JobFilter::default()
        };
        let jobs = service.list_jobs(&filter).await.unwrap();

        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|job| job.job_type == JobType::Contract));
        assert!(jobs.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(jobs[0].title, "Contract C");
    }

    #[tokio::test]
    async fn list_by_location_substring() {
        let service = service();
        let job = service
            .create_job(new_job("Engineer", "Chennai", JobType::FullTime, "500000-900000"))
            .await
            .unwrap();

        let chennai = JobFilter {
            location: Some("Chennai".to_string()),
            ..JobFilter::default()
        };
        let jobs = service.list_jobs(&chennai).await.unwrap();
        assert!(jobs.iter().any(|j| j.id == job.id));

        let madurai = JobFilter {
            location: Some("Madurai".to_string()),
            ..JobFilter::default()
        };
        let jobs = service.list_jobs(&madurai).await.unwrap();
        assert!(jobs.iter().all(|j| j.id != job.id));
    }

    #[tokio::test]
    async fn list_by_salary_window() {
        let service = service();
        for (title, salary) in [
            ("Low", "200000-300000"),
            ("Mid", "500000-900000"),
            ("High", "1500000-2000000"),
            ("Open", "negotiable"),
        ] {
            service
                .create_job(new_job(title, "Chennai", JobType::FullTime, salary))
                .await
                .unwrap();
        }

        let filter = JobFilter {
            min_salary: Some(400000),
            max_salary: Some(1000000),
            ..JobFilter::default()
        };
        let mut titles: Vec<String> = service
            .list_jobs(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|job| job.title)
            .collect();
        titles.sort();

        assert_eq!(titles, ["Mid", "Open"]);
    }

    #[tokio::test]
    async fn inverted_salary_window_is_rejected() {
        let filter = JobFilter {
            min_salary: Some(10),
            max_salary: Some(5),
            ..JobFilter::default()
        };
        let err = service().list_jobs(&filter).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }
}

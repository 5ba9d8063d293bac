use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use askama::Template;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::api::job::{Job, JobFilter, JobType, NewJob};
use crate::ui::UiError;
use crate::ui::client::JobsClient;
use crate::ui::fallback::{filter_locally, sample_jobs};
use crate::ui::pages::{BrowseParams, IndexPage, Listing};

/// Shared state of the browser pages
pub struct UiState {
    client: JobsClient,
    /// Last successful unfiltered listing
    cache: RwLock<Vec<Job>>,
}

impl UiState {
    pub fn new(client: JobsClient) -> Self {
        Self {
            client,
            cache: RwLock::new(Vec::new()),
        }
    }

    /// Fetch jobs through the API, falling back to cached or sample jobs
    pub async fn load(&self, filter: &JobFilter) -> Listing {
        match self.client.list(filter).await {
            Ok(jobs) => {
                if filter.is_empty() {
                    *self.cache.write().await = jobs.clone();
                }
                Listing::Loaded(jobs)
            }
            Err(e) => {
                warn!("Job API unavailable at {}: {}", self.client.base_url(), e);
                let cached = self.cache.read().await.clone();
                let source = if cached.is_empty() { sample_jobs() } else { cached };
                Listing::Fallback {
                    jobs: filter_locally(&source, filter),
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Fields of the create dialog, all as submitted
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobForm {
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub job_type: String,
    pub salary_start: String,
    pub salary_end: String,
    pub application_deadline: String,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
}

impl CreateJobForm {
    pub fn into_new_job(self) -> Result<NewJob, String> {
        let job_type = self
            .job_type
            .trim()
            .parse::<JobType>()
            .map_err(|e| e.to_string())?;
        let application_deadline =
            NaiveDate::parse_from_str(self.application_deadline.trim(), "%Y-%m-%d")
                .map_err(|e| format!("invalid application deadline: {}", e))?;
        let salary_range = match (self.salary_start.trim(), self.salary_end.trim()) {
            (start, "") => start.to_string(),
            ("", end) => end.to_string(),
            (start, end) => format!("{}-{}", start, end),
        };

        Ok(NewJob {
            title: self.title,
            company_name: self.company_name,
            location: self.location,
            job_type,
            salary_range,
            description: self.description,
            requirements: self.requirements,
            responsibilities: self.responsibilities,
            application_deadline,
        })
    }
}

#[get("/")]
async fn index(
    state: web::Data<UiState>,
    params: web::Query<BrowseParams>,
) -> Result<HttpResponse, UiError> {
    let listing = state.load(&params.to_filter()).await;
    let html = IndexPage::new(listing, &params, Utc::now()).render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

#[post("/jobs/new")]
async fn create_job(state: web::Data<UiState>, form: web::Form<CreateJobForm>) -> HttpResponse {
    let notice = match form.into_inner().into_new_job() {
        Ok(job) => match state.client.create(&job).await {
            Ok(created) => {
                info!("Created job {} from the browser form", created.id);
                "created"
            }
            Err(e) => {
                error!("Failed to create job through the API: {}", e);
                "create-failed"
            }
        },
        Err(e) => {
            warn!("Rejected job form: {}", e);
            "create-failed"
        }
    };

    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/?notice={}", notice)))
        .finish()
}

pub fn ui_config(config: &mut web::ServiceConfig) {
    config.service(index).service(create_job);
}

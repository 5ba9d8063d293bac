use askama::Template;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::job::{Job, JobFilter, JobType};

/// Locations offered by the filter panel and the create form
pub const LOCATIONS: [&str; 4] = ["Coimbatore", "Chennai", "Trichy", "Madurai"];

/// Query string of the listing page.
///
/// Everything arrives as text so a half-filled form never fails to
/// extract; salaries are in thousands.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowseParams {
    pub title: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    pub notice: Option<String>,
}

impl BrowseParams {
    /// API filter for these params; blank or unparseable values are dropped
    pub fn to_filter(&self) -> JobFilter {
        let mut min_salary = thousands(&self.min_salary);
        let mut max_salary = thousands(&self.max_salary);
        if let (Some(min), Some(max)) = (min_salary, max_salary) {
            if min > max {
                std::mem::swap(&mut min_salary, &mut max_salary);
            }
        }

        JobFilter {
            title: clean(&self.title),
            location: clean(&self.location),
            job_type: clean(&self.job_type).and_then(|job_type| job_type.parse().ok()),
            min_salary,
            max_salary,
        }
    }
}

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn thousands(value: &Option<String>) -> Option<i64> {
    clean(value)?
        .parse::<u32>()
        .ok()
        .map(|k| i64::from(k) * 1000)
}

/// What the listing page is showing
#[derive(Debug)]
pub enum Listing {
    /// Fresh results from the API
    Loaded(Vec<Job>),
    /// Cached or sample jobs filtered locally because the API failed
    Fallback { jobs: Vec<Job>, reason: String },
}

pub struct Notice {
    pub kind: &'static str,
    pub text: &'static str,
}

impl Notice {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "created" => Some(Notice {
                kind: "success",
                text: "Job created successfully.",
            }),
            "create-failed" => Some(Notice {
                kind: "error",
                text: "Could not create the job. Please check the form and try again.",
            }),
            _ => None,
        }
    }
}

pub struct SelectOption {
    pub value: &'static str,
    pub selected: bool,
}

pub struct JobCard {
    pub title: String,
    pub company_name: String,
    pub job_type: &'static str,
    pub location: String,
    pub salary: String,
    pub posted_hours: i64,
    pub deadline: String,
    pub description: String,
}

impl JobCard {
    pub fn new(job: &Job, now: DateTime<Utc>) -> Self {
        JobCard {
            title: job.title.clone(),
            company_name: job.company_name.clone(),
            job_type: job.job_type.as_str(),
            location: job.location.clone(),
            salary: format_salary(job),
            posted_hours: (now - job.created_at).num_hours().max(0),
            deadline: job.application_deadline.format("%d %b %Y").to_string(),
            description: job.description.clone(),
        }
    }
}

/// Upper salary bound as `80k` below one lakh, otherwise `12.0 LPA`
pub fn format_salary(job: &Job) -> String {
    match job.salary_bounds() {
        Some(bounds) if bounds.max < 100_000 => format!("{:.0}k", bounds.max as f64 / 1000.0),
        Some(bounds) => format!("{:.1} LPA", bounds.max as f64 / 100_000.0),
        None => job.salary_range.clone(),
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub cards: Vec<JobCard>,
    pub title: String,
    pub min_salary: String,
    pub max_salary: String,
    pub locations: Vec<SelectOption>,
    pub job_types: Vec<SelectOption>,
    pub form_locations: [&'static str; 4],
    pub form_job_types: Vec<&'static str>,
    pub stale_reason: Option<String>,
    pub notice: Option<Notice>,
}

impl IndexPage {
    pub fn new(listing: Listing, params: &BrowseParams, now: DateTime<Utc>) -> Self {
        let filter = params.to_filter();
        let (jobs, stale_reason) = match listing {
            Listing::Loaded(jobs) => (jobs, None),
            Listing::Fallback { jobs, reason } => (jobs, Some(reason)),
        };

        IndexPage {
            cards: jobs.iter().map(|job| JobCard::new(job, now)).collect(),
            title: clean(&params.title).unwrap_or_default(),
            min_salary: clean(&params.min_salary).unwrap_or_default(),
            max_salary: clean(&params.max_salary).unwrap_or_default(),
            locations: LOCATIONS
                .into_iter()
                .map(|location| SelectOption {
                    value: location,
                    selected: filter.location() == Some(location),
                })
                .collect(),
            job_types: JobType::ALL
                .into_iter()
                .map(|job_type| SelectOption {
                    value: job_type.as_str(),
                    selected: filter.job_type == Some(job_type),
                })
                .collect(),
            form_locations: LOCATIONS,
            form_job_types: JobType::ALL.iter().map(JobType::as_str).collect(),
            stale_reason,
            notice: params.notice.as_deref().and_then(Notice::from_code),
        }
    }
}

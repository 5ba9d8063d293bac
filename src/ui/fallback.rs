use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::api::job::{Job, JobFilter, JobType};

/// Jobs shown when the API could not be reached and nothing is cached
pub fn sample_jobs() -> Vec<Job> {
    let now = Utc::now();
    vec![
        Job {
            id: Uuid::from_u128(1),
            title: "Full Stack Developer".to_string(),
            company_name: "Amazon".to_string(),
            location: "Chennai".to_string(),
            job_type: JobType::FullTime,
            salary_range: "500000-1200000".to_string(),
            description: "We are looking for a skilled Full Stack Developer to join our team."
                .to_string(),
            requirements: String::new(),
            responsibilities: String::new(),
            application_deadline: NaiveDate::from_ymd_opt(2025, 5, 30).unwrap_or_default(),
            created_at: now,
            updated_at: now,
        },
        Job {
            id: Uuid::from_u128(2),
            title: "Node.js Developer".to_string(),
            company_name: "Tesla".to_string(),
            location: "Coimbatore".to_string(),
            job_type: JobType::Contract,
            salary_range: "400000-800000".to_string(),
            description: "Experienced Node.js developer needed for our backend team.".to_string(),
            requirements: String::new(),
            responsibilities: String::new(),
            application_deadline: NaiveDate::from_ymd_opt(2025, 5, 15).unwrap_or_default(),
            created_at: now,
            updated_at: now,
        },
    ]
}

/// Filter already-fetched jobs without the API.
///
/// Looser than the server: the title matches case-insensitively, the
/// location must be equal, and jobs without salary bounds always pass.
pub fn filter_locally(jobs: &[Job], filter: &JobFilter) -> Vec<Job> {
    let title = filter.title().map(str::to_lowercase);
    jobs.iter()
        .filter(|job| {
            title
                .as_deref()
                .map_or(true, |title| job.title.to_lowercase().contains(title))
                && filter
                    .location()
                    .map_or(true, |location| job.location == location)
                && filter.job_type.map_or(true, |job_type| job.job_type == job_type)
                && job.salary_bounds().map_or(true, |bounds| {
                    bounds.overlaps(filter.min_salary, filter.max_salary)
                })
        })
        .cloned()
        .collect()
}

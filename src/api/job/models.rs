use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::dto::JobPatch;
use super::salary::SalaryBounds;

/// Employment type of a job posting
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "job_type")]
pub enum JobType {
    #[default]
    #[serde(rename = "Full-time")]
    #[sqlx(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    #[sqlx(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Contract")]
    #[sqlx(rename = "Contract")]
    Contract,
    #[serde(rename = "Internship")]
    #[sqlx(rename = "Internship")]
    Internship,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
    ];

    /// Label used on the wire, in the database and in the UI
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown job type: {0}")]
pub struct UnknownJobType(pub String);

impl FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str() == s)
            .ok_or_else(|| UnknownJobType(s.to_string()))
    }
}

/// A job posting, the single entity of the job board
///
/// This is the one shape shared by the REST API, the store and the
/// browser UI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_range: String,
    pub description: String,
    pub requirements: String,
    pub responsibilities: String,
    pub application_deadline: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Numeric bounds decomposed from the free-form salary range, if any
    pub fn salary_bounds(&self) -> Option<SalaryBounds> {
        SalaryBounds::parse(&self.salary_range)
    }

    /// Merge the supplied patch fields over this job.
    ///
    /// Only the fields known to [`JobPatch`] can be written; `id` and
    /// `created_at` are never touched.
    pub fn apply(&mut self, patch: JobPatch) {
        let JobPatch {
            title,
            company_name,
            location,
            job_type,
            salary_range,
            description,
            requirements,
            responsibilities,
            application_deadline,
        } = patch;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(company_name) = company_name {
            self.company_name = company_name;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(job_type) = job_type {
            self.job_type = job_type;
        }
        if let Some(salary_range) = salary_range {
            self.salary_range = salary_range;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(requirements) = requirements {
            self.requirements = requirements;
        }
        if let Some(responsibilities) = responsibilities {
            self.responsibilities = responsibilities;
        }
        if let Some(application_deadline) = application_deadline {
            self.application_deadline = application_deadline;
        }
    }

    /// Bump `updated_at` so that it strictly increases.
    ///
    /// Postgres keeps microsecond precision, so the minimum step is one
    /// microsecond.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at + Duration::microseconds(1));
    }
}

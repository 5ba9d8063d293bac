use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use super::models::{Job, JobType};

/// Input for creating a job
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[validate(length(min = 1, max = 255, message = "Title is required (max 255 characters)"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Company name is required (max 255 characters)"
    ))]
    pub company_name: String,

    #[validate(length(min = 1, max = 255, message = "Location is required (max 255 characters)"))]
    pub location: String,

    #[serde(default)]
    pub job_type: JobType,

    #[validate(length(min = 1, max = 50, message = "Salary range is required (max 50 characters)"))]
    pub salary_range: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: String,

    #[validate(length(min = 1, message = "Responsibilities are required"))]
    pub responsibilities: String,

    pub application_deadline: NaiveDate,
}

impl NewJob {
    /// Run the field rules and also reject whitespace-only text.
    /// Values are stored exactly as given.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        reject_blank(
            self.validate(),
            [
                ("title", Some(&self.title)),
                ("company_name", Some(&self.company_name)),
                ("location", Some(&self.location)),
                ("salary_range", Some(&self.salary_range)),
                ("description", Some(&self.description)),
                ("requirements", Some(&self.requirements)),
                ("responsibilities", Some(&self.responsibilities)),
            ],
        )
    }

    /// Build the stored record with a fresh id and timestamps
    pub fn into_job(self, now: DateTime<Utc>) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: self.title,
            company_name: self.company_name,
            location: self.location,
            job_type: self.job_type,
            salary_range: self.salary_range,
            description: self.description,
            requirements: self.requirements,
            responsibilities: self.responsibilities,
            application_deadline: self.application_deadline,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a job; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Company name must be 1-255 characters"))]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "Salary range must be 1-50 characters"))]
    pub salary_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Requirements cannot be empty"))]
    pub requirements: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Responsibilities cannot be empty"))]
    pub responsibilities: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
}

impl JobPatch {
    /// Same rules as [`NewJob::check`], applied to the supplied fields only
    pub fn check(&self) -> Result<(), ValidationErrors> {
        reject_blank(
            self.validate(),
            [
                ("title", self.title.as_ref()),
                ("company_name", self.company_name.as_ref()),
                ("location", self.location.as_ref()),
                ("salary_range", self.salary_range.as_ref()),
                ("description", self.description.as_ref()),
                ("requirements", self.requirements.as_ref()),
                ("responsibilities", self.responsibilities.as_ref()),
            ],
        )
    }
}

/// Query parameters narrowing a job listing
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Substring of the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Substring of the location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,

    /// Lower edge of the salary window, in whole currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "minSalary cannot be negative"))]
    pub min_salary: Option<i64>,

    /// Upper edge of the salary window, in whole currency units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "maxSalary cannot be negative"))]
    pub max_salary: Option<i64>,
}

impl JobFilter {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    /// True when no predicate would narrow the listing
    pub fn is_empty(&self) -> bool {
        self.title().is_none()
            && self.location().is_none()
            && self.job_type.is_none()
            && self.min_salary.is_none()
            && self.max_salary.is_none()
    }

    /// `Some(message)` when the salary window is inverted
    pub fn salary_window_error(&self) -> Option<String> {
        match (self.min_salary, self.max_salary) {
            (Some(min), Some(max)) if min > max => Some(format!(
                "minSalary ({}) must not exceed maxSalary ({})",
                min, max
            )),
            _ => None,
        }
    }

    /// Store-side predicate, mirrored by the SQL the repository builds.
    ///
    /// Title and location are case-sensitive substrings, the job type is
    /// exact and jobs whose salary cannot be decomposed always pass the
    /// salary window.
    pub fn matches(&self, job: &Job) -> bool {
        self.title().map_or(true, |title| job.title.contains(title))
            && self
                .location()
                .map_or(true, |location| job.location.contains(location))
            && self.job_type.map_or(true, |job_type| job.job_type == job_type)
            && job
                .salary_bounds()
                .map_or(true, |bounds| bounds.overlaps(self.min_salary, self.max_salary))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Add a `blank` error for every non-empty field that is only whitespace.
/// Empty fields are already reported by their length rule.
fn reject_blank<const N: usize>(
    validated: Result<(), ValidationErrors>,
    fields: [(&'static str, Option<&String>); N],
) -> Result<(), ValidationErrors> {
    let mut errors = validated.err().unwrap_or_else(ValidationErrors::new);

    for (field, value) in fields {
        if let Some(value) = value.filter(|v| !v.is_empty() && v.trim().is_empty()) {
            let mut error = ValidationError::new("blank");
            error.message = Some(format!("{} cannot be blank", field).into());
            error.add_param("value".into(), value);
            errors.add(field, error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::JobStore;
use crate::api::job::{Job, JobFilter};

const INSERT_JOB: &str = r#"
    INSERT INTO jobs (
        id, title, company_name, location, job_type, salary_range,
        salary_min, salary_max, description, requirements, responsibilities,
        application_deadline, created_at, updated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
    RETURNING id, title, company_name, location, job_type, salary_range,
              description, requirements, responsibilities,
              application_deadline, created_at, updated_at
"#;

const UPDATE_JOB: &str = r#"
    UPDATE jobs
    SET title = $2, company_name = $3, location = $4, job_type = $5,
        salary_range = $6, salary_min = $7, salary_max = $8,
        description = $9, requirements = $10, responsibilities = $11,
        application_deadline = $12, updated_at = $13
    WHERE id = $1
    RETURNING id, title, company_name, location, job_type, salary_range,
              description, requirements, responsibilities,
              application_deadline, created_at, updated_at
"#;

const SELECT_JOB: &str = r#"
    SELECT id, title, company_name, location, job_type, salary_range,
           description, requirements, responsibilities,
           application_deadline, created_at, updated_at
    FROM jobs
    WHERE id = $1
"#;

const SELECT_JOBS: &str = "SELECT id, title, company_name, location, job_type, salary_range, \
     description, requirements, responsibilities, application_deadline, created_at, updated_at \
     FROM jobs WHERE TRUE";

/// PostgreSQL-backed job store
pub struct JobRepository {
    pool: Pool<Postgres>,
}

impl JobRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Build the listing query for a filter.
    ///
    /// Every filter value is bound as a parameter. `strpos` keeps the
    /// substring match literal, so `%` and `_` in user input carry no
    /// wildcard meaning.
    fn list_query(filter: &JobFilter) -> QueryBuilder<'_, Postgres> {
        let mut query = QueryBuilder::new(SELECT_JOBS);

        if let Some(title) = filter.title() {
            query.push(" AND strpos(title, ").push_bind(title).push(") > 0");
        }
        if let Some(location) = filter.location() {
            query
                .push(" AND strpos(location, ")
                .push_bind(location)
                .push(") > 0");
        }
        if let Some(job_type) = filter.job_type {
            query.push(" AND job_type = ").push_bind(job_type);
        }
        // Rows without decomposed bounds stay in salary-filtered results
        if let Some(min_salary) = filter.min_salary {
            query
                .push(" AND (salary_max IS NULL OR salary_max >= ")
                .push_bind(min_salary)
                .push(")");
        }
        if let Some(max_salary) = filter.max_salary {
            query
                .push(" AND (salary_min IS NULL OR salary_min <= ")
                .push_bind(max_salary)
                .push(")");
        }

        query.push(" ORDER BY created_at DESC");
        query
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn insert(&self, job: &Job) -> anyhow::Result<Job> {
        debug!("Inserting job: id={}, title={}", job.id, job.title);

        let bounds = job.salary_bounds();
        let row = sqlx::query_as::<_, Job>(INSERT_JOB)
            .bind(job.id)
            .bind(&job.title)
            .bind(&job.company_name)
            .bind(&job.location)
            .bind(job.job_type)
            .bind(&job.salary_range)
            .bind(bounds.map(|b| b.min))
            .bind(bounds.map(|b| b.max))
            .bind(&job.description)
            .bind(&job.requirements)
            .bind(&job.responsibilities)
            .bind(job.application_deadline)
            .bind(job.created_at)
            .bind(job.updated_at)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to insert job {}", job.id))?;

        Ok(row)
    }

    async fn list(&self, filter: &JobFilter) -> anyhow::Result<Vec<Job>> {
        let mut query = Self::list_query(filter);
        debug!("Listing jobs: {}", query.sql());

        let rows = query
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await
            .context("failed to list jobs")?;

        debug!("Listed {} jobs", rows.len());
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        sqlx::query_as::<_, Job>(SELECT_JOB)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to fetch job {}", id))
    }

    async fn update(&self, job: &Job) -> anyhow::Result<Option<Job>> {
        debug!("Updating job: id={}", job.id);

        let bounds = job.salary_bounds();
        sqlx::query_as::<_, Job>(UPDATE_JOB)
            .bind(job.id)
            .bind(&job.title)
            .bind(&job.company_name)
            .bind(&job.location)
            .bind(job.job_type)
            .bind(&job.salary_range)
            .bind(bounds.map(|b| b.min))
            .bind(bounds.map(|b| b.max))
            .bind(&job.description)
            .bind(&job.requirements)
            .bind(&job.responsibilities)
            .bind(job.application_deadline)
            .bind(job.updated_at)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to update job {}", job.id))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete job {}", id))?;

        debug!("Deleted job {}: {} rows affected", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("database ping failed")?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::JobType;

    fn sql(filter: &JobFilter) -> String {
        JobRepository::list_query(filter).sql().to_string()
    }

    #[test]
    fn unfiltered_listing_is_ordered_newest_first() {
        let sql = sql(&JobFilter::default());

        assert!(sql.starts_with("SELECT id, title"));
        assert!(sql.ends_with("FROM jobs WHERE TRUE ORDER BY created_at DESC"));
        assert!(!sql.contains('$'));
    }

    #[test]
    fn predicates_are_bound_in_order() {
        let filter = JobFilter {
            title: Some("Engineer".to_string()),
            location: Some("Chennai".to_string()),
            job_type: Some(JobType::Contract),
            min_salary: None,
            max_salary: None,
        };
        let sql = sql(&filter);

        assert!(sql.contains("AND strpos(title, $1) > 0"));
        assert!(sql.contains("AND strpos(location, $2) > 0"));
        assert!(sql.contains("AND job_type = $3"));
        assert!(!sql.contains("Engineer"));
    }

    #[test]
    fn salary_window_keeps_rows_without_bounds() {
        let filter = JobFilter {
            min_salary: Some(400000),
            max_salary: Some(800000),
            ..JobFilter::default()
        };
        let sql = sql(&filter);

        assert!(sql.contains("AND (salary_max IS NULL OR salary_max >= $1)"));
        assert!(sql.contains("AND (salary_min IS NULL OR salary_min <= $2)"));
    }

    #[test]
    fn empty_strings_add_no_predicate() {
        let filter = JobFilter {
            title: Some(String::new()),
            ..JobFilter::default()
        };

        assert!(!sql(&filter).contains("strpos"));
    }
}

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::api::job::{Job, JobFilter, NewJob};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to job API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job API answered {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// HTTP client for the job REST API, used by the browser pages
#[derive(Clone)]
pub struct JobsClient {
    http: reqwest::Client,
    base_url: String,
}

impl JobsClient {
    /// `base_url` includes the `/api` prefix, e.g. `http://127.0.0.1:3001/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch jobs matching the filter; absent filter fields are not sent
    pub async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, ClientError> {
        debug!("Fetching jobs from {} with {:?}", self.base_url, filter);
        let response = self
            .http
            .get(format!("{}/jobs", self.base_url))
            .query(filter)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create(&self, job: &NewJob) -> Result<Job, ClientError> {
        let response = self
            .http
            .post(format!("{}/jobs", self.base_url))
            .json(job)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::api::job::models::fixtures;
    use crate::api::job::JobType;

    #[tokio::test]
    async fn list_sends_only_present_filters() {
        let mut server = mockito::Server::new_async().await;
        let job = fixtures::job("Engineer", "Chennai", JobType::Contract, "500000-900000");
        let mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("location".into(), "Chennai".into()),
                Matcher::UrlEncoded("jobType".into(), "Contract".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&vec![job.clone()]).unwrap())
            .create_async()
            .await;

        let client = JobsClient::new(format!("{}/api/", server.url()));
        let filter = JobFilter {
            location: Some("Chennai".to_string()),
            job_type: Some(JobType::Contract),
            ..JobFilter::default()
        };
        let jobs = client.list(&filter).await.unwrap();

        mock.assert_async().await;
        assert_eq!(jobs, vec![job]);
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/jobs")
            .with_status(400)
            .with_body(r#"{"error":"Validation failed"}"#)
            .create_async()
            .await;

        let client = JobsClient::new(format!("{}/api", server.url()));
        let job: NewJob = serde_json::from_value(json!({
            "title": "Engineer",
            "companyName": "Acme",
            "location": "Chennai",
            "salaryRange": "1-2",
            "description": "d",
            "requirements": "r",
            "responsibilities": "s",
            "applicationDeadline": "2030-01-01"
        }))
        .unwrap();

        match client.create(&job).await {
            Err(ClientError::Api { status, body }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("Validation failed"));
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() {
        let client = JobsClient::new("http://127.0.0.1:9/api");
        let err = client.list(&JobFilter::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}

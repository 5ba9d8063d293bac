//! Server-rendered job board pages.
//!
//! The pages talk to the REST API over HTTP like any other client, so
//! they keep working (on cached or sample data) while the API is down.

pub mod client;
pub mod fallback;
pub mod handlers;
pub mod pages;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

pub use client::JobsClient;
pub use handlers::{UiState, ui_config};

#[derive(Debug, Error)]
pub enum UiError {
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl ResponseError for UiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        error!("{}", self);
        HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body("Something went wrong while rendering this page.")
    }
}

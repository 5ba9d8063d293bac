pub mod health;
pub mod job;
pub mod validation;

use actix_web::web::{ServiceConfig, scope};

use job::handlers::job_config;

/// Mount the REST surface under `/api`
pub fn api_config(config: &mut ServiceConfig) {
    config.service(scope("/api").configure(job_config));
}

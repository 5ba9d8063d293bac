use actix_web::{HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::job::JobService;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// A store-backed probe: its log name and the status it reports either way
struct Probe {
    name: &'static str,
    ok: &'static str,
    failed: &'static str,
}

const HEALTH: Probe = Probe {
    name: "Health",
    ok: "healthy",
    failed: "unhealthy",
};

const READINESS: Probe = Probe {
    name: "Readiness",
    ok: "ready",
    failed: "not_ready",
};

impl Probe {
    fn failure_message(&self, e: &anyhow::Error) -> String {
        format!("{} check failed: {:#}", self.name, e)
    }

    async fn run(&self, service: &JobService) -> HttpResponse {
        match service.ping().await {
            Ok(()) => HttpResponse::Ok().json(HealthResponse {
                status: self.ok.to_string(),
                database: "connected".to_string(),
                error: None,
            }),
            Err(e) => {
                error!("{}", self.failure_message(&e));
                HttpResponse::ServiceUnavailable().json(HealthResponse {
                    status: self.failed.to_string(),
                    database: "disconnected".to_string(),
                    error: Some(format!("Database unavailable: {}", e)),
                })
            }
        }
    }
}

/// Health check endpoint
///
/// General health check including store connectivity.
/// Use for load balancers and uptime monitors.
#[get("/health")]
async fn health_check(service: web::Data<JobService>) -> impl Responder {
    HEALTH.run(&service).await
}

/// Readiness check endpoint
///
/// Returns 503 while the store is unreachable; the process recovers on its
/// own once it answers again.
#[get("/ready")]
async fn readiness_check(service: web::Data<JobService>) -> impl Responder {
    READINESS.run(&service).await
}

/// Liveness check endpoint
///
/// Simple check that the process is alive. Does not check dependencies.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        database: "not_checked".to_string(),
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}

use actix_web::{
    HttpResponse, delete, get, patch, post,
    web::{Data, Path, ServiceConfig, scope},
};
use actix_web_validator::{Json, Query};
use uuid::Uuid;

use super::dto::{JobFilter, JobPatch, NewJob};
use super::service::{JobService, ServiceError};

#[post("")]
async fn create_job(
    service: Data<JobService>,
    job: Json<NewJob>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.create_job(job.into_inner()).await?;
    Ok(HttpResponse::Created().json(job))
}

#[get("")]
async fn list_jobs(
    service: Data<JobService>,
    filter: Query<JobFilter>,
) -> Result<HttpResponse, ServiceError> {
    let jobs = service.list_jobs(&filter).await?;
    Ok(HttpResponse::Ok().json(jobs))
}

#[get("/{id}")]
async fn get_job(
    service: Data<JobService>,
    id: Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.get_job(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[patch("/{id}")]
async fn update_job(
    service: Data<JobService>,
    id: Path<Uuid>,
    patch: Json<JobPatch>,
) -> Result<HttpResponse, ServiceError> {
    let job = service.update_job(id.into_inner(), patch.into_inner()).await?;
    Ok(HttpResponse::Ok().json(job))
}

#[delete("/{id}")]
async fn delete_job(
    service: Data<JobService>,
    id: Path<Uuid>,
) -> Result<HttpResponse, ServiceError> {
    service.delete_job(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        scope("/jobs")
            .service(create_job)
            .service(list_jobs)
            .service(get_job)
            .service(update_job)
            .service(delete_job),
    );
}

use crate::{
    auth::AdminClaims,
    error::AppError,
    models::{Job, JobInput},
    store::JobStore,
};
use actix_web::{delete, post, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct JobMutationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
}

/// Creates a job posting.
///
/// ## Responses:
/// - `201 Created`: `{ success, message, job }`.
/// - `401`/`403`: missing token or non-admin caller (from `AdminAuth`).
/// - `422 Unprocessable Entity`: `JobInput` validation failed.
#[post("/jobs")]
pub async fn create_job(
    store: web::Data<dyn JobStore>,
    job_data: web::Json<JobInput>,
    admin: AdminClaims,
) -> Result<impl Responder, AppError> {
    job_data.validate()?;

    let job = store.insert(&Job::new(job_data.into_inner())).await?;
    log::info!("job {} created by admin {}", job.id, admin.0.sub);

    Ok(HttpResponse::Created().json(JobMutationResponse {
        success: true,
        message: "Job created successfully".into(),
        job: Some(job),
    }))
}

/// Replaces a job posting. Counters and creation time are preserved.
///
/// ## Responses:
/// - `200 OK`: `{ success, message, job }`.
/// - `404 Not Found`: no job with this id.
/// - `422 Unprocessable Entity`: `JobInput` validation failed.
#[put("/jobs/{id}")]
pub async fn update_job(
    store: web::Data<dyn JobStore>,
    job_id: web::Path<Uuid>,
    job_data: web::Json<JobInput>,
    admin: AdminClaims,
) -> Result<impl Responder, AppError> {
    job_data.validate()?;
    let id = job_id.into_inner();

    let existing = store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".into()))?;

    let job = store
        .replace(&existing.replaced_with(job_data.into_inner()))
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".into()))?;
    log::info!("job {} updated by admin {}", job.id, admin.0.sub);

    Ok(HttpResponse::Ok().json(JobMutationResponse {
        success: true,
        message: "Job updated successfully".into(),
        job: Some(job),
    }))
}

/// Deletes a job posting.
///
/// ## Responses:
/// - `200 OK`: `{ success, message }`.
/// - `404 Not Found`: no job with this id.
#[delete("/jobs/{id}")]
pub async fn delete_job(
    store: web::Data<dyn JobStore>,
    job_id: web::Path<Uuid>,
    admin: AdminClaims,
) -> Result<impl Responder, AppError> {
    let id = job_id.into_inner();

    if !store.delete(id).await? {
        return Err(AppError::NotFound("Job not found".into()));
    }
    log::info!("job {} deleted by admin {}", id, admin.0.sub);

    Ok(HttpResponse::Ok().json(JobMutationResponse {
        success: true,
        message: "Job deleted successfully".into(),
        job: None,
    }))
}

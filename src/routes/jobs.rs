use crate::{
    error::AppError,
    models::{FilterOptions, Job, JobSearchQuery, Pagination},
    services::JobQueryService,
};
use actix_web::{get, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponse {
    pub success: bool,
    pub jobs: Vec<Job>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptionsResponse {
    pub success: bool,
    pub filter_options: FilterOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobResponse {
    pub success: bool,
    pub job: Job,
}

/// Lists jobs with search, filtering, sorting and pagination.
///
/// Registered at both `/jobs` and `/getJobs`.
///
/// ## Query Parameters (all optional):
/// - `page` (default 1), `limit` (default 15, capped by configuration).
/// - `sortBy` (default `postedDate`), `sortOrder` (`asc`, anything else is descending).
/// - `search`: case-insensitive substring over title, company, location and skills.
/// - `jobTypes`, `experienceLevels`, `locations`: comma-separated "is one of" lists.
/// - `minSalary`, `maxSalary`: inclusive bounds on `salary.min` / `salary.max`.
///
/// ## Responses:
/// - `200 OK`: `{ success, jobs, pagination: { current, pages, total } }`.
/// - `400 Bad Request`: malformed numbers or an unsupported sort field.
/// - `500 Internal Server Error`: `{ success: false, message: "Failed to retrieve jobs", error }`.
pub async fn list_jobs(
    service: web::Data<JobQueryService>,
    query: web::Query<JobSearchQuery>,
) -> Result<impl Responder, AppError> {
    let params = service.parse_params(query.into_inner())?;

    let page = service.fetch_jobs(&params).await.map_err(|e| {
        log::error!("Error fetching jobs: {}", e);
        e.with_message("Failed to retrieve jobs")
    })?;

    Ok(HttpResponse::Ok().json(JobListResponse {
        success: true,
        jobs: page.jobs,
        pagination: page.pagination,
    }))
}

/// Distinct filter values across all stored jobs.
///
/// ## Responses:
/// - `200 OK`: `{ success, filterOptions }`.
/// - `500 Internal Server Error`: `{ success: false, message: "Failed to retrieve filter options", error }`.
#[get("/jobfilters")]
pub async fn filter_options(
    service: web::Data<JobQueryService>,
) -> Result<impl Responder, AppError> {
    let filter_options = service.filter_options().await.map_err(|e| {
        log::error!("Error fetching filter options: {}", e);
        e.with_message("Failed to retrieve filter options")
    })?;

    Ok(HttpResponse::Ok().json(FilterOptionsResponse {
        success: true,
        filter_options,
    }))
}

/// Retrieves a single job by id.
///
/// ## Responses:
/// - `200 OK`: `{ success, job }`.
/// - `404 Not Found`: no job with this id.
#[get("/jobs/{id}")]
pub async fn get_job(
    service: web::Data<JobQueryService>,
    job_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let job = service
        .get_job(job_id.into_inner())
        .await
        .map_err(|e| e.with_message("Failed to retrieve job"))?;

    Ok(HttpResponse::Ok().json(JobResponse { success: true, job }))
}

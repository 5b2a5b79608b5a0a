pub mod admin;
pub mod health;
pub mod jobs;

use crate::auth::AdminAuth;
use crate::error::AppError;
use actix_web::web;

/// API routes, mounted under `/api` by the binary.
///
/// Extractor failures (query string, JSON body, path segments) render as `AppError::BadRequest`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(web::resource(["/jobs", "/getJobs"]).route(web::get().to(jobs::list_jobs)))
    .service(jobs::filter_options)
    .service(jobs::get_job)
    .service(
        web::scope("/admin")
            .wrap(AdminAuth)
            .service(admin::create_job)
            .service(admin::update_job)
            .service(admin::delete_job),
    );
}

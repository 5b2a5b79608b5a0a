#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jobboard::auth::{AuthConfig, Claims};
use jobboard::config::QueryConfig;
use jobboard::error::AppError;
use jobboard::models::{
    FacetRow, Job, JobFilter, JobInput, JobSort, JobType, PageWindow, SalaryInput, SalaryType,
};
use jobboard::routes::{self, health};
use jobboard::services::JobQueryService;
use jobboard::store::{JobStore, MemoryJobStore, SearchResult};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret";

/// Builds the application the way `main.rs` does, over the given store.
pub fn build_app(
    store: Arc<dyn JobStore>,
    config: QueryConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let query_service = web::Data::new(JobQueryService::new(store.clone(), config));
    let store_data: web::Data<dyn JobStore> = web::Data::from(store);
    App::new()
        .app_data(query_service)
        .app_data(store_data)
        .app_data(web::Data::new(AuthConfig::new(JWT_SECRET)))
        .wrap(actix_web::middleware::Logger::default())
        .service(health::health)
        .service(web::scope("/api").configure(routes::config))
}

pub fn memory_store(jobs: Vec<Job>) -> Arc<dyn JobStore> {
    Arc::new(MemoryJobStore::with_jobs(jobs))
}

/// A store whose every operation fails with a database error.
pub struct FailingJobStore;

fn unavailable<T>() -> Result<T, AppError> {
    Err(AppError::DatabaseError("connection refused".to_string()))
}

#[async_trait]
impl JobStore for FailingJobStore {
    async fn search(
        &self,
        _filter: &JobFilter,
        _sort: JobSort,
        _window: PageWindow,
    ) -> Result<SearchResult, AppError> {
        unavailable()
    }

    async fn facet_rows(&self) -> Result<Vec<FacetRow>, AppError> {
        unavailable()
    }

    async fn get(&self, _id: Uuid) -> Result<Option<Job>, AppError> {
        unavailable()
    }

    async fn insert(&self, _job: &Job) -> Result<Job, AppError> {
        unavailable()
    }

    async fn replace(&self, _job: &Job) -> Result<Option<Job>, AppError> {
        unavailable()
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, AppError> {
        unavailable()
    }

    async fn ping(&self) -> Result<(), AppError> {
        unavailable()
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub struct JobSpec<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub job_type: JobType,
    pub salary: (f64, f64),
    pub skills: &'a [&'a str],
    pub experience: Option<&'a str>,
    /// Hours after `base_time()`.
    pub posted_offset_hours: i64,
}

impl<'a> Default for JobSpec<'a> {
    fn default() -> Self {
        Self {
            title: "Software Engineer",
            company: "Acme",
            location: "Remote",
            job_type: JobType::FullTime,
            salary: (50_000.0, 80_000.0),
            skills: &[],
            experience: None,
            posted_offset_hours: 0,
        }
    }
}

pub fn job_input(spec: &JobSpec) -> JobInput {
    JobInput {
        title: spec.title.to_string(),
        company: spec.company.to_string(),
        location: spec.location.to_string(),
        job_type: spec.job_type,
        salary: SalaryInput {
            min: spec.salary.0,
            max: spec.salary.1,
            currency: "USD".to_string(),
            salary_type: SalaryType::Yearly,
        },
        description: format!("{} at {}", spec.title, spec.company),
        requirements: vec![],
        responsibilities: vec![],
        benefits: vec![],
        skills: spec.skills.iter().map(|s| s.to_string()).collect(),
        experience: spec.experience.map(str::to_string),
        education: None,
        posted_date: Some(base_time() + Duration::hours(spec.posted_offset_hours)),
        is_active: None,
    }
}

pub fn job(spec: JobSpec) -> Job {
    Job::new(job_input(&spec))
}

pub fn token(role: &str) -> String {
    let claims = Claims {
        sub: format!("{}-user", role),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

use super::{JobStore, SearchResult};
use crate::{
    error::AppError,
    models::{FacetRow, Job, JobFilter, JobSort, PageWindow},
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-process job collection with the same query semantics as `PgJobStore`.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs: RwLock::new(jobs),
        }
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn search(
        &self,
        filter: &JobFilter,
        sort: JobSort,
        window: PageWindow,
    ) -> Result<SearchResult, AppError> {
        let jobs = self.jobs.read().await;
        let mut matching: Vec<&Job> = jobs.iter().filter(|job| filter.matches(job)).collect();
        matching.sort_by(|a, b| sort.compare(a, b));

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(window.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(0))
            .cloned()
            .collect();

        Ok(SearchResult { total, jobs: page })
    }

    async fn facet_rows(&self) -> Result<Vec<FacetRow>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(jobs
            .iter()
            .map(|job| FacetRow {
                job_type: job.job_type.to_string(),
                experience: job.experience.clone(),
                location: job.location.clone(),
                company: job.company.clone(),
                skills: job.skills.clone(),
                salary_min: job.salary.min,
                salary_max: job.salary.max,
            })
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        let jobs = self.jobs.read().await;
        Ok(jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn insert(&self, job: &Job) -> Result<Job, AppError> {
        let mut jobs = self.jobs.write().await;
        if jobs.iter().any(|existing| existing.id == job.id) {
            return Err(AppError::DatabaseError(format!(
                "duplicate job id {}",
                job.id
            )));
        }
        jobs.push(job.clone());
        Ok(job.clone())
    }

    async fn replace(&self, job: &Job) -> Result<Option<Job>, AppError> {
        let mut jobs = self.jobs.write().await;
        match jobs.iter_mut().find(|existing| existing.id == job.id) {
            Some(existing) => {
                *existing = job.clone();
                Ok(Some(job.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        Ok(jobs.len() != before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

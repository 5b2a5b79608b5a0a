use crate::{
    config::QueryConfig,
    error::AppError,
    models::{FilterOptions, Job, JobPage, JobSearchParams, JobSearchQuery, Pagination},
    services::facets,
    store::JobStore,
};
use std::sync::Arc;
use uuid::Uuid;

/// Public read side of the job board: listing, facets and job detail.
///
/// Stateless apart from the injected store and configuration; every call
/// recomputes from storage.
#[derive(Clone)]
pub struct JobQueryService {
    store: Arc<dyn JobStore>,
    config: QueryConfig,
}

impl JobQueryService {
    pub fn new(store: Arc<dyn JobStore>, config: QueryConfig) -> Self {
        Self { store, config }
    }

    /// Validates raw listing parameters against this service's configuration.
    pub fn parse_params(&self, query: JobSearchQuery) -> Result<JobSearchParams, AppError> {
        JobSearchParams::parse(query, &self.config)
    }

    /// Runs a filtered, sorted, paginated search.
    pub async fn fetch_jobs(&self, params: &JobSearchParams) -> Result<JobPage, AppError> {
        let result = self
            .store
            .search(&params.filter, params.sort, params.window())
            .await?;
        log::debug!(
            "fetch_jobs page={} limit={} matched {} job(s)",
            params.page,
            params.limit,
            result.total
        );

        Ok(JobPage {
            jobs: result.jobs,
            pagination: Pagination::new(params.page, params.limit, result.total),
        })
    }

    /// Distinct filter values and the global salary range across all jobs.
    pub async fn filter_options(&self) -> Result<FilterOptions, AppError> {
        let rows = self.store.facet_rows().await?;
        Ok(facets::aggregate(&rows, self.config.salary_ceiling))
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job, AppError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Job not found".into()))
    }
}

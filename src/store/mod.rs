//! The job collection the query service reads from and admins write to.

pub mod memory;
pub mod postgres;

use crate::{
    error::AppError,
    models::{FacetRow, Job, JobFilter, JobSort, PageWindow},
};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;

/// Total number of matches and the requested page of them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub total: i64,
    pub jobs: Vec<Job>,
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Counts all jobs matching `filter` and returns the sorted `window` slice of them.
    ///
    /// Implementations must take both from the same snapshot.
    async fn search(
        &self,
        filter: &JobFilter,
        sort: JobSort,
        window: PageWindow,
    ) -> Result<SearchResult, AppError>;

    /// Unfiltered scan of the fields the facet aggregation needs.
    async fn facet_rows(&self) -> Result<Vec<FacetRow>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Job>, AppError>;

    async fn insert(&self, job: &Job) -> Result<Job, AppError>;

    /// Overwrites the stored job with the same id. `None` if it does not exist.
    async fn replace(&self, job: &Job) -> Result<Option<Job>, AppError>;

    /// Returns `false` if no job had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub mod facets;
pub mod job_query;

pub use job_query::JobQueryService;

pub mod filter_options;
pub mod job;
pub mod query;

pub use filter_options::{FacetRow, FilterOptions, SalaryRange};
pub use job::{Job, JobInput, JobType, Salary, SalaryInput, SalaryType};
pub use query::{
    JobFilter, JobPage, JobSearchParams, JobSearchQuery, JobSort, PageWindow, Pagination,
    SalaryBounds, SortField, SortOrder,
};

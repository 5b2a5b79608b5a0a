use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The subset of a job the facet aggregation reads.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FacetRow {
    pub job_type: String,
    pub experience: Option<String>,
    pub location: String,
    pub company: String,
    pub skills: Vec<String>,
    pub salary_min: f64,
    pub salary_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

/// Distinct values offered to clients as selectable filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub job_types: Vec<String>,
    pub experience_levels: Vec<String>,
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    pub skills: Vec<String>,
    pub salary_range: SalaryRange,
}

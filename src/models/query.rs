use crate::{config::QueryConfig, error::AppError, models::Job};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Raw query-string parameters of the job listing endpoint.
///
/// Everything arrives as text; `JobSearchParams::parse` turns it into a
/// validated search.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSearchQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    /// Comma-separated job types, e.g. `full-time,contract`.
    pub job_types: Option<String>,
    /// Comma-separated experience levels.
    pub experience_levels: Option<String>,
    /// Comma-separated locations.
    pub locations: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
}

/// Inclusive salary constraint: `salary.min >= min AND salary.max <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryBounds {
    pub min: f64,
    pub max: f64,
}

/// Conjunction of all supplied constraints. Empty lists and `None` impose nothing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct JobFilter {
    /// Case-insensitive substring over title, company, location and skills.
    pub search: Option<String>,
    pub job_types: Vec<String>,
    pub experience_levels: Vec<String>,
    pub locations: Vec<String>,
    pub salary: Option<SalaryBounds>,
    pub active_only: bool,
}

impl JobFilter {
    /// Evaluates the predicate against a single job.
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = [&job.title, &job.company, &job.location]
                .into_iter()
                .chain(job.skills.iter())
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if !self.job_types.is_empty() && !self.job_types.iter().any(|t| t == job.job_type.as_str())
        {
            return false;
        }
        if !self.experience_levels.is_empty() {
            match &job.experience {
                Some(level) if self.experience_levels.contains(level) => {}
                _ => return false,
            }
        }
        if !self.locations.is_empty() && !self.locations.contains(&job.location) {
            return false;
        }
        if let Some(bounds) = self.salary {
            if job.salary.min < bounds.min || job.salary.max > bounds.max {
                return false;
            }
        }
        if self.active_only && !job.is_active {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    PostedDate,
    Title,
    Company,
    Location,
    Type,
    Experience,
    SalaryMin,
    SalaryMax,
    Views,
    Applications,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Maps the client-facing field name to a sort field.
    pub fn parse(name: &str) -> Option<Self> {
        let field = match name {
            "postedDate" => SortField::PostedDate,
            "title" => SortField::Title,
            "company" => SortField::Company,
            "location" => SortField::Location,
            "type" => SortField::Type,
            "experience" => SortField::Experience,
            "salary.min" => SortField::SalaryMin,
            "salary.max" => SortField::SalaryMax,
            "views" => SortField::Views,
            "applications" => SortField::Applications,
            "createdAt" => SortField::CreatedAt,
            "updatedAt" => SortField::UpdatedAt,
            _ => return None,
        };
        Some(field)
    }

    /// SQL expression the field sorts on.
    ///
    /// Text columns compare bytewise (`COLLATE "C"`), the same order `compare` uses.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::PostedDate => "posted_date",
            SortField::Title => "title COLLATE \"C\"",
            SortField::Company => "company COLLATE \"C\"",
            SortField::Location => "location COLLATE \"C\"",
            // enum columns sort by declaration order otherwise
            SortField::Type => "job_type::text COLLATE \"C\"",
            SortField::Experience => "experience COLLATE \"C\"",
            SortField::SalaryMin => "salary_min",
            SortField::SalaryMax => "salary_max",
            SortField::Views => "views",
            SortField::Applications => "applications",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// Ascending comparison of two jobs on this field. Missing values compare greatest.
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        match self {
            SortField::PostedDate => a.posted_date.cmp(&b.posted_date),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Company => a.company.cmp(&b.company),
            SortField::Location => a.location.cmp(&b.location),
            SortField::Type => a.job_type.as_str().cmp(b.job_type.as_str()),
            SortField::Experience => match (&a.experience, &b.experience) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortField::SalaryMin => a.salary.min.total_cmp(&b.salary.min),
            SortField::SalaryMax => a.salary.max.total_cmp(&b.salary.max),
            SortField::Views => a.views.cmp(&b.views),
            SortField::Applications => a.applications.cmp(&b.applications),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `asc` sorts ascending; any other value sorts descending.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Single-field sort; ties are broken by job id ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for JobSort {
    fn default() -> Self {
        Self {
            field: SortField::PostedDate,
            order: SortOrder::Desc,
        }
    }
}

impl JobSort {
    pub fn compare(&self, a: &Job, b: &Job) -> Ordering {
        let primary = match (self.field, self.order) {
            // missing experience sorts last in both directions
            (SortField::Experience, SortOrder::Desc) => match (&a.experience, &b.experience) {
                (Some(x), Some(y)) => y.cmp(x),
                _ => self.field.compare(a, b),
            },
            (field, SortOrder::Asc) => field.compare(a, b),
            (field, SortOrder::Desc) => field.compare(b, a),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

/// Offset/limit slice of the sorted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Validated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSearchParams {
    pub page: i64,
    pub limit: i64,
    pub sort: JobSort,
    pub filter: JobFilter,
}

impl JobSearchParams {
    /// Validates raw query parameters.
    ///
    /// Malformed numbers are rejected with `BadRequest` instead of leaking
    /// into the offset arithmetic; `limit` is clamped to `max_limit`.
    pub fn parse(query: JobSearchQuery, config: &QueryConfig) -> Result<Self, AppError> {
        let page = parse_positive("page", query.page.as_deref(), 1)?;
        let limit =
            parse_positive("limit", query.limit.as_deref(), config.default_limit)?.min(config.max_limit);

        let field = match non_blank(query.sort_by.as_deref()) {
            Some(name) => SortField::parse(name)
                .ok_or_else(|| AppError::BadRequest(format!("Unsupported sort field: {}", name)))?,
            None => SortField::PostedDate,
        };
        let sort = JobSort {
            field,
            order: SortOrder::parse(query.sort_order.as_deref()),
        };

        let min_salary = parse_salary("minSalary", query.min_salary.as_deref())?;
        let max_salary = parse_salary("maxSalary", query.max_salary.as_deref())?;
        let salary = match (min_salary, max_salary) {
            (None, None) => None,
            (min, max) => {
                let bounds = SalaryBounds {
                    min: min.unwrap_or(0.0),
                    max: max.unwrap_or(config.salary_ceiling),
                };
                if min.is_some() && max.is_some() && bounds.min > bounds.max {
                    return Err(AppError::BadRequest(
                        "minSalary must not exceed maxSalary".into(),
                    ));
                }
                Some(bounds)
            }
        };

        let filter = JobFilter {
            search: non_blank(query.search.as_deref()).map(str::to_string),
            job_types: split_list(query.job_types.as_deref()),
            experience_levels: split_list(query.experience_levels.as_deref()),
            locations: split_list(query.locations.as_deref()),
            salary,
            active_only: config.active_only,
        };

        Ok(Self {
            page,
            limit,
            sort,
            filter,
        })
    }

    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: (self.page - 1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn parse_positive(name: &str, raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match non_blank(raw) {
        None => Ok(default),
        Some(value) => match value.parse::<i64>() {
            Ok(parsed) if parsed >= 1 => Ok(parsed),
            _ => Err(AppError::BadRequest(format!(
                "{} must be a positive integer",
                name
            ))),
        },
    }
}

fn parse_salary(name: &str, raw: Option<&str>) -> Result<Option<f64>, AppError> {
    match non_blank(raw) {
        None => Ok(None),
        Some(value) => match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed >= 0.0 => Ok(Some(parsed)),
            _ => Err(AppError::BadRequest(format!(
                "{} must be a non-negative number",
                name
            ))),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current: i64,
    pub pages: i64,
    pub total: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            current: page,
            pages: (total + limit - 1) / limit,
            total,
        }
    }
}

/// One page of matching jobs plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{JobInput, JobType, SalaryInput, SalaryType};
    use pretty_assertions::assert_eq;

    fn job(title: &str, location: &str, job_type: JobType, min: f64, max: f64) -> Job {
        Job::new(JobInput {
            title: title.to_string(),
            company: "Globex".to_string(),
            location: location.to_string(),
            job_type,
            salary: SalaryInput {
                min,
                max,
                currency: "USD".to_string(),
                salary_type: SalaryType::Yearly,
            },
            description: "desc".to_string(),
            requirements: vec![],
            responsibilities: vec![],
            benefits: vec![],
            skills: vec!["TypeScript".to_string()],
            experience: Some("mid".to_string()),
            education: None,
            posted_date: None,
            is_active: None,
        })
    }

    fn query() -> JobSearchQuery {
        JobSearchQuery::default()
    }

    #[test]
    fn test_defaults() {
        let params = JobSearchParams::parse(query(), &QueryConfig::default()).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 15);
        assert_eq!(params.sort, JobSort::default());
        assert_eq!(params.filter, JobFilter::default());
        assert_eq!(params.window(), PageWindow { offset: 0, limit: 15 });
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        let config = QueryConfig::default();
        for (page, limit) in [("abc", "10"), ("0", "10"), ("1", "-5"), ("1", "2.5")] {
            let q = JobSearchQuery {
                page: Some(page.to_string()),
                limit: Some(limit.to_string()),
                ..query()
            };
            assert!(
                matches!(JobSearchParams::parse(q, &config), Err(AppError::BadRequest(_))),
                "page={} limit={} should be rejected",
                page,
                limit
            );
        }

        let q = JobSearchQuery {
            min_salary: Some("NaN".to_string()),
            ..query()
        };
        assert!(JobSearchParams::parse(q, &config).is_err());
    }

    #[test]
    fn test_limit_is_clamped_and_window_computed() {
        let q = JobSearchQuery {
            page: Some("3".to_string()),
            limit: Some("1000".to_string()),
            ..query()
        };
        let params = JobSearchParams::parse(q, &QueryConfig::default()).unwrap();
        assert_eq!(params.limit, 100);
        assert_eq!(params.window(), PageWindow { offset: 200, limit: 100 });
    }

    #[test]
    fn test_salary_defaults_when_one_bound_given() {
        let config = QueryConfig::default();
        let q = JobSearchQuery {
            min_salary: Some("50000".to_string()),
            ..query()
        };
        let params = JobSearchParams::parse(q, &config).unwrap();
        assert_eq!(
            params.filter.salary,
            Some(SalaryBounds { min: 50_000.0, max: 200_000.0 })
        );

        let q = JobSearchQuery {
            max_salary: Some("90000".to_string()),
            ..query()
        };
        let params = JobSearchParams::parse(q, &config).unwrap();
        assert_eq!(
            params.filter.salary,
            Some(SalaryBounds { min: 0.0, max: 90_000.0 })
        );

        let q = JobSearchQuery {
            min_salary: Some("90000".to_string()),
            max_salary: Some("50000".to_string()),
            ..query()
        };
        assert!(JobSearchParams::parse(q, &config).is_err());
    }

    #[test]
    fn test_sort_parsing() {
        let q = JobSearchQuery {
            sort_by: Some("salary.max".to_string()),
            sort_order: Some("asc".to_string()),
            ..query()
        };
        let params = JobSearchParams::parse(q, &QueryConfig::default()).unwrap();
        assert_eq!(
            params.sort,
            JobSort { field: SortField::SalaryMax, order: SortOrder::Asc }
        );

        let q = JobSearchQuery {
            sort_order: Some("sideways".to_string()),
            ..query()
        };
        let params = JobSearchParams::parse(q, &QueryConfig::default()).unwrap();
        assert_eq!(params.sort.order, SortOrder::Desc);

        let q = JobSearchQuery {
            sort_by: Some("password".to_string()),
            ..query()
        };
        assert!(JobSearchParams::parse(q, &QueryConfig::default()).is_err());
    }

    #[test]
    fn test_list_parsing_drops_blank_items() {
        let q = JobSearchQuery {
            job_types: Some(" full-time, ,contract ".to_string()),
            locations: Some("".to_string()),
            search: Some("   ".to_string()),
            ..query()
        };
        let params = JobSearchParams::parse(q, &QueryConfig::default()).unwrap();
        assert_eq!(params.filter.job_types, vec!["full-time", "contract"]);
        assert!(params.filter.locations.is_empty());
        assert_eq!(params.filter.search, None);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = JobFilter {
            search: Some("react".to_string()),
            ..JobFilter::default()
        };
        let hit = job("Senior React Developer", "Remote", JobType::FullTime, 1.0, 2.0);
        let miss = job("Backend Engineer", "Remote", JobType::FullTime, 1.0, 2.0);
        assert!(filter.matches(&hit));
        assert!(!filter.matches(&miss));

        let by_skill = JobFilter {
            search: Some("typescr".to_string()),
            ..JobFilter::default()
        };
        assert!(by_skill.matches(&miss));
    }

    #[test]
    fn test_filter_is_conjunctive() {
        let filter = JobFilter {
            job_types: vec!["full-time".to_string()],
            locations: vec!["Remote".to_string()],
            ..JobFilter::default()
        };
        assert!(filter.matches(&job("A", "Remote", JobType::FullTime, 1.0, 2.0)));
        assert!(!filter.matches(&job("B", "New York", JobType::FullTime, 1.0, 2.0)));
        assert!(!filter.matches(&job("C", "Remote", JobType::Contract, 1.0, 2.0)));
    }

    #[test]
    fn test_salary_bounds_are_inclusive() {
        let filter = JobFilter {
            salary: Some(SalaryBounds { min: 60_000.0, max: 90_000.0 }),
            ..JobFilter::default()
        };
        assert!(filter.matches(&job("edge", "Remote", JobType::FullTime, 60_000.0, 90_000.0)));
        assert!(!filter.matches(&job("low", "Remote", JobType::FullTime, 59_999.0, 90_000.0)));
        assert!(!filter.matches(&job("high", "Remote", JobType::FullTime, 60_000.0, 90_001.0)));
    }

    #[test]
    fn test_active_only() {
        let mut inactive = job("Old", "Remote", JobType::FullTime, 1.0, 2.0);
        inactive.is_active = false;
        assert!(JobFilter::default().matches(&inactive));
        let filter = JobFilter {
            active_only: true,
            ..JobFilter::default()
        };
        assert!(!filter.matches(&inactive));
    }

    #[test]
    fn test_pagination_pages() {
        assert_eq!(Pagination::new(1, 10, 0).pages, 0);
        assert_eq!(Pagination::new(1, 10, 10).pages, 1);
        assert_eq!(Pagination::new(2, 10, 11).pages, 2);
        assert_eq!(Pagination::new(1, 15, 46).pages, 4);
    }
}

use crate::error::AppError;
use std::env;
use std::str::FromStr;

/// Tunables for job listing and facet aggregation.
///
/// Passed to `JobQueryService` at construction so the service never reads
/// ambient environment state.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    /// Page size used when the client sends no `limit`.
    pub default_limit: i64,
    /// Upper bound applied to client-supplied `limit` values.
    pub max_limit: i64,
    /// Default `maxSalary` bound and fallback `salaryRange.max`.
    pub salary_ceiling: f64,
    /// Exclude jobs with `isActive = false` from listings.
    pub active_only: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: 15,
            max_limit: 100,
            salary_ceiling: 200_000.0,
            active_only: false,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub query: QueryConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = QueryConfig::default();
        let query = QueryConfig {
            default_limit: parse_var("JOBS_DEFAULT_LIMIT", defaults.default_limit)?,
            max_limit: parse_var("JOBS_MAX_LIMIT", defaults.max_limit)?,
            salary_ceiling: parse_var("JOBS_SALARY_CEILING", defaults.salary_ceiling)?,
            active_only: parse_var("JOBS_ACTIVE_ONLY", defaults.active_only)?,
        };
        if query.default_limit < 1 || query.max_limit < query.default_limit {
            return Err(AppError::InternalServerError(
                "JOBS_DEFAULT_LIMIT must be between 1 and JOBS_MAX_LIMIT".into(),
            ));
        }
        if !query.salary_ceiling.is_finite() || query.salary_ceiling < 0.0 {
            return Err(AppError::InternalServerError(
                "JOBS_SALARY_CEILING must be a finite, non-negative number".into(),
            ));
        }

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parse_var("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            jwt_secret: required_var("JWT_SECRET")?,
            query,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn required_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::InternalServerError(format!("{} must be set", name)))
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::InternalServerError(format!("{} has an invalid value: {}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

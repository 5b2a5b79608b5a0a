use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

lazy_static! {
    // ISO 4217 style currency code, e.g. USD, EUR
    static ref CURRENCY_REGEX: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

/// Employment type of a job posting.
/// Corresponds to the `job_type` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Internship => "internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Period the salary figures refer to.
/// Corresponds to the `salary_type` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "salary_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SalaryType {
    Monthly,
    Yearly,
}

/// Salary band of a stored job.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    #[sqlx(rename = "salary_min")]
    pub min: f64,
    #[sqlx(rename = "salary_max")]
    pub max: f64,
    #[sqlx(rename = "salary_currency")]
    pub currency: String,
    pub salary_type: SalaryType,
}

/// A job posting as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[sqlx(flatten)]
    pub salary: Salary,
    pub description: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub benefits: Vec<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub posted_date: DateTime<Utc>,
    pub is_active: bool,
    pub applications: i32,
    pub views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Salary band as submitted by an admin.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_salary_bounds"))]
pub struct SalaryInput {
    #[validate(range(min = 0.0))]
    pub min: f64,
    #[validate(range(min = 0.0))]
    pub max: f64,
    #[serde(default = "default_currency")]
    #[validate(regex(path = "CURRENCY_REGEX", message = "Currency must be a 3-letter code"))]
    pub currency: String,
    pub salary_type: SalaryType,
}

fn validate_salary_bounds(salary: &SalaryInput) -> Result<(), ValidationError> {
    if salary.min > salary.max {
        let mut error = ValidationError::new("salary_bounds");
        error.message = Some("salary.min must not exceed salary.max".into());
        return Err(error);
    }
    Ok(())
}

impl From<SalaryInput> for Salary {
    fn from(input: SalaryInput) -> Self {
        Self {
            min: input.min,
            max: input.max,
            currency: input.currency,
            salary_type: input.salary_type,
        }
    }
}

/// Payload for creating a job or replacing an existing one.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 200))]
    pub company: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    #[validate]
    pub salary: SalaryInput,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Defaults to the creation time.
    pub posted_date: Option<DateTime<Utc>>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
}

impl Job {
    /// Creates a new job from admin input with fresh id, timestamps and zeroed counters.
    pub fn new(input: JobInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            company: input.company,
            location: input.location,
            job_type: input.job_type,
            salary: input.salary.into(),
            description: input.description,
            requirements: input.requirements,
            responsibilities: input.responsibilities,
            benefits: input.benefits,
            skills: input.skills,
            experience: input.experience,
            education: input.education,
            posted_date: input.posted_date.unwrap_or(now),
            is_active: input.is_active.unwrap_or(true),
            applications: 0,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the editable fields.
    ///
    /// Identity, counters and `created_at` are kept; `posted_date` is kept
    /// unless the input supplies one.
    pub fn replaced_with(self, input: JobInput) -> Self {
        Self {
            id: self.id,
            title: input.title,
            company: input.company,
            location: input.location,
            job_type: input.job_type,
            salary: input.salary.into(),
            description: input.description,
            requirements: input.requirements,
            responsibilities: input.responsibilities,
            benefits: input.benefits,
            skills: input.skills,
            experience: input.experience,
            education: input.education,
            posted_date: input.posted_date.unwrap_or(self.posted_date),
            is_active: input.is_active.unwrap_or(true),
            applications: self.applications,
            views: self.views,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}

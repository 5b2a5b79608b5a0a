use super::{JobStore, SearchResult};
use crate::{
    error::AppError,
    models::{FacetRow, Job, JobFilter, JobSort, PageWindow},
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const JOB_COLUMNS: &str = "id, title, company, location, job_type, salary_min, salary_max, \
     salary_currency, salary_type, description, requirements, responsibilities, benefits, \
     skills, experience, education, posted_date, is_active, applications, views, \
     created_at, updated_at";

/// Job collection backed by the `jobs` table.
#[derive(Debug, Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escapes LIKE wildcards so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn next_condition(builder: &mut QueryBuilder<'_, Postgres>, has_condition: &mut bool) {
    builder.push(if *has_condition { " AND " } else { " WHERE " });
    *has_condition = true;
}

/// Appends the WHERE clause for `filter`, ANDing every supplied constraint.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    let mut has_condition = false;

    if let Some(term) = &filter.search {
        let pattern = like_pattern(term);
        next_condition(builder, &mut has_condition);
        builder
            .push("(title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR company ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR location ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR EXISTS (SELECT 1 FROM unnest(skills) AS skill WHERE skill ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
    if !filter.job_types.is_empty() {
        next_condition(builder, &mut has_condition);
        builder
            .push("job_type::text = ANY(")
            .push_bind(filter.job_types.clone())
            .push(")");
    }
    if !filter.experience_levels.is_empty() {
        next_condition(builder, &mut has_condition);
        builder
            .push("experience = ANY(")
            .push_bind(filter.experience_levels.clone())
            .push(")");
    }
    if !filter.locations.is_empty() {
        next_condition(builder, &mut has_condition);
        builder
            .push("location = ANY(")
            .push_bind(filter.locations.clone())
            .push(")");
    }
    if let Some(bounds) = filter.salary {
        next_condition(builder, &mut has_condition);
        builder
            .push("salary_min >= ")
            .push_bind(bounds.min)
            .push(" AND salary_max <= ")
            .push_bind(bounds.max);
    }
    if filter.active_only {
        next_condition(builder, &mut has_condition);
        builder.push("is_active = TRUE");
    }
}

fn count_query(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM jobs");
    push_filter(&mut builder, filter);
    builder
}

fn page_query(filter: &JobFilter, sort: JobSort, window: PageWindow) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM jobs", JOB_COLUMNS));
    push_filter(&mut builder, filter);
    builder
        .push(format!(
            " ORDER BY {} {} NULLS LAST, id ASC LIMIT ",
            sort.field.column(),
            sort.order.keyword()
        ))
        .push_bind(window.limit)
        .push(" OFFSET ")
        .push_bind(window.offset);
    builder
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn search(
        &self,
        filter: &JobFilter,
        sort: JobSort,
        window: PageWindow,
    ) -> Result<SearchResult, AppError> {
        let mut count = count_query(filter);
        let mut page = page_query(filter, sort, window);
        log::debug!("job search: {}", page.sql());

        // Count and page are read from one snapshot.
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        let total: i64 = count.build_query_scalar().fetch_one(&mut *tx).await?;
        let jobs = page.build_query_as::<Job>().fetch_all(&mut *tx).await?;
        tx.commit().await?;

        Ok(SearchResult { total, jobs })
    }

    async fn facet_rows(&self) -> Result<Vec<FacetRow>, AppError> {
        let rows = sqlx::query_as::<_, FacetRow>(
            "SELECT job_type::text AS job_type, experience, location, company, skills, salary_min, salary_max \
             FROM jobs",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Job>, AppError> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn insert(&self, job: &Job) -> Result<Job, AppError> {
        let created = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs ({}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22) \
             RETURNING {}",
            JOB_COLUMNS, JOB_COLUMNS
        ))
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.job_type)
        .bind(job.salary.min)
        .bind(job.salary.max)
        .bind(&job.salary.currency)
        .bind(job.salary.salary_type)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(&job.benefits)
        .bind(&job.skills)
        .bind(&job.experience)
        .bind(&job.education)
        .bind(job.posted_date)
        .bind(job.is_active)
        .bind(job.applications)
        .bind(job.views)
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn replace(&self, job: &Job) -> Result<Option<Job>, AppError> {
        let updated = sqlx::query_as::<_, Job>(&format!(
            "UPDATE jobs \
             SET title = $2, company = $3, location = $4, job_type = $5, salary_min = $6, \
                 salary_max = $7, salary_currency = $8, salary_type = $9, description = $10, \
                 requirements = $11, responsibilities = $12, benefits = $13, skills = $14, \
                 experience = $15, education = $16, posted_date = $17, is_active = $18, \
                 updated_at = $19 \
             WHERE id = $1 \
             RETURNING {}",
            JOB_COLUMNS
        ))
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(job.job_type)
        .bind(job.salary.min)
        .bind(job.salary.max)
        .bind(&job.salary.currency)
        .bind(job.salary.salary_type)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(&job.responsibilities)
        .bind(&job.benefits)
        .bind(&job.skills)
        .bind(&job.experience)
        .bind(&job.education)
        .bind(job.posted_date)
        .bind(job.is_active)
        .bind(job.updated_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

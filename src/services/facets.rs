//! Reduces a full scan of the job collection into filter options.

use crate::models::{FacetRow, FilterOptions, SalaryRange};
use std::collections::BTreeSet;

/// Offered when no job has been stored yet.
pub const DEFAULT_JOB_TYPES: [&str; 4] = ["full-time", "part-time", "contract", "internship"];
/// Canonical ordering of experience levels; also the fallback list.
pub const EXPERIENCE_ORDER: [&str; 4] = ["entry", "mid", "senior", "lead"];
pub const DEFAULT_LOCATIONS: [&str; 1] = ["Remote"];

/// Builds the filter options from scanned rows.
///
/// `salary_ceiling` is the fallback `salaryRange.max` for an empty collection.
pub fn aggregate(rows: &[FacetRow], salary_ceiling: f64) -> FilterOptions {
    let mut job_types = BTreeSet::new();
    let mut experience_levels = BTreeSet::new();
    let mut locations = BTreeSet::new();
    let mut companies = BTreeSet::new();
    let mut skills = BTreeSet::new();
    let mut salary_range: Option<SalaryRange> = None;

    for row in rows {
        insert_non_blank(&mut job_types, &row.job_type);
        if let Some(level) = &row.experience {
            insert_non_blank(&mut experience_levels, level);
        }
        insert_non_blank(&mut locations, &row.location);
        insert_non_blank(&mut companies, &row.company);
        for skill in &row.skills {
            insert_non_blank(&mut skills, skill);
        }

        salary_range = Some(match salary_range {
            None => SalaryRange {
                min: row.salary_min,
                max: row.salary_max,
            },
            Some(range) => SalaryRange {
                min: range.min.min(row.salary_min),
                max: range.max.max(row.salary_max),
            },
        });
    }

    let mut experience_levels = or_defaults(experience_levels, &EXPERIENCE_ORDER);
    experience_levels.sort_by(|a, b| {
        experience_rank(a)
            .cmp(&experience_rank(b))
            .then_with(|| a.cmp(b))
    });

    FilterOptions {
        job_types: or_defaults(job_types, &DEFAULT_JOB_TYPES),
        experience_levels,
        locations: or_defaults(locations, &DEFAULT_LOCATIONS),
        companies: companies.into_iter().collect(),
        skills: skills.into_iter().collect(),
        salary_range: salary_range.unwrap_or(SalaryRange {
            min: 0.0,
            max: salary_ceiling,
        }),
    }
}

/// Stored values are offered verbatim so they remain exact filter matches.
fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    if !value.trim().is_empty() && !set.contains(value) {
        set.insert(value.to_string());
    }
}

fn or_defaults(observed: BTreeSet<String>, defaults: &[&str]) -> Vec<String> {
    if observed.is_empty() {
        defaults.iter().map(|value| value.to_string()).collect()
    } else {
        observed.into_iter().collect()
    }
}

/// Position in the canonical order; unknown levels rank -1 and so lead the list.
fn experience_rank(level: &str) -> i64 {
    EXPERIENCE_ORDER
        .iter()
        .position(|known| *known == level)
        .map(|position| position as i64)
        .unwrap_or(-1)
}

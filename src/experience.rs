// src/experience.rs
use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::JobEntry;

// ASCII word boundaries, so "2019г" still yields 2019
static YEAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)(20\d{2})(?-u:\b)").expect("valid year pattern"));

/// Years between the earliest job start found in `jobs` and today.
pub fn years_of_experience(jobs: &[JobEntry]) -> i32 {
    years_of_experience_at(jobs, Local::now().year())
}

/// Same as [`years_of_experience`] against a fixed calendar year.
///
/// Only the first `20xx` year of each period counts. With no year at all
/// the result is zero; it is not clamped, so future-only periods give a
/// negative figure.
pub fn years_of_experience_at(jobs: &[JobEntry], current_year: i32) -> i32 {
    let earliest = jobs
        .iter()
        .filter_map(|job| first_year(&job.period))
        .min()
        .unwrap_or(current_year);

    current_year - earliest
}

fn first_year(period: &str) -> Option<i32> {
    YEAR_PATTERN
        .captures(period)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

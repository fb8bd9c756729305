//! Student statistics over all exams

use super::StatsSummary;
use thiserror::Error;

/// Errors that can occur when summarizing student counts
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// The schedule contained no exams
    #[error("No student counts to summarize")]
    NoData,

    /// A student-count cell was not a non-negative integer
    #[error("Invalid student count: '{0}'")]
    InvalidCount(String),
}

/// Summarizes raw student-count cells
///
/// Counts are compared numerically, so `9` is smaller than `10`. The average is
/// rounded to two decimals.
pub fn summarize(counts: &[String]) -> Result<StatsSummary, StatsError> {
    let values = counts
        .iter()
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map_err(|_| StatsError::InvalidCount(raw.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Err(StatsError::NoData);
    };

    let total_students: u64 = values.iter().sum();
    let total_exams = values.len() as u64;
    let average = total_students as f64 / total_exams as f64;

    Ok(StatsSummary {
        min,
        max,
        total_students,
        total_exams,
        avg_students: format!("{:.2}", average),
    })
}

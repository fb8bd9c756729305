//! Core data models for the exam schedule
//!
//! This module contains the types shared by the scraper, the stats aggregator and the
//! cache, plus the clients that produce them.

pub mod department;
pub mod exams;
pub mod parse;
pub mod source;
pub mod stats;

pub use department::{all_departments, get_department_by_slug};
pub use exams::{ExamClient, ExamError, CACHE_TTL_SECONDS, STATS_CACHE_KEY};
pub use parse::{parse_sections, parse_student_counts, ParseError};
pub use source::{HttpScheduleSource, ScheduleSource, SourceConfig, SourceError, ALL_DEPARTMENTS};
pub use stats::{summarize, StatsError};

use serde::{Deserialize, Serialize};

/// A university department (svið) that publishes an exam schedule
///
/// Uses `&'static str` fields so the static DEPARTMENTS table can be built at compile
/// time. Only `Serialize` is implemented; look departments up by slug instead of
/// deserializing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Department {
    /// Display name
    pub name: &'static str,
    /// URL-safe identifier, also used as the cache key
    pub slug: &'static str,
    /// 1-based position in the department list, sent to the remote endpoint
    pub index: u32,
}

/// One exam, read from a single 5-cell table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Course code
    pub course: String,
    /// Course name
    pub name: String,
    /// Exam type (written, oral, ...)
    #[serde(rename = "type")]
    pub exam_type: String,
    /// Number of registered students, kept as the source text
    pub students: String,
    /// Exam date as printed in the schedule
    pub date: String,
}

/// The exams listed under one heading of a department schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSection {
    pub heading: String,
    pub tests: Vec<ExamRecord>,
}

/// Aggregate student statistics over every exam of every department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Smallest student count of any exam
    pub min: u64,
    /// Largest student count of any exam
    pub max: u64,
    /// Sum of all student counts
    pub total_students: u64,
    /// Number of exams counted
    pub total_exams: u64,
    /// Average students per exam, formatted with two decimals
    pub avg_students: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_record_serializes_type_field() {
        let record = ExamRecord {
            course: "TÖL101G".to_string(),
            name: "Tölvunarfræði 1".to_string(),
            exam_type: "Skriflegt".to_string(),
            students: "312".to_string(),
            date: "12.12.2026".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["type"], "Skriflegt");
        assert!(json.get("exam_type").is_none());
    }

    #[test]
    fn test_stats_summary_uses_camel_case_keys() {
        let stats = StatsSummary {
            min: 1,
            max: 9,
            total_students: 10,
            total_exams: 2,
            avg_students: "5.00".to_string(),
        };

        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalStudents"], 10);
        assert_eq!(json["totalExams"], 2);
        assert_eq!(json["avgStudents"], "5.00");
    }
}

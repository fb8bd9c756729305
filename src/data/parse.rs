//! HTML parsing for schedule fragments
//!
//! The remote schedule is a sequence of `.box h3` headings and `.table-bordered`
//! tables. Heading `i` labels table `i`, and every table is a flat run of `td` cells
//! where each group of [`FIELDS_PER_ROW`] cells is one exam.

use super::{DepartmentSection, ExamRecord};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Number of cells in one exam row
pub const FIELDS_PER_ROW: usize = 5;

/// Offset of the student-count cell within a row
pub const STUDENTS_OFFSET: usize = 3;

const HEADING_SELECTOR: &str = ".box h3";
const TABLE_SELECTOR: &str = ".table-bordered";
const CELL_SELECTOR: &str = "tr td";

/// Errors that can occur when parsing a schedule fragment
#[derive(Debug, Error)]
pub enum ParseError {
    /// A CSS selector failed to compile
    #[error("Invalid CSS selector '{selector}': {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
}

fn selector(css: &'static str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collects the text of every heading in document order
fn headings(document: &Html) -> Result<Vec<String>, ParseError> {
    let heading = selector(HEADING_SELECTOR)?;
    Ok(document.select(&heading).map(element_text).collect())
}

/// Collects the cell texts of every table, one vector per table
fn table_cells(document: &Html) -> Result<Vec<Vec<String>>, ParseError> {
    let table = selector(TABLE_SELECTOR)?;
    let cell = selector(CELL_SELECTOR)?;

    Ok(document
        .select(&table)
        .map(|t| t.select(&cell).map(element_text).collect())
        .collect())
}

/// Decodes a flat run of cells into exam records
///
/// A record starts at every multiple of [`FIELDS_PER_ROW`]. A trailing partial row
/// still produces a record, with its missing fields left empty.
pub fn decode_rows(cells: &[String]) -> Vec<ExamRecord> {
    cells
        .chunks(FIELDS_PER_ROW)
        .map(|row| {
            let field = |i: usize| row.get(i).cloned().unwrap_or_default();
            ExamRecord {
                course: field(0),
                name: field(1),
                exam_type: field(2),
                students: field(3),
                date: field(4),
            }
        })
        .collect()
}

/// Pairs headings with tables by position, truncating to the shorter list
pub fn pair_sections(headings: Vec<String>, tables: Vec<Vec<ExamRecord>>) -> Vec<DepartmentSection> {
    if headings.len() != tables.len() {
        tracing::warn!(
            headings = headings.len(),
            tables = tables.len(),
            "heading and table counts differ, dropping unmatched entries"
        );
    }

    headings
        .into_iter()
        .zip(tables)
        .map(|(heading, tests)| DepartmentSection { heading, tests })
        .collect()
}

/// Picks the student-count cell out of every row of a table
pub fn student_counts(cells: &[String]) -> Vec<String> {
    cells
        .iter()
        .skip(STUDENTS_OFFSET)
        .step_by(FIELDS_PER_ROW)
        .cloned()
        .collect()
}

/// Parses a department schedule fragment into heading-labelled sections
pub fn parse_sections(fragment: &str) -> Result<Vec<DepartmentSection>, ParseError> {
    let document = Html::parse_document(fragment);
    let headings = headings(&document)?;
    let tables = table_cells(&document)?
        .iter()
        .map(|cells| decode_rows(cells))
        .collect();

    Ok(pair_sections(headings, tables))
}

/// Extracts every student-count cell of every table in the fragment, ignoring headings
pub fn parse_student_counts(fragment: &str) -> Result<Vec<String>, ParseError> {
    let document = Html::parse_document(fragment);
    Ok(table_cells(&document)?
        .iter()
        .flat_map(|cells| student_counts(cells))
        .collect())
}

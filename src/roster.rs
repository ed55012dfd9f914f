//! CSV parser for the student marks table.
//!
//! The table carries two identifier columns (`StudentID`, `Name`) followed by
//! one subject column per subject. The subject set is derived once from the
//! header and shared by every record.

use tracing::debug;

use crate::error::{ReportError, Result};

/// Header columns that are not subjects.
pub const IDENTIFIER_COLUMNS: [&str; 2] = ["StudentID", "Name"];

/// One row of the marks table. `scores` is parallel to the roster's
/// `subjects` list.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub scores: Vec<f64>,
}

/// The full set of student records parsed from one input table.
#[derive(Debug, Clone)]
pub struct Roster {
    pub subjects: Vec<String>,
    pub records: Vec<StudentRecord>,
}

/// Decodes a delimited marks table from raw bytes.
///
/// # Errors
///
/// Returns [`ReportError::Parse`] if the input is empty, is not valid CSV,
/// lacks the `StudentID` or `Name` column, or holds a non-numeric subject
/// cell. Subject cells are parsed as `f64` explicitly; nothing is coerced.
pub fn parse_roster(bytes: &[u8]) -> Result<Roster> {
    if bytes.is_empty() {
        return Err(ReportError::Parse("input is empty (no header)".to_string()));
    }

    let mut reader = csv::Reader::from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| ReportError::Parse(e.to_string()))?
        .clone();

    let id_idx = required_column(&headers, "StudentID")?;
    let name_idx = required_column(&headers, "Name")?;

    let subjects = derive_subject_columns(&headers, &IDENTIFIER_COLUMNS);
    let subject_indices: Vec<usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !IDENTIFIER_COLUMNS.contains(h))
        .map(|(i, _)| i)
        .collect();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ReportError::Parse(e.to_string()))?;

        let mut scores = Vec::with_capacity(subject_indices.len());
        for (&idx, subject) in subject_indices.iter().zip(&subjects) {
            let cell = record.get(idx).unwrap_or("");
            let score: f64 = cell.parse().map_err(|_| {
                ReportError::Parse(format!(
                    "non-numeric score '{cell}' for subject '{subject}' in row {}",
                    row + 1
                ))
            })?;
            scores.push(score);
        }

        records.push(StudentRecord {
            id: record.get(id_idx).unwrap_or("").to_string(),
            name: record.get(name_idx).unwrap_or("").to_string(),
            scores,
        });
    }

    debug!(
        students = records.len(),
        subjects = subjects.len(),
        "Roster parsed"
    );

    Ok(Roster { subjects, records })
}

/// Returns every header column that is not an identifier column, in header
/// order. This is the whole schema contract: whatever isn't `StudentID` or
/// `Name` is a subject.
pub fn derive_subject_columns(headers: &csv::StringRecord, identifier_cols: &[&str]) -> Vec<String> {
    headers
        .iter()
        .filter(|h| !identifier_cols.contains(h))
        .map(str::to_string)
        .collect()
}

fn required_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReportError::Parse(format!("missing required column '{name}'")))
}

use crate::error::{ReportError, Result};
use crate::roster::Roster;

/// Minimum percentage a student needs to pass.
pub const PASSING_PERCENTAGE: f64 = 40.0;

/// Marks each subject is scored out of. The percentage formula assumes every
/// subject shares this maximum.
pub const MARKS_PER_SUBJECT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

/// A roster record extended with its derived fields. Values are carried at
/// full precision; rounding happens only when the report is rendered.
#[derive(Debug, Clone)]
pub struct DerivedRecord {
    pub id: String,
    pub name: String,
    pub total_marks: f64,
    pub percentage: f64,
    pub status: Status,
}

/// Average and leading score for a single subject column.
#[derive(Debug, Clone)]
pub struct SubjectStat {
    pub subject: String,
    pub average: f64,
    pub top_name: String,
    pub top_score: f64,
}

/// Everything the report renderer needs, computed in one pass over the
/// roster.
#[derive(Debug, Clone)]
pub struct ClassSummary {
    pub top_n: usize,
    pub top: Vec<DerivedRecord>,
    pub passed: usize,
    pub failed: usize,
    pub threshold: f64,
    pub subjects: Vec<SubjectStat>,
}

impl ClassSummary {
    /// Builds the summary for a roster.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Computation`] for a roster with no student rows
    /// or no subject columns; both would otherwise put `NaN`/`Inf` in the
    /// report.
    pub fn from_roster(roster: &Roster, top_n: usize, threshold: f64) -> Result<Self> {
        if roster.records.is_empty() {
            return Err(ReportError::Computation(
                "roster has no student rows".to_string(),
            ));
        }

        let derived = derive_records(roster, threshold)?;
        let top = top_by_total(&derived, top_n);
        let (passed, failed) = classify_pass_fail(&derived);
        let subjects = per_subject_stats(roster)?;

        Ok(ClassSummary {
            top_n,
            top,
            passed,
            failed,
            threshold,
            subjects,
        })
    }
}

/// Computes total marks, percentage, and pass/fail status for every record.
///
/// `percentage = total / (subject_count * 100) * 100`, i.e. every subject is
/// assumed to be scored out of 100.
pub fn derive_records(roster: &Roster, threshold: f64) -> Result<Vec<DerivedRecord>> {
    if roster.subjects.is_empty() {
        return Err(ReportError::Computation(
            "roster has no subject columns".to_string(),
        ));
    }

    let max_possible_marks = roster.subjects.len() as f64 * MARKS_PER_SUBJECT;

    Ok(roster
        .records
        .iter()
        .map(|record| {
            let total_marks: f64 = record.scores.iter().sum();
            let percentage = total_marks / max_possible_marks * 100.0;
            let status = if percentage >= threshold {
                Status::Pass
            } else {
                Status::Fail
            };

            DerivedRecord {
                id: record.id.clone(),
                name: record.name.clone(),
                total_marks,
                percentage,
                status,
            }
        })
        .collect())
}

/// Returns the `n` records with the greatest totals, best first.
///
/// The sort is stable, so records with equal totals keep their original
/// roster order and the earlier one wins a spot.
pub fn top_by_total(records: &[DerivedRecord], n: usize) -> Vec<DerivedRecord> {
    let mut ranked: Vec<&DerivedRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.total_marks.total_cmp(&a.total_marks));
    ranked.into_iter().take(n).cloned().collect()
}

/// Counts passing and failing records. The two counts always partition the
/// roster.
pub fn classify_pass_fail(records: &[DerivedRecord]) -> (usize, usize) {
    let passed = records.iter().filter(|r| r.status == Status::Pass).count();
    (passed, records.len() - passed)
}

/// Computes the average score and leading student per subject, in subject
/// order. Leaders tie-break on first occurrence in the roster.
///
/// # Errors
///
/// Returns [`ReportError::Computation`] for an empty roster, where the mean
/// is undefined.
pub fn per_subject_stats(roster: &Roster) -> Result<Vec<SubjectStat>> {
    if roster.records.is_empty() {
        return Err(ReportError::Computation(
            "cannot average over an empty roster".to_string(),
        ));
    }

    let stats = roster
        .subjects
        .iter()
        .enumerate()
        .map(|(idx, subject)| {
            let mut sum = 0.0;
            let mut leader: Option<(&str, f64)> = None;

            for record in &roster.records {
                let score = record.scores[idx];
                sum += score;
                if leader.is_none_or(|(_, best)| score > best) {
                    leader = Some((record.name.as_str(), score));
                }
            }

            let (top_name, top_score) = leader.unwrap_or(("", 0.0));

            SubjectStat {
                subject: subject.clone(),
                average: sum / roster.records.len() as f64,
                top_name: top_name.to_string(),
                top_score,
            }
        })
        .collect();

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::parse_roster;

    fn sample_roster() -> Roster {
        let table = "StudentID,Name,Math,Science\n\
                     S1,Student1,80,70\n\
                     S2,Student2,60,50\n\
                     S3,Student3,90,95\n";
        parse_roster(table.as_bytes()).unwrap()
    }

    #[test]
    fn test_totals_and_percentages() {
        let derived = derive_records(&sample_roster(), PASSING_PERCENTAGE).unwrap();

        let totals: Vec<f64> = derived.iter().map(|r| r.total_marks).collect();
        assert_eq!(totals, vec![150.0, 110.0, 185.0]);

        let percentages: Vec<f64> = derived.iter().map(|r| r.percentage).collect();
        assert_eq!(percentages, vec![75.0, 55.0, 92.5]);
    }

    #[test]
    fn test_statuses_against_threshold() {
        let derived = derive_records(&sample_roster(), PASSING_PERCENTAGE).unwrap();
        assert!(derived.iter().all(|r| r.status == Status::Pass));

        let strict = derive_records(&sample_roster(), 60.0).unwrap();
        let statuses: Vec<Status> = strict.iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![Status::Pass, Status::Fail, Status::Pass]);
    }

    #[test]
    fn test_status_boundary_is_inclusive() {
        // Exactly at the threshold counts as a pass.
        let derived = derive_records(&sample_roster(), 55.0).unwrap();
        assert_eq!(derived[1].percentage, 55.0);
        assert_eq!(derived[1].status, Status::Pass);
    }

    #[test]
    fn test_zero_subjects_is_computation_error() {
        let roster = parse_roster(b"StudentID,Name\nS1,Student1\n").unwrap();
        let err = derive_records(&roster, PASSING_PERCENTAGE).unwrap_err();
        assert!(matches!(err, ReportError::Computation(_)));
    }

    #[test]
    fn test_top_by_total_order() {
        let derived = derive_records(&sample_roster(), PASSING_PERCENTAGE).unwrap();
        let top = top_by_total(&derived, 3);

        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Student3", "Student1", "Student2"]);
    }

    #[test]
    fn test_top_by_total_truncates() {
        let derived = derive_records(&sample_roster(), PASSING_PERCENTAGE).unwrap();
        let top = top_by_total(&derived, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Student3");
        assert_eq!(top[1].name, "Student1");
    }

    #[test]
    fn test_top_by_total_stable_on_ties() {
        let table = "StudentID,Name,Math\n\
                     S1,Early,70\n\
                     S2,Late,70\n\
                     S3,Best,90\n\
                     S4,AlsoLate,70\n";
        let roster = parse_roster(table.as_bytes()).unwrap();
        let derived = derive_records(&roster, PASSING_PERCENTAGE).unwrap();

        let top = top_by_total(&derived, 3);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        // The earlier of the tied records takes the remaining spots.
        assert_eq!(names, vec!["Best", "Early", "Late"]);
    }

    #[test]
    fn test_pass_fail_counts_partition_roster() {
        let derived = derive_records(&sample_roster(), 60.0).unwrap();
        let (passed, failed) = classify_pass_fail(&derived);
        assert_eq!(passed, 2);
        assert_eq!(failed, 1);
        assert_eq!(passed + failed, derived.len());
    }

    #[test]
    fn test_per_subject_stats() {
        let stats = per_subject_stats(&sample_roster()).unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].subject, "Math");
        assert!((stats[0].average - 230.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats[0].top_name, "Student3");
        assert_eq!(stats[0].top_score, 90.0);

        assert_eq!(stats[1].subject, "Science");
        assert!((stats[1].average - 215.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats[1].top_name, "Student3");
        assert_eq!(stats[1].top_score, 95.0);
    }

    #[test]
    fn test_per_subject_leader_tie_goes_to_first_row() {
        let table = "StudentID,Name,Math\n\
                     S1,First,90\n\
                     S2,Second,90\n";
        let roster = parse_roster(table.as_bytes()).unwrap();
        let stats = per_subject_stats(&roster).unwrap();
        assert_eq!(stats[0].top_name, "First");
    }

    #[test]
    fn test_empty_roster_is_computation_error() {
        let roster = parse_roster(b"StudentID,Name,Math\n").unwrap();

        let err = per_subject_stats(&roster).unwrap_err();
        assert!(matches!(err, ReportError::Computation(_)));

        let err = ClassSummary::from_roster(&roster, 3, PASSING_PERCENTAGE).unwrap_err();
        assert!(matches!(err, ReportError::Computation(_)));
    }

    #[test]
    fn test_summary_round_trip() {
        let summary = ClassSummary::from_roster(&sample_roster(), 3, PASSING_PERCENTAGE).unwrap();

        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.top.len(), 3);
        assert_eq!(summary.top[0].name, "Student3");
        assert_eq!(summary.top[0].total_marks, 185.0);
        assert_eq!(summary.top[0].percentage, 92.5);
        assert_eq!(summary.subjects.len(), 2);
    }
}

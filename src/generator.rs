//! The end-to-end report pipeline: fetch one marks table, compute its
//! summary, store one report.

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{ReportError, Result};
use crate::event::SourceObject;
use crate::report::{render_local_summary, render_report};
use crate::roster::parse_roster;
use crate::stats::{ClassSummary, PASSING_PERCENTAGE};
use crate::store::ObjectStore;

/// How many top students the report lists unless the caller asks otherwise.
pub const DEFAULT_TOP_N: usize = 3;

/// Generates summary reports for uploaded marks tables.
///
/// Storage access is injected so the pipeline itself performs no ambient
/// I/O; any failure aborts the whole invocation and nothing partial is
/// stored.
pub struct ReportGenerator<S> {
    store: S,
    settings: Settings,
}

impl<S: ObjectStore> ReportGenerator<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self { store, settings }
    }

    /// Processes one uploaded marks table and returns the key the report was
    /// stored under.
    pub async fn handle_upload(&self, source: &SourceObject, top_n: usize) -> Result<String> {
        let bytes = self.store.fetch(&source.bucket, &source.key).await?;
        debug!(bytes = bytes.len(), "Source table fetched");

        let roster = parse_roster(&bytes)?;
        let summary = ClassSummary::from_roster(&roster, top_n, PASSING_PERCENTAGE)?;
        let report = render_report(&source.key, &summary);

        let report_key = report_key_for(&source.key);
        self.store
            .store(
                &self.settings.destination_bucket,
                &report_key,
                report.into_bytes(),
            )
            .await?;

        info!(
            students = summary.passed + summary.failed,
            report_key = %report_key,
            "Report stored"
        );

        Ok(report_key)
    }
}

/// Derives the report key from the source key:
/// `uploads/class-a.csv` becomes `summary-class-a.txt`.
pub fn report_key_for(source_key: &str) -> String {
    let base = source_key.rsplit('/').next().unwrap_or(source_key);
    let stem = base.strip_suffix(".csv").unwrap_or(base);
    format!("summary-{stem}.txt")
}

/// Standalone mode: reads a marks table from a local file and renders the
/// abbreviated console summary.
pub fn local_summary(path: &str) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReportError::SourceNotFound(path.to_string()),
        _ => ReportError::Io(e),
    })?;

    let roster = parse_roster(&bytes)?;
    let summary = ClassSummary::from_roster(&roster, DEFAULT_TOP_N, PASSING_PERCENTAGE)?;

    Ok(render_local_summary(&summary))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_key_strips_csv_extension() {
        assert_eq!(report_key_for("marks.csv"), "summary-marks.txt");
    }

    #[test]
    fn test_report_key_uses_basename() {
        assert_eq!(
            report_key_for("2026/term-1/class-a.csv"),
            "summary-class-a.txt"
        );
    }

    #[test]
    fn test_report_key_without_csv_extension() {
        assert_eq!(report_key_for("marks.data"), "summary-marks.data.txt");
    }

    #[test]
    fn test_local_summary_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");

        let err = local_summary(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ReportError::SourceNotFound(_)));
    }

    #[test]
    fn test_local_summary_renders_top_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        std::fs::write(&path, "StudentID,Name,Math\nS1,Student1,80\n").unwrap();

        let text = local_summary(path.to_str().unwrap()).unwrap();
        assert!(text.contains("Student Performance Summary (Local Test)"));
        assert!(text.contains("Student1"));
    }
}

//! Report rendering.
//!
//! Pure text formatting: everything here is a deterministic function of the
//! computed summary, with all I/O left to the caller.

use crate::stats::{ClassSummary, DerivedRecord};

const SECTION_WIDTH: usize = 60;
const LOCAL_WIDTH: usize = 50;

/// Renders the full report stored by the triggered pipeline.
pub fn render_report(file_key: &str, summary: &ClassSummary) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(SECTION_WIDTH));
    lines.push("        Enhanced Student Performance Summary Report".to_string());
    lines.push("=".repeat(SECTION_WIDTH));
    lines.push(format!("\nAnalysis of file: {file_key}\n"));

    lines.push("-".repeat(SECTION_WIDTH));
    lines.push(format!("Top {} Students (Overall)", summary.top_n));
    lines.push("-".repeat(SECTION_WIDTH));
    lines.extend(top_table(&summary.top));
    lines.push("\n".to_string());

    lines.push("-".repeat(SECTION_WIDTH));
    lines.push("Class Pass/Fail Summary".to_string());
    lines.push("-".repeat(SECTION_WIDTH));
    lines.push(format!(
        "Passing Percentage Threshold: {}%",
        fmt_marks(summary.threshold)
    ));
    lines.push(format!("Total Students Passed: {}", summary.passed));
    lines.push(format!("Total Students Failed: {}", summary.failed));
    lines.push("\n".to_string());

    lines.push("-".repeat(SECTION_WIDTH));
    lines.push("Subject-Level Analysis".to_string());
    lines.push("-".repeat(SECTION_WIDTH));
    for stat in &summary.subjects {
        lines.push(format!("-> {}:", stat.subject));
        lines.push(format!("   - Average Score: {:.2}", stat.average));
        lines.push(format!(
            "   - Top Scorer: {} ({} marks)",
            stat.top_name,
            fmt_marks(stat.top_score)
        ));
    }
    lines.push("\n".to_string());

    lines.join("\n")
}

/// Renders the abbreviated console report used by the standalone local mode:
/// title and top-N table only.
pub fn render_local_summary(summary: &ClassSummary) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(String::new());
    lines.push("=".repeat(LOCAL_WIDTH));
    lines.push("        Student Performance Summary (Local Test)".to_string());
    lines.push("=".repeat(LOCAL_WIDTH));
    lines.push(String::new());
    lines.push(format!("Top {} Students (Overall):", summary.top_n));
    lines.extend(top_table(&summary.top));
    lines.push(String::new());
    lines.push("=".repeat(LOCAL_WIDTH));

    lines.join("\n")
}

/// Lays out the top students as right-aligned `Name TotalMarks Percentage`
/// columns, two spaces apart, header row included.
fn top_table(top: &[DerivedRecord]) -> Vec<String> {
    let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
    let totals: Vec<String> = top.iter().map(|r| fmt_marks(r.total_marks)).collect();
    let percentages: Vec<String> = top.iter().map(|r| fmt_percent(r.percentage)).collect();

    let name_w = column_width("Name", &names);
    let total_w = column_width("TotalMarks", &totals);
    let pct_w = column_width("Percentage", &percentages);

    let mut rows = Vec::with_capacity(top.len() + 1);
    rows.push(format!(
        "{:>name_w$}  {:>total_w$}  {:>pct_w$}",
        "Name", "TotalMarks", "Percentage"
    ));
    for i in 0..top.len() {
        rows.push(format!(
            "{:>name_w$}  {:>total_w$}  {:>pct_w$}",
            names[i], totals[i], percentages[i]
        ));
    }
    rows
}

fn column_width(header: &str, values: &[impl AsRef<str>]) -> usize {
    values
        .iter()
        .map(|v| v.as_ref().len())
        .fold(header.len(), usize::max)
}

/// Formats a marks value: integral values print with no fractional part,
/// anything else rounds to two decimals ("150", "92.5", "76.67").
fn fmt_marks(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Formats a percentage rounded to two decimals, keeping at least one
/// decimal place ("75.0", "92.5", "76.67").
fn fmt_percent(value: f64) -> String {
    let mut s = format!("{value:.2}");
    if s.ends_with('0') {
        s.pop();
    }
    s
}

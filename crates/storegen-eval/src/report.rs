use crate::metrics::VerificationReport;
use crate::model::Violation;

/// Render a deterministic markdown report from metrics and violations.
pub fn render_report(
    metrics: &VerificationReport,
    violations: &[Violation],
    max_examples: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("# Storegen Verification Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- metrics_version: {}", metrics.metrics_version));
    lines.push(format!(
        "- seed: {}",
        metrics
            .seed
            .map(|seed| seed.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    lines.push(format!(
        "- today: {}",
        metrics
            .today
            .map(|today| today.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    lines.push(format!("- violations: {}", metrics.violations));
    lines.push(String::new());

    lines.push("## Row counts".to_string());
    lines.push("| table | rows_expected | rows_found |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    for table in &metrics.tables {
        let expected = table
            .rows_expected
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "| {} | {} | {} |",
            table.table, expected, table.rows_found
        ));
    }
    lines.push(String::new());

    lines.push("## Checks".to_string());
    lines.push("| check | checked | violations |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    for (name, stats) in metrics.checks.rows() {
        lines.push(format!(
            "| {} | {} | {} |",
            name, stats.checked, stats.violations
        ));
    }
    lines.push(String::new());

    if !metrics.warnings.is_empty() {
        lines.push("## Warnings".to_string());
        for warning in &metrics.warnings {
            lines.push(format!("- {warning}"));
        }
        lines.push(String::new());
    }

    if !violations.is_empty() {
        lines.push("## Top violations".to_string());
        for violation in violations.iter().take(max_examples) {
            let row = violation
                .row_index
                .map(|row| format!(" row {row}"))
                .unwrap_or_default();
            let example = violation
                .example
                .as_ref()
                .map(|value| format!(" example={value}"))
                .unwrap_or_default();
            lines.push(format!(
                "- [{}] {}{}: {}{}",
                violation.code, violation.path, row, violation.message, example
            ));
        }
        if violations.len() > max_examples {
            lines.push(format!(
                "- ... {} more",
                violations.len() - max_examples
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(metrics));
    lines.join("\n")
}

fn recommendations(metrics: &VerificationReport) -> Vec<String> {
    let checks = &metrics.checks;
    let mut lines = Vec::new();
    if checks.dense_ids.violations > 0 {
        lines.push("- ids must run 1..=count; regenerate instead of editing files.".to_string());
    }
    if checks.unique.violations > 0 {
        lines.push("- duplicate names or emails; raise the unique attempt limit.".to_string());
    }
    if checks.foreign_keys.violations > 0 {
        lines.push("- dangling references; generate parent tables before children.".to_string());
    }
    if checks.order_totals.violations > 0 || checks.price_snapshot.violations > 0 {
        lines.push("- order amounts drifted from their items; regenerate the dataset.".to_string());
    }
    if metrics.violations == 0 {
        lines.push("- no violations detected; compare metrics across runs for drift.".to_string());
    }
    lines
}

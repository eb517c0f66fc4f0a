//! Rendering helpers (plain text) for human-readable output.

use sourcefix_types::endpoint::EndpointAdvice;
use sourcefix_types::finding::Severity;
use sourcefix_types::report::{FixReport, SourceReport, VerdictStatus};

const RULE: &str = "==================================================";

pub fn render_report_text(report: &SourceReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Validation report for: {}\n", report.file));
    out.push_str(RULE);
    out.push('\n');

    let section = |out: &mut String, title: &str, severity: Severity| {
        let entries: Vec<&str> = report
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .map(|f| f.message.as_str())
            .collect();
        if entries.is_empty() {
            return;
        }
        out.push_str(&format!("\n{} ({}):\n", title, entries.len()));
        for message in entries {
            out.push_str(&format!("  - {message}\n"));
        }
    };

    section(&mut out, "ERRORS", Severity::Error);
    section(&mut out, "WARNINGS", Severity::Warn);
    section(&mut out, "INFO", Severity::Info);

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(match report.verdict.status {
        VerdictStatus::Fail => "Source has errors - fix before using\n",
        VerdictStatus::Warn => "Source is valid (with warnings)\n",
        _ => "Source is valid\n",
    });

    out
}

pub fn render_endpoints_text(file: &str, advice: &[EndpointAdvice]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Endpoints in: {}\n", file));
    out.push_str(RULE);
    out.push('\n');

    if advice.is_empty() {
        out.push_str("\nNo endpoints found.\n");
        return out;
    }

    out.push_str(&format!("\nFound {} endpoint(s)\n", advice.len()));
    for (i, entry) in advice.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. [{}] {}\n",
            i + 1,
            entry.candidate.shape.label(),
            entry.candidate.text
        ));
        for suggestion in &entry.suggestions {
            out.push_str(&format!("   - {}\n", suggestion.message()));
        }
    }

    out
}

pub fn render_fix_text(report: &FixReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Fixes for: {}\n", report.file));
    out.push_str(RULE);
    out.push('\n');

    if report.records.is_empty() {
        out.push_str("\nNo changes needed\n");
        return out;
    }

    out.push_str("\nChanges applied:\n");
    let mut total = 0u64;
    for record in &report.records {
        out.push_str(&format!(
            "  - {} ({} occurrence(s))\n",
            record.description, record.count
        ));
        total += record.count;
    }
    out.push_str(&format!("\nTotal fixes applied: {total}\n"));

    out
}

use sourcefix_types::finding::{Finding, FindingCode, Severity, Span};
use sourcefix_types::fix::FixRecord;
use sourcefix_types::report::{FixReport, SourceReport, ToolInfo, VerdictStatus};

fn tool() -> ToolInfo {
    ToolInfo {
        name: "sourcefix".to_string(),
        version: Some("0.0.0".to_string()),
    }
}

#[test]
fn report_from_findings_derives_verdict_and_validity() {
    let findings = vec![
        Finding::info("property 'name' declared").with_span(Span::new(10, 14)),
        Finding::warn(FindingCode::Recommendation, "consider try/catch"),
        Finding::error(FindingCode::MissingRequiredMethod, "missing required method: search"),
    ];

    let report = SourceReport::from_findings(tool(), "source.js", findings);

    assert_eq!(report.schema, sourcefix_types::schema::SOURCEFIX_REPORT_V1);
    assert!(!report.valid);
    assert_eq!(report.verdict.status, VerdictStatus::Fail);
    assert_eq!(report.verdict.counts.info, 1);
    assert_eq!(report.verdict.counts.warnings, 1);
    assert_eq!(report.verdict.counts.errors, 1);
    assert!(report.run.started_at.is_none());
}

#[test]
fn report_with_only_warnings_is_valid_but_warn() {
    let findings = vec![Finding::warn(
        FindingCode::AsyncWithoutAwait,
        "async function without await detected",
    )];

    let report = SourceReport::from_findings(tool(), "source.js", findings);

    assert!(report.valid);
    assert_eq!(report.verdict.status, VerdictStatus::Warn);
}

#[test]
fn report_with_no_findings_passes() {
    let report = SourceReport::from_findings(tool(), "source.js", vec![]);

    assert!(report.valid);
    assert_eq!(report.verdict.status, VerdictStatus::Pass);
    assert_eq!(report.verdict.counts.errors, 0);
}

#[test]
fn fix_report_new_sets_schema_and_defaults() {
    let records = vec![FixRecord::new("Updated /old-api/ to /api/", 2)];
    let report = FixReport::new(tool(), "source.js", true, records);

    assert_eq!(report.schema, sourcefix_types::schema::SOURCEFIX_FIX_V1);
    assert!(report.changed);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].count, 2);
    assert!(report.sha256_before.is_none());
    assert!(report.sha256_after.is_none());
}

#[test]
fn severity_default_is_info() {
    assert_eq!(Severity::default(), Severity::Info);
}

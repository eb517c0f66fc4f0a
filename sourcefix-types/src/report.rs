use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finding::{Finding, Severity};
use crate::fix::FixRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Pass,
    Warn,
    Fail,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counts {
    #[serde(default)]
    pub info: u64,

    #[serde(default)]
    pub warnings: u64,

    #[serde(default)]
    pub errors: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub status: VerdictStatus,

    #[serde(default)]
    pub counts: Counts,
}

/// Validation report for one source buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub file: String,
    pub valid: bool,
    pub verdict: Verdict,

    #[serde(default)]
    pub findings: Vec<Finding>,
}

impl SourceReport {
    /// Assemble a report from accumulated findings; validity and the verdict
    /// are derived, never supplied.
    pub fn from_findings(tool: ToolInfo, file: impl Into<String>, findings: Vec<Finding>) -> Self {
        let mut counts = Counts::default();
        for f in &findings {
            match f.severity {
                Severity::Info => counts.info += 1,
                Severity::Warn => counts.warnings += 1,
                Severity::Error => counts.errors += 1,
            }
        }
        let status = if counts.errors > 0 {
            VerdictStatus::Fail
        } else if counts.warnings > 0 {
            VerdictStatus::Warn
        } else {
            VerdictStatus::Pass
        };

        Self {
            schema: crate::schema::SOURCEFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::default(),
            file: file.into(),
            valid: counts.errors == 0,
            verdict: Verdict { status, counts },
            findings,
        }
    }
}

/// Report for one autofix run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    pub file: String,
    pub changed: bool,

    #[serde(default)]
    pub records: Vec<FixRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

impl FixReport {
    pub fn new(tool: ToolInfo, file: impl Into<String>, changed: bool, records: Vec<FixRecord>) -> Self {
        Self {
            schema: crate::schema::SOURCEFIX_FIX_V1.to_string(),
            tool,
            run: RunInfo::default(),
            file: file.into(),
            changed,
            records,
            sha256_before: None,
            sha256_after: None,
        }
    }
}

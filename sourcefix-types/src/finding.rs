use serde::{Deserialize, Serialize};

/// Severity of a single finding.
///
/// Only `Error` findings block validity; warnings and info are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn is_warn(self) -> bool {
        matches!(self, Severity::Warn)
    }
}

/// Symbolic reason attached to every finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    MissingBaseClass,
    MissingContractField,
    MissingRequiredMethod,
    SecurityViolation,
    AsyncWithoutAwait,
    Recommendation,
    Informational,
}

/// Half-open byte offset range `[start, end)` into a source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One observation about a source buffer.
///
/// Findings are append-only and are emitted in discovery order; deduplication
/// is a display concern and never happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: FindingCode,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Finding {
    pub fn error(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            span: None,
        }
    }

    pub fn warn(code: FindingCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            code,
            message: message.into(),
            span: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: FindingCode::Informational,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// True when no finding in the slice blocks validity.
pub fn is_valid(findings: &[Finding]) -> bool {
    !findings.iter().any(|f| f.severity.is_error())
}

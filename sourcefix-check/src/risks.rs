//! Risk and convention scanning: forbidden constructs, discouraged practices,
//! and advisory presence checks. Every test is an independent whole-buffer
//! predicate; one finding per sentinel kind regardless of occurrence count.

use sourcefix_patterns::PatternSet;
use sourcefix_types::buffer::SourceBuffer;
use sourcefix_types::finding::{Finding, FindingCode, Span};

pub fn scan_risks(patterns: &PatternSet, buffer: &SourceBuffer) -> Vec<Finding> {
    let text = buffer.as_str();
    let mut findings = Vec::new();

    // Heuristic only: a function may suspend through a nested callback.
    if text.contains("async ") && !text.contains("await ") {
        findings.push(Finding::warn(
            FindingCode::AsyncWithoutAwait,
            "async function without await detected",
        ));
    }

    match span_of(text, "Network.") {
        Some(span) => findings.push(Finding::info("uses the Network API").with_span(span)),
        None => findings.push(Finding::warn(
            FindingCode::Recommendation,
            "no Network API usage found",
        )),
    }

    if let Some(span) = span_of(text, "JSON.parse") {
        findings.push(Finding::info("parses JSON responses").with_span(span));
    }

    if let Some(span) = span_of(text, "new HtmlDocument") {
        findings.push(Finding::info("uses HTML parsing").with_span(span));
    }

    for sentinel in patterns.forbidden {
        if let Some(span) = span_of(text, sentinel.needle) {
            findings.push(
                Finding::error(FindingCode::SecurityViolation, sentinel.message).with_span(span),
            );
        }
    }

    for sentinel in patterns.discouraged {
        if let Some(span) = span_of(text, sentinel.needle) {
            findings.push(
                Finding::warn(FindingCode::Recommendation, sentinel.message).with_span(span),
            );
        }
    }

    match span_of(text, "try {") {
        Some(span) => findings.push(Finding::info("uses try/catch for error handling").with_span(span)),
        None => findings.push(Finding::warn(
            FindingCode::Recommendation,
            "consider adding error handling with try/catch",
        )),
    }

    match span_of(text, "encodeURIComponent") {
        Some(span) => findings.push(Finding::info("URL-encodes parameters").with_span(span)),
        None => findings.push(Finding::warn(
            FindingCode::Recommendation,
            "consider URL-encoding query parameters",
        )),
    }

    if let Some(span) = span_of(text, "timeout") {
        findings.push(Finding::info("handles request timeouts").with_span(span));
    }

    findings
}

fn span_of(text: &str, needle: &str) -> Option<Span> {
    text.find(needle)
        .map(|start| Span::new(start, start + needle.len()))
}

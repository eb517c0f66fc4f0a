//! Required-declaration checks against the plugin contract.

use sourcefix_patterns::{BASE_CLASS, PatternSet, RuleKind};
use sourcefix_types::buffer::SourceBuffer;
use sourcefix_types::finding::{Finding, FindingCode, Span};

/// Test every contract rule against the buffer and emit one finding per rule.
///
/// The base-class check runs first; its failure does not suppress the
/// per-field checks. A rule is satisfied when any one of its recognizer
/// shapes matches.
pub fn check_contract(patterns: &PatternSet, buffer: &SourceBuffer) -> Vec<Finding> {
    let text = buffer.as_str();
    let mut findings = Vec::new();

    match patterns.base_class.find(text) {
        Some(m) => findings.push(
            Finding::info(format!("class extends {BASE_CLASS}"))
                .with_span(Span::new(m.start(), m.end())),
        ),
        None => findings.push(Finding::error(
            FindingCode::MissingBaseClass,
            format!("no class extending {BASE_CLASS} found"),
        )),
    }

    for rule in &patterns.contract_rules {
        let what = match rule.kind {
            RuleKind::Property => "property",
            RuleKind::Method => "method",
        };
        match rule.matches(text) {
            Some(span) => {
                findings.push(Finding::info(format!("{what} '{}' declared", rule.key)).with_span(span));
            }
            None => {
                let code = match rule.kind {
                    RuleKind::Property => FindingCode::MissingContractField,
                    RuleKind::Method => FindingCode::MissingRequiredMethod,
                };
                findings.push(Finding::error(
                    code,
                    format!("missing required {what}: {}", rule.key),
                ));
            }
        }
    }

    for rule in &patterns.advisory_rules {
        if let Some(span) = rule.matches(text) {
            findings.push(
                Finding::info(format!("optional method '{}' implemented", rule.key)).with_span(span),
            );
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcefix_types::finding::{Severity, is_valid};

    fn buf(contents: &str) -> SourceBuffer {
        SourceBuffer::new("source.js", contents)
    }

    #[test]
    fn missing_base_class_is_first_and_does_not_suppress_field_checks() {
        let patterns = PatternSet::new();
        let findings = check_contract(&patterns, &buf("const x = 1;"));

        assert_eq!(findings[0].code, FindingCode::MissingBaseClass);
        // One finding per contract rule still follows.
        assert_eq!(findings.len(), 1 + patterns.contract_rules.len());
    }

    #[test]
    fn getter_declaration_satisfies_a_property_rule() {
        let patterns = PatternSet::new();
        let src = "class A extends ComicSource { get name() { return 'x'; } }";
        let findings = check_contract(&patterns, &buf(src));

        let name = findings
            .iter()
            .find(|f| f.message.contains("'name'"))
            .expect("name finding");
        assert_eq!(name.severity, Severity::Info);
        assert!(name.span.is_some());
    }

    #[test]
    fn async_qualifier_does_not_block_method_recognition() {
        let patterns = PatternSet::new();
        let src = "class A extends ComicSource {\n  async search(kw) {}\n}";
        let findings = check_contract(&patterns, &buf(src));

        let search = findings
            .iter()
            .find(|f| f.message.contains("'search'"))
            .expect("search finding");
        assert_eq!(search.severity, Severity::Info);
    }

    #[test]
    fn advisory_methods_report_info_when_present_and_stay_silent_when_absent() {
        let patterns = PatternSet::new();
        let with = check_contract(&patterns, &buf("  explore(page) {}"));
        assert!(with.iter().any(|f| f.message.contains("'explore'")));

        let without = check_contract(&patterns, &buf("const x = 1;"));
        assert!(!without.iter().any(|f| f.message.contains("explore")));
    }

    #[test]
    fn all_rules_present_yields_no_errors() {
        let patterns = PatternSet::new();
        let src = r#"
class Demo extends ComicSource {
    name = "Demo";
    key = "demo";
    version = "1.0.0";
    minAppVersion = "1.0.0";
    url = "https://example.com";

    async getPopular(page) {}
    async getLatest(page) {}
    async search(keyword, page) {}
    async loadInfo(id) {}
    async loadEp(id, ep) {}
}
"#;
        let findings = check_contract(&patterns, &buf(src));
        assert!(is_valid(&findings));
    }
}

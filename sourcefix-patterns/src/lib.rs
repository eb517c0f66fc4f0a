//! The pattern library: every recognizer and rewrite table the analysis and
//! fix engines consult, as immutable data.
//!
//! A [`PatternSet`] is compiled once and injected by reference into each
//! component; nothing in this crate carries mutable state.

use regex::Regex;
use sourcefix_types::endpoint::EndpointShape;
use sourcefix_types::finding::Span;

/// Superclass every plugin must extend.
pub const BASE_CLASS: &str = "ComicSource";

/// Metadata properties a plugin must declare.
pub const REQUIRED_PROPERTIES: &[&str] = &["name", "key", "version", "minAppVersion", "url"];

/// Behavioral methods a plugin must declare.
pub const REQUIRED_METHODS: &[&str] = &["getPopular", "getLatest", "search", "loadInfo", "loadEp"];

/// Commonly-implemented but non-mandatory methods; presence is reported as
/// informational, absence is silent.
pub const ADVISORY_METHODS: &[&str] = &[
    "explore",
    "category",
    "account",
    "favorites",
    "history",
    "comic.loadInfo",
    "comic.loadEp",
    "comic.loadComments",
    "comment.loadReply",
    "optionList",
    "optionLoader",
    "onImageLoad",
    "onThumbnailLoad",
];

/// A literal construct the scanner looks for verbatim.
#[derive(Debug, Clone, Copy)]
pub struct Sentinel {
    pub needle: &'static str,
    pub message: &'static str,
}

/// Code-execution constructs that are forbidden regardless of context.
pub const FORBIDDEN_SENTINELS: &[Sentinel] = &[
    Sentinel {
        needle: "eval(",
        message: "eval() is not allowed",
    },
    Sentinel {
        needle: "new Function(",
        message: "the Function constructor is not allowed",
    },
];

/// Document-mutation constructs that are discouraged but not forbidden.
pub const DISCOURAGED_SENTINELS: &[Sentinel] = &[Sentinel {
    needle: "document.write",
    message: "document.write is not recommended",
}];

/// Deprecated path segments and their replacements. Table order is the
/// application order; entries are applied as case-sensitive full-buffer
/// substring replaces.
pub const DEPRECATED_PATHS: &[(&str, &str)] = &[
    ("/api/v1/", "/api/v2/"),
    ("/old-api/", "/api/"),
    ("/manga/", "/comics/"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    Property,
    Method,
}

/// One contract field with its ordered recognizer shapes. A rule is satisfied
/// when any single recognizer matches.
#[derive(Debug, Clone)]
pub struct ContractRule {
    pub key: &'static str,
    pub kind: RuleKind,
    recognizers: Vec<Regex>,
}

impl ContractRule {
    /// A property is declared via assignment, a getter, or a setter.
    fn property(key: &'static str) -> Self {
        let escaped = regex::escape(key);
        Self {
            key,
            kind: RuleKind::Property,
            recognizers: vec![
                re(&format!(r"\b{escaped}\s*=")),
                re(&format!(r"get\s+{escaped}\s*\(")),
                re(&format!(r"set\s+{escaped}\s*\(")),
            ],
        }
    }

    /// A method is declared when the identifier is followed by an opening
    /// parenthesis and preceded by whitespace; an `async ` qualifier itself
    /// ends in whitespace, so it never blocks recognition.
    fn method(key: &'static str) -> Self {
        let escaped = regex::escape(key);
        Self {
            key,
            kind: RuleKind::Method,
            recognizers: vec![re(&format!(r"\s{escaped}\s*\("))],
        }
    }

    /// First recognizer shape that matches, if any.
    pub fn matches(&self, text: &str) -> Option<Span> {
        self.recognizers
            .iter()
            .find_map(|r| r.find(text))
            .map(|m| Span::new(m.start(), m.end()))
    }
}

/// The compiled pattern library.
#[derive(Debug)]
pub struct PatternSet {
    /// `class <Ident> extends ComicSource`.
    pub base_class: Regex,
    /// Required properties then required methods, in contract order.
    pub contract_rules: Vec<ContractRule>,
    pub advisory_rules: Vec<ContractRule>,
    /// Endpoint recognizer shapes, in declaration order.
    pub endpoint_shapes: Vec<(EndpointShape, Regex)>,
    /// Declared base-url property; group 1 is the literal.
    pub base_url: Regex,
    pub forbidden: &'static [Sentinel],
    pub discouraged: &'static [Sentinel],
    pub deprecated_paths: &'static [(&'static str, &'static str)],
}

impl PatternSet {
    pub fn new() -> Self {
        let mut contract_rules = Vec::new();
        for key in REQUIRED_PROPERTIES {
            contract_rules.push(ContractRule::property(key));
        }
        for key in REQUIRED_METHODS {
            contract_rules.push(ContractRule::method(key));
        }
        let advisory_rules = ADVISORY_METHODS
            .iter()
            .map(|key| ContractRule::method(key))
            .collect();

        let endpoint_shapes = vec![
            (
                EndpointShape::ApiSegment,
                re(r#"['"](https?://[^'"]+?/api/[^'"]+?)['"]"#),
            ),
            (
                EndpointShape::VersionSegment,
                re(r#"['"](https?://[^'"]+?/v\d+/[^'"]+?)['"]"#),
            ),
            (
                EndpointShape::Graphql,
                re(r#"['"](https?://[^'"]+?/graphql)['"]"#),
            ),
            (
                EndpointShape::NetworkCallArg,
                re(r#"Network\.(?:get|post|delete)\s*\(\s*['"]([^'"]+?)['"]"#),
            ),
            (
                EndpointShape::BaseUrlTemplate,
                re(r#"`\$\{this\.url\}([^`]+?)`"#),
            ),
        ];

        Self {
            base_class: re(&format!(r"class\s+\w+\s+extends\s+{BASE_CLASS}\b")),
            contract_rules,
            advisory_rules,
            endpoint_shapes,
            base_url: re(r#"\burl\s*[:=]\s*['"]([^'"]+)['"]"#),
            forbidden: FORBIDDEN_SENTINELS,
            discouraged: DISCOURAGED_SENTINELS,
            deprecated_paths: DEPRECATED_PATHS,
        }
    }

    /// The declared base url, if the buffer carries a property-style `url`
    /// field with a string literal value.
    pub fn declared_base_url<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.base_url
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("recognizer pattern compiles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn property_rule_accepts_assignment_getter_and_setter() {
        let rule = ContractRule::property("version");
        assert!(rule.matches("  version = \"1.0.0\"").is_some());
        assert!(rule.matches("  get version() { return v; }").is_some());
        assert!(rule.matches("  set version(v) { this.v = v; }").is_some());
        assert!(rule.matches("  minAppVersion = \"1.0.0\"").is_none());
    }

    #[test]
    fn method_rule_requires_leading_whitespace() {
        let rule = ContractRule::method("search");
        assert!(rule.matches("  search(keyword) {").is_some());
        assert!(rule.matches("  async search(keyword) {").is_some());
        // Substring of another identifier is not a declaration.
        assert!(rule.matches("mysearch(keyword) {").is_none());
    }

    #[test]
    fn dotted_method_keys_are_escaped() {
        let rule = ContractRule::method("comic.loadInfo");
        assert!(rule.matches("  comic.loadInfo(id) {").is_some());
        // The dot is literal, not a wildcard.
        assert!(rule.matches("  comicXloadInfo(id) {").is_none());
    }

    #[test]
    fn base_class_recognizer_names_the_superclass() {
        let set = PatternSet::new();
        assert!(set.base_class.is_match("class Foo extends ComicSource {"));
        assert!(!set.base_class.is_match("class Foo extends Source {"));
    }

    #[test]
    fn contract_rules_keep_declaration_order() {
        let set = PatternSet::new();
        let keys: Vec<&str> = set.contract_rules.iter().map(|r| r.key).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "key",
                "version",
                "minAppVersion",
                "url",
                "getPopular",
                "getLatest",
                "search",
                "loadInfo",
                "loadEp",
            ]
        );
    }

    #[test]
    fn declared_base_url_accepts_both_separators() {
        let set = PatternSet::new();
        assert_eq!(
            set.declared_base_url("url: 'https://e.com'"),
            Some("https://e.com")
        );
        assert_eq!(
            set.declared_base_url("url = \"https://e.com\""),
            Some("https://e.com")
        );
        assert_eq!(set.declared_base_url("uri = 'https://e.com'"), None);
    }

    #[test]
    fn deprecated_table_order_is_application_order() {
        assert_eq!(DEPRECATED_PATHS[0], ("/api/v1/", "/api/v2/"));
        assert_eq!(DEPRECATED_PATHS[1], ("/old-api/", "/api/"));
        assert_eq!(DEPRECATED_PATHS[2], ("/manga/", "/comics/"));
    }
}

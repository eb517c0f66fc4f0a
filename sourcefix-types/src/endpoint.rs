use serde::{Deserialize, Serialize};

use crate::finding::Span;

/// Which recognizer shape produced a candidate.
///
/// Shapes are independent and non-mutually-exclusive: the same literal may be
/// captured once per shape, and that overlap is preserved downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointShape {
    /// Absolute URL whose path contains an `/api/` segment.
    ApiSegment,
    /// Absolute URL whose path contains a `/v<digits>/` segment.
    VersionSegment,
    /// Absolute URL ending in `/graphql`.
    Graphql,
    /// First string-literal argument to a network-call method.
    NetworkCallArg,
    /// Template literal concatenating the configured base url with a suffix.
    BaseUrlTemplate,
}

impl EndpointShape {
    pub fn label(self) -> &'static str {
        match self {
            EndpointShape::ApiSegment => "api-segment",
            EndpointShape::VersionSegment => "version-segment",
            EndpointShape::Graphql => "graphql",
            EndpointShape::NetworkCallArg => "network-call-arg",
            EndpointShape::BaseUrlTemplate => "base-url-template",
        }
    }
}

/// A text span suspected of containing an outbound request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCandidate {
    pub text: String,
    pub span: Span,
    pub shape: EndpointShape,
}

/// Advisory produced by the endpoint analyzer for one candidate.
///
/// Nothing here is ever auto-applied; the autofix engine has its own rewrite
/// pipeline with stricter guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EndpointSuggestion {
    /// The literal looks relative; suggest a base-url template.
    TemplateRelative {
        replacement: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolved: Option<String>,
    },
    /// Old-major API version segment with no new-major counterpart.
    LegacyApiVersion,
    /// Insecure scheme; suggest the secure equivalent.
    InsecureScheme { replacement: String },
    /// A deprecated path segment occurs; suggest the substituted form.
    DeprecatedPath { replacement: String },
}

impl EndpointSuggestion {
    pub fn message(&self) -> String {
        match self {
            EndpointSuggestion::TemplateRelative {
                replacement,
                resolved,
            } => match resolved {
                Some(full) => format!(
                    "consider a template literal: {replacement} (resolves to {full})"
                ),
                None => format!("consider a template literal: {replacement}"),
            },
            EndpointSuggestion::LegacyApiVersion => {
                "using v1 API, check whether v2 is available".to_string()
            }
            EndpointSuggestion::InsecureScheme { replacement } => {
                format!("uses http instead of https: {replacement}")
            }
            EndpointSuggestion::DeprecatedPath { replacement } => {
                format!("deprecated path segment: {replacement}")
            }
        }
    }
}

/// One extracted candidate together with every suggestion that applies to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointAdvice {
    pub candidate: EndpointCandidate,

    #[serde(default)]
    pub suggestions: Vec<EndpointSuggestion>,
}

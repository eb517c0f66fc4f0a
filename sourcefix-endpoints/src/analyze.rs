//! Advisory classification of extracted candidates. Nothing here mutates the
//! buffer; the autofix engine applies its own, separately guarded rewrites.

use sourcefix_patterns::PatternSet;
use sourcefix_types::buffer::SourceBuffer;
use sourcefix_types::endpoint::{EndpointAdvice, EndpointCandidate, EndpointSuggestion};

use crate::extract::extract_endpoints;

/// Compute every suggestion that applies to one candidate, in check order:
/// relative literal, legacy API version, insecure scheme, deprecated paths.
pub fn analyze_endpoint(
    patterns: &PatternSet,
    candidate: &EndpointCandidate,
    base_url: &str,
) -> Vec<EndpointSuggestion> {
    let url = candidate.text.as_str();
    let mut suggestions = Vec::new();

    if url.starts_with('/') {
        suggestions.push(EndpointSuggestion::TemplateRelative {
            replacement: format!("`${{this.url}}{url}`"),
            resolved: (!base_url.is_empty()).then(|| format!("{base_url}{url}")),
        });
    }

    // Informational only: no replacement is suggested for a version bump.
    if url.contains("/api/v1/") && !url.contains("/api/v2/") {
        suggestions.push(EndpointSuggestion::LegacyApiVersion);
    }

    if url.contains("http://") {
        suggestions.push(EndpointSuggestion::InsecureScheme {
            replacement: url.replace("http://", "https://"),
        });
    }

    for (old, new) in patterns.deprecated_paths {
        if url.contains(old) {
            suggestions.push(EndpointSuggestion::DeprecatedPath {
                replacement: url.replace(old, new),
            });
        }
    }

    suggestions
}

/// Extract all candidates and pair each with its suggestions, using the
/// buffer's declared base url when present.
pub fn advise(patterns: &PatternSet, buffer: &SourceBuffer) -> Vec<EndpointAdvice> {
    let base_url = patterns
        .declared_base_url(buffer.as_str())
        .unwrap_or_default()
        .to_string();

    extract_endpoints(patterns, buffer)
        .into_iter()
        .map(|candidate| {
            let suggestions = analyze_endpoint(patterns, &candidate, &base_url);
            EndpointAdvice {
                candidate,
                suggestions,
            }
        })
        .collect()
}

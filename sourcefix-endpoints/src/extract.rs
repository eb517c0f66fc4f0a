//! URL-literal extraction across the independent recognizer shapes.

use sourcefix_patterns::PatternSet;
use sourcefix_types::buffer::SourceBuffer;
use sourcefix_types::endpoint::EndpointCandidate;
use sourcefix_types::finding::Span;

/// Collect every match of every recognizer shape, shape-major then
/// left-to-right within a shape.
///
/// Shapes are not mutually exclusive and candidates are never deduplicated:
/// the same literal may be reported once per shape, since each shape answers
/// a different downstream question.
pub fn extract_endpoints(patterns: &PatternSet, buffer: &SourceBuffer) -> Vec<EndpointCandidate> {
    let text = buffer.as_str();
    let mut candidates = Vec::new();

    for (shape, recognizer) in &patterns.endpoint_shapes {
        for caps in recognizer.captures_iter(text) {
            let whole = caps.get(0).expect("match has a whole-capture");
            let literal = caps.get(1).unwrap_or(whole);
            candidates.push(EndpointCandidate {
                text: literal.as_str().to_string(),
                span: Span::new(whole.start(), whole.end()),
                shape: *shape,
            });
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sourcefix_types::endpoint::EndpointShape;

    fn extract(contents: &str) -> Vec<EndpointCandidate> {
        let patterns = PatternSet::new();
        extract_endpoints(&patterns, &SourceBuffer::new("source.js", contents))
    }

    #[test]
    fn network_call_argument_is_captured_without_quotes() {
        let candidates = extract("let res = await Network.get('/v1/list');");
        // `/v1/list` is relative, so only the network-call shape sees it.
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].shape, EndpointShape::NetworkCallArg);
        assert_eq!(candidates[0].text, "/v1/list");
    }

    #[test]
    fn absolute_api_url_in_a_call_is_reported_once_per_shape() {
        let candidates = extract("Network.post('https://e.com/api/search')");
        let shapes: Vec<EndpointShape> = candidates.iter().map(|c| c.shape).collect();
        assert_eq!(
            shapes,
            vec![EndpointShape::ApiSegment, EndpointShape::NetworkCallArg]
        );
        // Both shapes surface the same literal; overlap is preserved.
        assert_eq!(candidates[0].text, "https://e.com/api/search");
        assert_eq!(candidates[1].text, "https://e.com/api/search");
    }

    #[test]
    fn versioned_and_graphql_urls_match_their_shapes() {
        let candidates = extract(
            "const a = 'https://e.com/v2/comics'; const b = 'https://e.com/graphql';",
        );
        let shapes: Vec<EndpointShape> = candidates.iter().map(|c| c.shape).collect();
        assert_eq!(
            shapes,
            vec![EndpointShape::VersionSegment, EndpointShape::Graphql]
        );
    }

    #[test]
    fn base_url_template_suffix_is_extracted() {
        let candidates = extract("Network.get(`${this.url}/popular?page=1`)");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].shape, EndpointShape::BaseUrlTemplate);
        assert_eq!(candidates[0].text, "/popular?page=1");
    }

    #[test]
    fn matches_within_a_shape_are_left_to_right() {
        let candidates = extract("Network.get('/a'); Network.delete('/b');");
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "/a");
        assert_eq!(candidates[1].text, "/b");
        assert!(candidates[0].span.start < candidates[1].span.start);
    }
}

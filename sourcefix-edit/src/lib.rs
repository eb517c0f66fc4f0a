//! The autofix engine.
//!
//! Responsibilities:
//! - Apply the fixed rewrite sequence (protocol upgrade, relative-URL
//!   templating, deprecated-path substitution, error-handling injection) to a
//!   private copy of one source buffer.
//! - Aggregate one [`FixRecord`] per rewrite kind with an occurrence count.
//! - Stay idempotent: a second run over the produced buffer changes nothing.
//!
//! The engine never touches the filesystem; persistence only follows an
//! explicit caller decision. An occurrence that cannot be rewritten without
//! breaking quote or parenthesis balance is left unchanged rather than
//! patched approximately.

use regex::Regex;
use sourcefix_patterns::PatternSet;
use sourcefix_types::buffer::SourceBuffer;
use sourcefix_types::fix::{FixOutcome, FixRecord};
use tracing::debug;

/// Bytes of context inspected before a network-call assignment when deciding
/// whether it already sits inside a guarded block. A bounded window, not
/// scope analysis: a guard opened further back is not seen.
const GUARD_LOOKBACK_BYTES: usize = 120;

/// Result of one rewrite step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub text: String,
    pub records: Vec<FixRecord>,
    pub changed: bool,
}

impl StepOutcome {
    fn unchanged(text: &str) -> Self {
        Self {
            text: text.to_string(),
            records: vec![],
            changed: false,
        }
    }
}

/// Applies the rewrite sequence. Construct once per pattern set; each
/// [`AutofixEngine::autofix`] call operates on its own buffer copy and the
/// engine holds no per-run state.
pub struct AutofixEngine<'p> {
    patterns: &'p PatternSet,
    insecure_literal: Regex,
    relative_call: Regex,
    unguarded_call: Regex,
    guard_token: Regex,
}

impl<'p> AutofixEngine<'p> {
    pub fn new(patterns: &'p PatternSet) -> Self {
        Self {
            patterns,
            insecure_literal: re(r#"(['"`])http://"#),
            relative_call: re(r#"Network\.(\w+)\s*\(\s*['"](/[^'"]*)['"]"#),
            unguarded_call: re(
                r#"(async\s+)?((?:let|const|var)\s+)?(\w+)\s*=\s*await\s+Network\.(\w+)\s*\(([^)]*)\);?"#,
            ),
            guard_token: re(r"\btry\b"),
        }
    }

    /// Run all steps in order over a private copy and report the outcome.
    pub fn autofix(&self, buffer: &SourceBuffer) -> FixOutcome {
        let mut text = buffer.contents.clone();
        let mut records = Vec::new();
        let mut changed = false;

        let steps: [(&str, fn(&Self, &str) -> StepOutcome); 4] = [
            ("protocol-upgrade", Self::upgrade_protocol),
            ("relative-url-templating", Self::template_relative_urls),
            ("deprecated-paths", Self::substitute_deprecated_paths),
            ("error-handling", Self::inject_error_handling),
        ];

        for (name, step) in steps {
            let outcome = step(self, &text);
            debug!(step = name, changed = outcome.changed, "autofix step");
            changed |= outcome.changed;
            records.extend(outcome.records);
            text = outcome.text;
        }

        FixOutcome {
            buffer: buffer.with_contents(text),
            records,
            changed,
        }
    }

    /// Step 1: rewrite every quoted literal that starts with the insecure
    /// scheme to the secure scheme, preserving the opening quote character.
    /// A literal already on `https://` is never altered.
    pub fn upgrade_protocol(&self, text: &str) -> StepOutcome {
        let count = self.insecure_literal.find_iter(text).count() as u64;
        if count == 0 {
            return StepOutcome::unchanged(text);
        }

        let new_text = self
            .insecure_literal
            .replace_all(text, "${1}https://")
            .into_owned();
        let changed = new_text != text;
        StepOutcome {
            text: new_text,
            records: vec![FixRecord::new("Upgraded http:// to https://", count)],
            changed,
        }
    }

    /// Step 2: rewrite quoted relative network-call arguments into base-url
    /// template literals, keeping each call's own method name. Requires a
    /// declared base url. The recognizer only admits quoted literals, so a
    /// call site whose argument is already a template literal never matches;
    /// that is the idempotence guard.
    pub fn template_relative_urls(&self, text: &str) -> StepOutcome {
        if self.patterns.declared_base_url(text).is_none() {
            return StepOutcome::unchanged(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0u64;
        for caps in self.relative_call.captures_iter(text) {
            let whole = caps.get(0).expect("match has a whole-capture");
            let verb = &caps[1];
            let path = &caps[2];

            // A backtick inside the literal would unbalance the produced
            // template; leave the occurrence unchanged.
            if path.contains('`') {
                continue;
            }

            out.push_str(&text[last..whole.start()]);
            out.push_str(&format!("Network.{verb}(`${{this.url}}{path}`"));
            last = whole.end();
            count += 1;
        }
        out.push_str(&text[last..]);

        if count == 0 {
            return StepOutcome::unchanged(text);
        }
        let changed = out != text;
        StepOutcome {
            text: out,
            records: vec![FixRecord::new(
                "Rewrote relative network-call URLs into base-url templates",
                count,
            )],
            changed,
        }
    }

    /// Step 3: full-buffer substring substitution per deprecated-path table
    /// entry, in table order. A substitution can uncover an earlier entry's
    /// segment (`/old-api/v1/` becomes `/api/v1/` mid-table), so the table
    /// reruns until the buffer stabilizes. The occurrence count is captured
    /// before each substitution and aggregates per entry across passes; one
    /// record per entry with at least one occurrence.
    pub fn substitute_deprecated_paths(&self, text: &str) -> StepOutcome {
        let mut current = text.to_string();
        let mut counts = vec![0u64; self.patterns.deprecated_paths.len()];

        loop {
            let before_pass = current.clone();
            for (i, (old, new)) in self.patterns.deprecated_paths.iter().enumerate() {
                let count = current.matches(old).count() as u64;
                if count == 0 {
                    continue;
                }
                counts[i] += count;
                current = current.replace(old, new);
            }
            if current == before_pass {
                break;
            }
        }

        let records = self
            .patterns
            .deprecated_paths
            .iter()
            .zip(&counts)
            .filter(|(_, &count)| count > 0)
            .map(|((old, new), &count)| FixRecord::new(format!("Updated {old} to {new}"), count))
            .collect();

        let changed = current != text;
        StepOutcome {
            text: current,
            records,
            changed,
        }
    }

    /// Step 4: wrap each unguarded `[async] [let|const|var] <ident> = await
    /// Network.<verb>(...)` statement in a try/catch that rethrows with the
    /// original failure message. Occurrences already preceded by a `try`
    /// token within the lookback window, occurrences with nested-call or
    /// quote-unbalanced arguments, and member-target assignments are left
    /// unchanged.
    pub fn inject_error_handling(&self, text: &str) -> StepOutcome {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0u64;

        for caps in self.unguarded_call.captures_iter(text) {
            let whole = caps.get(0).expect("match has a whole-capture");
            let args = caps.get(5).map_or("", |m| m.as_str());

            // A `(` in the captured arguments means the closing parenthesis
            // we matched belongs to a nested call; an unpaired quote means it
            // sits inside a string literal. Wrapping would split either.
            if args.contains('(') || has_unpaired_quote(args) {
                continue;
            }
            // Member assignments (`this.data = ...`) are out of reach of the
            // statement recognizer; skip rather than strand the receiver.
            if !starts_statement(text, whole.start()) {
                continue;
            }
            if self.is_guarded(text, whole.start()) {
                continue;
            }

            let qualifier = caps.get(1).map_or("", |m| m.as_str());
            let decl = caps.get(2).map_or("", |m| m.as_str());
            let var = &caps[3];
            let verb = &caps[4];

            out.push_str(&text[last..whole.start()]);
            out.push_str(&format!(
                "try {{\n    {qualifier}{decl}{var} = await Network.{verb}({args});\n}} catch (error) {{\n    throw new Error(`Failed to fetch data: ${{error.message}}`);\n}}"
            ));
            last = whole.end();
            count += 1;
        }
        out.push_str(&text[last..]);

        if count == 0 {
            return StepOutcome::unchanged(text);
        }
        let changed = out != text;
        StepOutcome {
            text: out,
            records: vec![FixRecord::new("Added error handling to Network calls", count)],
            changed,
        }
    }

    fn is_guarded(&self, text: &str, start: usize) -> bool {
        let mut from = start.saturating_sub(GUARD_LOOKBACK_BYTES);
        while from > 0 && !text.is_char_boundary(from) {
            from -= 1;
        }
        self.guard_token.is_match(&text[from..start])
    }
}

fn has_unpaired_quote(args: &str) -> bool {
    ['\'', '"', '`']
        .iter()
        .any(|q| args.matches(*q).count() % 2 != 0)
}

/// True when the match at `start` is not preceded by an identifier character
/// or a member-access dot.
fn starts_statement(text: &str, start: usize) -> bool {
    match text[..start].chars().next_back() {
        Some(c) => c != '.' && c != '$' && !c.is_alphanumeric() && c != '_',
        None => true,
    }
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("rewrite pattern compiles")
}

use serde::{Deserialize, Serialize};

use crate::buffer::SourceBuffer;

/// One *kind* of rewrite applied during an autofix run, with an occurrence
/// count. Occurrences of the same kind aggregate into a single record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixRecord {
    pub description: String,
    pub count: u64,
}

impl FixRecord {
    pub fn new(description: impl Into<String>, count: u64) -> Self {
        Self {
            description: description.into(),
            count,
        }
    }
}

/// Result of one autofix run over a private buffer copy.
///
/// The engine never persists anything; the caller decides whether to overwrite
/// in place, write elsewhere, or discard after review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixOutcome {
    pub buffer: SourceBuffer,

    #[serde(default)]
    pub records: Vec<FixRecord>,

    pub changed: bool,
}

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// An immutable script text plus the logical path it was read from.
///
/// The caller owns the buffer for the duration of one analysis or fix run;
/// none of the engines hold it past their call or write it anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBuffer {
    pub path: Utf8PathBuf,
    pub contents: String,
}

impl SourceBuffer {
    pub fn new(path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    /// A new buffer with the same logical path and different contents.
    pub fn with_contents(&self, contents: String) -> Self {
        Self {
            path: self.path.clone(),
            contents,
        }
    }
}

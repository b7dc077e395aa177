//! Text-quote selector
//!
//! The persisted description of an annotation target: the exact quoted text
//! plus optional surrounding context. Annotation records serialize this, so
//! the shape is serde-stable.

use serde::{Deserialize, Serialize};

/// A quote to locate: exact text plus optional prefix/suffix context
///
/// `prefix` and `suffix` do not have to be adjacent to the exact text in the
/// document; they only have to occur somewhere before/after it. Empty means
/// "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextQuoteSelector {
    /// The exact text to locate. Matching always fails when empty.
    pub exact: String,
    /// Context expected somewhere before the exact text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prefix: String,
    /// Context expected somewhere after the exact text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl TextQuoteSelector {
    /// Selector with no context
    pub fn new(exact: impl Into<String>) -> Self {
        Self {
            exact: exact.into(),
            prefix: String::new(),
            suffix: String::new(),
        }
    }

    /// Selector with prefix and suffix context
    pub fn with_context(
        exact: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            exact: exact.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Remove self-overlap between the context strings and the exact text
    ///
    /// Selection tooling sometimes captures context windows that still
    /// contain the quote itself ("the quick fox" as prefix for exact "fox").
    /// Left as-is, the prefix requirement would be satisfied by the quote's
    /// own occurrence. The rule: truncate the prefix at the last embedded
    /// occurrence of the exact text and drop trailing whitespace; cut the
    /// suffix just after the first embedded occurrence and drop leading
    /// whitespace. Occurrence nearest the boundary wins.
    pub fn sanitized(&self) -> TextQuoteSelector {
        if self.exact.is_empty() {
            return self.clone();
        }

        let prefix = match self.prefix.rfind(&self.exact) {
            Some(idx) => self.prefix[..idx].trim_end().to_string(),
            None => self.prefix.clone(),
        };
        let suffix = match self.suffix.find(&self.exact) {
            Some(idx) => self.suffix[idx + self.exact.len()..]
                .trim_start()
                .to_string(),
            None => self.suffix.clone(),
        };

        TextQuoteSelector {
            exact: self.exact.clone(),
            prefix,
            suffix,
        }
    }
}

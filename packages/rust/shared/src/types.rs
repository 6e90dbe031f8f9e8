//! Core domain types for docpush publish passes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DocRecord
// ---------------------------------------------------------------------------

/// One documentation page produced by a handler registry.
///
/// Records are immutable once produced and consumed exactly once per sink per
/// pass. `folder` and `title` are non-empty after resolution; `content` may be
/// empty but is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    /// Logical grouping path segment (e.g., derived from a handler group name).
    pub folder: String,
    /// Page title (e.g., derived from an operation name or description).
    pub title: String,
    /// Fully rendered Markdown page body.
    pub content: String,
}

impl DocRecord {
    pub fn new(
        folder: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedPage
// ---------------------------------------------------------------------------

/// A record with the catalog prefix applied, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Fully-qualified folder path (catalog prefix + record folder).
    pub folder: String,
    /// Page title, unchanged from the record.
    pub title: String,
    /// Markdown page body, unchanged from the record.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialization_roundtrip() {
        let record = DocRecord::new("orders", "Create order", "# Create order\n");
        let json = serde_json::to_string(&record).expect("serialize");
        let parsed: DocRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, record);
    }

    #[test]
    fn record_allows_empty_content() {
        let record = DocRecord::new("orders", "Create order", "");
        assert!(record.content.is_empty());
    }
}

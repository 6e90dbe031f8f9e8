//! Handler-registry interface and concrete documentation sources.
//!
//! The publish pipeline consumes [`HandlerRegistry`] — it never defines how
//! documentation is discovered, only the shape of what it receives. Two
//! sources are provided:
//! - [`MemoryRegistry`] — handler groups and operations registered
//!   programmatically, for services embedding docpush and for tests
//! - [`MarkdownTree`] — a directory of Markdown files, for the CLI

mod markdown_tree;
mod memory;

pub use markdown_tree::MarkdownTree;
pub use memory::{GroupDocs, MemoryRegistry, OperationDoc};

use docpush_shared::{DocRecord, Result};

// ---------------------------------------------------------------------------
// Scopes
// ---------------------------------------------------------------------------

/// A module-path scope selecting every handler group underneath it.
///
/// How a path is interpreted belongs to the source: the in-memory registry
/// matches `::`-separated module prefixes, the markdown tree matches
/// subdirectories. An empty scope always selects everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageScope(pub String);

impl PackageScope {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }
}

impl std::fmt::Display for PackageScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single handler group — one controller-like unit of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerGroup(pub String);

impl HandlerGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for HandlerGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Source of documentation records for a publish pass.
///
/// Extraction failures surface as [`docpush_shared::DocPushError`] and are
/// propagated by the orchestrator unchanged.
pub trait HandlerRegistry {
    /// Extract records for every handler group within a package scope.
    fn extract_package(&self, scope: &PackageScope) -> Result<Vec<DocRecord>>;

    /// Extract records for a single handler group.
    fn extract_group(&self, group: &HandlerGroup) -> Result<Vec<DocRecord>>;

    /// Extract the record for one operation within a handler group.
    fn extract_operation(&self, group: &HandlerGroup, operation: &str) -> Result<DocRecord>;
}

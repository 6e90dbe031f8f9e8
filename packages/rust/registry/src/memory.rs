//! In-memory handler registry.
//!
//! Services embedding docpush register their handler groups and operations
//! here, then hand the registry to an orchestrator. Also the registry of
//! choice in tests.

use docpush_shared::{DocPushError, DocRecord, Result};

use crate::{HandlerGroup, HandlerRegistry, PackageScope};

/// Documentation for one operation within a handler group.
#[derive(Debug, Clone)]
pub struct OperationDoc {
    /// Operation name, the selection key for single-operation passes.
    pub name: String,
    /// Page title.
    pub title: String,
    /// Rendered Markdown page body.
    pub content: String,
}

impl OperationDoc {
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A handler group: its module path, the folder its pages land in, and its
/// operations.
#[derive(Debug, Clone)]
pub struct GroupDocs {
    /// Module path of the group (e.g., `myapp::handlers::orders`), matched by
    /// package-scope passes.
    pub module: String,
    /// Group name, used both as the selection key and as the records' folder.
    pub name: String,
    /// Operations in registration order.
    pub operations: Vec<OperationDoc>,
}

impl GroupDocs {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            operations: Vec::new(),
        }
    }

    pub fn operation(mut self, op: OperationDoc) -> Self {
        self.operations.push(op);
        self
    }
}

/// Handler registry backed by programmatic registration.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    groups: Vec<GroupDocs>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler group. Groups are extracted in registration order.
    pub fn register(&mut self, group: GroupDocs) {
        self.groups.push(group);
    }

    fn find_group(&self, group: &HandlerGroup) -> Result<&GroupDocs> {
        self.groups
            .iter()
            .find(|g| g.name == group.0)
            .ok_or_else(|| DocPushError::extraction(format!("unknown handler group: {group}")))
    }

    fn in_scope(module: &str, scope: &PackageScope) -> bool {
        scope.0.is_empty()
            || module == scope.0
            || module.starts_with(&format!("{}::", scope.0))
    }
}

fn records_for(group: &GroupDocs) -> Vec<DocRecord> {
    group
        .operations
        .iter()
        .map(|op| DocRecord::new(&group.name, &op.title, &op.content))
        .collect()
}

impl HandlerRegistry for MemoryRegistry {
    fn extract_package(&self, scope: &PackageScope) -> Result<Vec<DocRecord>> {
        Ok(self
            .groups
            .iter()
            .filter(|g| Self::in_scope(&g.module, scope))
            .flat_map(records_for)
            .collect())
    }

    fn extract_group(&self, group: &HandlerGroup) -> Result<Vec<DocRecord>> {
        Ok(records_for(self.find_group(group)?))
    }

    fn extract_operation(&self, group: &HandlerGroup, operation: &str) -> Result<DocRecord> {
        let found = self.find_group(group)?;
        found
            .operations
            .iter()
            .find(|op| op.name == operation)
            .map(|op| DocRecord::new(&found.name, &op.title, &op.content))
            .ok_or_else(|| {
                DocPushError::extraction(format!(
                    "unknown operation '{operation}' in handler group: {group}"
                ))
            })
    }
}

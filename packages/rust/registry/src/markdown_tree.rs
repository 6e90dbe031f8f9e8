//! Filesystem-backed documentation source.
//!
//! Maps a directory of Markdown files onto the handler-registry shape:
//! subdirectory → handler group (and folder), file → operation, first `#`
//! heading (or file stem) → title, file body → content. Used by the CLI to
//! publish a docs tree without a running service.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use docpush_shared::{DocPushError, DocRecord, Result};

use crate::{HandlerGroup, HandlerRegistry, PackageScope};

/// First ATX `#` heading in a Markdown body.
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").expect("valid H1 regex"));

/// Handler registry over a tree of `.md` files.
///
/// Files must live inside a subdirectory of the root: the subdirectory path is
/// the group identity and the records' folder. Markdown files directly at the
/// root have no group and are skipped with a warning.
#[derive(Debug, Clone)]
pub struct MarkdownTree {
    root: PathBuf,
}

impl MarkdownTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Collect records for every `.md` file under `base`, in path order.
    fn collect(&self, base: &Path) -> Result<Vec<DocRecord>> {
        let mut records = Vec::new();

        for entry in WalkDir::new(base).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(base).to_path_buf();
                match e.into_io_error() {
                    Some(io) => DocPushError::io(path, io),
                    None => DocPushError::extraction(format!(
                        "cannot walk documentation tree at {}",
                        path.display()
                    )),
                }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            if path.parent() == Some(self.root.as_path()) {
                warn!(path = %path.display(), "markdown file outside any group directory, skipping");
                continue;
            }

            records.push(self.record_for(path)?);
        }

        debug!(base = %base.display(), records = records.len(), "collected markdown records");
        Ok(records)
    }

    /// Build one record from a Markdown file.
    fn record_for(&self, path: &Path) -> Result<DocRecord> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocPushError::io(path, e))?;

        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let folder = rel
            .parent()
            .map(|p| {
                p.components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();

        let title = H1
            .captures(&content)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| {
                rel.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "Untitled".to_string())
            });

        Ok(DocRecord {
            folder,
            title,
            content,
        })
    }
}

impl HandlerRegistry for MarkdownTree {
    fn extract_package(&self, scope: &PackageScope) -> Result<Vec<DocRecord>> {
        let base = if scope.0.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&scope.0)
        };
        if !base.is_dir() {
            return Err(DocPushError::extraction(format!(
                "unknown package scope: {scope}"
            )));
        }
        self.collect(&base)
    }

    fn extract_group(&self, group: &HandlerGroup) -> Result<Vec<DocRecord>> {
        let dir = self.root.join(&group.0);
        if !dir.is_dir() {
            return Err(DocPushError::extraction(format!(
                "unknown handler group: {group}"
            )));
        }
        self.collect(&dir)
    }

    fn extract_operation(&self, group: &HandlerGroup, operation: &str) -> Result<DocRecord> {
        let path = self.root.join(&group.0).join(format!("{operation}.md"));
        if !path.is_file() {
            return Err(DocPushError::extraction(format!(
                "unknown operation '{operation}' in handler group: {group}"
            )));
        }
        self.record_for(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "orders/create.md", "# Create order\n\nPOST /orders\n");
        write(root, "orders/cancel.md", "body without a heading\n");
        write(root, "users/admin/ban.md", "# Ban user\n");
        write(root, "stray.md", "# Stray page\n");
        write(root, "orders/notes.txt", "not markdown\n");
        dir
    }

    #[test]
    fn whole_tree_extraction() {
        let dir = sample_tree();
        let tree = MarkdownTree::new(dir.path());

        let records = tree.extract_package(&PackageScope::new("")).unwrap();
        // stray.md (no group) and notes.txt (not markdown) are excluded
        assert_eq!(records.len(), 3);

        let create = records
            .iter()
            .find(|r| r.title == "Create order")
            .expect("create.md record");
        assert_eq!(create.folder, "orders");
        assert!(create.content.contains("POST /orders"));
    }

    #[test]
    fn title_falls_back_to_file_stem() {
        let dir = sample_tree();
        let tree = MarkdownTree::new(dir.path());

        let record = tree
            .extract_operation(&HandlerGroup::new("orders"), "cancel")
            .unwrap();
        assert_eq!(record.title, "cancel");
        assert_eq!(record.content, "body without a heading\n");
    }

    #[test]
    fn nested_directories_become_nested_folders() {
        let dir = sample_tree();
        let tree = MarkdownTree::new(dir.path());

        let records = tree.extract_group(&HandlerGroup::new("users")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].folder, "users/admin");
        assert_eq!(records[0].title, "Ban user");
    }

    #[test]
    fn package_scope_selects_subtree() {
        let dir = sample_tree();
        let tree = MarkdownTree::new(dir.path());

        let records = tree
            .extract_package(&PackageScope::new("orders"))
            .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.folder == "orders"));
    }

    #[test]
    fn unknown_scope_group_and_operation_are_extraction_errors() {
        let dir = sample_tree();
        let tree = MarkdownTree::new(dir.path());

        assert!(
            tree.extract_package(&PackageScope::new("missing"))
                .is_err()
        );
        assert!(tree.extract_group(&HandlerGroup::new("missing")).is_err());
        assert!(
            tree.extract_operation(&HandlerGroup::new("orders"), "missing")
                .is_err()
        );
    }
}

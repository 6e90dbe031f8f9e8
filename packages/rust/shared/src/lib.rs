//! Shared types, error model, and configuration for docpush.
//!
//! This crate is the foundation depended on by all other docpush crates.
//! It provides:
//! - [`DocPushError`] — the unified error type
//! - Domain types ([`DocRecord`], [`ResolvedPage`])
//! - Configuration ([`AppConfig`], [`SchemePrefix`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_SCHEME_PREFIX, DefaultsConfig, RemoteStoreConfig, SchemePrefix,
    config_dir, config_file_path, init_config, load_config, load_config_from,
    resolve_credentials,
};
pub use error::{DocPushError, Result};
pub use types::{DocRecord, ResolvedPage};

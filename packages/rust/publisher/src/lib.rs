//! Presentation sinks for resolved documentation pages.
//!
//! This crate provides:
//! - [`resolver`] — applies the configured catalog prefix to records
//! - [`endpoint`] — upsert endpoint selection and URL assembly
//! - [`RemotePublisher`] — sequential form-encoded HTTP upserts to the store
//! - [`ConsoleSink`] — human-readable rendering to a stream

pub mod console;
pub mod endpoint;
pub mod remote;
pub mod resolver;

pub use console::ConsoleSink;
pub use endpoint::{EndpointSuffix, upsert_url};
pub use remote::{PublishReport, RejectedPage, RemotePublisher, RemoteTarget};
pub use resolver::{resolve, resolve_all};

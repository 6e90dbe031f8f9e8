//! Orchestration of publish passes for docpush.
//!
//! This crate ties a handler registry, the resolver, and the sinks together
//! into end-to-end passes: configure an [`Orchestrator`] through its builder,
//! then drive one of the three publish entry points.

pub mod orchestrator;

pub use orchestrator::{Orchestrator, OrchestratorBuilder, PassReport, PublishConfig};

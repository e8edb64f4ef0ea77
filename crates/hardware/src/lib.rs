//! Time-stepped simulation driver library.
//!
//! This crate runs a digital-logic model until the model itself asks to stop:
//! 1. **Context:** Simulation time, the finish latch and forwarded runtime arguments.
//! 2. **Driver:** The check/evaluate/advance loop, finalization and ordered release.
//! 3. **Models:** The `Model` trait, a step-limit wrapper and a reference ALU testbench.
//! 4. **Support:** JSON configuration, error types and run statistics.

/// Common types (errors, runtime argument conventions).
pub mod common;
/// Run configuration (defaults, JSON loading, validation).
pub mod config;
/// Built-in models and the model registry.
pub mod models;
/// Simulation context, model trait, driver and step limit.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_file`.
pub use crate::config::Config;
/// Errors surfaced by a run.
pub use crate::common::{ModelError, SimError};
/// Driver and context; construct a `SimContext`, then `Driver::build`.
pub use crate::sim::{Driver, Model, SimContext};

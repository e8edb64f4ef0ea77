//! Simulation core: context, model boundary, driver loop and run policies.
//!
//! A run is assembled bottom-up:
//! 1. Create a [`SimContext`] and `configure` it with the runtime arguments.
//! 2. Build exactly one [`Model`] against that context.
//! 3. Hand both to a [`Driver`] and call [`Driver::run`].

/// Time, finish latch and runtime arguments.
pub mod context;

/// The step loop and lifecycle management.
pub mod driver;

/// Outer bound on the number of evaluations.
pub mod limit;

/// The design-under-test trait.
pub mod model;

pub use context::{FinishSignal, SimContext};
pub use driver::{Driver, RunSummary};
pub use limit::StepLimit;
pub use model::Model;

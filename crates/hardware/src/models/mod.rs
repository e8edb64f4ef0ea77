//! Built-in models and the name registry used by the front end.

/// 32-bit ALU with a directed self-checking testbench.
pub mod alu;

use crate::common::SimError;
use crate::sim::{Model, SimContext};

/// Names accepted by [`create_model`].
pub const MODELS: &[&str] = &[alu::NAME];

/// List all available models.
pub fn available_models() -> &'static [&'static str] {
    MODELS
}

/// Builds the model registered under `name` against `ctx`.
///
/// # Errors
///
/// Returns [`SimError::UnknownModel`] for an unregistered name, or the
/// model's own construction error.
pub fn create_model(name: &str, ctx: &SimContext) -> Result<Box<dyn Model>, SimError> {
    match name {
        alu::NAME => Ok(Box::new(alu::AluBench::new(ctx)?)),
        other => Err(SimError::UnknownModel(other.to_string())),
    }
}

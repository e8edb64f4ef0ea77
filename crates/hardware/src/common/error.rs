//! Error definitions for the simulation driver.
//!
//! Two layers of errors exist:
//! 1. **Model errors:** Raised by a design under test from `eval` or `finalize`.
//!    Their content is owned by the model; the driver only carries them.
//! 2. **Simulation errors:** Raised by the driver and its setup path. They wrap
//!    model errors with the phase (construction, evaluation, finalization) and
//!    the simulation time at which they happened.

use thiserror::Error;

/// Errors signalled by a model implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A single evaluation step hit an abnormal condition.
    #[error("evaluation failed: {0}")]
    Eval(String),

    /// A self-checking model observed output mismatches.
    #[error("{failures} of {total} checks failed")]
    Check {
        /// Number of failed checks.
        failures: usize,
        /// Number of checks performed.
        total: usize,
    },

    /// A runtime argument the model understands carried an unusable value.
    #[error("invalid value {value:?} for argument +{name}")]
    InvalidArgument {
        /// Argument name without the leading `+`.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// `finalize` was invoked more than once on the same model.
    #[error("model already finalized")]
    AlreadyFinalized,
}

impl ModelError {
    /// Creates an evaluation error from any displayable message.
    pub fn eval(msg: impl Into<String>) -> Self {
        Self::Eval(msg.into())
    }
}

/// Errors surfaced by the simulation driver and its setup path.
#[derive(Debug, Error)]
pub enum SimError {
    /// The model could not be constructed against the context.
    #[error("failed to construct model `{model}`")]
    Construction {
        /// Name of the model being built.
        model: String,
        /// Underlying model error.
        #[source]
        source: ModelError,
    },

    /// No model with this name is registered.
    #[error("unknown model `{0}`")]
    UnknownModel(String),

    /// The model failed during an evaluation step.
    #[error("model evaluation failed at time {time}")]
    Evaluation {
        /// Simulation time of the failing step.
        time: u64,
        /// Underlying model error.
        #[source]
        source: ModelError,
    },

    /// The model failed in its end-of-run hook.
    #[error("model finalization failed")]
    Finalization {
        /// Underlying model error.
        #[source]
        source: ModelError,
    },

    /// Advancing simulation time would overflow the 64-bit counter.
    #[error("simulation time overflow: {time} + {delta}")]
    TimeOverflow {
        /// Time before the rejected advance.
        time: u64,
        /// The rejected delta.
        delta: u64,
    },

    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

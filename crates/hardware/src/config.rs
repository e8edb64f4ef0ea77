//! Configuration system for the simulation driver.
//!
//! This module defines the configuration structures used to set up a run. It
//! provides:
//! 1. **Defaults:** Baseline values used when a field is omitted.
//! 2. **Structures:** `general` (model selection and reporting) and `run`
//!    (time step, step limit and runtime arguments).
//! 3. **Loading:** JSON parsing from a string or a file, followed by validation.
//!
//! Every field is optional; command-line flags override file values.

use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Model run when none is selected.
    pub const MODEL: &str = "alu";

    /// Simulation time added per loop iteration.
    pub const TIME_STEP: u64 = 1;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use tbsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "model": "alu", "stats": true },
///     "run": { "time_step": 10, "max_steps": 1000, "args": ["+verbose"] }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.stats);
/// assert_eq!(config.run.time_step, 10);
/// assert_eq!(config.run.max_steps.map(|n| n.get()), Some(1000));
/// assert_eq!(config.run.args, ["+verbose"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Model selection and reporting.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Loop parameters and runtime arguments.
    #[serde(default)]
    pub run: RunConfig,
}

/// Model selection and reporting options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Registry name of the model to run.
    #[serde(default = "GeneralConfig::default_model")]
    pub model: String,

    /// Raise the default log level to `debug`.
    #[serde(default)]
    pub trace: bool,

    /// Print the statistics report after a successful run.
    #[serde(default)]
    pub stats: bool,
}

impl GeneralConfig {
    fn default_model() -> String {
        defaults::MODEL.to_string()
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            trace: false,
            stats: false,
        }
    }
}

/// Loop parameters and runtime arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Time units added per loop iteration.
    #[serde(default = "RunConfig::default_time_step")]
    pub time_step: u64,

    /// Force finish after this many evaluations. `None` means unbounded; zero
    /// is rejected while parsing.
    #[serde(default)]
    pub max_steps: Option<NonZeroU64>,

    /// Arguments forwarded verbatim to the simulation context.
    #[serde(default)]
    pub args: Vec<String>,
}

impl RunConfig {
    const fn default_time_step() -> u64 {
        defaults::TIME_STEP
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            time_step: defaults::TIME_STEP,
            max_steps: None,
            args: Vec::new(),
        }
    }
}

impl Config {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] on malformed JSON, unknown fields or
    /// values rejected by [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Checks values that deserialize but cannot drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an empty model name or a zero time
    /// step.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.general.model.is_empty() {
            return Err(SimError::Config("general.model must not be empty".into()));
        }
        if self.run.time_step == 0 {
            return Err(SimError::Config("run.time_step must be at least 1".into()));
        }
        Ok(())
    }
}

//! Common types shared by the driver, the models and the front end.
//!
//! This module provides:
//! 1. **Error Handling:** Model-side and driver-side error enums.
//! 2. **Argument Conventions:** Parsing of `+name=value` runtime arguments.

/// Runtime argument (`+name=value`) parsing.
pub mod args;

/// Error types for models and the driver.
pub mod error;

pub use error::{ModelError, SimError};

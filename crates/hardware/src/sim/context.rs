//! Simulation context: the single source of truth for time and termination.
//!
//! The context owns the discrete simulation time, the finish latch and the
//! runtime arguments forwarded from the process. It is created before any
//! model and outlives it; models receive it by reference on every call instead
//! of holding a pointer to it.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::common::SimError;
use crate::common::args;

/// Shared handle to the finish latch of a [`SimContext`].
///
/// Cloning yields another handle to the same latch, so a model can hand it to
/// the stimulus or device objects it owns. The latch only ever goes from
/// lowered to raised.
#[derive(Clone, Default)]
pub struct FinishSignal(Arc<AtomicBool>);

impl FinishSignal {
    /// Creates a lowered latch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the latch. Raising an already raised latch has no effect.
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns whether the latch has been raised.
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for FinishSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FinishSignal")
            .field(&self.is_raised())
            .finish()
    }
}

/// Process-level simulation state for one run.
#[derive(Debug, Default)]
pub struct SimContext {
    time: u64,
    finish: FinishSignal,
    args: Vec<String>,
}

impl SimContext {
    /// Creates a context at time zero with no arguments and finish lowered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the runtime arguments for the model to query.
    ///
    /// The list is kept verbatim and replaces any previously stored list. The
    /// context does not interpret or validate it.
    pub fn configure<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
    }

    /// Returns the stored runtime arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Value of the first `+name=value` argument, `Some("")` for a bare `+name`.
    pub fn plusarg(&self, name: &str) -> Option<&str> {
        args::find(&self.args, name)
    }

    /// Returns whether `+name` is present, with or without a value.
    pub fn test_plusarg(&self, name: &str) -> bool {
        self.plusarg(name).is_some()
    }

    /// Advances the simulation time by `delta` units.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TimeOverflow`] if the counter would wrap; the time
    /// is left unchanged in that case.
    pub fn advance_time(&mut self, delta: u64) -> Result<(), SimError> {
        self.time = self
            .time
            .checked_add(delta)
            .ok_or(SimError::TimeOverflow {
                time: self.time,
                delta,
            })?;
        Ok(())
    }

    /// Current simulation time.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Returns whether the model has requested the end of the run.
    pub fn is_finished(&self) -> bool {
        self.finish.is_raised()
    }

    /// Requests the end of the run. Only models and their stimulus call this.
    pub fn finish(&self) {
        self.finish.raise();
    }

    /// Returns a handle to the finish latch.
    pub fn finish_signal(&self) -> FinishSignal {
        self.finish.clone()
    }
}

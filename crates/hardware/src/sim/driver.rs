//! Evaluation driver: owns the model and the context and runs the step loop.
//!
//! The loop checks the finish latch, evaluates the model once and advances
//! time, in that order. Finish is only observed at the top of an iteration, so
//! the step that raises it still gets its time advance. When the loop ends,
//! for any reason, the model is finalized once and both resources are
//! dropped, model first.

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::common::SimError;
use crate::sim::context::SimContext;
use crate::sim::model::Model;
use crate::stats::RunStats;

/// Lifecycle phase of a run, reported in `driver phase` debug events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Constructed, loop not started.
    Init,
    /// Repeating evaluate/advance.
    Running,
    /// Loop exited, finalize in progress.
    Finalizing,
    /// Model finalized and both resources released.
    Done,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name reported by the model.
    pub model: String,
    /// Loop statistics.
    pub stats: RunStats,
}

impl RunSummary {
    /// Process exit status for this run. A completed run is always a success.
    pub const fn exit_code(&self) -> i32 {
        0
    }
}

/// Drives one model against one context until the model finishes.
///
/// Field order matters: the model is dropped before the context.
pub struct Driver<M: Model> {
    model: M,
    context: SimContext,
    time_step: u64,
}

impl<M: Model> fmt::Debug for Driver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("model", &self.model.name())
            .field("context", &self.context)
            .field("time_step", &self.time_step)
            .finish()
    }
}

impl<M: Model> Driver<M> {
    /// Takes ownership of an already constructed model and its context.
    pub fn new(context: SimContext, model: M) -> Self {
        Self {
            model,
            context,
            time_step: 1,
        }
    }

    /// Builds the model against `context` and takes ownership of both.
    ///
    /// # Errors
    ///
    /// Returns whatever `factory` returns; the context is dropped and nothing
    /// else has been allocated.
    pub fn build<F>(context: SimContext, factory: F) -> Result<Self, SimError>
    where
        F: FnOnce(&SimContext) -> Result<M, SimError>,
    {
        let model = factory(&context)?;
        Ok(Self::new(context, model))
    }

    /// Sets how many time units each loop iteration advances. Defaults to 1.
    #[must_use]
    pub fn with_time_step(mut self, time_step: u64) -> Self {
        self.time_step = time_step;
        self
    }

    /// The owned context.
    pub fn context(&self) -> &SimContext {
        &self.context
    }

    /// The owned model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Runs the model to completion and releases it.
    ///
    /// The driver is consumed, so a finished driver cannot be run again or
    /// touched after release:
    ///
    /// ```compile_fail
    /// use tbsim_core::models::alu::AluBench;
    /// use tbsim_core::sim::{Driver, SimContext};
    ///
    /// let ctx = SimContext::new();
    /// let bench = AluBench::new(&ctx).unwrap();
    /// let driver = Driver::new(ctx, bench);
    /// let _ = driver.run();
    /// let _ = driver.run();
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// use tbsim_core::models::alu::AluBench;
    /// use tbsim_core::sim::{Driver, SimContext};
    ///
    /// let mut ctx = SimContext::new();
    /// ctx.configure(["+vectors=3"]);
    /// let driver = Driver::build(ctx, AluBench::new).unwrap();
    /// let summary = driver.run().unwrap();
    /// assert_eq!(summary.stats.steps, 3);
    /// assert_eq!(summary.stats.final_time, 3);
    /// assert_eq!(summary.exit_code(), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// * [`SimError::Evaluation`] if a step fails. `finalize` still runs and
    ///   both resources are still released before the error is returned.
    /// * [`SimError::Finalization`] if only the end-of-run hook fails.
    /// * [`SimError::TimeOverflow`] if the time counter would wrap.
    pub fn run(mut self) -> Result<RunSummary, SimError> {
        let name = self.model.name().to_owned();
        let started = Instant::now();
        let mut steps = 0u64;

        info!(model = %name, time = self.context.time(), "simulation started");
        transition(Phase::Init, Phase::Running);

        let looped = loop {
            if self.context.is_finished() {
                break Ok(());
            }
            if let Err(source) = self.model.eval(&mut self.context) {
                break Err(SimError::Evaluation {
                    time: self.context.time(),
                    source,
                });
            }
            steps += 1;
            if let Err(err) = self.context.advance_time(self.time_step) {
                break Err(err);
            }
        };

        transition(Phase::Running, Phase::Finalizing);
        let finalized = self
            .model
            .finalize(&mut self.context)
            .map_err(|source| SimError::Finalization { source });

        let stats = RunStats {
            steps,
            final_time: self.context.time(),
            time_step: self.time_step,
            host_seconds: started.elapsed().as_secs_f64(),
        };

        let Self { model, context, .. } = self;
        drop(model);
        debug!(model = %name, "model released");
        drop(context);
        debug!(model = %name, "context released");
        transition(Phase::Finalizing, Phase::Done);

        match (looped, finalized) {
            (Ok(()), Ok(())) => {
                info!(
                    model = %name,
                    steps = stats.steps,
                    time = stats.final_time,
                    "simulation finished"
                );
                Ok(RunSummary { model: name, stats })
            }
            (Err(err), Ok(())) | (Ok(()), Err(err)) => Err(err),
            (Err(err), Err(late)) => {
                warn!(model = %name, error = %late, "finalize failed after an evaluation error");
                Err(err)
            }
        }
    }
}

fn transition(from: Phase, to: Phase) {
    debug!(from = ?from, to = ?to, "driver phase");
}

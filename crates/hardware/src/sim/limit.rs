//! Step limit policy.
//!
//! The driver loop has no bound of its own: it stops only when the model
//! raises finish. [`StepLimit`] bounds a run from the outside by wrapping the
//! model and raising finish on its behalf once a budget of evaluations is
//! spent.

use std::num::NonZeroU64;

use tracing::warn;

use crate::common::ModelError;
use crate::sim::context::SimContext;
use crate::sim::model::Model;

/// Wraps a model and forces finish after `limit` evaluations.
///
/// The budget is non-zero, so a limited run always evaluates the model at
/// least once and never more than `limit` times.
#[derive(Debug)]
pub struct StepLimit<M> {
    inner: M,
    limit: NonZeroU64,
    evals: u64,
    tripped: bool,
}

impl<M: Model> StepLimit<M> {
    /// Bounds `inner` to at most `limit` evaluations.
    pub const fn new(inner: M, limit: NonZeroU64) -> Self {
        Self {
            inner,
            limit,
            evals: 0,
            tripped: false,
        }
    }

    /// Evaluations forwarded so far.
    pub const fn evals(&self) -> u64 {
        self.evals
    }

    /// The evaluation budget.
    pub const fn limit(&self) -> NonZeroU64 {
        self.limit
    }

    /// Whether the limit, rather than the model, ended the run.
    pub const fn tripped(&self) -> bool {
        self.tripped
    }

    /// The wrapped model.
    pub const fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Model> Model for StepLimit<M> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        if self.evals >= self.limit.get() {
            ctx.finish();
            return Ok(());
        }
        self.inner.eval(ctx)?;
        self.evals += 1;
        if self.evals >= self.limit.get() && !ctx.is_finished() {
            warn!(
                model = self.inner.name(),
                limit = self.limit.get(),
                time = ctx.time(),
                "step limit reached, forcing finish"
            );
            self.tripped = true;
            ctx.finish();
        }
        Ok(())
    }

    fn finalize(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        self.inner.finalize(ctx)
    }
}

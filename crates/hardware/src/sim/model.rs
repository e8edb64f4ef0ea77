//! The design-under-test boundary.
//!
//! A [`Model`] is anything the driver can step: a generated RTL model, a
//! behavioural reference model, or a mock in tests. The driver knows nothing
//! about its internals beyond these two entry points.

use crate::common::ModelError;
use crate::sim::context::SimContext;

/// A design under test driven by [`Driver`](crate::sim::Driver).
///
/// Models read the simulation time from the context they are handed and
/// raise [`SimContext::finish`] when their stimulus is exhausted.
pub trait Model {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "model"
    }

    /// Evaluates the model once at the context's current time.
    ///
    /// # Errors
    ///
    /// Any error is fatal to the run.
    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), ModelError>;

    /// End-of-run hook, called exactly once by the driver.
    ///
    /// # Errors
    ///
    /// Reported to the caller of the run after all resources are released.
    fn finalize(&mut self, ctx: &mut SimContext) -> Result<(), ModelError>;
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        (**self).eval(ctx)
    }

    fn finalize(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        (**self).finalize(ctx)
    }
}

use mockall::mock;
use std::cell::RefCell;
use std::rc::Rc;
use tbsim_core::sim::Model;
use tbsim_core::{ModelError, SimContext};

mock! {
    pub Dut {}
    impl Model for Dut {
        fn eval(&mut self, ctx: &mut SimContext) -> Result<(), ModelError>;
        fn finalize(&mut self, ctx: &mut SimContext) -> Result<(), ModelError>;
    }
}

/// Something the driver did to a [`ScriptedModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// `eval` was called at `time`; `finished` is the latch state on entry.
    Eval { time: u64, finished: bool },
    /// `finalize` was called at `time`.
    Finalize { time: u64 },
    /// The model was dropped.
    Dropped,
}

/// Shared, clonable call log.
pub type EventLog = Rc<RefCell<Vec<Event>>>;

/// Hand-written model that raises finish and fails on a fixed schedule.
///
/// All counts are 1-based evaluation indices.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    log: EventLog,
    evals: u64,
    finish_on: Option<u64>,
    fail_eval_on: Option<u64>,
    fail_finalize: bool,
}

impl ScriptedModel {
    /// A model that never finishes and never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise finish during the `n`th evaluation.
    pub fn finish_on(mut self, n: u64) -> Self {
        self.finish_on = Some(n);
        self
    }

    /// Fail the `n`th evaluation.
    pub fn fail_eval_on(mut self, n: u64) -> Self {
        self.fail_eval_on = Some(n);
        self
    }

    /// Fail `finalize`.
    pub fn fail_finalize(mut self) -> Self {
        self.fail_finalize = true;
        self
    }

    /// Handle to the call log, valid after the model is dropped.
    pub fn log(&self) -> EventLog {
        Rc::clone(&self.log)
    }
}

impl Model for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    fn eval(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        self.log.borrow_mut().push(Event::Eval {
            time: ctx.time(),
            finished: ctx.is_finished(),
        });
        self.evals += 1;
        if self.fail_eval_on == Some(self.evals) {
            return Err(ModelError::eval(format!("scripted failure on eval {}", self.evals)));
        }
        if self.finish_on == Some(self.evals) {
            ctx.finish();
        }
        Ok(())
    }

    fn finalize(&mut self, ctx: &mut SimContext) -> Result<(), ModelError> {
        self.log
            .borrow_mut()
            .push(Event::Finalize { time: ctx.time() });
        if self.fail_finalize {
            Err(ModelError::eval("scripted finalize failure"))
        } else {
            Ok(())
        }
    }
}

impl Drop for ScriptedModel {
    fn drop(&mut self) {
        self.log.borrow_mut().push(Event::Dropped);
        tracing::debug!("scripted model dropped");
    }
}

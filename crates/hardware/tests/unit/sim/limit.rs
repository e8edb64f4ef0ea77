//! # Step Limit Tests
//!
//! A model that never finishes is stopped only by the outer limit, after
//! exactly the requested number of evaluations.

use std::num::NonZeroU64;

use crate::common::harness::{eval_count, finalize_count, run_model};
use crate::common::mocks::model::{Event, ScriptedModel};
use rstest::rstest;
use tbsim_core::sim::{Model, SimContext, StepLimit};
use tbsim_core::{ModelError, SimError};

fn budget(n: u64) -> NonZeroU64 {
    NonZeroU64::new(n).unwrap()
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(250)]
fn never_finishing_model_stops_at_limit(#[case] limit: u64) {
    let model = ScriptedModel::new();
    let log = model.log();

    let summary = run_model(StepLimit::new(model, budget(limit)), 1).unwrap();

    let events = log.borrow();
    assert_eq!(summary.stats.steps, limit);
    assert_eq!(summary.stats.final_time, limit);
    assert_eq!(eval_count(&events) as u64, limit);
    assert_eq!(finalize_count(&events), 1);
    assert_eq!(summary.model, "scripted");
}

#[rstest]
#[case::zero(0, None)]
#[case::one(1, Some(1))]
#[case::two(2, Some(2))]
fn requested_budget_is_the_exact_evaluation_count(
    #[case] requested: u64,
    #[case] expected: Option<u64>,
) {
    let evaluated = NonZeroU64::new(requested).map(|limit| {
        let model = ScriptedModel::new();
        let log = model.log();
        let summary = run_model(StepLimit::new(model, limit), 1).unwrap();
        assert_eq!(eval_count(&log.borrow()) as u64, summary.stats.steps);
        summary.stats.steps
    });
    assert_eq!(evaluated, expected);
}

#[test]
fn spent_budget_never_reaches_the_inner_model() {
    let model = ScriptedModel::new();
    let log = model.log();
    let mut ctx = SimContext::new();
    let mut limited = StepLimit::new(model, budget(1));

    limited.eval(&mut ctx).unwrap();
    limited.eval(&mut ctx).unwrap();
    limited.eval(&mut ctx).unwrap();

    assert!(ctx.is_finished());
    assert_eq!(limited.evals(), 1);
    assert_eq!(eval_count(&log.borrow()), 1);
}

#[test]
fn model_finishing_first_is_not_cut_short() {
    let model = ScriptedModel::new().finish_on(4);
    let log = model.log();

    let summary = run_model(StepLimit::new(model, budget(10)), 1).unwrap();

    assert_eq!(summary.stats.steps, 4);
    assert_eq!(eval_count(&log.borrow()), 4);
}

#[test]
fn trips_only_when_it_forces_finish() {
    let mut ctx = SimContext::new();
    let mut limited = StepLimit::new(ScriptedModel::new(), budget(2));

    limited.eval(&mut ctx).unwrap();
    assert!(!limited.tripped());
    assert!(!ctx.is_finished());

    limited.eval(&mut ctx).unwrap();
    assert!(limited.tripped());
    assert!(ctx.is_finished());
    assert_eq!(limited.evals(), 2);
}

#[test]
fn inner_finish_on_the_last_step_does_not_trip() {
    let mut ctx = SimContext::new();
    let mut limited = StepLimit::new(ScriptedModel::new().finish_on(2), budget(2));

    limited.eval(&mut ctx).unwrap();
    limited.eval(&mut ctx).unwrap();

    assert!(ctx.is_finished());
    assert!(!limited.tripped());
}

#[test]
fn inner_errors_pass_through_uncounted() {
    let mut ctx = SimContext::new();
    let mut limited = StepLimit::new(ScriptedModel::new().fail_eval_on(1), budget(5));

    let err = limited.eval(&mut ctx).unwrap_err();

    assert!(matches!(err, ModelError::Eval(_)));
    assert_eq!(limited.evals(), 0);
}

#[test]
fn limit_on_failing_model_still_surfaces_the_failure() {
    let model = ScriptedModel::new().fail_eval_on(2);
    let log = model.log();

    let result = run_model(StepLimit::new(model, budget(5)), 1);

    assert!(matches!(result, Err(SimError::Evaluation { time: 1, .. })));
    let events = log.borrow();
    assert_eq!(eval_count(&events), 2);
    assert_eq!(events.last(), Some(&Event::Dropped));
}

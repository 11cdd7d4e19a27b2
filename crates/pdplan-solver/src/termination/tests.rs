//! Tests for termination conditions.

use std::thread;
use std::time::Duration;

use super::*;
use crate::scope::{seeded_rng, SearchScope};

#[test]
fn test_time_termination_before_start() {
    let mut rng = seeded_rng(Some(0));
    let scope = SearchScope::new(&mut rng);
    assert!(!TimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_time_termination_fires() {
    let mut rng = seeded_rng(Some(0));
    let mut scope = SearchScope::new(&mut rng);
    scope.start_solving();
    let term = TimeTermination::millis(5);
    assert!(!TimeTermination::millis(60_000).is_terminated(&scope));
    thread::sleep(Duration::from_millis(10));
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_step_count_termination() {
    let mut rng = seeded_rng(Some(0));
    let mut scope = SearchScope::new(&mut rng);
    scope.start_solving();
    let term = StepCountTermination::new(2);
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let mut rng = seeded_rng(Some(0));
    let mut scope = SearchScope::new(&mut rng);
    scope.start_solving();
    let term = OrTermination::new((TimeTermination::millis(60_000), StepCountTermination::new(1)));
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_absent_termination_never_fires() {
    let mut rng = seeded_rng(Some(0));
    let mut scope = SearchScope::new(&mut rng);
    scope.start_solving();
    scope.increment_step_count();
    let none: Option<StepCountTermination> = None;
    assert!(!none.is_terminated(&scope));
    assert!(Some(StepCountTermination::new(1)).is_terminated(&scope));
}

//! Tests for termination conditions.

use std::time::{Duration, Instant};

use super::*;
use crate::cancel::CancellationToken;

fn scope() -> SearchScope {
    SearchScope::new(0, 1, Instant::now())
}

#[test]
fn test_node_count_termination() {
    let mut scope = scope();
    let term = NodeCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    scope.increment_node_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    assert_eq!(term.check(&scope), Some(StopReason::NodeLimit));
}

#[test]
fn test_time_termination() {
    let started = Instant::now() - Duration::from_millis(50);
    let scope = SearchScope::new(0, 1, started);

    assert_eq!(
        TimeTermination::millis(10).check(&scope),
        Some(StopReason::TimeLimit)
    );
    assert!(!TimeTermination::seconds(60).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = scope();
    let token = CancellationToken::new();
    let term = ExternalTermination::new(token.clone());

    assert!(!term.is_terminated(&scope));
    token.cancel();
    assert_eq!(term.check(&scope), Some(StopReason::Cancelled));
}

#[test]
fn test_or_termination_reports_first_reason() {
    let scope = scope();
    let token = CancellationToken::new();
    token.cancel();

    let term = OrTermination::new((
        TimeTermination::seconds(60),
        ExternalTermination::new(token),
        NodeCountTermination::new(0),
    ));
    assert_eq!(term.check(&scope), Some(StopReason::Cancelled));

    let idle = OrTermination::new((
        TimeTermination::seconds(60),
        NodeCountTermination::unlimited(),
    ));
    assert!(!idle.is_terminated(&scope));
}

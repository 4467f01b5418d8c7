//! Nudge review board tests.

use finops_core::{
    error::AnalyticsError,
    model::{Nudge, NudgeKind},
    review::{Decision, NudgeBoard},
};

fn nudge(id: &str, impact: f64, confidence: f64) -> Nudge {
    Nudge {
        id: id.into(),
        title: format!("Nudge {id}"),
        description: String::new(),
        kind: NudgeKind::Reallocation,
        impact,
        confidence,
    }
}

fn board() -> NudgeBoard {
    NudgeBoard::new(vec![
        nudge("n1", 450.0, 90.0),
        nudge("n2", 1000.0, 85.0),
        nudge("n3", 2500.0, 78.0),
    ])
}

#[test]
fn fresh_board_counts_everything_active() {
    let b = board();
    assert_eq!(b.active().count(), 3);
    assert_eq!(b.total_potential_impact(), 3950.0);
    // (90 + 85 + 78) / 3 = 84.33
    assert_eq!(b.average_confidence(), 84.0);
}

#[test]
fn accepted_and_ignored_leave_active_set() {
    let mut b = board();
    b.accept("n1").unwrap();
    b.ignore("n3").unwrap();

    let active: Vec<&str> = b.active().map(|n| n.id.as_str()).collect();
    assert_eq!(active, vec!["n2"]);
    assert_eq!(b.total_potential_impact(), 1000.0);
    assert_eq!(b.average_confidence(), 85.0);

    let accepted: Vec<&str> = b.accepted().map(|n| n.id.as_str()).collect();
    assert_eq!(accepted, vec!["n1"]);
}

#[test]
fn later_decision_replaces_earlier() {
    let mut b = board();
    b.ignore("n2").unwrap();
    b.accept("n2").unwrap();

    assert_eq!(b.decision("n2"), Some(Decision::Accepted));
    assert_eq!(b.accepted().count(), 1);
}

#[test]
fn empty_active_set_has_zero_confidence() {
    let mut b = board();
    for id in ["n1", "n2", "n3"] {
        b.accept(id).unwrap();
    }
    assert_eq!(b.average_confidence(), 0.0);
    assert_eq!(b.total_potential_impact(), 0.0);
}

#[test]
fn unknown_nudge_is_rejected() {
    let mut b = board();
    let result = b.accept("missing");
    assert!(matches!(result, Err(AnalyticsError::InvalidRecord { field: "nudge_id", .. })));
    assert_eq!(b.active().count(), 3);
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{day, rec, sample};
use pocketledger::pending::{MutationKind, PendingMutation, Phase, Placement};

#[test]
fn update_moves_through_verification_to_commit() {
    let prior = sample()[1].clone();
    let intended = rec(2, "Side gig v2", "300", day(2024, 2, 3));
    let mut p = PendingMutation::update(2, prior, intended);
    assert_eq!(p.kind, MutationKind::Update);
    assert_eq!(p.phase(), Phase::AppliedOptimistically);

    p.begin_verify();
    assert_eq!(p.phase(), Phase::Verifying);
    p.commit();
    assert_eq!(p.phase(), Phase::Committed);
    assert!(p.phase().is_settled());
}

#[test]
fn settled_mutation_ignores_further_transitions() {
    let mut p = PendingMutation::create(rec(0, "x", "1", day(2024, 1, 1)));
    assert_eq!(p.target_id, None);
    p.roll_back();
    p.commit();
    p.begin_verify();
    assert_eq!(p.phase(), Phase::RolledBack);
}

#[test]
fn placement_prefers_predecessor_then_successor() {
    let all = sample();
    let at = Placement::capture(&all, 1);
    assert_eq!(at.after, Some(1));
    assert_eq!(at.before, Some(3));

    let without: Vec<_> = all.iter().filter(|r| r.id != Some(2)).cloned().collect();
    assert_eq!(at.resolve(&without), 1);

    // predecessor gone: go in front of the successor
    let only_succ = vec![rec(9, "n", "1", day(2024, 1, 1)), all[2].clone()];
    assert_eq!(at.resolve(&only_succ), 1);

    assert_eq!(at.resolve(&[]), 0);
}

#[test]
fn placement_at_edges() {
    let all = sample();
    let first = Placement::capture(&all, 0);
    assert_eq!(first.after, None);
    assert_eq!(first.before, Some(2));
    let last = Placement::capture(&all, 2);
    assert_eq!(last.after, Some(2));
    assert_eq!(last.before, None);
}

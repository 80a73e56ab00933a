// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    AppliedOptimistically,
    Verifying,
    Committed,
    RolledBack,
}

impl Phase {
    pub fn is_settled(&self) -> bool {
        matches!(self, Phase::Committed | Phase::RolledBack)
    }

    fn can_advance_to(&self, next: Phase) -> bool {
        use Phase::*;
        matches!(
            (self, next),
            (AppliedOptimistically, Verifying)
                | (AppliedOptimistically, Committed)
                | (AppliedOptimistically, RolledBack)
                | (Verifying, Committed)
                | (Verifying, RolledBack)
        )
    }
}

/// Where a deleted record sat, by neighbour id, so a rollback can put it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub index: usize,
    pub after: Option<i64>,
    pub before: Option<i64>,
}

impl Placement {
    pub fn capture(records: &[Record], index: usize) -> Self {
        let after = index
            .checked_sub(1)
            .and_then(|i| records.get(i))
            .and_then(|r| r.id);
        let before = records.get(index + 1).and_then(|r| r.id);
        Self {
            index,
            after,
            before,
        }
    }

    /// Index to reinsert at in `records` (which no longer holds the record):
    /// right after the old predecessor, else right before the old successor,
    /// else the front.
    pub fn resolve(&self, records: &[Record]) -> usize {
        let pos = |id: i64| records.iter().position(|r| r.id == Some(id));
        if let Some(p) = self.after.and_then(pos) {
            return p + 1;
        }
        if let Some(s) = self.before.and_then(pos) {
            return s;
        }
        0
    }
}

/// An in-flight change to one collection, alive from dispatch until settle.
#[derive(Debug, Clone)]
pub struct PendingMutation {
    pub kind: MutationKind,
    pub target_id: Option<i64>,
    pub prior: Option<Record>,
    pub intended: Option<Record>,
    pub placement: Option<Placement>,
    phase: Phase,
}

impl PendingMutation {
    pub fn create(candidate: Record) -> Self {
        Self {
            kind: MutationKind::Create,
            target_id: None,
            prior: None,
            intended: Some(candidate),
            placement: None,
            phase: Phase::AppliedOptimistically,
        }
    }

    pub fn update(id: i64, prior: Record, intended: Record) -> Self {
        Self {
            kind: MutationKind::Update,
            target_id: Some(id),
            prior: Some(prior),
            intended: Some(intended),
            placement: None,
            phase: Phase::AppliedOptimistically,
        }
    }

    pub fn delete(id: i64, prior: Record, placement: Placement) -> Self {
        Self {
            kind: MutationKind::Delete,
            target_id: Some(id),
            prior: Some(prior),
            intended: None,
            placement: Some(placement),
            phase: Phase::AppliedOptimistically,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn begin_verify(&mut self) {
        self.advance(Phase::Verifying);
    }

    pub fn commit(&mut self) {
        self.advance(Phase::Committed);
    }

    pub fn roll_back(&mut self) {
        self.advance(Phase::RolledBack);
    }

    fn advance(&mut self, next: Phase) {
        if !self.phase.can_advance_to(next) {
            tracing::warn!(
                kind = ?self.kind,
                id = ?self.target_id,
                from = ?self.phase,
                to = ?next,
                "ignoring invalid mutation transition"
            );
            return;
        }
        tracing::trace!(kind = ?self.kind, id = ?self.target_id, from = ?self.phase, to = ?next, "mutation transition");
        self.phase = next;
    }
}

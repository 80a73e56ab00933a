// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Resolves writes the ledger acknowledged without proving the new state.
//!
//! After an ambiguous update reply the record is read back by id and compared
//! field by field against what the client meant to write. Only a matching
//! read-back counts as success; a failed read is never treated as one.

use serde::Serialize;

use crate::gateway::LedgerGateway;
use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// The ledger now holds the intended value.
    Confirmed,
    /// The ledger holds something else.
    Mismatch,
    /// The read-back itself failed.
    Indeterminate,
}

impl Verdict {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Verdict::Confirmed)
    }
}

pub async fn verify<G>(gateway: &G, id: i64, intended: &Record) -> Verdict
where
    G: LedgerGateway + ?Sized,
{
    match gateway.get(id).await {
        Ok(remote) => {
            if same_content(&remote, intended) {
                tracing::debug!(id, "read-back matches intended value");
                Verdict::Confirmed
            } else {
                tracing::warn!(id, "read-back differs from intended value");
                Verdict::Mismatch
            }
        }
        Err(e) => {
            tracing::warn!(id, error = %e, "read-back failed");
            Verdict::Indeterminate
        }
    }
}

/// Compares the user-editable fields. Ids are ignored; amounts compare by
/// value so `10` equals `10.00`; absent and empty descriptions are equal.
pub fn same_content(a: &Record, b: &Record) -> bool {
    a.title == b.title
        && a.amount == b.amount
        && a.date == b.date
        && a.category == b.category
        && a.description_or_empty() == b.description_or_empty()
}

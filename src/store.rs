// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Working copy of one record collection with optimistic, reconciled writes.
//!
//! Updates and deletes are applied to the local list before the ledger
//! answers and undone if the ledger does not confirm them. Only one change per
//! record id may be in flight; a second one is refused with
//! `StoreError::ConflictInProgress`. The ledger round trip runs on its own
//! tokio task, so a caller that stops waiting still leaves the store settled.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

use crate::aggregate::sum_amounts;
use crate::error::{GatewayError, StoreError, StoreResult};
use crate::gateway::{LedgerGateway, UpdateReply};
use crate::models::{Record, RecordKind};
use crate::pending::{PendingMutation, Placement};
use crate::verify::{self, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Freshness {
    /// No load has succeeded yet.
    NotLoaded,
    /// The last load succeeded.
    Fresh,
    /// A load succeeded before, but the latest one failed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub records: Vec<Record>,
    pub freshness: Freshness,
}

impl Snapshot {
    pub fn total_amount(&self) -> Decimal {
        sum_amounts(&self.records)
    }
}

struct State {
    records: Vec<Record>,
    freshness: Freshness,
    pending: HashMap<i64, PendingMutation>,
}

impl State {
    fn position(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|r| r.id == Some(id))
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.clone(),
            freshness: self.freshness,
        }
    }
}

struct Inner<G> {
    kind: RecordKind,
    gateway: G,
    state: Mutex<State>,
    tx: watch::Sender<Snapshot>,
}

enum Settle {
    Commit(Option<Record>),
    Rollback(StoreError),
}

pub struct RecordStore<G> {
    inner: Arc<Inner<G>>,
}

impl<G> Clone for RecordStore<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: LedgerGateway + 'static> RecordStore<G> {
    pub fn new(kind: RecordKind, gateway: G) -> Self {
        let initial = Snapshot {
            records: Vec::new(),
            freshness: Freshness::NotLoaded,
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            inner: Arc::new(Inner {
                kind,
                gateway,
                state: Mutex::new(State {
                    records: Vec::new(),
                    freshness: Freshness::NotLoaded,
                    pending: HashMap::new(),
                }),
                tx,
            }),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.inner.kind
    }

    pub fn gateway(&self) -> &G {
        &self.inner.gateway
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    pub fn records(&self) -> Vec<Record> {
        self.inner.lock().records.clone()
    }

    pub fn get(&self, id: i64) -> Option<Record> {
        let st = self.inner.lock();
        st.position(id).map(|i| st.records[i].clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn freshness(&self) -> Freshness {
        self.inner.lock().freshness
    }

    pub fn is_pending(&self, id: i64) -> bool {
        self.inner.lock().pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// Receives a fresh snapshot after every change to the collection.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.tx.subscribe()
    }

    pub fn total_amount(&self) -> Decimal {
        sum_amounts(&self.inner.lock().records)
    }

    /// Replaces the collection with the ledger's listing and returns its size.
    ///
    /// On failure the previous records stay in place; `StoreError::Fetch`
    /// carries `stale: true` when those records came from an earlier load.
    pub async fn load(&self) -> StoreResult<usize> {
        let kind = self.inner.kind;
        match self.inner.gateway.list().await {
            Ok(listing) => {
                let mut st = self.inner.lock();
                st.records = merge_listing(listing, &st.pending);
                st.freshness = Freshness::Fresh;
                let n = st.records.len();
                self.inner.publish(&st);
                tracing::info!(%kind, records = n, "loaded");
                Ok(n)
            }
            Err(e) => {
                let mut st = self.inner.lock();
                let stale = st.freshness != Freshness::NotLoaded;
                if stale {
                    st.freshness = Freshness::Stale;
                    self.inner.publish(&st);
                }
                tracing::warn!(%kind, error = %e, stale, "load failed");
                Err(StoreError::Fetch {
                    source: fetch_class(e),
                    stale,
                })
            }
        }
    }

    /// Sends a new record and prepends the ledger's copy once it has an id.
    pub async fn create(&self, candidate: Record) -> StoreResult<Record> {
        if candidate.id.is_some() {
            return Err(StoreError::InvalidCandidate(
                "a new record must not carry an id".into(),
            ));
        }
        if candidate.amount.is_sign_negative() {
            return Err(StoreError::InvalidCandidate(
                "amount must not be negative".into(),
            ));
        }
        let inner = Arc::clone(&self.inner);
        detach(async move { inner.run_create(candidate).await }).await
    }

    /// Applies `value` to record `id` right away, then confirms it with the
    /// ledger. Returns the committed record, or rolls back and returns why.
    pub async fn update(&self, id: i64, value: Record) -> StoreResult<Record> {
        if value.amount.is_sign_negative() {
            return Err(StoreError::InvalidCandidate(
                "amount must not be negative".into(),
            ));
        }
        let intended = Record {
            id: Some(id),
            ..value
        };
        {
            let mut st = self.inner.lock();
            if st.pending.contains_key(&id) {
                return Err(StoreError::ConflictInProgress(id));
            }
            let idx = st.position(id).ok_or(StoreError::UnknownRecord(id))?;
            let prior = std::mem::replace(&mut st.records[idx], intended.clone());
            st.pending
                .insert(id, PendingMutation::update(id, prior, intended.clone()));
            self.inner.publish(&st);
        }
        tracing::debug!(kind = %self.inner.kind, id, "update applied optimistically");

        let inner = Arc::clone(&self.inner);
        let res = detach(async move { inner.run_update(id, intended).await }).await;
        if let Err(StoreError::Interrupted(_)) = &res {
            self.inner.abandon(id);
        }
        res
    }

    /// Removes record `id` right away, then deletes it on the ledger. On
    /// failure the record is put back next to its old neighbours.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        {
            let mut st = self.inner.lock();
            if st.pending.contains_key(&id) {
                return Err(StoreError::ConflictInProgress(id));
            }
            let idx = st.position(id).ok_or(StoreError::UnknownRecord(id))?;
            let placement = Placement::capture(&st.records, idx);
            let removed = st.records.remove(idx);
            st.pending
                .insert(id, PendingMutation::delete(id, removed, placement));
            self.inner.publish(&st);
        }
        tracing::debug!(kind = %self.inner.kind, id, "delete applied optimistically");

        let inner = Arc::clone(&self.inner);
        let res = detach(async move { inner.run_delete(id).await }).await;
        if let Err(StoreError::Interrupted(_)) = &res {
            self.inner.abandon(id);
        }
        res
    }
}

impl<G: LedgerGateway> Inner<G> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn publish(&self, st: &State) {
        self.tx.send_replace(st.snapshot());
    }

    async fn run_create(&self, candidate: Record) -> StoreResult<Record> {
        let mut pending = PendingMutation::create(candidate.clone());
        let created = match self.gateway.create(&candidate).await {
            Ok(r) => r,
            Err(e) => {
                pending.roll_back();
                tracing::warn!(kind = %self.kind, error = %e, "create failed");
                return Err(e.into());
            }
        };
        let Some(id) = created.id else {
            pending.roll_back();
            tracing::warn!(kind = %self.kind, "created record came back without an id");
            return Err(GatewayError::server("created record has no id").into());
        };

        let mut st = self.lock();
        if let Some(dup) = st.position(id) {
            st.records.remove(dup);
        }
        st.records.insert(0, created.clone());
        pending.commit();
        self.publish(&st);
        tracing::info!(kind = %self.kind, id, "created");
        Ok(created)
    }

    async fn run_update(&self, id: i64, intended: Record) -> StoreResult<Record> {
        let settle = match self.gateway.update(id, &intended).await {
            Ok(UpdateReply::Decoded(server))
                if server.id.is_none_or(|sid| sid == id)
                    && verify::same_content(&server, &intended) =>
            {
                Settle::Commit(Some(server))
            }
            Ok(reply) => {
                tracing::debug!(kind = %self.kind, id, ?reply, "ambiguous update reply, verifying");
                self.mark_verifying(id);
                match verify::verify(&self.gateway, id, &intended).await {
                    Verdict::Confirmed => Settle::Commit(None),
                    verdict => Settle::Rollback(StoreError::MutationUnconfirmed { id, verdict }),
                }
            }
            Err(e) => Settle::Rollback(e.into()),
        };

        let mut st = self.lock();
        let mut pending = st.pending.remove(&id);
        let res = match settle {
            Settle::Commit(server) => {
                if let Some(p) = pending.as_mut() {
                    p.commit();
                }
                let idx = st.position(id);
                let committed = match (idx, server) {
                    (Some(i), Some(server)) => {
                        st.records[i] = Record {
                            id: Some(id),
                            ..server
                        };
                        st.records[i].clone()
                    }
                    (Some(i), None) => st.records[i].clone(),
                    (None, _) => intended,
                };
                tracing::info!(kind = %self.kind, id, "update committed");
                Ok(committed)
            }
            Settle::Rollback(err) => {
                if let Some(p) = pending.as_mut() {
                    p.roll_back();
                    if let (Some(i), Some(prior)) = (st.position(id), p.prior.take()) {
                        st.records[i] = prior;
                    }
                }
                tracing::warn!(kind = %self.kind, id, error = %err, "update rolled back");
                Err(err)
            }
        };
        self.publish(&st);
        res
    }

    async fn run_delete(&self, id: i64) -> StoreResult<()> {
        let outcome = self.gateway.delete(id).await;

        let mut st = self.lock();
        let mut pending = st.pending.remove(&id);
        let res = match outcome {
            Ok(()) => {
                if let Some(p) = pending.as_mut() {
                    p.commit();
                }
                tracing::info!(kind = %self.kind, id, "delete committed");
                Ok(())
            }
            Err(e) => {
                if let Some(p) = pending.as_mut() {
                    p.roll_back();
                    restore_deleted(&mut st.records, p);
                }
                tracing::warn!(kind = %self.kind, id, error = %e, "delete rolled back");
                Err(e.into())
            }
        };
        self.publish(&st);
        res
    }

    fn mark_verifying(&self, id: i64) {
        if let Some(p) = self.lock().pending.get_mut(&id) {
            p.begin_verify();
        }
    }

    /// Rolls back a mutation whose task died before it could settle.
    fn abandon(&self, id: i64) {
        let mut st = self.lock();
        let Some(mut p) = st.pending.remove(&id) else {
            return;
        };
        p.roll_back();
        match p.placement {
            Some(_) => restore_deleted(&mut st.records, &mut p),
            None => {
                if let (Some(i), Some(prior)) = (st.position(id), p.prior.take()) {
                    st.records[i] = prior;
                }
            }
        }
        tracing::warn!(kind = %self.kind, id, "abandoned mutation rolled back");
        self.publish(&st);
    }
}

fn restore_deleted(records: &mut Vec<Record>, p: &mut PendingMutation) {
    let Some(prior) = p.prior.take() else {
        return;
    };
    if prior.id.is_some() && records.iter().any(|r| r.id == prior.id) {
        return;
    }
    let at = p
        .placement
        .as_ref()
        .map(|pl| pl.resolve(records))
        .unwrap_or(0);
    records.insert(at, prior);
}

/// Keeps outstanding optimistic changes visible on top of a fresh listing and
/// drops duplicate ids, keeping the first.
fn merge_listing(listing: Vec<Record>, pending: &HashMap<i64, PendingMutation>) -> Vec<Record> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(listing.len());
    for rec in listing {
        let Some(id) = rec.id else {
            tracing::warn!(title = %rec.title, "dropping listed record without id");
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        match pending.get(&id) {
            Some(p) if p.placement.is_some() => continue,
            Some(p) => out.push(p.intended.clone().unwrap_or(rec)),
            None => out.push(rec),
        }
    }
    out
}

/// Listing failures are reported as unreachable, unauthorized or server-side.
fn fetch_class(e: GatewayError) -> GatewayError {
    match e {
        GatewayError::Forbidden => GatewayError::Unauthorized,
        GatewayError::NotFound(what) => GatewayError::ServerError {
            status: 404,
            message: format!("Endpoint not found: {}", what),
        },
        other => other,
    }
}

async fn detach<F, T>(fut: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(fut)
        .await
        .map_err(|e| StoreError::Interrupted(e.to_string()))?
}

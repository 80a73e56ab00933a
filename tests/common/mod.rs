// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use pocketledger::gateway::{GatewayResult, LedgerGateway, UpdateReply};
use pocketledger::{GatewayError, Record};
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

/// Scripted ledger. Each call pops the next queued reply for its method and
/// falls back to a well-behaved default when the queue is empty.
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

#[derive(Default)]
struct FakeState {
    lists: VecDeque<GatewayResult<Vec<Record>>>,
    gets: VecDeque<GatewayResult<Record>>,
    creates: VecDeque<GatewayResult<Record>>,
    updates: VecDeque<GatewayResult<UpdateReply>>,
    deletes: VecDeque<GatewayResult<()>>,
    calls: Vec<String>,
    next_id: i64,
    panic_updates: bool,
}

impl FakeGateway {
    pub fn new() -> Self {
        let g = Self::default();
        g.state.lock().unwrap().next_id = 100;
        g
    }

    pub fn push_list(&self, r: GatewayResult<Vec<Record>>) {
        self.state.lock().unwrap().lists.push_back(r);
    }

    pub fn push_get(&self, r: GatewayResult<Record>) {
        self.state.lock().unwrap().gets.push_back(r);
    }

    pub fn push_create(&self, r: GatewayResult<Record>) {
        self.state.lock().unwrap().creates.push_back(r);
    }

    pub fn push_update(&self, r: GatewayResult<UpdateReply>) {
        self.state.lock().unwrap().updates.push_back(r);
    }

    pub fn push_delete(&self, r: GatewayResult<()>) {
        self.state.lock().unwrap().deletes.push_back(r);
    }

    /// Makes each update and delete call wait for one permit on the returned gate.
    pub fn hold_writes(&self) -> Arc<Semaphore> {
        let n = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(n.clone());
        n
    }

    /// Makes the next update calls panic, killing the task that runs them.
    pub fn panic_on_update(&self) {
        self.state.lock().unwrap().panic_updates = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record_call(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    async fn wait_gate(&self) {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(g) = gate {
            g.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait]
impl LedgerGateway for FakeGateway {
    async fn list(&self) -> GatewayResult<Vec<Record>> {
        self.record_call("list".into());
        let next = self.state.lock().unwrap().lists.pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get(&self, id: i64) -> GatewayResult<Record> {
        self.record_call(format!("get {}", id));
        let next = self.state.lock().unwrap().gets.pop_front();
        next.unwrap_or_else(|| Err(GatewayError::NotFound(format!("/{}", id))))
    }

    async fn create(&self, candidate: &Record) -> GatewayResult<Record> {
        self.record_call(format!("create {}", candidate.title));
        let mut st = self.state.lock().unwrap();
        if let Some(r) = st.creates.pop_front() {
            return r;
        }
        st.next_id += 1;
        Ok(candidate.clone().with_id(st.next_id))
    }

    async fn update(&self, id: i64, value: &Record) -> GatewayResult<UpdateReply> {
        self.record_call(format!("update {}", id));
        self.wait_gate().await;
        let panics = self.state.lock().unwrap().panic_updates;
        if panics {
            panic!("ledger connection torn down mid-update");
        }
        let next = self.state.lock().unwrap().updates.pop_front();
        next.unwrap_or_else(|| Ok(UpdateReply::Decoded(value.clone())))
    }

    async fn delete(&self, id: i64) -> GatewayResult<()> {
        self.record_call(format!("delete {}", id));
        self.wait_gate().await;
        let next = self.state.lock().unwrap().deletes.pop_front();
        next.unwrap_or(Ok(()))
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn rec(id: i64, title: &str, amount: &str, date: NaiveDate) -> Record {
    Record::new(title, dec(amount), date, "Salary").with_id(id)
}

/// Three records, ids 1..=3, in listing order.
pub fn sample() -> Vec<Record> {
    vec![
        rec(1, "January pay", "1200", day(2024, 1, 31)),
        rec(2, "Side gig", "250.50", day(2024, 2, 3)),
        rec(3, "Dividend", "40", day(2024, 2, 15)).with_description("ETF"),
    ]
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeGateway, day, dec, rec};
use pocketledger::GatewayError;
use pocketledger::verify::{Verdict, same_content, verify};

#[test]
fn description_absent_equals_empty() {
    let a = rec(1, "Rent", "900", day(2024, 5, 1));
    let b = a.clone().with_description("");
    assert!(same_content(&a, &b));
    assert!(!same_content(&a, &a.clone().with_description("May")));
}

#[test]
fn amounts_compare_by_value() {
    let a = rec(1, "Rent", "900", day(2024, 5, 1));
    let mut b = a.clone();
    b.amount = dec("900.00");
    assert!(same_content(&a, &b));
    b.amount = dec("900.01");
    assert!(!same_content(&a, &b));
}

#[test]
fn ids_are_ignored_but_other_fields_matter() {
    let a = rec(1, "Rent", "900", day(2024, 5, 1));
    let mut b = a.clone();
    b.id = None;
    assert!(same_content(&a, &b));
    b.date = day(2024, 5, 2);
    assert!(!same_content(&a, &b));
    let mut c = a.clone();
    c.category = "Housing".into();
    assert!(!same_content(&a, &c));
}

#[tokio::test]
async fn verdicts_follow_read_back() {
    let intended = rec(4, "Rent", "900", day(2024, 5, 1));
    let gw = FakeGateway::new();

    gw.push_get(Ok(intended.clone()));
    assert_eq!(verify(&gw, 4, &intended).await, Verdict::Confirmed);

    gw.push_get(Ok(rec(4, "Rent", "850", day(2024, 5, 1))));
    assert_eq!(verify(&gw, 4, &intended).await, Verdict::Mismatch);

    gw.push_get(Err(GatewayError::Unreachable("offline".into())));
    assert_eq!(verify(&gw, 4, &intended).await, Verdict::Indeterminate);

    assert_eq!(gw.calls(), vec!["get 4", "get 4", "get 4"]);
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{day, dec, rec};
use pocketledger::aggregate::{project, summarize, window};
use pocketledger::{AggregatePoint, Record};
use rust_decimal::Decimal;

#[test]
fn sums_per_day_in_ascending_order() {
    let records = vec![
        rec(1, "a", "10", day(2024, 1, 1)),
        rec(2, "b", "5", day(2024, 1, 1)),
        rec(3, "c", "3", day(2024, 1, 2)),
    ];
    let points = project(&records);
    assert_eq!(
        points,
        vec![
            AggregatePoint {
                date: Some(day(2024, 1, 1)),
                total: dec("15")
            },
            AggregatePoint {
                date: Some(day(2024, 1, 2)),
                total: dec("3")
            },
        ]
    );
}

#[test]
fn output_ignores_input_order() {
    let mut records = vec![
        rec(1, "a", "1.25", day(2024, 3, 9)),
        rec(2, "b", "2", day(2023, 12, 31)),
        rec(3, "c", "0.75", day(2024, 3, 9)),
    ];
    let forward = project(&records);
    records.reverse();
    assert_eq!(project(&records), forward);
    assert_eq!(forward[0].label(), "2023-12-31");
    assert_eq!(forward[1].total, dec("2.00"));
}

#[test]
fn empty_input_yields_single_sentinel() {
    let points = project(&[]);
    assert_eq!(points.len(), 1);
    assert!(points[0].is_sentinel());
    assert_eq!(points[0].total, dec("0"));
    assert_eq!(points[0].label(), "No Data");
}

#[test]
fn same_day_timestamps_share_a_bucket() {
    let json = r#"[
        {"id": 1, "title": "a", "amount": 10, "date": "2024-01-01T23:30:00Z", "category": "Food"},
        {"id": 2, "title": "b", "amount": 5, "date": "2024-01-02T01:30:00+02:00", "category": "Food"},
        {"id": 3, "title": "c", "amount": 1, "date": "2024-01-01", "category": "Food"}
    ]"#;
    let records: Vec<Record> = serde_json::from_str(json).unwrap();
    let points = project(&records);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].date, Some(day(2024, 1, 1)));
    assert_eq!(points[0].total, dec("16"));
}

#[test]
fn malformed_amount_contributes_zero() {
    let json = r#"[
        {"id": 1, "title": "a", "amount": "n/a", "date": "2024-01-01", "category": "Food"},
        {"id": 2, "title": "b", "amount": "7.5", "date": "2024-01-01", "category": "Food"},
        {"id": 3, "title": "c", "amount": null, "date": "2024-01-02", "category": "Food"}
    ]"#;
    let records: Vec<Record> = serde_json::from_str(json).unwrap();
    let points = project(&records);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].total, dec("7.5"));
    assert_eq!(points[1].total, dec("0"));
}

#[test]
fn window_keeps_last_months_inclusive() {
    let records = vec![
        rec(1, "old", "1", day(2023, 6, 30)),
        rec(2, "edge", "1", day(2023, 7, 1)),
        rec(3, "mid", "1", day(2024, 1, 15)),
        rec(4, "end", "1", day(2024, 5, 1)),
        rec(5, "future", "1", day(2024, 5, 2)),
    ];
    let kept: Vec<_> = window(&records, day(2024, 5, 1), 10)
        .into_iter()
        .filter_map(|r| r.id)
        .collect();
    assert_eq!(kept, vec![2, 3, 4]);
}

#[test]
fn summary_totals_balance_and_extremes() {
    let income = vec![
        rec(1, "pay", "1000", day(2024, 1, 31)),
        rec(2, "gig", "200", day(2024, 2, 10)),
        rec(3, "gift", "50", day(2024, 2, 10)),
    ];
    let expense = vec![rec(7, "rent", "800", day(2024, 2, 1))];

    let s = summarize(&income, &expense);
    assert_eq!(s.income, dec("1250"));
    assert_eq!(s.expense, dec("800"));
    assert_eq!(s.balance, dec("450"));
    assert_eq!(s.latest_income.as_ref().and_then(|r| r.id), Some(2));
    assert_eq!(s.latest_expense.as_ref().and_then(|r| r.id), Some(7));
    assert_eq!((s.min_income, s.max_income), (dec("50"), dec("1000")));
    assert_eq!((s.min_expense, s.max_expense), (dec("800"), dec("800")));
}

#[test]
fn summary_of_nothing_is_zero() {
    let s = summarize(&[], &[]);
    assert_eq!(s.balance, dec("0"));
    assert!(s.latest_income.is_none());
    assert_eq!(s.max_expense, dec("0"));
}

#[test]
fn huge_amounts_clamp_instead_of_panicking() {
    let mut a = rec(1, "a", "0", day(2024, 1, 1));
    a.amount = Decimal::MAX;
    let mut b = rec(2, "b", "0", day(2024, 1, 1));
    b.amount = Decimal::MAX;
    let records = vec![a, b];

    let points = project(&records);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].total, Decimal::MAX);

    let stats = summarize(&records, &[]);
    assert_eq!(stats.income, Decimal::MAX);
    assert_eq!(stats.balance, Decimal::MAX);

    let stats = summarize(&[], &records);
    assert_eq!(stats.balance, Decimal::MIN);
}

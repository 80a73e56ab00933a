// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{AggregatePoint, LedgerStats, Record};

/// Sum of amounts, clamped to `Decimal::MAX` instead of overflowing.
pub fn sum_amounts<'a, I>(records: I) -> Decimal
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .fold(Decimal::ZERO, |acc, r| saturating_add(acc, r.amount))
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or_else(|| {
        tracing::warn!("amount total overflowed, clamping");
        if b.is_sign_negative() { Decimal::MIN } else { Decimal::MAX }
    })
}

/// Daily totals in ascending date order. Never empty: with no records the
/// series is a single zero-valued "No Data" point.
pub fn project(records: &[Record]) -> Vec<AggregatePoint> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for r in records {
        let total = by_day.entry(r.date).or_insert(Decimal::ZERO);
        *total = saturating_add(*total, r.amount);
    }
    if by_day.is_empty() {
        return vec![AggregatePoint::sentinel()];
    }
    by_day
        .into_iter()
        .map(|(date, total)| AggregatePoint {
            date: Some(date),
            total,
        })
        .collect()
}

/// Records dated within `months` months up to and including `end`.
pub fn window(records: &[Record], end: NaiveDate, months: u32) -> Vec<Record> {
    let start = end
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN);
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

pub fn summarize(income: &[Record], expense: &[Record]) -> LedgerStats {
    let income_total = sum_amounts(income);
    let expense_total = sum_amounts(expense);
    let (min_income, max_income) = min_max(income);
    let (min_expense, max_expense) = min_max(expense);
    LedgerStats {
        income: income_total,
        expense: expense_total,
        balance: saturating_add(income_total, -expense_total),
        latest_income: latest(income).cloned(),
        latest_expense: latest(expense).cloned(),
        min_income,
        max_income,
        min_expense,
        max_expense,
    }
}

// first record wins on equal dates
fn latest(records: &[Record]) -> Option<&Record> {
    records
        .iter()
        .reduce(|best, r| if r.date > best.date { r } else { best })
}

fn min_max(records: &[Record]) -> (Decimal, Decimal) {
    let mut it = records.iter().map(|r| r.amount);
    let Some(first) = it.next() else {
        return (Decimal::ZERO, Decimal::ZERO);
    };
    it.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)))
}

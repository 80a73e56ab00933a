// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::summarize;
use crate::commands::records::load_or_warn;
use crate::gateway::LedgerGateway;
use crate::models::Record;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub async fn handle<G>(
    income: &RecordStore<G>,
    expense: &RecordStore<G>,
    sub: &clap::ArgMatches,
) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    // the two collections are independent
    let (a, b) = tokio::join!(load_or_warn(income), load_or_warn(expense));
    a?;
    b?;

    let stats = summarize(&income.records(), &expense.records());
    if maybe_print_json(sub.get_flag("json"), &stats)? {
        return Ok(());
    }
    let latest = |r: &Option<Record>| {
        r.as_ref()
            .map(|r| format!("{} ({}, {})", r.title, fmt_money(&r.amount), r.date))
            .unwrap_or_else(|| "-".into())
    };
    let rows = vec![
        vec!["Income".into(), fmt_money(&stats.income)],
        vec!["Expense".into(), fmt_money(&stats.expense)],
        vec!["Balance".into(), fmt_money(&stats.balance)],
        vec!["Latest income".into(), latest(&stats.latest_income)],
        vec!["Latest expense".into(), latest(&stats.latest_expense)],
        vec![
            "Income min / max".into(),
            format!("{} / {}", fmt_money(&stats.min_income), fmt_money(&stats.max_income)),
        ],
        vec![
            "Expense min / max".into(),
            format!("{} / {}", fmt_money(&stats.min_expense), fmt_money(&stats.max_expense)),
        ],
    ];
    println!("{}", pretty_table(&["", "Value"], rows));
    Ok(())
}

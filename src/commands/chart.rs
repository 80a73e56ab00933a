// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{project, window};
use crate::commands::records::load_or_warn;
use crate::gateway::LedgerGateway;
use crate::models::AggregatePoint;
use crate::store::RecordStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub async fn handle<G>(
    store: &RecordStore<G>,
    sub: &clap::ArgMatches,
    default_months: u32,
) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    load_or_warn(store).await?;
    let months = sub
        .get_one::<u32>("months")
        .copied()
        .unwrap_or(default_months);
    let end = match sub.get_one::<String>("end") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let points = project(&window(&store.records(), end, months));
    if !maybe_print_json(sub.get_flag("json"), &points)? {
        let label = format!("{} total", store.kind());
        println!("{}", pretty_table(&["Date", &label, ""], chart_rows(&points)));
    }
    Ok(())
}

/// Date, formatted total and a bar scaled to the largest total.
pub fn chart_rows(points: &[AggregatePoint]) -> Vec<Vec<String>> {
    const WIDTH: u32 = 30;
    let peak = points
        .iter()
        .map(|p| p.total)
        .max()
        .unwrap_or_default();
    points
        .iter()
        .map(|p| {
            let cells = if peak.is_zero() {
                0
            } else {
                ((p.total / peak) * Decimal::from(WIDTH))
                    .round()
                    .to_u32()
                    .unwrap_or(0)
            };
            vec![
                p.label(),
                fmt_money(&p.total),
                "#".repeat(cells as usize),
            ]
        })
        .collect()
}

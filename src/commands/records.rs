// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::LedgerGateway;
use crate::models::{Record, RecordPatch};
use crate::store::{Freshness, RecordStore};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{Result, anyhow};

pub async fn handle<G>(store: &RecordStore<G>, m: &clap::ArgMatches) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    load_or_warn(store).await?;
    match m.subcommand() {
        Some(("list", sub)) => list(store, sub)?,
        Some(("add", sub)) => add(store, sub).await?,
        Some(("edit", sub)) => edit(store, sub).await?,
        Some(("rm", sub)) => remove(store, sub).await?,
        Some(("total", _)) => {
            println!("Total {}: {}", store.kind(), fmt_money(&store.total_amount()));
        }
        _ => {}
    }
    Ok(())
}

/// First-load failures abort; a failed refresh over earlier data only warns.
pub async fn load_or_warn<G>(store: &RecordStore<G>) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    if let Err(e) = store.load().await {
        if store.freshness() == Freshness::Stale {
            eprintln!("warning: showing stale {} data: {}", store.kind(), e);
        } else {
            return Err(anyhow!(e).context(format!("Failed to load {} records", store.kind())));
        }
    }
    Ok(())
}

fn list<G>(store: &RecordStore<G>, sub: &clap::ArgMatches) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    let mut data = store.records();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Category", "Amount", "Description"],
                table_rows(&data),
            )
        );
    }
    Ok(())
}

pub fn table_rows(records: &[Record]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| {
            vec![
                r.id.map(|i| i.to_string()).unwrap_or_default(),
                r.date.to_string(),
                r.title.clone(),
                r.category.clone(),
                fmt_money(&r.amount),
                r.description_or_empty().to_string(),
            ]
        })
        .collect()
}

pub fn candidate_from_args(sub: &clap::ArgMatches) -> Result<Record> {
    let required = |name: &str| {
        sub.get_one::<String>(name)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| anyhow!("--{} is required", name))
    };
    let title = required("title")?;
    if title.is_empty() {
        return Err(anyhow!("Title must not be empty"));
    }
    let category = required("category")?;
    if category.is_empty() {
        return Err(anyhow!("Category must not be empty"));
    }
    let amount = parse_amount(&required("amount")?)?;
    let date = parse_date(&required("date")?)?;
    let mut rec = Record::new(title, amount, date, category);
    if let Some(d) = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        rec = rec.with_description(d);
    }
    Ok(rec)
}

pub fn patch_from_args(sub: &clap::ArgMatches) -> Result<RecordPatch> {
    let opt = |name: &str| sub.get_one::<String>(name).map(|s| s.trim().to_string());
    let patch = RecordPatch {
        title: opt("title"),
        amount: opt("amount").map(|s| parse_amount(&s)).transpose()?,
        date: opt("date").map(|s| parse_date(&s)).transpose()?,
        category: opt("category"),
        description: opt("description"),
    };
    if patch.is_empty() {
        return Err(anyhow!("Nothing to change; pass at least one field"));
    }
    Ok(patch)
}

async fn add<G>(store: &RecordStore<G>, sub: &clap::ArgMatches) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    let candidate = candidate_from_args(sub)?;
    let created = store.create(candidate).await?;
    println!(
        "Recorded {} {} on {} '{}' (id {})",
        store.kind(),
        fmt_money(&created.amount),
        created.date,
        created.title,
        created.id.unwrap_or_default()
    );
    Ok(())
}

async fn edit<G>(store: &RecordStore<G>, sub: &clap::ArgMatches) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("--id is required"))?;
    let patch = patch_from_args(sub)?;
    let current = store
        .get(id)
        .ok_or_else(|| anyhow!("No {} record with id {}", store.kind(), id))?;
    let updated = store.update(id, patch.apply_to(&current)).await?;
    println!("Updated {} {}: '{}'", store.kind(), id, updated.title);
    Ok(())
}

async fn remove<G>(store: &RecordStore<G>, sub: &clap::ArgMatches) -> Result<()>
where
    G: LedgerGateway + 'static,
{
    let id = *sub
        .get_one::<i64>("id")
        .ok_or_else(|| anyhow!("--id is required"))?;
    store.delete(id).await?;
    println!("Deleted {} {}", store.kind(), id);
    Ok(())
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use pocketledger::config::{self, ClientConfig};
use pocketledger::gateway::HttpGateway;
use pocketledger::session::Session;
use pocketledger::{RecordKind, RecordStore, cli, commands, utils};

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = ClientConfig::load()?;
    let session = Session::new();
    if let Ok(token) = std::env::var(config::ENV_TOKEN) {
        let user = std::env::var(config::ENV_USERNAME).unwrap_or_else(|_| "user".into());
        session.sign_in(user, token);
    }

    let client = utils::http_client(cfg.timeout())?;
    let store_for = |kind| {
        RecordStore::new(
            kind,
            HttpGateway::new(client.clone(), &cfg.base_url, kind, session.clone()),
        )
    };

    match matches.subcommand() {
        Some(("income", sub)) => {
            commands::records::handle(&store_for(RecordKind::Income), sub).await?
        }
        Some(("expense", sub)) => {
            commands::records::handle(&store_for(RecordKind::Expense), sub).await?
        }
        Some(("chart", sub)) => {
            let kind = sub
                .get_one::<String>("kind")
                .and_then(|k| RecordKind::parse(k))
                .unwrap_or(RecordKind::Expense);
            commands::chart::handle(&store_for(kind), sub, cfg.chart_months()).await?
        }
        Some(("stats", sub)) => {
            let income = store_for(RecordKind::Income);
            let expense = store_for(RecordKind::Expense);
            commands::stats::handle(&income, &expense, sub).await?
        }
        Some(("config", sub)) => commands::config::handle(&cfg, &session, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

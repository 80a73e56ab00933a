// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{ClientConfig, config_path};
use crate::session::Session;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(cfg: &ClientConfig, session: &Session, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("show", _)) = m.subcommand() {
        let user = session.username().unwrap_or_else(|| "(signed out)".into());
        let rows = vec![
            vec!["config file".into(), config_path()?.display().to_string()],
            vec!["base_url".into(), cfg.base_url.clone()],
            vec!["timeout_secs".into(), cfg.timeout_secs.to_string()],
            vec!["chart_months".into(), cfg.chart_months().to_string()],
            vec!["session".into(), user],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

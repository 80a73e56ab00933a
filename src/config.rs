// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pocketledger", "pocketledger"));

pub const ENV_BASE_URL: &str = "POCKETLEDGER_BASE_URL";
pub const ENV_TIMEOUT: &str = "POCKETLEDGER_TIMEOUT_SECS";
pub const ENV_TOKEN: &str = "POCKETLEDGER_TOKEN";
pub const ENV_USERNAME: &str = "POCKETLEDGER_USERNAME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "ClientConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ClientConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub chart_months: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            chart_months: None,
        }
    }
}

impl ClientConfig {
    pub fn default_base_url() -> String {
        "http://localhost:8081".into()
    }

    pub fn default_timeout_secs() -> u64 {
        15
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Months of history charted when `--months` is not given.
    pub fn chart_months(&self) -> u32 {
        self.chart_months.unwrap_or(10)
    }

    /// Reads `path` if it exists, falling back to defaults otherwise.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Parse config at {}", path.display()))
    }

    /// Applies overrides from `lookup` (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|s| !s.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", ENV_TIMEOUT, raw))?;
        }
        Ok(())
    }

    pub fn load() -> Result<Self> {
        let mut cfg = Self::from_file(&config_path()?)?;
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

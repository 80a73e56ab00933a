// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::{lenient_date, lenient_decimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "income",
            RecordKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<RecordKind> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Some(RecordKind::Income),
            "expense" => Some(RecordKind::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One income or expense entry. `id` stays `None` until the ledger assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "lenient_decimal"
    )]
    pub amount: Decimal,
    #[serde(deserialize_with = "lenient_date")]
    pub date: NaiveDate,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            date,
            category: category.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Description with absent and empty treated alike.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Partial edit; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.category.is_none()
            && self.description.is_none()
    }

    /// Merge onto `base`, keeping the base id.
    pub fn apply_to(&self, base: &Record) -> Record {
        Record {
            id: base.id,
            title: self.title.clone().unwrap_or_else(|| base.title.clone()),
            amount: self.amount.unwrap_or(base.amount),
            date: self.date.unwrap_or(base.date),
            category: self
                .category
                .clone()
                .unwrap_or_else(|| base.category.clone()),
            description: match &self.description {
                Some(d) if d.is_empty() => None,
                Some(d) => Some(d.clone()),
                None => base.description.clone(),
            },
        }
    }
}

/// One day of a projected series. `date` is `None` only for the empty-series sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatePoint {
    pub date: Option<NaiveDate>,
    pub total: Decimal,
}

impl AggregatePoint {
    pub const NO_DATA: &'static str = "No Data";

    pub fn sentinel() -> Self {
        Self {
            date: None,
            total: Decimal::ZERO,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.date.is_none()
    }

    pub fn label(&self) -> String {
        match self.date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => Self::NO_DATA.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerStats {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    pub latest_income: Option<Record>,
    pub latest_expense: Option<Record>,
    pub min_income: Decimal,
    pub max_income: Decimal,
    pub min_expense: Decimal,
    pub max_expense: Decimal,
}

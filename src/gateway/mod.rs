// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod http;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::Record;

pub use http::HttpGateway;

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// What came back from a successful update call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateReply {
    /// The body decoded as a record.
    Decoded(Record),
    /// Success status, but the body was empty or not a record.
    Acknowledged(String),
}

impl UpdateReply {
    pub fn from_body(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return UpdateReply::Acknowledged(String::new());
        }
        match serde_json::from_str::<Record>(trimmed) {
            Ok(r) => UpdateReply::Decoded(r),
            Err(e) => {
                tracing::debug!(error = %e, "update reply is not a record");
                UpdateReply::Acknowledged(trimmed.to_string())
            }
        }
    }
}

/// Remote ledger for one record kind.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn list(&self) -> GatewayResult<Vec<Record>>;
    async fn get(&self, id: i64) -> GatewayResult<Record>;
    async fn create(&self, candidate: &Record) -> GatewayResult<Record>;
    async fn update(&self, id: i64, value: &Record) -> GatewayResult<UpdateReply>;
    async fn delete(&self, id: i64) -> GatewayResult<()>;
}

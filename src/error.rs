// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::verify::Verdict;

/// Classified failure from the remote ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Cannot reach the ledger service: {0}")]
    Unreachable(String),
    #[error("Session missing or expired")]
    Unauthorized,
    #[error("Forbidden (403)")]
    Forbidden,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },
}

impl GatewayError {
    pub fn server(message: impl Into<String>) -> Self {
        GatewayError::ServerError {
            status: 500,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Unreachable(_) => ErrorKind::Unreachable,
            GatewayError::Unauthorized => ErrorKind::Unauthorized,
            GatewayError::Forbidden => ErrorKind::Forbidden,
            GatewayError::NotFound(_) => ErrorKind::NotFound,
            GatewayError::ServerError { .. } => ErrorKind::ServerError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unreachable,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
    MutationUnconfirmed,
    ConflictInProgress,
    UnknownRecord,
    InvalidInput,
    Interrupted,
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// `stale` is true when an earlier load succeeded and its records are still shown.
    #[error("Failed to load records: {source}")]
    Fetch {
        #[source]
        source: GatewayError,
        stale: bool,
    },
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("Could not confirm change to record {id} ({verdict:?}); it was rolled back")]
    MutationUnconfirmed { id: i64, verdict: Verdict },
    #[error("Another change to record {0} is still in flight")]
    ConflictInProgress(i64),
    #[error("Record {0} is not in the collection")]
    UnknownRecord(i64),
    #[error("Invalid record: {0}")]
    InvalidCandidate(String),
    #[error("Background sync task failed: {0}")]
    Interrupted(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Fetch { source, .. } => source.kind(),
            StoreError::Gateway(e) => e.kind(),
            StoreError::MutationUnconfirmed { .. } => ErrorKind::MutationUnconfirmed,
            StoreError::ConflictInProgress(_) => ErrorKind::ConflictInProgress,
            StoreError::UnknownRecord(_) => ErrorKind::UnknownRecord,
            StoreError::InvalidCandidate(_) => ErrorKind::InvalidInput,
            StoreError::Interrupted(_) => ErrorKind::Interrupted,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

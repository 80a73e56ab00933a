// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod pending;
pub mod session;
pub mod store;
pub mod utils;
pub mod verify;

pub use error::{ErrorKind, GatewayError, StoreError};
pub use gateway::{LedgerGateway, UpdateReply};
pub use models::{AggregatePoint, Record, RecordKind};
pub use store::{Freshness, RecordStore, Snapshot};

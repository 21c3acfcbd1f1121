// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod account;
pub mod error;
mod hash;
mod index;
mod ledger_info;
pub mod mime_types;
mod move_types;
mod table;
pub mod token;
pub mod transaction;
mod view;

pub use account::AccountData;
pub use error::{AptosError, AptosErrorCode};
pub use hash::HashValue;
pub use index::IndexResponse;
pub use ledger_info::LedgerInfo;
pub use move_types::{MoveResource, TableHandle, U64};
pub use table::TableItemRequest;
pub use transaction::{
    PendingTransaction, Transaction, TransactionInfo, UserTransaction, UserTransactionRequest,
};
pub use view::ViewRequest;

/// Chain ID of the current chain
pub const X_APTOS_CHAIN_ID: &str = "X-Aptos-Chain-Id";
/// Current epoch of the chain
pub const X_APTOS_EPOCH: &str = "X-Aptos-Epoch";
/// Current ledger version of the chain
pub const X_APTOS_LEDGER_VERSION: &str = "X-Aptos-Ledger-Version";
/// Oldest non-pruned ledger version of the chain
pub const X_APTOS_LEDGER_OLDEST_VERSION: &str = "X-Aptos-Ledger-Oldest-Version";
/// Current timestamp of the chain
pub const X_APTOS_LEDGER_TIMESTAMP: &str = "X-Aptos-Ledger-TimestampUsec";
/// Current block height of the chain
pub const X_APTOS_BLOCK_HEIGHT: &str = "X-Aptos-Block-Height";
/// Oldest non-pruned block height of the chain
pub const X_APTOS_OLDEST_BLOCK_HEIGHT: &str = "X-Aptos-Oldest-Block-Height";

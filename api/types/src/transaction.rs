// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{HashValue, U64};
use aptos_types::account_address::AccountAddress;
use serde::{Deserialize, Serialize};

/// Enum of the different types of transactions in Aptos
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    PendingTransaction(PendingTransaction),
    UserTransaction(Box<UserTransaction>),
    GenesisTransaction(TransactionInfo),
    BlockMetadataTransaction(TransactionInfo),
    StateCheckpointTransaction(TransactionInfo),
    BlockEpilogueTransaction(TransactionInfo),
    ValidatorTransaction(TransactionInfo),
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        matches!(self, Transaction::PendingTransaction(_))
    }

    /// Execution info, `None` while the transaction is still pending.
    pub fn transaction_info(&self) -> Option<&TransactionInfo> {
        match self {
            Transaction::PendingTransaction(_) => None,
            Transaction::UserTransaction(txn) => Some(&txn.info),
            Transaction::GenesisTransaction(info)
            | Transaction::BlockMetadataTransaction(info)
            | Transaction::StateCheckpointTransaction(info)
            | Transaction::BlockEpilogueTransaction(info)
            | Transaction::ValidatorTransaction(info) => Some(info),
        }
    }

    pub fn success(&self) -> bool {
        self.transaction_info().is_some_and(|info| info.success)
    }

    pub fn vm_status(&self) -> String {
        match self.transaction_info() {
            Some(info) => info.vm_status.clone(),
            None => "pending".to_owned(),
        }
    }

    pub fn version(&self) -> Option<u64> {
        self.transaction_info().map(|info| info.version.into())
    }

    pub fn hash(&self) -> HashValue {
        match self {
            Transaction::PendingTransaction(txn) => txn.hash,
            Transaction::UserTransaction(txn) => txn.info.hash,
            Transaction::GenesisTransaction(info)
            | Transaction::BlockMetadataTransaction(info)
            | Transaction::StateCheckpointTransaction(info)
            | Transaction::BlockEpilogueTransaction(info)
            | Transaction::ValidatorTransaction(info) => info.hash,
        }
    }

    pub fn type_str(&self) -> &'static str {
        match self {
            Transaction::PendingTransaction(_) => "pending_transaction",
            Transaction::UserTransaction(_) => "user_transaction",
            Transaction::GenesisTransaction(_) => "genesis_transaction",
            Transaction::BlockMetadataTransaction(_) => "block_metadata_transaction",
            Transaction::StateCheckpointTransaction(_) => "state_checkpoint_transaction",
            Transaction::BlockEpilogueTransaction(_) => "block_epilogue_transaction",
            Transaction::ValidatorTransaction(_) => "validator_transaction",
        }
    }
}

/// Information related to how a transaction affected the state of the blockchain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    pub version: U64,
    pub hash: HashValue,
    pub gas_used: U64,
    /// Whether the transaction was successful
    pub success: bool,
    /// The VM status of the transaction, can tell useful information in a failure
    pub vm_status: String,
}

/// A transaction waiting in mempool
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub hash: HashValue,
    #[serde(flatten)]
    pub request: UserTransactionRequest,
}

/// A transaction submitted by a user to change the state of the blockchain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserTransaction {
    #[serde(flatten)]
    pub info: TransactionInfo,
    #[serde(flatten)]
    pub request: UserTransactionRequest,
    /// Timestamp in microseconds
    pub timestamp: U64,
}

/// A request to submit a transaction, as echoed back by the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserTransactionRequest {
    pub sender: AccountAddress,
    pub sequence_number: U64,
    pub max_gas_amount: U64,
    pub gas_unit_price: U64,
    pub expiration_timestamp_secs: U64,
    pub payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<serde_json::Value>,
}

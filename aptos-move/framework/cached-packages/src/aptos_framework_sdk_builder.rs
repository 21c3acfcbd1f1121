// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Entry functions of the core framework published at `0x1`.

use crate::{entry_function_payload, match_entry_function};
use anyhow::Result;
use aptos_types::{account_address::AccountAddress, transaction::TransactionPayload};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryFunctionCall {
    /// Transfer APT to `to`, creating the account there first if it doesn't exist yet.
    AptosAccountTransfer { to: AccountAddress, amount: u64 },
}

impl EntryFunctionCall {
    /// Build an Aptos `TransactionPayload` from a structured object `EntryFunctionCall`.
    pub fn encode(self) -> Result<TransactionPayload> {
        use EntryFunctionCall::*;
        match self {
            AptosAccountTransfer { to, amount } => aptos_account_transfer(to, amount),
        }
    }

    /// Try to recognize an Aptos `TransactionPayload` as a known `EntryFunctionCall`.
    pub fn decode(payload: &TransactionPayload) -> Option<EntryFunctionCall> {
        let entry_function =
            match_entry_function(payload, AccountAddress::ONE, "aptos_account", "transfer")?;
        match entry_function.args() {
            [to, amount] => Some(EntryFunctionCall::AptosAccountTransfer {
                to: bcs::from_bytes(to).ok()?,
                amount: bcs::from_bytes(amount).ok()?,
            }),
            _ => None,
        }
    }
}

pub fn aptos_account_transfer(to: AccountAddress, amount: u64) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::ONE,
        "aptos_account",
        "transfer",
        vec![],
        vec![bcs::to_bytes(&to)?, bcs::to_bytes(&amount)?],
    )
}

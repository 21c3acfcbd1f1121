// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{format_err, Result};
use aptos_cached_packages::aptos_framework_sdk_builder::EntryFunctionCall;
use aptos_types::{
    account_address::AccountAddress,
    chain_id::ChainId,
    transaction::{RawTransaction, TransactionPayload},
};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_MAX_GAS_AMOUNT: u64 = 2_000_000;
pub const DEFAULT_GAS_UNIT_PRICE: u64 = 100;
pub const DEFAULT_TRANSACTION_EXPIRATION_SECS: u64 = 30;

/// A transaction with every field but the sender and sequence number filled in.
#[derive(Clone, Debug)]
pub struct TransactionBuilder {
    sender: Option<AccountAddress>,
    sequence_number: Option<u64>,
    payload: TransactionPayload,
    max_gas_amount: u64,
    gas_unit_price: u64,
    expiration_timestamp_secs: u64,
    chain_id: ChainId,
}

impl TransactionBuilder {
    pub fn sender(mut self, sender: AccountAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = Some(sequence_number);
        self
    }

    pub fn has_sender(&self) -> bool {
        self.sender.is_some()
    }

    pub fn build(self) -> Result<RawTransaction> {
        let sender = self
            .sender
            .ok_or_else(|| format_err!("sender must have been set"))?;
        let sequence_number = self
            .sequence_number
            .ok_or_else(|| format_err!("sequence number must have been set"))?;

        Ok(RawTransaction::new(
            sender,
            sequence_number,
            self.payload,
            self.max_gas_amount,
            self.gas_unit_price,
            self.expiration_timestamp_secs,
            self.chain_id,
        ))
    }
}

#[derive(Clone, Debug)]
pub struct TransactionFactory {
    max_gas_amount: u64,
    gas_unit_price: u64,
    transaction_expiration_time: u64,
    chain_id: ChainId,
}

impl TransactionFactory {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            gas_unit_price: DEFAULT_GAS_UNIT_PRICE,
            transaction_expiration_time: DEFAULT_TRANSACTION_EXPIRATION_SECS,
            chain_id,
        }
    }

    pub fn with_max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = max_gas_amount;
        self
    }

    pub fn with_gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = gas_unit_price;
        self
    }

    /// Seconds from now after which the transaction may no longer be committed.
    pub fn with_transaction_expiration_time(mut self, transaction_expiration_time: u64) -> Self {
        self.transaction_expiration_time = transaction_expiration_time;
        self
    }

    pub fn payload(&self, payload: TransactionPayload) -> TransactionBuilder {
        self.transaction_builder(payload)
    }

    /// Transfer APT, creating the receiving account if it doesn't exist yet.
    pub fn transfer(&self, to: AccountAddress, amount: u64) -> Result<TransactionBuilder> {
        let payload = EntryFunctionCall::AptosAccountTransfer { to, amount }.encode()?;
        Ok(self.payload(payload))
    }

    fn transaction_builder(&self, payload: TransactionPayload) -> TransactionBuilder {
        TransactionBuilder {
            sender: None,
            sequence_number: None,
            payload,
            max_gas_amount: self.max_gas_amount,
            gas_unit_price: self.gas_unit_price,
            expiration_timestamp_secs: self.expiration_timestamp(),
            chain_id: self.chain_id,
        }
    }

    fn expiration_timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|now| now.as_secs())
            .unwrap_or_default()
            + self.transaction_expiration_time
    }
}

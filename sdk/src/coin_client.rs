// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{
    rest_client::{Client as ApiClient, PendingTransaction},
    transaction_builder::TransactionFactory,
    types::{
        account_address::AccountAddress, chain_id::ChainId, transaction::SignedTransaction,
        LocalAccount,
    },
};
use anyhow::{Context, Result};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct CoinClient<'a> {
    api_client: &'a ApiClient,
}

impl<'a> CoinClient<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self { api_client }
    }

    pub async fn transfer(
        &self,
        from_account: &mut LocalAccount,
        to_account: AccountAddress,
        amount: u64,
        options: Option<TransferOptions>,
    ) -> Result<PendingTransaction> {
        let signed_txn = self
            .get_signed_transfer_txn(from_account, to_account, amount, options)
            .await?;
        debug!(
            from = %from_account.address(),
            to = %to_account,
            amount,
            "Submitting coin transfer"
        );
        Ok(self
            .api_client
            .submit(&signed_txn)
            .await
            .context("Failed to submit transfer transaction")?
            .into_inner())
    }

    pub async fn get_signed_transfer_txn(
        &self,
        from_account: &mut LocalAccount,
        to_account: AccountAddress,
        amount: u64,
        options: Option<TransferOptions>,
    ) -> Result<SignedTransaction> {
        let options = options.unwrap_or_default();

        let chain_id = self
            .api_client
            .get_index()
            .await
            .context("Failed to get chain ID")?
            .inner()
            .ledger_info
            .chain_id;
        let transaction_builder = TransactionFactory::new(ChainId::new(chain_id))
            .with_gas_unit_price(options.gas_unit_price)
            .with_max_gas_amount(options.max_gas_amount)
            .with_transaction_expiration_time(options.timeout_secs)
            .transfer(to_account, amount)?;
        from_account.sign_with_transaction_builder(transaction_builder)
    }

    pub async fn get_account_balance(&self, account: &AccountAddress) -> Result<u64> {
        let response = self
            .api_client
            .get_account_balance(*account)
            .await
            .context("Failed to get account balance")?;
        Ok(response.inner().get())
    }
}

pub struct TransferOptions {
    pub max_gas_amount: u64,

    pub gas_unit_price: u64,

    /// This is the number of seconds from now you're willing to wait for the
    /// transaction to be committed.
    pub timeout_secs: u64,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            max_gas_amount: 5_000,
            gas_unit_price: 100,
            timeout_secs: 10,
        }
    }
}

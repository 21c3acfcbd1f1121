// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::{error::FaucetClientError, now_secs, Client, DEFAULT_MAX_SERVER_LAG_WAIT_DURATION};
use aptos_api_types::HashValue;
use aptos_types::account_address::AccountAddress;
use reqwest::{header::AUTHORIZATION, Client as ReqwestClient, Url};
use std::time::Duration;
use tracing::info;

/// How long after the mint request the faucet transactions are expected to commit.
const FAUCET_TXN_EXPIRATION_SECS: u64 = 30;
const FAUCET_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct FaucetClient {
    faucet_url: Url,
    inner: ReqwestClient,
    rest_client: Client,
    token: Option<String>,
}

impl FaucetClient {
    pub fn new(faucet_url: Url, rest_url: Url) -> Self {
        Self::new_from_rest_client(faucet_url, Client::new(rest_url))
    }

    pub fn new_from_rest_client(faucet_url: Url, rest_client: Client) -> Self {
        Self {
            faucet_url,
            inner: ReqwestClient::new(),
            rest_client,
            token: None,
        }
    }

    /// Set an auth token, sent as a bearer token with every mint request.
    pub fn with_auth_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Create an account with zero balance.
    pub async fn create_account(&self, address: AccountAddress) -> Result<(), FaucetClientError> {
        self.mint_and_wait(address, 0).await
    }

    /// Fund an account with the given amount, creating it first if needed.
    pub async fn fund(
        &self,
        address: AccountAddress,
        amount: u64,
    ) -> Result<(), FaucetClientError> {
        self.mint_and_wait(address, amount).await
    }

    /// Create and fund an account.
    pub async fn mint(
        &self,
        address: AccountAddress,
        amount: u64,
    ) -> Result<(), FaucetClientError> {
        self.create_account(address).await?;
        self.fund(address, amount).await?;

        Ok(())
    }

    async fn mint_and_wait(
        &self,
        address: AccountAddress,
        amount: u64,
    ) -> Result<(), FaucetClientError> {
        let url = self.faucet_url.join("mint")?;
        info!(address = %address, amount, "Requesting coins from faucet");

        let mut request = self
            .inner
            .post(url)
            .timeout(FAUCET_REQUEST_TIMEOUT)
            .query(&[
                ("address", address.to_hex_literal()),
                ("amount", amount.to_string()),
            ]);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FaucetClientError::Status { status, body });
        }

        // The faucet answers with the hashes of the transactions it submitted, and the
        // account only exists once all of them are committed.
        let hashes: Vec<HashValue> = serde_json::from_str(&body)?;
        let expiration_timestamp_secs = now_secs() + FAUCET_TXN_EXPIRATION_SECS;
        for hash in hashes {
            self.rest_client
                .wait_for_transaction_by_hash(
                    hash.into(),
                    expiration_timestamp_secs,
                    Some(DEFAULT_MAX_SERVER_LAG_WAIT_DURATION),
                    None,
                )
                .await?;
        }

        Ok(())
    }
}

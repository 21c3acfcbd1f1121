// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

pub mod aptos;
pub mod error;
pub mod faucet;
mod response;
mod state;

pub use aptos_api_types::{
    self, AccountData, IndexResponse, MoveResource, PendingTransaction, Transaction,
};
pub use error::{AptosErrorResponse, FaucetClientError, RestError};
pub use faucet::FaucetClient;
pub use response::Response;
pub use state::State;

use crate::aptos::{Balance, APTOS_COIN_TYPE, COIN_BALANCE_FUNCTION};
use anyhow::anyhow;
use aptos_api_types::{
    mime_types::{BCS_SIGNED_TRANSACTION, JSON},
    AptosError, AptosErrorCode, TableItemRequest, ViewRequest, U64,
};
use aptos_crypto::HashValue;
use aptos_types::{account_address::AccountAddress, transaction::SignedTransaction};
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client as ReqwestClient, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use url::Url;

pub const USER_AGENT: &str = concat!("aptos-client-sdk-rust / ", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_VERSION_PATH_BASE: &str = "v1/";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_DELAY: Duration = Duration::from_millis(500);
const DEFAULT_MAX_SERVER_LAG_WAIT_DURATION: Duration = Duration::from_secs(60);

pub type AptosResult<T> = Result<T, RestError>;

#[derive(Clone, Debug)]
pub struct Client {
    inner: ReqwestClient,
    base_url: Url,
    version_path_base: String,
    timeout: Duration,
}

impl Client {
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: ReqwestClient::new(),
            base_url,
            version_path_base: DEFAULT_VERSION_PATH_BASE.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set a different version path base, e.g. "v1/". The path must end with a slash.
    pub fn version_path_base(mut self, version_path_base: String) -> AptosResult<Self> {
        if !version_path_base.ends_with('/') {
            return Err(anyhow!("version_path_base must end with '/', e.g. 'v1/'").into());
        }
        self.version_path_base = version_path_base;
        Ok(self)
    }

    /// Timeout applied to every individual HTTP request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path_prefix_string(&self) -> String {
        self.base_url
            .join(&self.version_path_base)
            .map(|path| path.to_string())
            .unwrap_or_else(|_| self.base_url.to_string())
    }

    /// Build a full URL for `path` under the versioned API root.
    pub fn build_path(&self, path: &str) -> AptosResult<Url> {
        Ok(self.base_url.join(&self.version_path_base)?.join(path)?)
    }

    pub async fn get_index(&self) -> AptosResult<Response<IndexResponse>> {
        self.get(self.build_path("")?).await
    }

    pub async fn get_ledger_information(&self) -> AptosResult<Response<State>> {
        let response = self.get_index().await?;
        Ok(response.map(|index| State::from_ledger_info(&index.ledger_info)))
    }

    pub async fn get_account(
        &self,
        address: AccountAddress,
    ) -> AptosResult<Response<AccountData>> {
        let url = self.build_path(&format!("accounts/{}", address.to_hex_literal()))?;
        self.get(url).await
    }

    /// Fetch a single resource. A resource the account doesn't hold yields `None`.
    pub async fn get_account_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> AptosResult<Response<Option<MoveResource>>> {
        let url = self.build_path(&format!(
            "accounts/{}/resource/{}",
            address.to_hex_literal(),
            resource_type
        ))?;

        match self.get::<MoveResource>(url).await {
            Ok(response) => Ok(response.map(Some)),
            Err(RestError::Api(AptosErrorResponse {
                error,
                state: Some(state),
                ..
            })) if error.error_code == AptosErrorCode::ResourceNotFound => {
                Ok(Response::new(None, state))
            },
            Err(err) => Err(err),
        }
    }

    pub async fn get_table_item<K: Serialize>(
        &self,
        table_handle: &str,
        key_type: &str,
        value_type: &str,
        key: K,
    ) -> AptosResult<Response<serde_json::Value>> {
        let url = self.build_path(&format!("tables/{}/item", table_handle))?;
        let request = TableItemRequest {
            key_type: key_type.to_string(),
            value_type: value_type.to_string(),
            key: serde_json::to_value(key)?,
        };
        self.post_json(url, &request).await
    }

    pub async fn view(
        &self,
        request: &ViewRequest,
    ) -> AptosResult<Response<Vec<serde_json::Value>>> {
        let url = self.build_path("view")?;
        self.post_json(url, request).await
    }

    pub async fn get_account_balance(
        &self,
        address: AccountAddress,
    ) -> AptosResult<Response<Balance>> {
        let request = ViewRequest {
            function: COIN_BALANCE_FUNCTION.to_string(),
            type_arguments: vec![APTOS_COIN_TYPE.to_string()],
            arguments: vec![serde_json::Value::String(address.to_hex_literal())],
        };
        let response = self.view(&request).await?;
        response.and_then(|values| {
            let value = values
                .into_iter()
                .next()
                .ok_or_else(|| anyhow!("coin balance view returned no values"))?;
            let balance: U64 = serde_json::from_value(value)?;
            Ok(Balance::new(balance.into()))
        })
    }

    pub async fn submit(
        &self,
        txn: &SignedTransaction,
    ) -> AptosResult<Response<PendingTransaction>> {
        let txn_payload = bcs::to_bytes(txn)?;
        let url = self.build_path("transactions")?;

        debug!(
            sender = %txn.sender(),
            sequence_number = txn.sequence_number(),
            "Submitting transaction"
        );
        let request = self
            .request(self.inner.post(url))
            .header(CONTENT_TYPE, BCS_SIGNED_TRANSACTION)
            .body(txn_payload);

        self.json(request.send().await?).await
    }

    pub async fn get_transaction_by_hash(
        &self,
        hash: HashValue,
    ) -> AptosResult<Response<Transaction>> {
        let url = self.build_path(&format!("transactions/by_hash/{}", hash.to_hex_literal()))?;
        self.get(url).await
    }

    pub async fn wait_for_transaction(
        &self,
        pending_transaction: &PendingTransaction,
    ) -> AptosResult<Response<Transaction>> {
        self.wait_for_transaction_by_hash(
            pending_transaction.hash.into(),
            *pending_transaction
                .request
                .expiration_timestamp_secs
                .inner(),
            Some(DEFAULT_MAX_SERVER_LAG_WAIT_DURATION),
            None,
        )
        .await
    }

    /// Poll until the transaction with `hash` is committed.
    ///
    /// Fails if it committed without success, if the ledger moves past
    /// `expiration_timestamp_secs` first, if the ledger lags the local clock by more than
    /// `max_server_lag_wait` past the expiration, or once `timeout_from_call` elapses.
    pub async fn wait_for_transaction_by_hash(
        &self,
        hash: HashValue,
        expiration_timestamp_secs: u64,
        max_server_lag_wait: Option<Duration>,
        timeout_from_call: Option<Duration>,
    ) -> AptosResult<Response<Transaction>> {
        let start = std::time::Instant::now();
        info!(hash = %hash, "Waiting for transaction");

        loop {
            let mut chain_timestamp_usecs = None;
            match self.get_transaction_by_hash(hash).await {
                Ok(resp) => {
                    let (transaction, state) = resp.into_parts();
                    chain_timestamp_usecs = Some(state.timestamp_usecs);
                    if !transaction.is_pending() {
                        if !transaction.success() {
                            return Err(anyhow!(
                                "Transaction {} committed but failed: {}",
                                hash.to_hex_literal(),
                                transaction.vm_status()
                            )
                            .into());
                        }
                        debug!(
                            hash = %hash,
                            version = ?transaction.version(),
                            "Transaction committed"
                        );
                        return Ok(Response::new(transaction, state));
                    }
                },
                Err(RestError::Api(aptos_error_response))
                    if aptos_error_response.error.error_code
                        == AptosErrorCode::TransactionNotFound =>
                {
                    if let Some(state) = aptos_error_response.state {
                        chain_timestamp_usecs = Some(state.timestamp_usecs);
                    }
                },
                Err(err) => return Err(err),
            }

            if let Some(usecs) = chain_timestamp_usecs {
                if expiration_timestamp_secs <= usecs / 1_000_000 {
                    return Err(anyhow!(
                        "Transaction {} expired. It is guaranteed it will not be committed on chain.",
                        hash.to_hex_literal()
                    )
                    .into());
                }
            }

            if let Some(max_server_lag_wait) = max_server_lag_wait {
                let lag_deadline =
                    expiration_timestamp_secs.saturating_add(max_server_lag_wait.as_secs());
                if now_secs() > lag_deadline {
                    return Err(anyhow!(
                        "Ledger on endpoint ({}) is more than {}s behind current time, timing out \
                        waiting for the transaction. Warning, transaction ({}) might still succeed.",
                        self.path_prefix_string(),
                        max_server_lag_wait.as_secs(),
                        hash.to_hex_literal()
                    )
                    .into());
                }
            }

            if let Some(timeout_duration) = timeout_from_call {
                if start.elapsed() > timeout_duration {
                    return Err(RestError::Timeout(
                        "transaction not committed within the given timeout",
                    ));
                }
            }

            tokio::time::sleep(DEFAULT_DELAY).await;
        }
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .timeout(self.timeout)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> AptosResult<Response<T>> {
        let response = self
            .request(self.inner.get(url))
            .header(ACCEPT, JSON)
            .send()
            .await?;
        self.json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> AptosResult<Response<T>> {
        let response = self
            .request(self.inner.post(url))
            .json(body)
            .send()
            .await?;
        self.json(response).await
    }

    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> AptosResult<(reqwest::Response, State)> {
        if !response.status().is_success() {
            let status_code = response.status();
            let maybe_state = State::from_headers(response.headers()).ok();
            let body = response.text().await?;
            return match serde_json::from_str::<AptosError>(&body) {
                Ok(error) => Err((error, maybe_state, status_code).into()),
                Err(_) => {
                    Err(anyhow!("Request failed with status {}: {}", status_code, body).into())
                },
            };
        }
        let state = State::from_headers(response.headers())?;

        Ok((response, state))
    }

    async fn json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AptosResult<Response<T>> {
        let (response, state) = self.check_response(response).await?;
        let bytes = response.bytes().await?;
        let json = serde_json::from_slice(&bytes)?;
        Ok(Response::new(json, state))
    }
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}

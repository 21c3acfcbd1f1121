// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::State;
use aptos_api_types::{AptosError, AptosErrorCode};
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// An error returned by the node, with the ledger state when the node sent one.
#[derive(Debug)]
pub struct AptosErrorResponse {
    pub error: AptosError,
    pub state: Option<State>,
    pub status_code: StatusCode,
}

impl fmt::Display for AptosErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

#[derive(Debug, Error)]
pub enum RestError {
    #[error("API error {0}")]
    Api(AptosErrorResponse),
    #[error("BCS ser/de error {0}")]
    Bcs(bcs::Error),
    #[error("JSON er/de error {0}")]
    Json(serde_json::Error),
    #[error("URL Parse error {0}")]
    UrlParse(url::ParseError),
    #[error("Timeout waiting for transaction {0}")]
    Timeout(&'static str),
    #[error("Unknown error {0}")]
    Unknown(anyhow::Error),
    #[error("HTTP error {0}: {1}")]
    Http(StatusCode, reqwest::Error),
}

impl RestError {
    /// The API error code, if the node answered with a structured error.
    pub fn error_code(&self) -> Option<AptosErrorCode> {
        match self {
            RestError::Api(response) => Some(response.error.error_code),
            _ => None,
        }
    }

    /// Whether the node reported that the requested account, resource, table item or
    /// transaction doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.error_code(),
            Some(
                AptosErrorCode::AccountNotFound
                    | AptosErrorCode::ResourceNotFound
                    | AptosErrorCode::TableItemNotFound
                    | AptosErrorCode::TransactionNotFound
            )
        )
    }
}

impl From<(AptosError, Option<State>, StatusCode)> for RestError {
    fn from((error, state, status_code): (AptosError, Option<State>, StatusCode)) -> Self {
        Self::Api(AptosErrorResponse {
            error,
            state,
            status_code,
        })
    }
}

impl From<bcs::Error> for RestError {
    fn from(err: bcs::Error) -> Self {
        Self::Bcs(err)
    }
}

impl From<url::ParseError> for RestError {
    fn from(err: url::ParseError) -> Self {
        Self::UrlParse(err)
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<anyhow::Error> for RestError {
    fn from(err: anyhow::Error) -> Self {
        Self::Unknown(err)
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RestError::Http(status, err)
        } else {
            RestError::Unknown(err.into())
        }
    }
}

#[derive(Debug, Error)]
pub enum FaucetClientError {
    #[error("Faucet request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Faucet returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to decode faucet response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid faucet URL: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("Faucet transaction did not commit: {0}")]
    Transaction(#[from] RestError),
}

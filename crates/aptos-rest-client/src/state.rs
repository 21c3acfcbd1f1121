// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use anyhow::anyhow;
use aptos_api_types::{
    LedgerInfo, X_APTOS_BLOCK_HEIGHT, X_APTOS_CHAIN_ID, X_APTOS_EPOCH,
    X_APTOS_LEDGER_OLDEST_VERSION, X_APTOS_LEDGER_TIMESTAMP, X_APTOS_LEDGER_VERSION,
    X_APTOS_OLDEST_BLOCK_HEIGHT,
};
use reqwest::header::HeaderMap;
use std::str::FromStr;

/// The ledger state a node reported alongside a response.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct State {
    pub chain_id: u8,
    pub epoch: u64,
    pub version: u64,
    pub timestamp_usecs: u64,
    pub oldest_ledger_version: u64,
    pub block_height: u64,
    pub oldest_block_height: u64,
}

impl State {
    pub fn from_headers(headers: &HeaderMap) -> anyhow::Result<Self> {
        let maybe_chain_id = parse_header(headers, X_APTOS_CHAIN_ID);
        let maybe_version = parse_header(headers, X_APTOS_LEDGER_VERSION);
        let maybe_timestamp = parse_header(headers, X_APTOS_LEDGER_TIMESTAMP);
        let maybe_epoch = parse_header(headers, X_APTOS_EPOCH);

        if let (Some(chain_id), Some(version), Some(timestamp_usecs), Some(epoch)) =
            (maybe_chain_id, maybe_version, maybe_timestamp, maybe_epoch)
        {
            Ok(Self {
                chain_id,
                epoch,
                version,
                timestamp_usecs,
                oldest_ledger_version: parse_header(headers, X_APTOS_LEDGER_OLDEST_VERSION)
                    .unwrap_or_default(),
                block_height: parse_header(headers, X_APTOS_BLOCK_HEIGHT).unwrap_or_default(),
                oldest_block_height: parse_header(headers, X_APTOS_OLDEST_BLOCK_HEIGHT)
                    .unwrap_or_default(),
            })
        } else {
            Err(anyhow!(
                "Failed to build State from headers due to missing values in response. \
                Chain ID: {:?}, Version: {:?}, Timestamp: {:?}, Epoch: {:?}",
                maybe_chain_id,
                maybe_version,
                maybe_timestamp,
                maybe_epoch
            ))
        }
    }

    pub fn from_ledger_info(ledger_info: &LedgerInfo) -> Self {
        Self {
            chain_id: ledger_info.chain_id,
            epoch: ledger_info.epoch.into(),
            version: ledger_info.ledger_version.into(),
            timestamp_usecs: ledger_info.ledger_timestamp.into(),
            oldest_ledger_version: ledger_info.oldest_ledger_version.into(),
            block_height: ledger_info.block_height.into(),
            oldest_block_height: ledger_info.oldest_block_height.into(),
        }
    }

    pub fn timestamp_secs(&self) -> u64 {
        self.timestamp_usecs / 1_000_000
    }
}

fn parse_header<T: FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.parse().ok())
}

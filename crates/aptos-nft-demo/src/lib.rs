// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Creates two accounts, funds them from a faucet, mints a token v1 NFT for the first one
//! and moves it to the second with an offer and claim, then back with a multi-agent direct
//! transfer.

#![forbid(unsafe_code)]

pub mod flow;

use aptos_sdk::{
    rest_client::{Client, FaucetClient},
    token_client::TransactionOptions,
};
use clap::Parser;
use std::time::Duration;
use url::Url;

pub const DEFAULT_NODE_URL: &str = "https://fullnode.devnet.aptoslabs.com";
pub const DEFAULT_FAUCET_URL: &str = "https://faucet.devnet.aptoslabs.com";

#[derive(Clone, Debug, Parser)]
#[clap(name = "aptos-nft-demo", author, version)]
pub struct Args {
    /// URL of the fullnode REST API.
    #[clap(long, env = "APTOS_NODE_URL", default_value = DEFAULT_NODE_URL)]
    pub node_url: Url,

    /// URL of the faucet used to fund the new accounts.
    #[clap(long, env = "APTOS_FAUCET_URL", default_value = DEFAULT_FAUCET_URL)]
    pub faucet_url: Url,

    /// Sent as a bearer token to faucets that require one.
    #[clap(long, env = "APTOS_FAUCET_AUTH_TOKEN")]
    pub faucet_auth_token: Option<String>,

    /// Amount of coins in OCTA the faucet gives each account.
    #[clap(long, default_value_t = 100_000_000)]
    pub fund_amount: u64,

    /// The maximum amount of gas in OCTA to spend on a single transaction.
    #[clap(long, default_value_t = 5_000)]
    pub max_gas_amount: u64,

    /// Price in OCTA paid per unit of gas.
    #[clap(long, default_value_t = 100)]
    pub gas_unit_price: u64,

    /// Seconds each individual request to the node may take.
    #[clap(long, default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Seconds from submission after which a transaction expires.
    #[clap(long, default_value_t = 10)]
    pub txn_expiration_secs: u64,

    /// Log SDK requests at debug level. `RUST_LOG` takes precedence when set.
    #[clap(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn rest_client(&self) -> Client {
        Client::new(self.node_url.clone())
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn faucet_client(&self, rest_client: Client) -> FaucetClient {
        let faucet = FaucetClient::new_from_rest_client(self.faucet_url.clone(), rest_client);
        match &self.faucet_auth_token {
            Some(token) => faucet.with_auth_token(token.clone()),
            None => faucet,
        }
    }

    pub fn transaction_options(&self) -> TransactionOptions {
        TransactionOptions {
            max_gas_amount: self.max_gas_amount,
            gas_unit_price: self.gas_unit_price,
            timeout_secs: self.txn_expiration_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["aptos-nft-demo"]).unwrap();
        assert_eq!(args.node_url.as_str(), "https://fullnode.devnet.aptoslabs.com/");
        assert_eq!(args.fund_amount, 100_000_000);
        assert_eq!(args.request_timeout_secs, 10);
        assert!(!args.verbose);

        let options = args.transaction_options();
        assert_eq!(options.max_gas_amount, 5_000);
        assert_eq!(options.gas_unit_price, 100);
        assert_eq!(options.timeout_secs, 10);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "aptos-nft-demo",
            "--node-url",
            "http://127.0.0.1:8080",
            "--faucet-url",
            "http://127.0.0.1:8081",
            "--faucet-auth-token",
            "secret",
            "--gas-unit-price",
            "150",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.faucet_url.as_str(), "http://127.0.0.1:8081/");
        assert_eq!(args.faucet_auth_token.as_deref(), Some("secret"));
        assert_eq!(args.transaction_options().gas_unit_price, 150);
        assert!(args.verbose);
    }

    #[test]
    fn test_rejects_bad_url() {
        assert!(Args::try_parse_from(["aptos-nft-demo", "--node-url", "not a url"]).is_err());
    }
}

// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use crate::Args;
use anyhow::{Context, Result};
use aptos_sdk::{
    api_types::{
        token::{TokenDataId, TokenId},
        HashValue,
    },
    coin_client::CoinClient,
    rest_client::{Client, PendingTransaction},
    token_client::TokenClient,
    types::{account_address::AccountAddress, LocalAccount},
};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use tracing::info;

pub const COLLECTION_NAME: &str = "user1's collection";
pub const COLLECTION_DESCRIPTION: &str = "user1's simple collection";
pub const COLLECTION_URI: &str = "https://user1.com";
pub const TOKEN_NAME: &str = "user1's first token";
pub const TOKEN_DESCRIPTION: &str = "user1's simple token";
pub const TOKEN_URI: &str = "https://aptos.dev/img/nyan.jpeg";
pub const TOKEN_SUPPLY: u64 = 1;
pub const TOKEN_PROPERTY_VERSION: u64 = 0;
const TRANSFER_AMOUNT: u64 = 1;

const SEPARATOR: &str =
    "---------------------------------------------------------------------------------";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Balances {
    pub user1: u64,
    pub user2: u64,
}

/// Everything the demo observed, in the order it happened.
#[derive(Clone, Debug)]
pub struct DemoReport {
    pub user1: AccountAddress,
    pub user2: AccountAddress,
    pub initial_coin_balances: Balances,
    pub create_collection_txn: HashValue,
    pub create_token_txn: HashValue,
    /// user1's holding right after minting.
    pub minted_token_balance: u64,
    pub offer_txn: HashValue,
    pub claim_txn: HashValue,
    pub token_balances_after_claim: Balances,
    pub direct_transfer_txn: HashValue,
    pub token_balances_after_direct_transfer: Balances,
    pub final_coin_balances: Balances,
}

/// Runs the whole demo against the node and faucet in `args`, writing the narration to
/// `out`. Every transaction is waited on before the next step starts, and the first failure
/// aborts the run.
pub async fn run_demo<W: Write>(
    args: &Args,
    user1: &mut LocalAccount,
    user2: &mut LocalAccount,
    out: &mut W,
) -> Result<DemoReport> {
    let rest_client = args.rest_client();
    let faucet_client = args.faucet_client(rest_client.clone());
    let coin_client = CoinClient::new(&rest_client);
    let token_client = TokenClient::new(&rest_client);
    let (user1_address, user2_address) = (user1.address(), user2.address());

    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "=== New addresses created ===")?;
    writeln!(out, "User 1: {}", user1_address.to_hex_literal())?;
    writeln!(out, "User 2: {}", user2_address.to_hex_literal())?;
    writeln!(out)?;

    for address in [user1_address, user2_address] {
        faucet_client
            .fund(address, args.fund_amount)
            .await
            .with_context(|| format!("Failed to fund account {}", address))?;
    }

    let initial_coin_balances = coin_balances(&coin_client, user1_address, user2_address).await?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "=== Funding received: Initial Coin Balances ===")?;
    print_coin_balances(out, initial_coin_balances)?;

    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "=== Creating Collection and Token ===")?;

    let pending = token_client
        .create_collection(
            user1,
            COLLECTION_NAME,
            COLLECTION_DESCRIPTION,
            COLLECTION_URI,
            u64::MAX,
            Some(args.transaction_options()),
        )
        .await?;
    let create_collection_txn = wait(&rest_client, &pending, "create collection").await?;
    writeln!(
        out,
        "Created collection: Transaction hash:  {}",
        create_collection_txn
    )?;

    let pending = token_client
        .create_token(
            user1,
            COLLECTION_NAME,
            TOKEN_NAME,
            TOKEN_DESCRIPTION,
            TOKEN_SUPPLY,
            TOKEN_URI,
            u64::MAX,
            None,
            Some(args.transaction_options()),
        )
        .await?;
    let create_token_txn = wait(&rest_client, &pending, "create token").await?;
    writeln!(out, "Created token: Transaction hash:  {}", create_token_txn)?;
    writeln!(out)?;

    let collection_data = token_client
        .get_collection_data(user1_address, COLLECTION_NAME)
        .await?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "user1's collection: {}", to_pretty_json(&collection_data)?)?;

    let minted_token_balance: u64 = token_client
        .get_token(
            user1_address,
            COLLECTION_NAME,
            TOKEN_NAME,
            TOKEN_PROPERTY_VERSION,
        )
        .await?
        .amount
        .into();
    writeln!(out, "user1's token balance: {}", minted_token_balance)?;

    let token_data = token_client
        .get_token_data(user1_address, COLLECTION_NAME, TOKEN_NAME)
        .await?;
    writeln!(out, "user1's token data: {}", to_pretty_json(&token_data)?)?;

    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out, "\n=== Transferring the token from user1 ----> to user2")?;
    let pending = token_client
        .offer_token(
            user1,
            user2_address,
            user1_address,
            COLLECTION_NAME,
            TOKEN_NAME,
            TRANSFER_AMOUNT,
            TOKEN_PROPERTY_VERSION,
            Some(args.transaction_options()),
        )
        .await?;
    let offer_txn = wait(&rest_client, &pending, "offer token").await?;
    writeln!(out, "Offered: Transaction hash:  {}", offer_txn)?;

    let pending = token_client
        .claim_token(
            user2,
            user1_address,
            user1_address,
            COLLECTION_NAME,
            TOKEN_NAME,
            TOKEN_PROPERTY_VERSION,
            Some(args.transaction_options()),
        )
        .await?;
    let claim_txn = wait(&rest_client, &pending, "claim token").await?;
    writeln!(out, "Claimed: Transaction hash:  {}", claim_txn)?;

    let token_balances_after_claim =
        token_balances(&token_client, user1_address, user2_address).await?;
    writeln!(out)?;
    print_token_balances(out, token_balances_after_claim)?;

    writeln!(out, "{}", SEPARATOR)?;
    writeln!(
        out,
        "\n=== Transferring the token back to user1 <--- from user2 using MultiAgent"
    )?;
    let pending = token_client
        .direct_transfer_token(
            user2,
            user1,
            user1_address,
            COLLECTION_NAME,
            TOKEN_NAME,
            TRANSFER_AMOUNT,
            TOKEN_PROPERTY_VERSION,
            Some(args.transaction_options()),
        )
        .await?;
    let direct_transfer_txn = wait(&rest_client, &pending, "direct transfer").await?;
    writeln!(out, "Direct Transferred: Transaction hash:  {}", direct_transfer_txn)?;

    let token_balances_after_direct_transfer =
        token_balances(&token_client, user1_address, user2_address).await?;
    writeln!(out)?;
    print_token_balances(out, token_balances_after_direct_transfer)?;
    writeln!(out)?;

    let final_coin_balances = coin_balances(&coin_client, user1_address, user2_address).await?;
    writeln!(out, "=== Final Coin Balances ===")?;
    print_coin_balances(out, final_coin_balances)?;

    Ok(DemoReport {
        user1: user1_address,
        user2: user2_address,
        initial_coin_balances,
        create_collection_txn,
        create_token_txn,
        minted_token_balance,
        offer_txn,
        claim_txn,
        token_balances_after_claim,
        direct_transfer_txn,
        token_balances_after_direct_transfer,
        final_coin_balances,
    })
}

/// Blocks until `pending` is committed, failing if it was committed without success.
async fn wait(client: &Client, pending: &PendingTransaction, step: &str) -> Result<HashValue> {
    client
        .wait_for_transaction(pending)
        .await
        .with_context(|| format!("Failed to {}: transaction {}", step, pending.hash))?;
    info!(hash = %pending.hash, step, "Transaction committed");
    Ok(pending.hash)
}

async fn coin_balances(
    coin_client: &CoinClient<'_>,
    user1: AccountAddress,
    user2: AccountAddress,
) -> Result<Balances> {
    Ok(Balances {
        user1: coin_client.get_account_balance(&user1).await?,
        user2: coin_client.get_account_balance(&user2).await?,
    })
}

/// Both users' holdings of the demo token. The token id is built from user1 as the creator
/// because user2 only ever receives it.
async fn token_balances(
    token_client: &TokenClient<'_>,
    user1: AccountAddress,
    user2: AccountAddress,
) -> Result<Balances> {
    let token_id = TokenId::new(
        TokenDataId::new(user1, COLLECTION_NAME, TOKEN_NAME),
        TOKEN_PROPERTY_VERSION,
    );
    let user1_token = token_client.get_token_for_account(user1, &token_id).await?;
    let user2_token = token_client.get_token_for_account(user2, &token_id).await?;
    Ok(Balances {
        user1: user1_token.amount.into(),
        user2: user2_token.amount.into(),
    })
}

fn print_coin_balances<W: Write>(out: &mut W, balances: Balances) -> Result<()> {
    writeln!(out, "user1: {}", balances.user1)?;
    writeln!(out, "user2: {}", balances.user2)?;
    writeln!(out)?;
    Ok(())
}

fn print_token_balances<W: Write>(out: &mut W, balances: Balances) -> Result<()> {
    writeln!(out, "user1's token balance: {}", balances.user1)?;
    writeln!(out, "user2's token balance: {}", balances.user2)?;
    Ok(())
}

/// JSON with four space indentation.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

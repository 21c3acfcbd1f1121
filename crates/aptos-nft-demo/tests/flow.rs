// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use aptos_nft_demo::{
    flow::{run_demo, Balances},
    Args,
};
use aptos_sdk::{
    api_types::{
        X_APTOS_CHAIN_ID, X_APTOS_EPOCH, X_APTOS_LEDGER_TIMESTAMP, X_APTOS_LEDGER_VERSION,
    },
    types::{account_address::AccountAddress, LocalAccount},
};
use claims::assert_err;
use httpmock::{prelude::*, Mock, Then};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::json;

const HASH: &str = "0x5f7a3a5bd1a3b8ec6a4a1e8e2ae6d1b2b5e71aa6f1c8b2d9d2b1fa3c6b1e0d42";

fn with_ledger_headers(then: Then) -> Then {
    then.header(X_APTOS_CHAIN_ID, "4")
        .header(X_APTOS_EPOCH, "2")
        .header(X_APTOS_LEDGER_VERSION, "1200")
        .header(X_APTOS_LEDGER_TIMESTAMP, "1700000000000000")
}

fn args_for(server: &MockServer) -> Args {
    let base_url = server.base_url();
    Args {
        node_url: base_url.parse().unwrap(),
        faucet_url: base_url.parse().unwrap(),
        faucet_auth_token: None,
        fund_amount: 100_000_000,
        max_gas_amount: 5_000,
        gas_unit_price: 100,
        request_timeout_secs: 10,
        txn_expiration_secs: 10,
        verbose: false,
    }
}

fn accounts() -> (LocalAccount, LocalAccount) {
    (
        LocalAccount::generate(&mut StdRng::from_seed([1; 32])),
        LocalAccount::generate(&mut StdRng::from_seed([2; 32])),
    )
}

fn resource_path(account: AccountAddress, resource: &str) -> String {
    format!("/v1/accounts/{}/resource/{}", account.to_hex_literal(), resource)
}

/// A node that has committed every transaction it was sent. user1 holds the collection and
/// one token, user2 never had a token store.
async fn mock_chain(
    server: &MockServer,
    user1: AccountAddress,
    user2: AccountAddress,
) -> Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/");
            with_ledger_headers(then).status(200).json_body(json!({
                "chain_id": 4,
                "epoch": "2",
                "ledger_version": "1200",
                "oldest_ledger_version": "0",
                "ledger_timestamp": "1700000000000000",
                "node_role": "full_node",
                "oldest_block_height": "0",
                "block_height": "300",
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/v1/transactions/by_hash/{}", HASH));
            with_ledger_headers(then).status(200).json_body(json!({
                "type": "user_transaction",
                "version": "1201",
                "hash": HASH,
                "gas_used": "12",
                "success": true,
                "vm_status": "Executed successfully",
                "sender": user1.to_hex_literal(),
                "sequence_number": "0",
                "max_gas_amount": "5000",
                "gas_unit_price": "100",
                "expiration_timestamp_secs": "1700000010",
                "payload": {},
                "timestamp": "1700000000000000",
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/view").json_body_partial(
                r#"{
                    "function": "0x1::coin::balance",
                    "type_arguments": ["0x1::aptos_coin::AptosCoin"]
                }"#,
            );
            with_ledger_headers(then)
                .status(200)
                .json_body(json!(["100000000"]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(resource_path(user1, "0x3::token::Collections"));
            with_ledger_headers(then).status(200).json_body(json!({
                "type": "0x3::token::Collections",
                "data": {
                    "collection_data": {"handle": "0xc0"},
                    "token_data": {"handle": "0xd0"},
                },
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tables/0xc0/item");
            with_ledger_headers(then).status(200).json_body(json!({
                "description": "user1's simple collection",
                "maximum": "18446744073709551615",
                "mutability_config": {"description": false, "maximum": false, "uri": false},
                "name": "user1's collection",
                "supply": "1",
                "uri": "https://user1.com",
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tables/0xd0/item");
            with_ledger_headers(then).status(200).json_body(json!({
                "default_properties": {"map": {"data": []}},
                "description": "user1's simple token",
                "largest_property_version": "0",
                "maximum": "18446744073709551615",
                "name": "user1's first token",
                "royalty": {
                    "payee_address": user1.to_hex_literal(),
                    "royalty_points_denominator": "0",
                    "royalty_points_numerator": "0",
                },
                "supply": "1",
                "uri": "https://aptos.dev/img/nyan.jpeg",
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(resource_path(user1, "0x3::token::TokenStore"));
            with_ledger_headers(then).status(200).json_body(json!({
                "type": "0x3::token::TokenStore",
                "data": {"tokens": {"handle": "0xe0"}},
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tables/0xe0/item");
            with_ledger_headers(then).status(200).json_body(json!({
                "amount": "1",
                "id": {
                    "token_data_id": {
                        "creator": user1.to_hex_literal(),
                        "collection": "user1's collection",
                        "name": "user1's first token",
                    },
                    "property_version": "0",
                },
                "token_properties": {"map": {"data": []}},
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(resource_path(user2, "0x3::token::TokenStore"));
            with_ledger_headers(then).status(404).json_body(json!({
                "message": "Resource not found",
                "error_code": "resource_not_found",
                "vm_error_code": null,
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/transactions")
                .header("content-type", "application/x.aptos.signed_transaction+bcs");
            with_ledger_headers(then).status(202).json_body(json!({
                "hash": HASH,
                "sender": user1.to_hex_literal(),
                "sequence_number": "0",
                "max_gas_amount": "5000",
                "gas_unit_price": "100",
                "expiration_timestamp_secs": "1700000010",
                "payload": {},
            }));
        })
        .await
}

#[tokio::test]
async fn test_demo_runs_every_step_in_order() {
    let server = MockServer::start_async().await;
    let (mut user1, mut user2) = accounts();
    let submit = mock_chain(&server, user1.address(), user2.address()).await;
    let mint = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/mint")
                .query_param("amount", "100000000");
            then.status(200).json_body(json!([HASH]));
        })
        .await;

    let mut out = Vec::new();
    let report = run_demo(&args_for(&server), &mut user1, &mut user2, &mut out)
        .await
        .unwrap();

    mint.assert_hits_async(2).await;
    // collection, token, offer, claim, direct transfer
    submit.assert_hits_async(5).await;
    assert_eq!(user1.sequence_number(), 3);
    assert_eq!(user2.sequence_number(), 2);

    assert_eq!(report.user1, user1.address());
    assert_eq!(report.initial_coin_balances.user1, 100_000_000);
    assert_eq!(report.minted_token_balance, 1);
    // The mocked token stores never change, so both reads report the same holdings. Which
    // account signed each transfer is covered by the sequence numbers above.
    let mocked_holdings = Balances { user1: 1, user2: 0 };
    assert_eq!(report.token_balances_after_claim, mocked_holdings);
    assert_eq!(report.token_balances_after_direct_transfer, mocked_holdings);
    assert_eq!(report.direct_transfer_txn.to_string(), HASH);

    let out = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "-".repeat(81));
    assert_eq!(lines[1], "=== New addresses created ===");
    assert_eq!(lines[2], format!("User 1: {}", user1.address().to_hex_literal()));
    assert_eq!(lines[3], format!("User 2: {}", user2.address().to_hex_literal()));
    assert!(out.contains("=== Funding received: Initial Coin Balances ===\nuser1: 100000000\n"));
    assert!(out.contains(
        "user1's collection: {\n    \"description\": \"user1's simple collection\""
    ));
    assert!(out.contains("user1's token balance: 1\n"));

    let position = |needle: &str| out.find(needle).unwrap();
    let steps = [
        "Created collection: Transaction hash: ",
        "Created token: Transaction hash: ",
        "user1's token data: ",
        "=== Transferring the token from user1 ----> to user2",
        "Offered: Transaction hash: ",
        "Claimed: Transaction hash: ",
        "=== Transferring the token back to user1 <--- from user2 using MultiAgent",
        "Direct Transferred: Transaction hash: ",
        "=== Final Coin Balances ===",
    ];
    for pair in steps.windows(2) {
        assert!(position(pair[0]) < position(pair[1]), "{:?} out of order", pair);
    }
    assert!(out.contains(&format!("Direct Transferred: Transaction hash:  {}\n", HASH)));
}

#[tokio::test]
async fn test_demo_stops_when_funding_fails() {
    let server = MockServer::start_async().await;
    let (mut user1, mut user2) = accounts();
    let submit = mock_chain(&server, user1.address(), user2.address()).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/mint");
            then.status(500).body("faucet is out of funds");
        })
        .await;

    let mut out = Vec::new();
    let result = run_demo(&args_for(&server), &mut user1, &mut user2, &mut out).await;

    let err = assert_err!(result);
    assert!(format!("{:#}", err).contains("Failed to fund account"));
    submit.assert_hits_async(0).await;
    assert_eq!(user1.sequence_number(), 0);
}

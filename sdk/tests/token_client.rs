// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use aptos_api_types::{
    token::{TokenDataId, TokenId},
    X_APTOS_CHAIN_ID, X_APTOS_EPOCH, X_APTOS_LEDGER_TIMESTAMP, X_APTOS_LEDGER_VERSION, U64,
};
use aptos_sdk::{
    coin_client::CoinClient,
    rest_client::Client,
    token_client::TokenClient,
    types::{account_address::AccountAddress, LocalAccount},
};
use httpmock::{prelude::*, Then};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::{json, Value};
use url::Url;

const HASH: &str = "0xb78e1ba6fa7f7b3a3f3ac2a31e6675d84f2261c711c3b438a252f648b26df3ed";
const COLLECTION: &str = "user1's collection";
const TOKEN: &str = "user1's first token";

fn with_ledger_headers(then: Then) -> Then {
    then.header(X_APTOS_CHAIN_ID, "4")
        .header(X_APTOS_EPOCH, "2")
        .header(X_APTOS_LEDGER_VERSION, "1200")
        .header(X_APTOS_LEDGER_TIMESTAMP, "1700000000000000")
}

fn client_for(server: &MockServer) -> Client {
    Client::new(Url::parse(&server.base_url()).unwrap())
}

fn creator() -> AccountAddress {
    AccountAddress::new([0xaa; AccountAddress::LENGTH])
}

fn token_id() -> TokenId {
    TokenId::new(TokenDataId::new(creator(), COLLECTION, TOKEN), 0)
}

fn token_id_json() -> Value {
    json!({
        "token_data_id": {
            "creator": creator().to_hex_literal(),
            "collection": COLLECTION,
            "name": TOKEN,
        },
        "property_version": "0",
    })
}

async fn mock_index(server: &MockServer) {
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
}

async fn mock_submit(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/transactions")
                .header("content-type", "application/x.aptos.signed_transaction+bcs");
            with_ledger_headers(then).status(202).json_body(json!({
                "hash": HASH,
                "sender": creator().to_hex_literal(),
                "sequence_number": "0",
                "max_gas_amount": "5000",
                "gas_unit_price": "100",
                "expiration_timestamp_secs": "1700000010",
                "payload": {},
            }));
        })
        .await
}

async fn mock_collections(server: &MockServer) {
    let path = format!(
        "/v1/accounts/{}/resource/0x3::token::Collections",
        creator().to_hex_literal()
    );
    server
        .mock_async(|when, then| {
            when.method(GET).path(path);
            with_ledger_headers(then).status(200).json_body(json!({
                "type": "0x3::token::Collections",
                "data": {
                    "collection_data": {"handle": "0xc0"},
                    "token_data": {"handle": "0xd0"},
                },
            }));
        })
        .await;
}

fn token_store_path(account: AccountAddress) -> String {
    format!(
        "/v1/accounts/{}/resource/0x3::token::TokenStore",
        account.to_hex_literal()
    )
}

#[tokio::test]
async fn test_create_collection_submits_and_consumes_sequence_number() {
    let server = MockServer::start_async().await;
    mock_index(&server).await;
    let submit = mock_submit(&server).await;

    let client = client_for(&server);
    let token_client = TokenClient::new(&client);
    let mut account = LocalAccount::generate(&mut StdRng::from_seed([1; 32]));

    let pending = token_client
        .create_collection(
            &mut account,
            COLLECTION,
            "user1's simple collection",
            "https://user1.com",
            u64::MAX,
            None,
        )
        .await
        .unwrap();

    assert_eq!(pending.hash.to_string(), HASH);
    assert_eq!(account.sequence_number(), 1);
    submit.assert_async().await;
}

#[tokio::test]
async fn test_offer_claim_and_direct_transfer_sequence_numbers() {
    let server = MockServer::start_async().await;
    mock_index(&server).await;
    let submit = mock_submit(&server).await;

    let client = client_for(&server);
    let token_client = TokenClient::new(&client);
    let mut rng = StdRng::from_seed([2; 32]);
    let mut user1 = LocalAccount::generate(&mut rng);
    let mut user2 = LocalAccount::generate(&mut rng);
    let (creator, receiver) = (user1.address(), user2.address());

    token_client
        .offer_token(&mut user1, receiver, creator, COLLECTION, TOKEN, 1, 0, None)
        .await
        .unwrap();
    token_client
        .claim_token(&mut user2, creator, creator, COLLECTION, TOKEN, 0, None)
        .await
        .unwrap();
    token_client
        .direct_transfer_token(&mut user2, &user1, creator, COLLECTION, TOKEN, 1, 0, None)
        .await
        .unwrap();

    assert_eq!(user1.sequence_number(), 1);
    assert_eq!(user2.sequence_number(), 2);
    submit.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_get_collection_data() {
    let server = MockServer::start_async().await;
    mock_collections(&server).await;
    let item = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tables/0xc0/item").json_body(json!({
                "key_type": "0x1::string::String",
                "value_type": "0x3::token::CollectionData",
                "key": COLLECTION,
            }));
            with_ledger_headers(then).status(200).json_body(json!({
                "description": "user1's simple collection",
                "maximum": "18446744073709551615",
                "mutability_config": {"description": false, "maximum": false, "uri": false},
                "name": COLLECTION,
                "supply": "1",
                "uri": "https://user1.com",
            }));
        })
        .await;

    let client = client_for(&server);
    let data = TokenClient::new(&client)
        .get_collection_data(creator(), COLLECTION)
        .await
        .unwrap();
    assert_eq!(data.name, COLLECTION);
    assert_eq!(data.supply, U64(1));
    item.assert_async().await;
}

#[tokio::test]
async fn test_get_token_data() {
    let server = MockServer::start_async().await;
    mock_collections(&server).await;
    let item = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tables/0xd0/item").json_body(json!({
                "key_type": "0x3::token::TokenDataId",
                "value_type": "0x3::token::TokenData",
                "key": {
                    "creator": creator().to_hex_literal(),
                    "collection": COLLECTION,
                    "name": TOKEN,
                },
            }));
            with_ledger_headers(then).status(200).json_body(json!({
                "default_properties": {"map": {"data": []}},
                "description": "user1's simple token",
                "largest_property_version": "0",
                "maximum": "18446744073709551615",
                "name": TOKEN,
                "royalty": {
                    "payee_address": creator().to_hex_literal(),
                    "royalty_points_denominator": "0",
                    "royalty_points_numerator": "0",
                },
                "supply": "1",
                "uri": "https://aptos.dev/img/nyan.jpeg",
            }));
        })
        .await;

    let client = client_for(&server);
    let data = TokenClient::new(&client)
        .get_token_data(creator(), COLLECTION, TOKEN)
        .await
        .unwrap();
    assert_eq!(data.uri, "https://aptos.dev/img/nyan.jpeg");
    assert_eq!(data.royalty.payee_address, creator());
    item.assert_async().await;
}

#[tokio::test]
async fn test_get_token_for_account_without_token_store() {
    let server = MockServer::start_async().await;
    let receiver = AccountAddress::new([0xbb; AccountAddress::LENGTH]);
    server
        .mock_async(|when, then| {
            when.method(GET).path(token_store_path(receiver));
            with_ledger_headers(then).status(404).json_body(json!({
                "message": "Resource not found",
                "error_code": "resource_not_found",
                "vm_error_code": null,
            }));
        })
        .await;

    let client = client_for(&server);
    let token = TokenClient::new(&client)
        .get_token_for_account(receiver, &token_id())
        .await
        .unwrap();
    assert_eq!(token.amount, U64(0));
    assert_eq!(token.id, token_id());
}

#[tokio::test]
async fn test_get_token_for_account_without_entry() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(token_store_path(creator()));
            with_ledger_headers(then).status(200).json_body(json!({
                "type": "0x3::token::TokenStore",
                "data": {"tokens": {"handle": "0xe0"}},
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/tables/0xe0/item").json_body(json!({
                "key_type": "0x3::token::TokenId",
                "value_type": "0x3::token::Token",
                "key": token_id_json(),
            }));
            with_ledger_headers(then).status(404).json_body(json!({
                "message": "Table Item not found",
                "error_code": "table_item_not_found",
                "vm_error_code": null,
            }));
        })
        .await;

    let client = client_for(&server);
    let token = TokenClient::new(&client)
        .get_token(creator(), COLLECTION, TOKEN, 0)
        .await
        .unwrap();
    assert_eq!(token.amount, U64(0));
}

#[tokio::test]
async fn test_get_token_for_account_with_balance() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(token_store_path(creator()));
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
                "id": token_id_json(),
                "token_properties": {"map": {"data": []}},
            }));
        })
        .await;

    let client = client_for(&server);
    let token = TokenClient::new(&client)
        .get_token(creator(), COLLECTION, TOKEN, 0)
        .await
        .unwrap();
    assert_eq!(token.amount, U64(1));
    assert_eq!(token.id, token_id());
}

#[tokio::test]
async fn test_get_token_propagates_other_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(token_store_path(creator()));
            with_ledger_headers(then).status(500).json_body(json!({
                "message": "Internal error",
                "error_code": "internal_error",
                "vm_error_code": null,
            }));
        })
        .await;

    let client = client_for(&server);
    assert!(TokenClient::new(&client)
        .get_token(creator(), COLLECTION, TOKEN, 0)
        .await
        .is_err());
}

#[tokio::test]
async fn test_coin_client_balance_and_transfer() {
    let server = MockServer::start_async().await;
    mock_index(&server).await;
    let submit = mock_submit(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/view");
            with_ledger_headers(then)
                .status(200)
                .json_body(json!(["99990000"]));
        })
        .await;

    let client = client_for(&server);
    let coin_client = CoinClient::new(&client);
    let mut account = LocalAccount::generate(&mut StdRng::from_seed([3; 32]));

    assert_eq!(
        coin_client
            .get_account_balance(&account.address())
            .await
            .unwrap(),
        99_990_000
    );
    coin_client
        .transfer(&mut account, creator(), 1_000, None)
        .await
        .unwrap();
    assert_eq!(account.sequence_number(), 1);
    submit.assert_async().await;
}

// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! JSON views of the `0x3::token` resources and table values.

use crate::{move_types::TableHandle, U64};
use aptos_types::account_address::AccountAddress;
use serde::{Deserialize, Serialize};

/// Globally unique identifier of a token's metadata.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TokenDataId {
    pub creator: AccountAddress,
    pub collection: String,
    pub name: String,
}

impl TokenDataId {
    pub fn new(creator: AccountAddress, collection: &str, name: &str) -> Self {
        Self {
            creator,
            collection: collection.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// Identifies a token: its data id plus the property version of this instance.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct TokenId {
    pub token_data_id: TokenDataId,
    pub property_version: U64,
}

impl TokenId {
    pub fn new(token_data_id: TokenDataId, property_version: u64) -> Self {
        Self {
            token_data_id,
            property_version: U64(property_version),
        }
    }
}

/// A token held in an account's `TokenStore`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub amount: U64,
    #[serde(default)]
    pub token_properties: serde_json::Value,
}

impl Token {
    /// What the store would hold for `id` if the account never received it.
    pub fn empty(id: TokenId) -> Self {
        Self {
            id,
            amount: U64(0),
            token_properties: serde_json::Value::Null,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CollectionMutabilityConfig {
    pub description: bool,
    pub uri: bool,
    pub maximum: bool,
}

/// Value type of the creator's `collection_data` table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CollectionData {
    pub description: String,
    pub name: String,
    pub uri: String,
    pub supply: U64,
    pub maximum: U64,
    #[serde(default)]
    pub mutability_config: CollectionMutabilityConfig,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TokenMutabilityConfig {
    pub maximum: bool,
    pub uri: bool,
    pub royalty: bool,
    pub description: bool,
    pub properties: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Royalty {
    pub royalty_points_numerator: U64,
    pub royalty_points_denominator: U64,
    pub payee_address: AccountAddress,
}

/// Value type of the creator's `token_data` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenData {
    pub maximum: U64,
    pub largest_property_version: U64,
    pub supply: U64,
    pub uri: String,
    pub royalty: Royalty,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub default_properties: serde_json::Value,
    #[serde(default)]
    pub mutability_config: TokenMutabilityConfig,
}

/// `0x3::token::Collections`, published under every creator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionsResource {
    pub collection_data: TableHandle,
    pub token_data: TableHandle,
}

/// `0x3::token::TokenStore`, published under every account that has held a token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenStoreResource {
    pub tokens: TableHandle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_id_json_key() {
        let id = TokenId::new(
            TokenDataId::new(AccountAddress::ONE, "user1's collection", "user1's first token"),
            0,
        );
        assert_eq!(
            serde_json::to_value(&id).unwrap(),
            json!({
                "token_data_id": {
                    "creator": AccountAddress::ONE.to_hex_literal(),
                    "collection": "user1's collection",
                    "name": "user1's first token",
                },
                "property_version": "0",
            })
        );
    }

    #[test]
    fn test_parse_token_data() {
        let data: TokenData = serde_json::from_value(json!({
            "default_properties": {"map": {"data": []}},
            "description": "user1's simple token",
            "largest_property_version": "0",
            "maximum": "18446744073709551615",
            "mutability_config": {
                "description": false,
                "maximum": false,
                "properties": false,
                "royalty": false,
                "uri": false
            },
            "name": "user1's first token",
            "royalty": {
                "payee_address": "0x1",
                "royalty_points_denominator": "0",
                "royalty_points_numerator": "0"
            },
            "supply": "1",
            "uri": "https://aptos.dev/img/nyan.jpeg"
        }))
        .unwrap();
        assert_eq!(data.supply, U64(1));
        assert_eq!(data.royalty.payee_address, AccountAddress::ONE);
        assert_eq!(data.maximum, U64(u64::MAX));
    }

    #[test]
    fn test_empty_token() {
        let id = TokenId::new(TokenDataId::new(AccountAddress::ONE, "c", "t"), 0);
        let token = Token::empty(id.clone());
        assert_eq!(token.amount, U64(0));
        assert_eq!(token.id, id);
    }
}

// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Entry functions of the token v1 package published at `0x3`.
//!
//! Move `String` arguments are passed as their UTF-8 bytes, which BCS encodes the same way.

use crate::entry_function_payload;
use anyhow::Result;
use aptos_types::{account_address::AccountAddress, transaction::TransactionPayload};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryFunctionCall {
    /// Create a new collection owned by the sender.
    ///
    /// `mutate_setting` toggles mutability of description, uri and maximum, in that order.
    TokenCreateCollectionScript {
        name: Vec<u8>,
        description: Vec<u8>,
        uri: Vec<u8>,
        maximum: u64,
        mutate_setting: Vec<bool>,
    },

    /// Create token data inside one of the sender's collections and mint `balance` of it
    /// into the sender's token store.
    TokenCreateTokenScript {
        collection: Vec<u8>,
        name: Vec<u8>,
        description: Vec<u8>,
        balance: u64,
        maximum: u64,
        uri: Vec<u8>,
        royalty_payee_address: AccountAddress,
        royalty_points_denominator: u64,
        royalty_points_numerator: u64,
        mutate_setting: Vec<bool>,
        property_keys: Vec<Vec<u8>>,
        property_values: Vec<Vec<u8>>,
        property_types: Vec<Vec<u8>>,
    },

    /// Move a token between two accounts in one transaction. Both the current owner
    /// (sender) and the receiver (secondary signer) must sign.
    TokenDirectTransferScript {
        creators_address: AccountAddress,
        collection: Vec<u8>,
        name: Vec<u8>,
        property_version: u64,
        amount: u64,
    },

    TokenTransfersCancelOfferScript {
        receiver: AccountAddress,
        creator: AccountAddress,
        collection: Vec<u8>,
        name: Vec<u8>,
        property_version: u64,
    },

    /// Claim a token previously offered to the sender by `sender`.
    TokenTransfersClaimScript {
        sender: AccountAddress,
        creator: AccountAddress,
        collection: Vec<u8>,
        name: Vec<u8>,
        property_version: u64,
    },

    /// Escrow `amount` of a token for `receiver` to claim.
    TokenTransfersOfferScript {
        receiver: AccountAddress,
        creator: AccountAddress,
        collection: Vec<u8>,
        name: Vec<u8>,
        property_version: u64,
        amount: u64,
    },
}

impl EntryFunctionCall {
    /// Build an Aptos `TransactionPayload` from a structured object `EntryFunctionCall`.
    pub fn encode(self) -> Result<TransactionPayload> {
        use EntryFunctionCall::*;
        match self {
            TokenCreateCollectionScript {
                name,
                description,
                uri,
                maximum,
                mutate_setting,
            } => token_create_collection_script(name, description, uri, maximum, mutate_setting),
            TokenCreateTokenScript {
                collection,
                name,
                description,
                balance,
                maximum,
                uri,
                royalty_payee_address,
                royalty_points_denominator,
                royalty_points_numerator,
                mutate_setting,
                property_keys,
                property_values,
                property_types,
            } => token_create_token_script(
                collection,
                name,
                description,
                balance,
                maximum,
                uri,
                royalty_payee_address,
                royalty_points_denominator,
                royalty_points_numerator,
                mutate_setting,
                property_keys,
                property_values,
                property_types,
            ),
            TokenDirectTransferScript {
                creators_address,
                collection,
                name,
                property_version,
                amount,
            } => token_direct_transfer_script(
                creators_address,
                collection,
                name,
                property_version,
                amount,
            ),
            TokenTransfersCancelOfferScript {
                receiver,
                creator,
                collection,
                name,
                property_version,
            } => token_transfers_cancel_offer_script(
                receiver,
                creator,
                collection,
                name,
                property_version,
            ),
            TokenTransfersClaimScript {
                sender,
                creator,
                collection,
                name,
                property_version,
            } => token_transfers_claim_script(sender, creator, collection, name, property_version),
            TokenTransfersOfferScript {
                receiver,
                creator,
                collection,
                name,
                property_version,
                amount,
            } => token_transfers_offer_script(
                receiver,
                creator,
                collection,
                name,
                property_version,
                amount,
            ),
        }
    }

    /// Try to recognize an Aptos `TransactionPayload` as a known `EntryFunctionCall`.
    pub fn decode(payload: &TransactionPayload) -> Option<EntryFunctionCall> {
        let entry_function = payload.entry_function();
        if *entry_function.module().address() != AccountAddress::THREE {
            return None;
        }
        let module = entry_function.module().name().as_str();
        let function = entry_function.function().as_str();
        let args = entry_function.args();
        match (module, function) {
            ("token", "create_collection_script") => decode_token_create_collection_script(args),
            ("token", "create_token_script") => decode_token_create_token_script(args),
            ("token", "direct_transfer_script") => decode_token_direct_transfer_script(args),
            ("token_transfers", "cancel_offer_script") => {
                decode_token_transfers_cancel_offer_script(args)
            },
            ("token_transfers", "claim_script") => decode_token_transfers_claim_script(args),
            ("token_transfers", "offer_script") => decode_token_transfers_offer_script(args),
            _ => None,
        }
    }
}

pub fn token_create_collection_script(
    name: Vec<u8>,
    description: Vec<u8>,
    uri: Vec<u8>,
    maximum: u64,
    mutate_setting: Vec<bool>,
) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::THREE,
        "token",
        "create_collection_script",
        vec![],
        vec![
            bcs::to_bytes(&name)?,
            bcs::to_bytes(&description)?,
            bcs::to_bytes(&uri)?,
            bcs::to_bytes(&maximum)?,
            bcs::to_bytes(&mutate_setting)?,
        ],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn token_create_token_script(
    collection: Vec<u8>,
    name: Vec<u8>,
    description: Vec<u8>,
    balance: u64,
    maximum: u64,
    uri: Vec<u8>,
    royalty_payee_address: AccountAddress,
    royalty_points_denominator: u64,
    royalty_points_numerator: u64,
    mutate_setting: Vec<bool>,
    property_keys: Vec<Vec<u8>>,
    property_values: Vec<Vec<u8>>,
    property_types: Vec<Vec<u8>>,
) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::THREE,
        "token",
        "create_token_script",
        vec![],
        vec![
            bcs::to_bytes(&collection)?,
            bcs::to_bytes(&name)?,
            bcs::to_bytes(&description)?,
            bcs::to_bytes(&balance)?,
            bcs::to_bytes(&maximum)?,
            bcs::to_bytes(&uri)?,
            bcs::to_bytes(&royalty_payee_address)?,
            bcs::to_bytes(&royalty_points_denominator)?,
            bcs::to_bytes(&royalty_points_numerator)?,
            bcs::to_bytes(&mutate_setting)?,
            bcs::to_bytes(&property_keys)?,
            bcs::to_bytes(&property_values)?,
            bcs::to_bytes(&property_types)?,
        ],
    )
}

pub fn token_direct_transfer_script(
    creators_address: AccountAddress,
    collection: Vec<u8>,
    name: Vec<u8>,
    property_version: u64,
    amount: u64,
) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::THREE,
        "token",
        "direct_transfer_script",
        vec![],
        vec![
            bcs::to_bytes(&creators_address)?,
            bcs::to_bytes(&collection)?,
            bcs::to_bytes(&name)?,
            bcs::to_bytes(&property_version)?,
            bcs::to_bytes(&amount)?,
        ],
    )
}

pub fn token_transfers_cancel_offer_script(
    receiver: AccountAddress,
    creator: AccountAddress,
    collection: Vec<u8>,
    name: Vec<u8>,
    property_version: u64,
) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::THREE,
        "token_transfers",
        "cancel_offer_script",
        vec![],
        vec![
            bcs::to_bytes(&receiver)?,
            bcs::to_bytes(&creator)?,
            bcs::to_bytes(&collection)?,
            bcs::to_bytes(&name)?,
            bcs::to_bytes(&property_version)?,
        ],
    )
}

pub fn token_transfers_claim_script(
    sender: AccountAddress,
    creator: AccountAddress,
    collection: Vec<u8>,
    name: Vec<u8>,
    property_version: u64,
) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::THREE,
        "token_transfers",
        "claim_script",
        vec![],
        vec![
            bcs::to_bytes(&sender)?,
            bcs::to_bytes(&creator)?,
            bcs::to_bytes(&collection)?,
            bcs::to_bytes(&name)?,
            bcs::to_bytes(&property_version)?,
        ],
    )
}

pub fn token_transfers_offer_script(
    receiver: AccountAddress,
    creator: AccountAddress,
    collection: Vec<u8>,
    name: Vec<u8>,
    property_version: u64,
    amount: u64,
) -> Result<TransactionPayload> {
    entry_function_payload(
        AccountAddress::THREE,
        "token_transfers",
        "offer_script",
        vec![],
        vec![
            bcs::to_bytes(&receiver)?,
            bcs::to_bytes(&creator)?,
            bcs::to_bytes(&collection)?,
            bcs::to_bytes(&name)?,
            bcs::to_bytes(&property_version)?,
            bcs::to_bytes(&amount)?,
        ],
    )
}

fn decode_token_create_collection_script(args: &[Vec<u8>]) -> Option<EntryFunctionCall> {
    match args {
        [name, description, uri, maximum, mutate_setting] => {
            Some(EntryFunctionCall::TokenCreateCollectionScript {
                name: bcs::from_bytes(name).ok()?,
                description: bcs::from_bytes(description).ok()?,
                uri: bcs::from_bytes(uri).ok()?,
                maximum: bcs::from_bytes(maximum).ok()?,
                mutate_setting: bcs::from_bytes(mutate_setting).ok()?,
            })
        },
        _ => None,
    }
}

fn decode_token_create_token_script(args: &[Vec<u8>]) -> Option<EntryFunctionCall> {
    match args {
        [collection, name, description, balance, maximum, uri, royalty_payee_address, royalty_points_denominator, royalty_points_numerator, mutate_setting, property_keys, property_values, property_types] => {
            Some(EntryFunctionCall::TokenCreateTokenScript {
                collection: bcs::from_bytes(collection).ok()?,
                name: bcs::from_bytes(name).ok()?,
                description: bcs::from_bytes(description).ok()?,
                balance: bcs::from_bytes(balance).ok()?,
                maximum: bcs::from_bytes(maximum).ok()?,
                uri: bcs::from_bytes(uri).ok()?,
                royalty_payee_address: bcs::from_bytes(royalty_payee_address).ok()?,
                royalty_points_denominator: bcs::from_bytes(royalty_points_denominator).ok()?,
                royalty_points_numerator: bcs::from_bytes(royalty_points_numerator).ok()?,
                mutate_setting: bcs::from_bytes(mutate_setting).ok()?,
                property_keys: bcs::from_bytes(property_keys).ok()?,
                property_values: bcs::from_bytes(property_values).ok()?,
                property_types: bcs::from_bytes(property_types).ok()?,
            })
        },
        _ => None,
    }
}

fn decode_token_direct_transfer_script(args: &[Vec<u8>]) -> Option<EntryFunctionCall> {
    match args {
        [creators_address, collection, name, property_version, amount] => {
            Some(EntryFunctionCall::TokenDirectTransferScript {
                creators_address: bcs::from_bytes(creators_address).ok()?,
                collection: bcs::from_bytes(collection).ok()?,
                name: bcs::from_bytes(name).ok()?,
                property_version: bcs::from_bytes(property_version).ok()?,
                amount: bcs::from_bytes(amount).ok()?,
            })
        },
        _ => None,
    }
}

fn decode_token_transfers_cancel_offer_script(args: &[Vec<u8>]) -> Option<EntryFunctionCall> {
    match args {
        [receiver, creator, collection, name, property_version] => {
            Some(EntryFunctionCall::TokenTransfersCancelOfferScript {
                receiver: bcs::from_bytes(receiver).ok()?,
                creator: bcs::from_bytes(creator).ok()?,
                collection: bcs::from_bytes(collection).ok()?,
                name: bcs::from_bytes(name).ok()?,
                property_version: bcs::from_bytes(property_version).ok()?,
            })
        },
        _ => None,
    }
}

fn decode_token_transfers_claim_script(args: &[Vec<u8>]) -> Option<EntryFunctionCall> {
    match args {
        [sender, creator, collection, name, property_version] => {
            Some(EntryFunctionCall::TokenTransfersClaimScript {
                sender: bcs::from_bytes(sender).ok()?,
                creator: bcs::from_bytes(creator).ok()?,
                collection: bcs::from_bytes(collection).ok()?,
                name: bcs::from_bytes(name).ok()?,
                property_version: bcs::from_bytes(property_version).ok()?,
            })
        },
        _ => None,
    }
}

fn decode_token_transfers_offer_script(args: &[Vec<u8>]) -> Option<EntryFunctionCall> {
    match args {
        [receiver, creator, collection, name, property_version, amount] => {
            Some(EntryFunctionCall::TokenTransfersOfferScript {
                receiver: bcs::from_bytes(receiver).ok()?,
                creator: bcs::from_bytes(creator).ok()?,
                collection: bcs::from_bytes(collection).ok()?,
                name: bcs::from_bytes(name).ok()?,
                property_version: bcs::from_bytes(property_version).ok()?,
                amount: bcs::from_bytes(amount).ok()?,
            })
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator() -> AccountAddress {
        AccountAddress::new([0xaa; AccountAddress::LENGTH])
    }

    fn receiver() -> AccountAddress {
        AccountAddress::new([0xbb; AccountAddress::LENGTH])
    }

    #[test]
    fn test_create_collection_script_args() {
        let payload = EntryFunctionCall::TokenCreateCollectionScript {
            name: b"col".to_vec(),
            description: b"d".to_vec(),
            uri: b"https://user1.com".to_vec(),
            maximum: 0,
            mutate_setting: vec![false, false, false],
        }
        .encode()
        .unwrap();

        let entry_function = payload.entry_function();
        assert_eq!(
            entry_function.to_string(),
            "0x3::token::create_collection_script"
        );
        let args = entry_function.args();
        assert_eq!(args.len(), 5);
        assert_eq!(args[0], vec![3, b'c', b'o', b'l']);
        assert_eq!(args[3], vec![0; 8]);
        assert_eq!(args[4], vec![3, 0, 0, 0]);
    }

    #[test]
    fn test_create_token_script_args() {
        let call = EntryFunctionCall::TokenCreateTokenScript {
            collection: b"col".to_vec(),
            name: b"tok".to_vec(),
            description: b"desc".to_vec(),
            balance: 1,
            maximum: 1,
            uri: b"https://aptos.dev/img/nyan.jpeg".to_vec(),
            royalty_payee_address: creator(),
            royalty_points_denominator: 0,
            royalty_points_numerator: 0,
            mutate_setting: vec![false; 5],
            property_keys: vec![],
            property_values: vec![],
            property_types: vec![],
        };
        let payload = call.clone().encode().unwrap();
        let args = payload.entry_function().args();
        assert_eq!(args.len(), 13);
        assert_eq!(args[3], 1u64.to_le_bytes().to_vec());
        assert_eq!(args[6], creator().to_vec());
        assert_eq!(args[10], vec![0]);

        assert_eq!(EntryFunctionCall::decode(&payload), Some(call));
    }

    #[test]
    fn test_offer_claim_and_cancel_targets() {
        let offer = EntryFunctionCall::TokenTransfersOfferScript {
            receiver: receiver(),
            creator: creator(),
            collection: b"col".to_vec(),
            name: b"tok".to_vec(),
            property_version: 0,
            amount: 1,
        };
        let claim = EntryFunctionCall::TokenTransfersClaimScript {
            sender: creator(),
            creator: creator(),
            collection: b"col".to_vec(),
            name: b"tok".to_vec(),
            property_version: 0,
        };
        let cancel = EntryFunctionCall::TokenTransfersCancelOfferScript {
            receiver: receiver(),
            creator: creator(),
            collection: b"col".to_vec(),
            name: b"tok".to_vec(),
            property_version: 0,
        };

        for (call, expected) in [
            (offer, "0x3::token_transfers::offer_script"),
            (claim, "0x3::token_transfers::claim_script"),
            (cancel, "0x3::token_transfers::cancel_offer_script"),
        ] {
            let payload = call.clone().encode().unwrap();
            assert_eq!(payload.entry_function().to_string(), expected);
            assert_eq!(EntryFunctionCall::decode(&payload), Some(call));
        }
    }

    #[test]
    fn test_direct_transfer_script_args() {
        let payload = token_direct_transfer_script(
            creator(),
            b"col".to_vec(),
            b"tok".to_vec(),
            0,
            1,
        )
        .unwrap();
        let entry_function = payload.entry_function();
        assert_eq!(entry_function.to_string(), "0x3::token::direct_transfer_script");
        assert_eq!(entry_function.args()[0], creator().to_vec());
        assert_eq!(entry_function.args()[4], 1u64.to_le_bytes().to_vec());
    }

    #[test]
    fn test_decode_rejects_framework_calls() {
        let payload =
            crate::aptos_framework_sdk_builder::aptos_account_transfer(receiver(), 5).unwrap();
        assert_eq!(EntryFunctionCall::decode(&payload), None);
    }
}

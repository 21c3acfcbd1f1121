// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    crypto::ed25519::{Ed25519PrivateKey, Ed25519PublicKey},
    transaction_builder::TransactionBuilder,
};
use anyhow::Result;
pub use aptos_types::*;
use aptos_types::{
    account_address::AccountAddress,
    transaction::{authenticator::AuthenticationKey, RawTransaction, SignedTransaction},
};
use rand::{CryptoRng, RngCore};

/// An account whose private key is held locally, together with the sequence number its
/// next transaction will use.
#[derive(Debug)]
pub struct LocalAccount {
    /// Address of the account.
    address: AccountAddress,
    /// Authentication key of the account.
    key: AccountKey,
    /// Latest known sequence number of the account, it can be different from validator.
    sequence_number: u64,
}

impl LocalAccount {
    /// Create a new representation of an account locally. Note: This function
    /// does not actually create an account on the Aptos blockchain, just a
    /// local representation.
    pub fn new<T: Into<AccountKey>>(address: AccountAddress, key: T, sequence_number: u64) -> Self {
        Self {
            address,
            key: key.into(),
            sequence_number,
        }
    }

    /// Load a key pair from a hex encoded private key. The address is derived from the key,
    /// which only holds for accounts whose key was never rotated.
    pub fn from_private_key(private_key: &str, sequence_number: u64) -> Result<Self> {
        let key = AccountKey::from_private_key(Ed25519PrivateKey::from_encoded_string(
            private_key,
        )?);
        let address = key.authentication_key().account_address();
        Ok(Self::new(address, key, sequence_number))
    }

    /// Generate a new account locally. Note: This function does not actually
    /// create an account on the Aptos blockchain, it just generates a new
    /// account locally.
    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        let key = AccountKey::generate(rng);
        let address = key.authentication_key().account_address();

        Self::new(address, key, 0)
    }

    pub fn sign_transaction(&self, txn: RawTransaction) -> Result<SignedTransaction> {
        txn.sign(self.private_key(), *self.public_key())
    }

    /// Sign with the next sequence number, advancing it once signing succeeded.
    pub fn sign_with_transaction_builder(
        &mut self,
        builder: TransactionBuilder,
    ) -> Result<SignedTransaction> {
        let raw_txn = builder
            .sender(self.address())
            .sequence_number(self.sequence_number())
            .build()?;
        let signed_txn = self.sign_transaction(raw_txn)?;
        self.increment_sequence_number();
        Ok(signed_txn)
    }

    /// Sign a transaction that `secondary_signers` must authorize as well. Only the sender's
    /// sequence number is consumed.
    pub fn sign_multi_agent_with_transaction_builder(
        &mut self,
        secondary_signers: Vec<&LocalAccount>,
        builder: TransactionBuilder,
    ) -> Result<SignedTransaction> {
        let secondary_signer_addresses = secondary_signers
            .iter()
            .map(|signer| signer.address())
            .collect();
        let secondary_signer_privkeys = secondary_signers
            .iter()
            .map(|signer| signer.private_key())
            .collect();
        let raw_txn = builder
            .sender(self.address())
            .sequence_number(self.sequence_number())
            .build()?;
        let signed_txn = raw_txn.sign_multi_agent(
            self.private_key(),
            secondary_signer_addresses,
            secondary_signer_privkeys,
        )?;
        self.increment_sequence_number();
        Ok(signed_txn)
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn private_key(&self) -> &Ed25519PrivateKey {
        self.key.private_key()
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        self.key.public_key()
    }

    pub fn authentication_key(&self) -> AuthenticationKey {
        self.key.authentication_key()
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    /// Returns the sequence number that was current before the increment.
    pub fn increment_sequence_number(&mut self) -> u64 {
        let sequence_number = self.sequence_number;
        self.sequence_number += 1;
        sequence_number
    }

    pub fn set_sequence_number(&mut self, sequence_number: u64) {
        self.sequence_number = sequence_number;
    }
}

#[derive(Debug)]
pub struct AccountKey {
    private_key: Ed25519PrivateKey,
    public_key: Ed25519PublicKey,
    authentication_key: AuthenticationKey,
}

impl AccountKey {
    pub fn generate<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        let private_key = Ed25519PrivateKey::generate(rng);
        Self::from_private_key(private_key)
    }

    pub fn from_private_key(private_key: Ed25519PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let authentication_key = AuthenticationKey::ed25519(&public_key);

        Self {
            private_key,
            public_key,
            authentication_key,
        }
    }

    pub fn private_key(&self) -> &Ed25519PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    pub fn authentication_key(&self) -> AuthenticationKey {
        self.authentication_key
    }
}

impl From<Ed25519PrivateKey> for AccountKey {
    fn from(private_key: Ed25519PrivateKey) -> Self {
        Self::from_private_key(private_key)
    }
}

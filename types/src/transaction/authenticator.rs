// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    account_address::AccountAddress,
    transaction::{RawTransaction, RawTransactionWithData},
};
use anyhow::{ensure, Result};
use aptos_crypto::{
    ed25519::{Ed25519PublicKey, Ed25519Signature},
    HashValue,
};
use serde::{ser::SerializeStructVariant, Serialize, Serializer};
use std::fmt;

/// Each transaction submitted to the Aptos blockchain contains a `TransactionAuthenticator`. During
/// transaction execution, the executor will check if every `AccountAuthenticator`'s signature on
/// the transaction hash is well-formed and whether the sha3 hash of the
/// `AccountAuthenticator`'s `AuthenticationKeyPreimage` matches the `AuthenticationKey` stored
/// under the participating signer's account address.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TransactionAuthenticator {
    /// Single Ed25519 signature
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
    /// Multi-agent transaction.
    MultiAgent {
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
    },
}

// Only the variants clients produce are modelled; the on-chain enum also has
// MultiEd25519 (1), FeePayer (3) and SingleSender (4), so indices are written explicitly.
impl Serialize for TransactionAuthenticator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TransactionAuthenticator::Ed25519 {
                public_key,
                signature,
            } => {
                let mut variant = serializer.serialize_struct_variant(
                    "TransactionAuthenticator",
                    0,
                    "Ed25519",
                    2,
                )?;
                variant.serialize_field("public_key", public_key)?;
                variant.serialize_field("signature", signature)?;
                variant.end()
            },
            TransactionAuthenticator::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            } => {
                let mut variant = serializer.serialize_struct_variant(
                    "TransactionAuthenticator",
                    2,
                    "MultiAgent",
                    3,
                )?;
                variant.serialize_field("sender", sender)?;
                variant.serialize_field("secondary_signer_addresses", secondary_signer_addresses)?;
                variant.serialize_field("secondary_signers", secondary_signers)?;
                variant.end()
            },
        }
    }
}

impl TransactionAuthenticator {
    /// Create a single-signature ed25519 authenticator
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self::Ed25519 {
            public_key,
            signature,
        }
    }

    /// Create a multi-agent authenticator
    pub fn multi_agent(
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
    ) -> Self {
        Self::MultiAgent {
            sender,
            secondary_signer_addresses,
            secondary_signers,
        }
    }

    /// Return Ok if all AccountAuthenticator's public keys match their signatures, Err otherwise
    pub fn verify(&self, raw_txn: &RawTransaction) -> Result<()> {
        match self {
            Self::Ed25519 {
                public_key,
                signature,
            } => public_key.verify_struct_signature(raw_txn, signature),
            Self::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            } => {
                ensure!(
                    secondary_signer_addresses.len() == secondary_signers.len(),
                    "number of secondary signer addresses and authenticators don't match"
                );
                let message = RawTransactionWithData::new_multi_agent(
                    raw_txn.clone(),
                    secondary_signer_addresses.clone(),
                );
                sender.verify(&message)?;
                for signer in secondary_signers {
                    signer.verify(&message)?;
                }
                Ok(())
            },
        }
    }

    pub fn sender(&self) -> AccountAuthenticator {
        match self {
            Self::Ed25519 {
                public_key,
                signature,
            } => AccountAuthenticator::ed25519(*public_key, *signature),
            Self::MultiAgent { sender, .. } => sender.clone(),
        }
    }

    pub fn secondary_signer_addresses(&self) -> Vec<AccountAddress> {
        match self {
            Self::Ed25519 { .. } => vec![],
            Self::MultiAgent {
                secondary_signer_addresses,
                ..
            } => secondary_signer_addresses.clone(),
        }
    }
}

impl fmt::Display for TransactionAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ed25519 { .. } => write!(
                f,
                "TransactionAuthenticator[scheme: Ed25519, sender: {}]",
                self.sender()
            ),
            Self::MultiAgent {
                sender,
                secondary_signer_addresses,
                secondary_signers,
            } => {
                let mut sec_addrs: String = "".to_string();
                for sec_addr in secondary_signer_addresses {
                    sec_addrs = format!("{}\n\t\t\t{:#?},", sec_addrs, sec_addr);
                }
                let mut sec_signers: String = "".to_string();
                for sec_signer in secondary_signers {
                    sec_signers = format!("{}\n\t\t\t{:#?},", sec_signers, sec_signer);
                }
                write!(
                    f,
                    "TransactionAuthenticator[\n\
                        \tscheme: MultiAgent, \n\
                        \tsender: {}\n\
                        \tsecondary signer addresses: {}\n\
                        \tsecondary signers: {}]",
                    sender, sec_addrs, sec_signers,
                )
            },
        }
    }
}

/// An `AccountAuthenticator` is an abstraction of a signature scheme. It must know:
/// (1) How to check its signature against a message and public key
/// (2) How to convert its public key into an `AuthenticationKeyPreimage` structured as
/// (public_key | signature_scheme_id).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum AccountAuthenticator {
    /// Ed25519 Single signature
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
}

impl AccountAuthenticator {
    /// Create a single-signature ed25519 authenticator
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        Self::Ed25519 {
            public_key,
            signature,
        }
    }

    /// Return Ok if the authenticator's public key matches its signature, Err otherwise
    pub fn verify(&self, message: &RawTransactionWithData) -> Result<()> {
        match self {
            Self::Ed25519 {
                public_key,
                signature,
            } => public_key.verify_struct_signature(message, signature),
        }
    }

    /// The authentication key this authenticator proves ownership of.
    pub fn authentication_key(&self) -> AuthenticationKey {
        match self {
            Self::Ed25519 { public_key, .. } => AuthenticationKey::ed25519(public_key),
        }
    }
}

impl fmt::Display for AccountAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Ed25519 { public_key, .. } => write!(
                f,
                "AccountAuthenticator[scheme id: Ed25519, public key: {}]",
                public_key
            ),
        }
    }
}

/// Scheme byte appended to a single ed25519 public key when deriving its authentication key.
const ED25519_SCHEME: u8 = 0;

/// A struct that represents an account authentication key. An account's address is the last 32
/// bytes of authentication key used to create it
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AuthenticationKey([u8; AuthenticationKey::LENGTH]);

impl AuthenticationKey {
    /// The number of bytes in an authentication key.
    pub const LENGTH: usize = AccountAddress::LENGTH;

    /// Create an authentication key from `bytes`
    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    /// Create an authentication key from a public key and scheme: `sha3_256(public_key ++ scheme)`.
    pub fn from_preimage(mut public_key_bytes: Vec<u8>, scheme: u8) -> AuthenticationKey {
        public_key_bytes.push(scheme);
        AuthenticationKey::new(*HashValue::sha3_256_of(&public_key_bytes).as_bytes())
    }

    /// Create an authentication key from an Ed25519 public key
    pub fn ed25519(public_key: &Ed25519PublicKey) -> AuthenticationKey {
        Self::from_preimage(public_key.to_bytes().to_vec(), ED25519_SCHEME)
    }

    /// Return an address derived from the last `AccountAddress::LENGTH` bytes of this
    /// authentication key.
    pub fn account_address(&self) -> AccountAddress {
        AccountAddress::new(self.0)
    }

    /// Construct a vector from this authentication key
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl fmt::Display for AuthenticationKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptos_crypto::ed25519::Ed25519PrivateKey;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_ed25519_authentication_key() {
        let mut rng: StdRng = SeedableRng::from_seed([1; 32]);
        let public_key = Ed25519PrivateKey::generate(&mut rng).public_key();

        let mut preimage = public_key.to_bytes().to_vec();
        preimage.push(0);
        let expected = HashValue::sha3_256_of(&preimage);

        let auth_key = AuthenticationKey::ed25519(&public_key);
        assert_eq!(auth_key.to_vec(), expected.to_vec());
        assert_eq!(auth_key.account_address().to_vec(), expected.to_vec());
        assert_eq!(auth_key.to_string(), expected.to_hex_literal());
    }

    #[test]
    fn test_authenticator_variant_indices() {
        let mut rng: StdRng = SeedableRng::from_seed([2; 32]);
        let private_key = Ed25519PrivateKey::generate(&mut rng);
        let signature = private_key.sign_arbitrary_message(b"m");
        let single = TransactionAuthenticator::ed25519(private_key.public_key(), signature);
        let bytes = bcs::to_bytes(&single).unwrap();
        // variant, then length-prefixed key, then length-prefixed signature
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], 32);
        assert_eq!(bytes[34], 64);
        assert_eq!(bytes.len(), 1 + 33 + 65);

        let account = AccountAuthenticator::ed25519(private_key.public_key(), signature);
        let multi = TransactionAuthenticator::multi_agent(
            account.clone(),
            vec![AccountAddress::ONE],
            vec![account],
        );
        let bytes = bcs::to_bytes(&multi).unwrap();
        assert_eq!(bytes[0], 2);
        // sender authenticator (99 bytes), then one secondary address, then one authenticator
        assert_eq!(bytes[1], 0);
        assert_eq!(bytes[100], 1);
        assert_eq!(&bytes[101..133], AccountAddress::ONE.as_ref());
        assert_eq!(bytes[133], 1);
        assert_eq!(bytes[134], 0);
        assert_eq!(bytes.len(), 1 + 99 + 1 + 32 + 1 + 99);
    }
}

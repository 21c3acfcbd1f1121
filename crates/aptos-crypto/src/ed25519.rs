// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module provides an API for the PureEdDSA signature scheme over the ed25519 twisted
//! Edwards curve as defined in [RFC8032](https://tools.ietf.org/html/rfc8032).
//!
//! Signature verification also checks and rejects non-canonical signatures.
//!
//! # Examples
//!
//! ```
//! use aptos_crypto::ed25519::Ed25519PrivateKey;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng: StdRng = SeedableRng::from_seed([0; 32]);
//! let private_key = Ed25519PrivateKey::generate(&mut rng);
//! let public_key = private_key.public_key();
//! let signature = private_key.sign_arbitrary_message(b"Hello, World");
//! assert!(public_key.verify_arbitrary_msg(b"Hello, World", &signature).is_ok());
//! ```

use crate::{
    hash::{signing_message, CryptoHash},
    CryptoMaterialError,
};
use anyhow::{anyhow, Result};
use ed25519_dalek::{ExpandedSecretKey, PublicKey, SecretKey, Signature};
use rand::{CryptoRng, RngCore};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The length of the Ed25519PrivateKey
pub const ED25519_PRIVATE_KEY_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;
/// The length of the Ed25519PublicKey
pub const ED25519_PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
/// The length of the Ed25519Signature
pub const ED25519_SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// An Ed25519 private key
pub struct Ed25519PrivateKey(SecretKey);

/// An Ed25519 public key
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Ed25519PublicKey(PublicKey);

/// An Ed25519 signature
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Ed25519Signature(Signature);

impl Ed25519PrivateKey {
    /// Generates a fresh key from a cryptographically secure RNG.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Ed25519PrivateKey(SecretKey::generate(rng))
    }

    /// Serialize an Ed25519PrivateKey.
    pub fn to_bytes(&self) -> [u8; ED25519_PRIVATE_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// Hex encoding with a leading `0x`, the format the CLI and wallets exchange keys in.
    pub fn to_encoded_string(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// Parses a hex-encoded key, with or without a leading `0x`.
    pub fn from_encoded_string(encoded: &str) -> Result<Self, CryptoMaterialError> {
        let encoded = encoded.trim();
        let encoded = encoded.strip_prefix("0x").unwrap_or(encoded);
        let bytes =
            hex::decode(encoded).map_err(|_| CryptoMaterialError::DeserializationError)?;
        Self::try_from(bytes.as_slice())
    }

    /// Derives the public half of the key pair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::from(self)
    }

    /// Signs the salted BCS bytes of `message`.
    pub fn sign<T: CryptoHash>(&self, message: &T) -> Result<Ed25519Signature, CryptoMaterialError> {
        Ok(self.sign_arbitrary_message(&signing_message(message)?))
    }

    /// Signs a raw byte message without any domain separation.
    pub fn sign_arbitrary_message(&self, message: &[u8]) -> Ed25519Signature {
        let public_key = PublicKey::from(&self.0);
        let expanded_secret_key = ExpandedSecretKey::from(&self.0);
        Ed25519Signature(expanded_secret_key.sign(message, &public_key))
    }
}

impl TryFrom<&[u8]> for Ed25519PrivateKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Ed25519PrivateKey, CryptoMaterialError> {
        if bytes.len() != ED25519_PRIVATE_KEY_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        SecretKey::from_bytes(bytes)
            .map(Ed25519PrivateKey)
            .map_err(|_| CryptoMaterialError::DeserializationError)
    }
}

// Private keys never print their material.
impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ed25519PrivateKey(<elided secret>)")
    }
}

impl Ed25519PublicKey {
    /// Serialize an Ed25519PublicKey.
    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// Verifies `signature` over the salted BCS bytes of `message`.
    pub fn verify_struct_signature<T: CryptoHash>(
        &self,
        message: &T,
        signature: &Ed25519Signature,
    ) -> Result<()> {
        self.verify_arbitrary_msg(&signing_message(message)?, signature)
    }

    /// Verifies `signature` over a raw byte message. Non-canonical signatures are rejected.
    pub fn verify_arbitrary_msg(&self, message: &[u8], signature: &Ed25519Signature) -> Result<()> {
        self.0
            .verify_strict(message, &signature.0)
            .map_err(|e| anyhow!("Ed25519 signature verification failed: {}", e))
    }
}

impl From<&Ed25519PrivateKey> for Ed25519PublicKey {
    fn from(private_key: &Ed25519PrivateKey) -> Self {
        Ed25519PublicKey(PublicKey::from(&private_key.0))
    }
}

impl TryFrom<&[u8]> for Ed25519PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Ed25519PublicKey, CryptoMaterialError> {
        if bytes.len() != ED25519_PUBLIC_KEY_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        PublicKey::from_bytes(bytes)
            .map(Ed25519PublicKey)
            .map_err(|_| CryptoMaterialError::DeserializationError)
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self)
    }
}

impl Ed25519Signature {
    /// Serialize an Ed25519Signature.
    pub fn to_bytes(&self) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.0.to_bytes()
    }
}

impl TryFrom<&[u8]> for Ed25519Signature {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Ed25519Signature, CryptoMaterialError> {
        if bytes.len() != ED25519_SIGNATURE_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        Signature::try_from(bytes)
            .map(Ed25519Signature)
            .map_err(|_| CryptoMaterialError::DeserializationError)
    }
}

impl fmt::Display for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.to_bytes()))
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ed25519Signature({})", self)
    }
}

// Keys and signatures are `0x` hex strings in human readable formats and
// length-prefixed byte vectors in BCS.
macro_rules! serde_key_material {
    ($name:ident) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_string())
                } else {
                    serializer.serialize_bytes(&self.to_bytes())
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let bytes = if deserializer.is_human_readable() {
                    let encoded = <String>::deserialize(deserializer)?;
                    let encoded = encoded.strip_prefix("0x").unwrap_or(&encoded);
                    hex::decode(encoded).map_err(D::Error::custom)?
                } else {
                    <Vec<u8>>::deserialize(deserializer)?
                };
                $name::try_from(bytes.as_slice()).map_err(D::Error::custom)
            }
        }
    };
}

serde_key_material!(Ed25519PublicKey);
serde_key_material!(Ed25519Signature);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[derive(Serialize)]
    struct TestMessage(String);

    impl CryptoHash for TestMessage {
        const HASHER_NAME: &'static str = "TestMessage";
    }

    fn key() -> Ed25519PrivateKey {
        let mut rng: StdRng = SeedableRng::from_seed([7; 32]);
        Ed25519PrivateKey::generate(&mut rng)
    }

    #[test]
    fn test_sign_and_verify_struct() {
        let private_key = key();
        let public_key = private_key.public_key();
        let message = TestMessage("hello".to_string());
        let signature = private_key.sign(&message).unwrap();

        assert!(public_key.verify_struct_signature(&message, &signature).is_ok());
        assert!(
            public_key
                .verify_struct_signature(&TestMessage("bye".to_string()), &signature)
                .is_err()
        );
        // Salted and raw messages are not interchangeable.
        assert!(
            public_key
                .verify_arbitrary_msg(&bcs::to_bytes(&message).unwrap(), &signature)
                .is_err()
        );
    }

    #[test]
    fn test_encoded_string_round_trip() {
        let private_key = key();
        let encoded = private_key.to_encoded_string();
        assert!(encoded.starts_with("0x"));
        assert_eq!(encoded.len(), 2 + 2 * ED25519_PRIVATE_KEY_LENGTH);

        let decoded = Ed25519PrivateKey::from_encoded_string(&encoded).unwrap();
        assert_eq!(decoded.public_key(), private_key.public_key());
        let decoded = Ed25519PrivateKey::from_encoded_string(&encoded[2..]).unwrap();
        assert_eq!(decoded.to_bytes(), private_key.to_bytes());
    }

    #[test]
    fn test_wrong_lengths() {
        assert_eq!(
            Ed25519PrivateKey::try_from(&[0u8; 31][..]).unwrap_err(),
            CryptoMaterialError::WrongLengthError
        );
        assert_eq!(
            Ed25519PublicKey::try_from(&[0u8; 33][..]).unwrap_err(),
            CryptoMaterialError::WrongLengthError
        );
        assert_eq!(
            Ed25519Signature::try_from(&[0u8; 63][..]).unwrap_err(),
            CryptoMaterialError::WrongLengthError
        );
        assert_eq!(
            Ed25519PrivateKey::from_encoded_string("0xnothex").unwrap_err(),
            CryptoMaterialError::DeserializationError
        );
    }

    #[test]
    fn test_bcs_and_json_encodings() {
        let public_key = key().public_key();
        let bcs_bytes = bcs::to_bytes(&public_key).unwrap();
        assert_eq!(bcs_bytes[0], ED25519_PUBLIC_KEY_LENGTH as u8);
        assert_eq!(&bcs_bytes[1..], &public_key.to_bytes());
        assert_eq!(
            bcs::from_bytes::<Ed25519PublicKey>(&bcs_bytes).unwrap(),
            public_key
        );

        let json = serde_json::to_value(public_key).unwrap();
        assert_eq!(json, serde_json::json!(public_key.to_string()));
        assert_eq!(
            serde_json::from_value::<Ed25519PublicKey>(json).unwrap(),
            public_key
        );

        let signature = key().sign_arbitrary_message(b"payload");
        let bcs_bytes = bcs::to_bytes(&signature).unwrap();
        assert_eq!(bcs_bytes[0], ED25519_SIGNATURE_LENGTH as u8);
        assert_eq!(bcs_bytes.len(), 1 + ED25519_SIGNATURE_LENGTH);
    }

    #[test]
    fn test_debug_hides_private_key() {
        let private_key = key();
        let debug = format!("{:?}", private_key);
        assert!(!debug.contains(&hex::encode(private_key.to_bytes())));
    }
}

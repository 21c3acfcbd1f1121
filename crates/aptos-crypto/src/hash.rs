// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

//! This module defines the 32-byte SHA3-256 [`HashValue`] and the domain-separated
//! hashing used for everything Aptos signs or commits to.
//!
//! Every hashable type gets its own salt: the SHA3-256 digest of `APTOS::` followed
//! by the type name. The salt is prepended to the BCS bytes of the value before
//! hashing or signing, so that two types can never produce the same message.

use crate::CryptoMaterialError;
use serde::Serialize;
use sha3::{Digest, Sha3_256};
use std::{fmt, str::FromStr};

/// A prefix used to begin the salt of every hashable structure.
pub const HASH_PREFIX: &[u8] = b"APTOS::";

/// Output value of our hash function. Intentionally opaque for safety and modularity.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HashValue {
    hash: [u8; HashValue::LENGTH],
}

impl HashValue {
    /// The length of the hash in bytes.
    pub const LENGTH: usize = 32;

    /// Create a new [`HashValue`] from a byte array.
    pub fn new(hash: [u8; HashValue::LENGTH]) -> Self {
        HashValue { hash }
    }

    /// Create from a slice (e.g. retrieved from storage).
    pub fn from_slice<T: AsRef<[u8]>>(bytes: T) -> Result<Self, CryptoMaterialError> {
        <[u8; Self::LENGTH]>::try_from(bytes.as_ref())
            .map_err(|_| CryptoMaterialError::WrongLengthError)
            .map(Self::new)
    }

    /// Convenience function that computes a `HashValue` internally equal to
    /// the sha3_256 of a byte buffer.
    pub fn sha3_256_of(buffer: &[u8]) -> Self {
        let mut sha3 = Sha3_256::new();
        sha3.update(buffer);
        HashValue::from_slice(sha3.finalize().as_slice()).unwrap_or_default()
    }

    /// Parse a given hex string to a hash value. An optional `0x` prefix is accepted.
    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, CryptoMaterialError> {
        let hex = hex.as_ref();
        let hex = hex.strip_prefix(b"0x").unwrap_or(hex);
        decode_hash_hex(hex).map(Self::new)
    }

    /// Dumps into a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    /// Returns the inner byte array.
    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.hash
    }

    /// Full lowercase hex, without a prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.hash)
    }

    /// Full lowercase hex with a leading `0x`, as the REST API prints it.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", self.to_hex())
    }
}

fn decode_hash_hex(hex: &[u8]) -> Result<[u8; HashValue::LENGTH], CryptoMaterialError> {
    let mut out = [0u8; HashValue::LENGTH];
    hex::decode_to_slice(hex, &mut out).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { .. } => CryptoMaterialError::DeserializationError,
        _ => CryptoMaterialError::WrongLengthError,
    })?;
    Ok(out)
}

impl AsRef<[u8; HashValue::LENGTH]> for HashValue {
    fn as_ref(&self) -> &[u8; HashValue::LENGTH] {
        &self.hash
    }
}

impl FromStr for HashValue {
    type Err = CryptoMaterialError;

    fn from_str(s: &str) -> Result<Self, CryptoMaterialError> {
        HashValue::from_hex(s)
    }
}

impl fmt::LowerHex for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        for byte in &self.hash {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HashValue(")?;
        <Self as fmt::LowerHex>::fmt(self, f)?;
        write!(f, ")")
    }
}

/// Will print the full hash in lowercase hex, without a prefix.
impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        <Self as fmt::LowerHex>::fmt(self, f)
    }
}

/// A SHA3-256 hasher salted with the name of the type being hashed.
#[derive(Clone)]
pub struct DefaultHasher {
    state: Sha3_256,
}

impl DefaultHasher {
    /// The salt for a type: `sha3_256("APTOS::" ++ type_name)`.
    pub fn prefixed_hash(type_name: &str) -> [u8; HashValue::LENGTH] {
        let mut sha3 = Sha3_256::new();
        sha3.update(HASH_PREFIX);
        sha3.update(type_name.as_bytes());
        *HashValue::from_slice(sha3.finalize().as_slice())
            .unwrap_or_default()
            .as_bytes()
    }

    /// Initialize a new hasher already seeded with the salt of `type_name`.
    pub fn new(type_name: &str) -> Self {
        let mut state = Sha3_256::new();
        state.update(Self::prefixed_hash(type_name));
        DefaultHasher { state }
    }

    /// Write bytes into the hasher.
    pub fn update(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    /// Computes the final digest.
    pub fn finish(self) -> HashValue {
        HashValue::from_slice(self.state.finalize().as_slice()).unwrap_or_default()
    }
}

/// A type that is signed or hashed as `salt(HASHER_NAME) ++ bcs(self)`.
pub trait CryptoHash: Serialize {
    /// The type name that seeds the salt. Must match the on-chain name of the type.
    const HASHER_NAME: &'static str;

    /// Hashes the BCS bytes of `self` under its salt.
    fn hash(&self) -> Result<HashValue, CryptoMaterialError> {
        let bytes = bcs::to_bytes(self).map_err(|_| CryptoMaterialError::SerializationError)?;
        let mut hasher = DefaultHasher::new(Self::HASHER_NAME);
        hasher.update(&bytes);
        Ok(hasher.finish())
    }
}

/// Returns the bytes a signer commits to for `message`: its salt followed by its BCS bytes.
pub fn signing_message<T: CryptoHash>(message: &T) -> Result<Vec<u8>, CryptoMaterialError> {
    let mut bytes = DefaultHasher::prefixed_hash(T::HASHER_NAME).to_vec();
    bcs::serialize_into(&mut bytes, message)
        .map_err(|_| CryptoMaterialError::SerializationError)?;
    Ok(bytes)
}

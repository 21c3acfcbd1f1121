// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use rand::{rngs::OsRng, RngCore};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A struct that represents an account address.
#[derive(Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct AccountAddress([u8; AccountAddress::LENGTH]);

impl AccountAddress {
    /// The number of bytes in an address.
    pub const LENGTH: usize = 32;
    /// Hex address: 0x1
    pub const ONE: Self = Self::get_hex_address_one();
    /// Hex address: 0x3
    pub const THREE: Self = Self::get_hex_address_three();
    /// Hex address: 0x0
    pub const ZERO: Self = Self([0u8; Self::LENGTH]);

    pub const fn new(address: [u8; Self::LENGTH]) -> Self {
        Self(address)
    }

    const fn get_hex_address_one() -> Self {
        let mut addr = [0u8; AccountAddress::LENGTH];
        addr[AccountAddress::LENGTH - 1] = 1u8;
        Self(addr)
    }

    const fn get_hex_address_three() -> Self {
        let mut addr = [0u8; AccountAddress::LENGTH];
        addr[AccountAddress::LENGTH - 1] = 3u8;
        Self(addr)
    }

    pub fn random() -> Self {
        let mut buf = [0u8; Self::LENGTH];
        OsRng.fill_bytes(&mut buf);
        Self(buf)
    }

    /// Special addresses are `0x0` through `0xf`: all leading bytes zero and a last byte
    /// below `0x10`. They are the only addresses printed in short form.
    pub fn is_special(&self) -> bool {
        self.0[..Self::LENGTH - 1].iter().all(|x| *x == 0) && self.0[Self::LENGTH - 1] < 0x10
    }

    /// Represent an account address in a way that is compatible with the AIP-40 standard:
    /// special addresses in short form (`0x1`), every other address as `0x` plus 64 hex digits.
    pub fn to_standard_string(&self) -> String {
        if self.is_special() {
            format!("0x{:x}", self.0[Self::LENGTH - 1])
        } else {
            self.to_hex_literal()
        }
    }

    /// The shortest hex form without leading zeros, e.g. `1` for `0x1`.
    pub fn short_str_lossless(&self) -> String {
        let hex_str = hex::encode(self.0).trim_start_matches('0').to_string();
        if hex_str.is_empty() {
            "0".to_string()
        } else {
            hex_str
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    pub fn into_bytes(self) -> [u8; Self::LENGTH] {
        self.0
    }

    /// Parses `0x`-prefixed hex of any length up to 64 digits; short forms are left-padded.
    pub fn from_hex_literal(literal: &str) -> Result<Self, AccountAddressParseError> {
        let hex = literal
            .strip_prefix("0x")
            .ok_or(AccountAddressParseError::LeadingZeroXRequired)?;
        Self::from_short_hex(hex)
    }

    /// Full `0x`-prefixed hex, always 64 digits.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Parses exactly 64 hex digits, no prefix.
    pub fn from_hex<T: AsRef<[u8]>>(hex: T) -> Result<Self, AccountAddressParseError> {
        let mut out = [0u8; Self::LENGTH];
        hex::decode_to_slice(hex, &mut out).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { .. } => AccountAddressParseError::InvalidHex,
            _ => AccountAddressParseError::IncorrectNumberOfBytes,
        })?;
        Ok(Self(out))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> Result<Self, AccountAddressParseError> {
        <[u8; Self::LENGTH]>::try_from(bytes.as_ref())
            .map_err(|_| AccountAddressParseError::IncorrectNumberOfBytes)
            .map(Self)
    }

    fn from_short_hex(hex: &str) -> Result<Self, AccountAddressParseError> {
        if hex.is_empty() {
            return Err(AccountAddressParseError::Empty);
        }
        if hex.len() > Self::LENGTH * 2 {
            return Err(AccountAddressParseError::TooLong(hex.len()));
        }
        let padded = format!("{:0>width$}", hex, width = Self::LENGTH * 2);
        Self::from_hex(padded)
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; AccountAddress::LENGTH]> for AccountAddress {
    fn from(bytes: [u8; AccountAddress::LENGTH]) -> Self {
        Self::new(bytes)
    }
}

impl From<AccountAddress> for [u8; AccountAddress::LENGTH] {
    fn from(addr: AccountAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_standard_string())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::LowerHex for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            write!(f, "0x")?;
        }
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Accepts addresses with or without the `0x` prefix, in short or long form.
impl FromStr for AccountAddress {
    type Err = AccountAddressParseError;

    fn from_str(s: &str) -> Result<Self, AccountAddressParseError> {
        let trimmed = s.trim();
        Self::from_short_hex(trimmed.strip_prefix("0x").unwrap_or(trimmed))
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = <String>::deserialize(deserializer)?;
            AccountAddress::from_str(&s).map_err(D::Error::custom)
        } else {
            // In order to preserve the Serde data model and help analysis tools,
            // make sure to wrap our value in a container with the same name
            // as the original type.
            #[derive(::serde::Deserialize)]
            #[serde(rename = "AccountAddress")]
            struct Value([u8; AccountAddress::LENGTH]);

            let value = Value::deserialize(deserializer)?;
            Ok(AccountAddress::new(value.0))
        }
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            self.to_hex_literal().serialize(serializer)
        } else {
            // See comment in deserialize.
            serializer.serialize_newtype_struct("AccountAddress", &self.0)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum AccountAddressParseError {
    #[error("Hex characters are invalid")]
    InvalidHex,
    #[error("Hex string is too long: {0} > 64")]
    TooLong(usize),
    #[error("Hex string is empty")]
    Empty,
    #[error("Hex literal must start with 0x")]
    LeadingZeroXRequired,
    #[error("Address must be exactly 32 bytes")]
    IncorrectNumberOfBytes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err_eq, assert_ok_eq};

    const LONG: &str = "0xca843279e3427144cead5e4d5999a3d0ca843279e3427144cead5e4d5999a3d0";

    #[test]
    fn test_short_and_long_forms() {
        assert_ok_eq!(AccountAddress::from_str("0x1"), AccountAddress::ONE);
        assert_ok_eq!(AccountAddress::from_str("1"), AccountAddress::ONE);
        assert_ok_eq!(AccountAddress::from_str("0x03"), AccountAddress::THREE);
        assert_ok_eq!(
            AccountAddress::from_str(&format!("0x{}", "0".repeat(63) + "1")),
            AccountAddress::ONE
        );

        let addr = AccountAddress::from_str(LONG).unwrap();
        assert_eq!(addr.to_hex_literal(), LONG);
        assert_eq!(AccountAddress::from_str(&LONG[2..]).unwrap(), addr);
    }

    #[test]
    fn test_standard_string() {
        assert_eq!(AccountAddress::ONE.to_string(), "0x1");
        assert_eq!(AccountAddress::ZERO.to_string(), "0x0");
        assert_eq!(
            AccountAddress::from_str("0xf").unwrap().to_string(),
            "0xf"
        );
        // 0x10 is not special and prints in long form.
        assert_eq!(
            AccountAddress::from_str("0x10").unwrap().to_string(),
            format!("0x{}10", "0".repeat(62))
        );
        assert_eq!(AccountAddress::from_str(LONG).unwrap().to_string(), LONG);
        assert_eq!(AccountAddress::ONE.short_str_lossless(), "1");
        assert_eq!(AccountAddress::ZERO.short_str_lossless(), "0");
    }

    #[test]
    fn test_parse_errors() {
        assert_err_eq!(AccountAddress::from_str(""), AccountAddressParseError::Empty);
        assert_err_eq!(AccountAddress::from_str("0x"), AccountAddressParseError::Empty);
        assert_err_eq!(
            AccountAddress::from_str(&format!("0x{}", "1".repeat(65))),
            AccountAddressParseError::TooLong(65)
        );
        assert_err_eq!(
            AccountAddress::from_str("0xgg"),
            AccountAddressParseError::InvalidHex
        );
        assert_err_eq!(
            AccountAddress::from_hex_literal("1"),
            AccountAddressParseError::LeadingZeroXRequired
        );
        assert_err_eq!(
            AccountAddress::from_bytes([1u8; 31]),
            AccountAddressParseError::IncorrectNumberOfBytes
        );
    }

    #[test]
    fn test_serde() {
        let addr = AccountAddress::from_str(LONG).unwrap();

        let bytes = bcs::to_bytes(&addr).unwrap();
        assert_eq!(bytes, addr.to_vec());
        assert_eq!(bcs::from_bytes::<AccountAddress>(&bytes).unwrap(), addr);

        let json = serde_json::to_value(addr).unwrap();
        assert_eq!(json, serde_json::json!(LONG));
        assert_eq!(
            serde_json::from_value::<AccountAddress>(serde_json::json!("0x1")).unwrap(),
            AccountAddress::ONE
        );
    }

    #[test]
    fn test_random_addresses_differ() {
        assert_ne!(AccountAddress::random(), AccountAddress::random());
    }
}

// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A string encoded U64
///
/// Encoded as a string to encode into JSON
#[derive(Clone, Debug, Default, Eq, PartialEq, Copy, Hash, PartialOrd, Ord)]
pub struct U64(pub u64);

impl U64 {
    pub fn inner(&self) -> &u64 {
        &self.0
    }
}

impl From<u64> for U64 {
    fn from(d: u64) -> Self {
        Self(d)
    }
}

impl From<U64> for u64 {
    fn from(d: U64) -> Self {
        d.0
    }
}

impl fmt::Display for U64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0)
    }
}

impl FromStr for U64 {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<u64>()?))
    }
}

impl Serialize for U64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.to_string().serialize(serializer)
    }
}

// The API always sends strings, but view functions and older nodes may hand back plain numbers.
impl<'de> Deserialize<'de> for U64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct U64Visitor;

        impl de::Visitor<'_> for U64Visitor {
            type Value = U64;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a u64 encoded as a string or a number")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<U64, E> {
                Ok(U64(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<U64, E> {
                value.parse::<u64>().map(U64).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(U64Visitor)
    }
}

/// A hex encoded handle of an on-chain table, e.g. `0x5d9f...`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableHandle {
    pub handle: String,
}

/// An account resource as returned by `GET /accounts/{address}/resource/{type}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveResource {
    #[serde(rename = "type")]
    pub typ: String,
    pub data: serde_json::Value,
}

// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use anyhow::{format_err, Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A registry of named chain IDs.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NamedChain {
    MAINNET = 1,
    TESTNET = 2,
    DEVNET = 3,
    TESTING = 4,
}

impl NamedChain {
    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn from_chain_id(chain_id: &ChainId) -> Result<NamedChain, String> {
        match chain_id.id() {
            1 => Ok(NamedChain::MAINNET),
            2 => Ok(NamedChain::TESTNET),
            3 => Ok(NamedChain::DEVNET),
            4 => Ok(NamedChain::TESTING),
            id => Err(format!("Not a named chain. Given ID: {:?}", id)),
        }
    }
}

impl fmt::Display for NamedChain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            NamedChain::MAINNET => "mainnet",
            NamedChain::TESTNET => "testnet",
            NamedChain::DEVNET => "devnet",
            NamedChain::TESTING => "testing",
        })
    }
}

impl FromStr for NamedChain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(NamedChain::MAINNET),
            "testnet" => Ok(NamedChain::TESTNET),
            "devnet" => Ok(NamedChain::DEVNET),
            "testing" => Ok(NamedChain::TESTING),
            _ => Err(format_err!("Not a reserved chain: {:?}", s)),
        }
    }
}

/// Note: u7 in a u8 is uleb-compatible, and any usage of this should be aware
/// that this field maybe updated to be uleb64 in the future
#[derive(Clone, Copy, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ChainId(u8);

impl ChainId {
    pub fn new(id: u8) -> Self {
        assert!(id > 0, "cannot have chain ID with 0");
        Self(id)
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn test() -> Self {
        ChainId::new(NamedChain::TESTING.id())
    }

    pub fn mainnet() -> Self {
        ChainId::new(NamedChain::MAINNET.id())
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match NamedChain::from_chain_id(self) {
            Ok(chain) => write!(f, "{}", chain),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(format_err!("Cannot create chain ID from empty string"));
        }
        NamedChain::from_str(s)
            .map(|chain| ChainId::new(chain.id()))
            .or_else(|_err| {
                let value = s.parse::<u8>()?;
                if value == 0 {
                    return Err(format_err!("Chain ID cannot be 0"));
                }
                Ok(ChainId::new(value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_from_str() {
        assert!(ChainId::from_str("").is_err());
        assert!(ChainId::from_str("0").is_err());
        assert!(ChainId::from_str("256").is_err());
        assert_eq!(ChainId::from_str("TESTING").unwrap(), ChainId::test());
        assert_eq!(ChainId::from_str("42").unwrap(), ChainId::new(42));
    }

    #[test]
    fn test_chain_id_display() {
        assert_eq!(ChainId::mainnet().to_string(), "mainnet");
        assert_eq!(ChainId::new(42).to_string(), "42");
        assert_eq!(bcs::to_bytes(&ChainId::new(42)).unwrap(), vec![42]);
    }
}

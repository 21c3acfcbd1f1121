// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Move names as they appear inside transactions: identifiers, module ids and type tags.

use crate::account_address::AccountAddress;
use anyhow::{bail, ensure, format_err, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// An owned identifier: a module, function or struct name.
///
/// Valid identifiers start with a letter, or with `_` followed by at least one more
/// character, and continue with letters, digits and underscores.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Identifier(Box<str>);

impl Identifier {
    pub fn new(s: impl Into<Box<str>>) -> Result<Self> {
        let s = s.into();
        ensure!(Self::is_valid(&s), "Invalid identifier '{}'", s);
        Ok(Self(s))
    }

    pub fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        let valid_start = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => true,
            Some('_') => !chars.as_str().is_empty(),
            _ => false,
        };
        valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents the initial key into global storage where we first index by the address, and then
/// the struct tag
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModuleId {
    address: AccountAddress,
    name: Identifier,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: Identifier) -> Self {
        ModuleId { address, name }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn address(&self) -> &AccountAddress {
        &self.address
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

impl FromStr for ModuleId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (address, name) = s
            .split_once("::")
            .ok_or_else(|| format_err!("Invalid module id '{}'", s))?;
        Ok(ModuleId::new(address.parse()?, name.parse()?))
    }
}

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: Identifier,
    pub name: Identifier,
    // alias for compatibility with old json serialized data.
    #[serde(rename = "type_args", alias = "type_params")]
    pub type_args: Vec<TypeTag>,
}

impl StructTag {
    pub fn module_id(&self) -> ModuleId {
        ModuleId::new(self.address, self.module.clone())
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)?;
        if let Some((first, rest)) = self.type_args.split_first() {
            write!(f, "<{}", first)?;
            for ty in rest {
                write!(f, ", {}", ty)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}

impl FromStr for StructTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match TypeTag::from_str(s)? {
            TypeTag::Struct(tag) => Ok(*tag),
            other => bail!("Expected a struct type, found '{}'", other),
        }
    }
}

/// The BCS variant order of this enum is part of the transaction format and must not change.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum TypeTag {
    // alias for compatibility with old json serialized data.
    #[serde(rename = "bool", alias = "Bool")]
    Bool,
    #[serde(rename = "u8", alias = "U8")]
    U8,
    #[serde(rename = "u64", alias = "U64")]
    U64,
    #[serde(rename = "u128", alias = "U128")]
    U128,
    #[serde(rename = "address", alias = "Address")]
    Address,
    #[serde(rename = "signer", alias = "Signer")]
    Signer,
    #[serde(rename = "vector", alias = "Vector")]
    Vector(Box<TypeTag>),
    #[serde(rename = "struct", alias = "Struct")]
    Struct(Box<StructTag>),
    #[serde(rename = "u16", alias = "U16")]
    U16,
    #[serde(rename = "u32", alias = "U32")]
    U32,
    #[serde(rename = "u256", alias = "U256")]
    U256,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::U8 => write!(f, "u8"),
            TypeTag::U16 => write!(f, "u16"),
            TypeTag::U32 => write!(f, "u32"),
            TypeTag::U64 => write!(f, "u64"),
            TypeTag::U128 => write!(f, "u128"),
            TypeTag::U256 => write!(f, "u256"),
            TypeTag::Address => write!(f, "address"),
            TypeTag::Signer => write!(f, "signer"),
            TypeTag::Vector(ty) => write!(f, "vector<{}>", ty),
            TypeTag::Struct(tag) => write!(f, "{}", tag),
        }
    }
}

/// Parses `u64`, `vector<u8>`, `0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>` and
/// any nesting of those.
impl FromStr for TypeTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parser = TypeTagParser { input: s, pos: 0 };
        let tag = parser.parse_type()?;
        parser.skip_whitespace();
        ensure!(
            parser.pos == s.len(),
            "Unexpected trailing input '{}' in type '{}'",
            &s[parser.pos..],
            s
        );
        Ok(tag)
    }
}

struct TypeTagParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TypeTagParser<'a> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        ensure!(
            self.eat(token),
            "Expected '{}' at position {} in type '{}'",
            token,
            self.pos,
            self.input
        );
        Ok(())
    }

    fn word(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        ensure!(len > 0, "Expected a name at position {} in type '{}'", self.pos, self.input);
        let input = self.input;
        let start = self.pos;
        self.pos += len;
        Ok(&input[start..self.pos])
    }

    fn parse_type(&mut self) -> Result<TypeTag> {
        let tag = match self.word()? {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            "vector" => {
                self.expect("<")?;
                let inner = self.parse_type()?;
                self.expect(">")?;
                TypeTag::Vector(Box::new(inner))
            },
            address => {
                let address = AccountAddress::from_str(address)?;
                self.expect("::")?;
                let module = Identifier::new(self.word()?)?;
                self.expect("::")?;
                let name = Identifier::new(self.word()?)?;
                let mut type_args = vec![];
                if self.eat("<") {
                    loop {
                        type_args.push(self.parse_type()?);
                        if !self.eat(",") {
                            break;
                        }
                    }
                    self.expect(">")?;
                }
                TypeTag::Struct(Box::new(StructTag {
                    address,
                    module,
                    name,
                    type_args,
                }))
            },
        };
        Ok(tag)
    }
}

// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! The crypto material used by Aptos clients: ed25519 keys and signatures, and the
//! salted SHA3-256 hashing that every signed structure goes through.

pub mod ed25519;
pub mod error;
pub mod hash;

pub use error::CryptoMaterialError;
pub use hash::HashValue;

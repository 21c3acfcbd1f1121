// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The Aptos Rust SDK: local accounts, transaction construction and thin clients for the
//! coin and token v1 modules on top of the REST API.

#![forbid(unsafe_code)]

pub mod coin_client;
pub mod token_client;
pub mod transaction_builder;
pub mod types;

pub use aptos_api_types as api_types;
pub use aptos_cached_packages as cached_packages;
pub use aptos_crypto as crypto;
pub use aptos_rest_client as rest_client;
pub use bcs;

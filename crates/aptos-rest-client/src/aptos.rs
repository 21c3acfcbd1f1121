// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use aptos_api_types::U64;
use serde::{Deserialize, Serialize};

/// Fully qualified type of the native coin.
pub const APTOS_COIN_TYPE: &str = "0x1::aptos_coin::AptosCoin";
/// View function returning the coin balance of an account.
pub const COIN_BALANCE_FUNCTION: &str = "0x1::coin::balance";

#[derive(Debug, Serialize, Deserialize)]
pub struct AptosCoin {
    pub value: U64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Balance {
    pub coin: AptosCoin,
}

impl Balance {
    pub fn new(value: u64) -> Self {
        Self {
            coin: AptosCoin { value: U64(value) },
        }
    }

    pub fn get(&self) -> u64 {
        *self.coin.value.inner()
    }
}

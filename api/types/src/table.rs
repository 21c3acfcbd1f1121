// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Table Item request for the GetTableItem API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableItemRequest {
    /// The Move type of the table item's key, e.g. `0x1::string::String`
    pub key_type: String,
    /// The Move type of the table item's value
    pub value_type: String,
    /// The value of the table item's key
    pub key: Value,
}

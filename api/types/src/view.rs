// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// View request for the Move View Function API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRequest {
    /// Entry function id, e.g. `0x1::coin::balance`
    pub function: String,
    /// Type arguments of the function
    pub type_arguments: Vec<String>,
    /// Arguments of the function
    pub arguments: Vec<serde_json::Value>,
}

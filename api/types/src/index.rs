// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::LedgerInfo;
use serde::{Deserialize, Serialize};

// The data in IndexResponse is flattened into a single JSON map to offer
// easier parsing for clients.

/// The struct holding all data returned to the client by the
/// index endpoint (i.e., GET "/").
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct IndexResponse {
    #[serde(flatten)]
    pub ledger_info: LedgerInfo,
    /// `full_node` or `validator`
    pub node_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_hash: Option<String>,
}

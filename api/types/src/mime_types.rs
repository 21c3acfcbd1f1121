// Copyright © Aptos Foundation
// Parts of the project are originally copyright © Meta Platforms, Inc.
// SPDX-License-Identifier: Apache-2.0

/// MIME type to submit BCS transactions
pub const BCS_SIGNED_TRANSACTION: &str = "application/x.aptos.signed_transaction+bcs";

/// MIME type to submit JSON transactions and get JSON output
pub const JSON: &str = "application/json";

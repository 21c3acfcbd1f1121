// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use aptos_types::{
    account_address::AccountAddress,
    language_storage::{Identifier, ModuleId, TypeTag},
    transaction::{EntryFunction, TransactionPayload},
};

pub mod aptos_framework_sdk_builder;
pub mod aptos_token_sdk_builder;

/// Wraps a call to `address::module::function` into a payload. `args` must already be BCS
/// encoded, one entry per parameter.
pub(crate) fn entry_function_payload(
    address: AccountAddress,
    module: &str,
    function: &str,
    ty_args: Vec<TypeTag>,
    args: Vec<Vec<u8>>,
) -> Result<TransactionPayload> {
    Ok(TransactionPayload::EntryFunction(EntryFunction::new(
        ModuleId::new(address, Identifier::new(module)?),
        Identifier::new(function)?,
        ty_args,
        args,
    )))
}

/// Returns the entry function behind `payload` if it calls `address::module::function`.
pub(crate) fn match_entry_function<'a>(
    payload: &'a TransactionPayload,
    address: AccountAddress,
    module: &str,
    function: &str,
) -> Option<&'a EntryFunction> {
    let entry_function = payload.entry_function();
    let module_id = entry_function.module();
    (*module_id.address() == address
        && module_id.name().as_str() == module
        && entry_function.function().as_str() == function)
        .then_some(entry_function)
}

// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while constructing or parsing cryptographic material.

use thiserror::Error;

/// An error type for key and signature validation issues, see [`ValidCryptoMaterial`].
///
/// [`ValidCryptoMaterial`]: crate::ValidCryptoMaterial
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CryptoMaterialError {
    /// Key or signature material does not deserialize correctly.
    #[error("DeserializationError")]
    DeserializationError,
    /// Key or signature material deserializes, but is otherwise not valid.
    #[error("ValidationError")]
    ValidationError,
    /// Key, threshold or signature material does not have the expected size.
    #[error("WrongLengthError")]
    WrongLengthError,
    /// BCS serialization of the value to sign failed.
    #[error("SerializationError")]
    SerializationError,
}

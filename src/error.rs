// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `HomGar` library.
//!
//! Status decoding is deliberately forgiving: a malformed field leaves that
//! field unset and sibling fields keep decoding, and the router never aborts
//! a poll batch over a single bad entry. Unknown tag bytes and unknown model
//! codes are diagnostics, not errors; the encoding is reverse-engineered and
//! new firmware introduces new ones.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A status value failed to decode.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// JSON parsing of an API payload failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors produced while decoding a single status value.
///
/// None of these are fatal to a poll cycle: the router records them and
/// carries on with the remaining entries and devices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A field inside a status value does not match its expected grammar.
    ///
    /// The field is left unset; sibling fields in the same value keep
    /// decoding.
    #[error("malformed {field} field: {value:?}")]
    MalformedField {
        /// Name of the field that failed to decode.
        field: &'static str,
        /// The raw text that did not match the grammar.
        value: String,
    },

    /// The overall shape of a status value is wrong (missing separator,
    /// bad hex, truncated tag value). The whole entry is rejected.
    #[error("invalid status envelope: {0}")]
    InvalidEnvelope(String),

    /// A bit-packed timestamp value does not encode a valid calendar time.
    #[error("timestamp value {0:#010x} is not a valid calendar time")]
    InvalidTimestamp(u32),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

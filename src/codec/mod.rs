// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Codecs for the vendor's ad-hoc status value encodings.
//!
//! Most devices report status as a compact string built from the shared
//! `"cur(dmax/dmin/trend)"` statistics grammar ([`stats`]); the water flow
//! meter instead reports a hex blob of tagged little-endian fields
//! ([`tagged`]).

pub mod stats;
pub mod tagged;

pub use stats::{StatsTriplet, parse_general_status, tenths_f_to_mk};
pub use tagged::{TaggedField, TaggedRecord, decode_timestamp, parse_tagged_blob};

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The tagged binary grammar used by the water flow meter.
//!
//! Unlike every other device, the flow meter reports its status as a hex
//! blob behind a `10#` marker. The blob starts with a three byte header
//! (unknown, RF signal strength, unknown) followed by a run of fields, each
//! a tag byte and a 4-byte little-endian unsigned integer. `0xFF` bytes
//! between fields are padding and carry no value.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::DecodeError;

/// One `(tag, value)` field from a tagged binary blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedField {
    /// Tag byte identifying the field.
    pub tag: u8,
    /// The 4-byte little-endian value that followed the tag.
    pub value: u32,
}

/// A fully scanned tagged binary blob: header signal strength plus the
/// ordered field list. Interpreting the tags is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRecord {
    /// RF signal strength in dBm, from the header.
    pub rf_rssi: i16,
    /// All non-padding fields, in wire order.
    pub fields: Vec<TaggedField>,
}

/// Parses a `"10#<hex>"` status value into a [`TaggedRecord`].
///
/// Byte 1 of the decoded blob is the RF signal strength in dBm, encoded
/// as the two's-complement negation of the byte value (`0xCE` means
/// -50 dBm, `0xFF` means -1 dBm). The field walk starts at byte 3 and
/// runs to the end of the blob.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidEnvelope`] if the `#` separator is
/// missing, the hex portion is not valid even-length hex, the blob is
/// shorter than its header, or a tag's 4 value bytes are truncated.
pub fn parse_tagged_blob(raw: &str) -> Result<TaggedRecord, DecodeError> {
    let Some((_, blob)) = raw.split_once('#') else {
        return Err(DecodeError::InvalidEnvelope(format!(
            "missing '#' separator in {raw:?}"
        )));
    };
    let bytes = hex::decode(blob)
        .map_err(|e| DecodeError::InvalidEnvelope(format!("bad hex blob: {e}")))?;
    if bytes.len() < 3 {
        return Err(DecodeError::InvalidEnvelope(format!(
            "blob of {} bytes is shorter than its header",
            bytes.len()
        )));
    }

    // Two's-complement negation: byte value v maps to -((-v) & 0xFF).
    let rf_rssi = -i16::from(bytes[1].wrapping_neg());

    let mut fields = Vec::new();
    let mut idx = 3;
    while idx < bytes.len() {
        let tag = bytes[idx];
        idx += 1;
        if tag == 0xFF {
            continue;
        }
        let Some(&[b0, b1, b2, b3]) = bytes.get(idx..idx + 4) else {
            return Err(DecodeError::InvalidEnvelope(format!(
                "truncated value for tag {tag:#04x}"
            )));
        };
        let value = u32::from_le_bytes([b0, b1, b2, b3]);
        idx += 4;
        fields.push(TaggedField { tag, value });
    }

    Ok(TaggedRecord { rf_rssi, fields })
}

/// Decodes the bit-packed timestamp carried by tag `0xB7`.
///
/// Layout, least significant bits first: 6 bits second, 6 bits minute,
/// 5 bits hour, 5 bits day, 4 bits month, 6 bits year offset from 2020.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidTimestamp`] if the extracted fields do not
/// form a valid calendar date and time.
pub fn decode_timestamp(value: u32) -> Result<NaiveDateTime, DecodeError> {
    let sec = value & 0x3F;
    let min = (value >> 6) & 0x3F;
    let hour = (value >> 12) & 0x1F;
    let day = (value >> 17) & 0x1F;
    let month = (value >> 22) & 0xF;
    let year = ((value >> 26) & 0x3F) + 2020;

    i32::try_from(year)
        .ok()
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .ok_or(DecodeError::InvalidTimestamp(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Observed on a real Water Flow Meter.
    const OBSERVED_BLOB: &str = "10#E1CE00FF0B00000000DC01990000B7D9E66A16FF0700000000AF000000009F07000000FF0A02000000CB07000000B307000000";

    #[test]
    fn parse_observed_blob() {
        let record = parse_tagged_blob(OBSERVED_BLOB).unwrap();
        assert_eq!(record.rf_rssi, -50);

        let tags: Vec<u8> = record.fields.iter().map(|f| f.tag).collect();
        assert_eq!(
            tags,
            vec![0x0B, 0xDC, 0xB7, 0x07, 0xAF, 0x9F, 0x0A, 0xCB, 0xB3]
        );

        // Little-endian values
        assert_eq!(record.fields[1].value, 0x0000_9901);
        assert_eq!(record.fields[2].value, 0x166A_E6D9);
        assert_eq!(record.fields[8].value, 7);
    }

    #[test]
    fn padding_bytes_are_skipped() {
        // header + FF + one field + FF
        let record = parse_tagged_blob("10#00CE00FF0701000000FF").unwrap();
        assert_eq!(record.fields, vec![TaggedField { tag: 0x07, value: 1 }]);
    }

    #[test]
    fn rssi_wrapping_negation() {
        assert_eq!(parse_tagged_blob("10#00CE00").unwrap().rf_rssi, -50);
        assert_eq!(parse_tagged_blob("10#000000").unwrap().rf_rssi, 0);
        // -((-0xFF) & 0xFF) is -1, not -255
        assert_eq!(parse_tagged_blob("10#00FF00").unwrap().rf_rssi, -1);
        assert_eq!(parse_tagged_blob("10#000100").unwrap().rf_rssi, -255);
    }

    #[test]
    fn missing_separator() {
        assert!(matches!(
            parse_tagged_blob("E1CE00"),
            Err(DecodeError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn odd_length_hex() {
        assert!(matches!(
            parse_tagged_blob("10#E1CE0"),
            Err(DecodeError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn invalid_hex_digits() {
        assert!(matches!(
            parse_tagged_blob("10#E1CEZZ"),
            Err(DecodeError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn truncated_tag_value() {
        assert!(matches!(
            parse_tagged_blob("10#00CE000701"),
            Err(DecodeError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn blob_shorter_than_header() {
        assert!(matches!(
            parse_tagged_blob("10#E1"),
            Err(DecodeError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn decode_observed_timestamp() {
        // Tag 0xB7 value from the observed blob: bytes D9 E6 6A 16.
        let ts = decode_timestamp(0x166A_E6D9).unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2025, 9, 21)
                .unwrap()
                .and_hms_opt(14, 27, 25)
                .unwrap()
        );
    }

    #[test]
    fn decode_timestamp_rejects_invalid_calendar() {
        // Month and day bits all zero cannot form a date.
        assert_eq!(
            decode_timestamp(0),
            Err(DecodeError::InvalidTimestamp(0))
        );
    }
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The shared `"cur(dmax/dmin/trend)"` statistics grammar and the general
//! status prefix common to all string-encoded devices.

use serde::Serialize;

use crate::error::DecodeError;

/// A parsed `"cur(dmax/dmin/trend)"` statistics value.
///
/// Several measurement fields (temperature, humidity, pressure, rainfall)
/// share this encoding: the current reading followed by the daily maximum,
/// daily minimum and a trend indicator in parentheses.
///
/// # Examples
///
/// ```
/// use homgar_lib::StatsTriplet;
///
/// let t = StatsTriplet::parse("781(781/723/1)").unwrap();
/// assert_eq!(t.current, 781);
/// assert_eq!(t.daily_max, 781);
/// assert_eq!(t.daily_min, 723);
/// assert_eq!(t.trend, 1);
///
/// assert!(StatsTriplet::parse("781(781/723)").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsTriplet {
    /// Current reading.
    pub current: i64,
    /// Daily maximum.
    pub daily_max: i64,
    /// Daily minimum.
    pub daily_min: i64,
    /// Trend indicator (meaning beyond "present" is unverified).
    pub trend: i64,
}

impl StatsTriplet {
    /// Parses a `"cur(dmax/dmin/trend)"` value.
    ///
    /// All four fields must be non-negative integers and the string must
    /// match the grammar exactly; any mismatch returns `None` so the caller
    /// can leave the measurement unset and keep decoding.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (current, rest) = s.split_once('(')?;
        let inner = rest.strip_suffix(')')?;
        let mut parts = inner.split('/');
        let triplet = Self {
            current: parse_digits(current)?,
            daily_max: parse_digits(parts.next()?)?,
            daily_min: parse_digits(parts.next()?)?,
            trend: parse_digits(parts.next()?)?,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(triplet)
    }

    /// Applies a conversion to all four values, e.g. the tenths-°F to
    /// milli-Kelvin rule for temperature triplets.
    #[must_use]
    pub fn map(self, f: impl Fn(i64) -> i64) -> Self {
        Self {
            current: f(self.current),
            daily_max: f(self.daily_max),
            daily_min: f(self.daily_min),
            trend: f(self.trend),
        }
    }
}

/// Parses a string of one or more ASCII digits.
///
/// Stricter than `str::parse`: rejects signs, whitespace and empty input,
/// matching the `\d+` captures of the vendor grammar.
fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Converts a raw tenths-of-Fahrenheit reading to milli-Kelvin.
///
/// Satisfies `tenths_f_to_mk(320) == 273_150` (32.0 °F is 273.15 K).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn tenths_f_to_mk(raw: i64) -> i64 {
    // Safe: sensor readings are far inside f64 precision range.
    (1000.0 * ((raw as f64 * 0.1 - 32.0) * 5.0 / 9.0 + 273.15)).round() as i64
}

/// Parses the general status prefix shared by all string-encoded devices.
///
/// The prefix has three comma-separated fields `a,rssi,b`. Only the middle
/// field, the RF signal strength in dBm, is retained. The first and last
/// fields are accepted but discarded; observed values are always `1` and
/// their meaning is unverified, presumably battery or connection state.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedField`] if the field count is not three
/// or the middle field is not an integer.
pub fn parse_general_status(s: &str) -> Result<i32, DecodeError> {
    let parts: Vec<&str> = s.split(',').collect();
    let [_, rssi, _] = parts.as_slice() else {
        return Err(DecodeError::MalformedField {
            field: "general status",
            value: s.to_string(),
        });
    };
    rssi.parse().map_err(|_| DecodeError::MalformedField {
        field: "rf_rssi",
        value: (*rssi).to_string(),
    })
}

// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub device status state.

use std::fmt;

use serde::Serialize;

use crate::codec::stats::{StatsTriplet, tenths_f_to_mk};
use crate::error::DecodeError;

/// Status state of a hub, one variant per supported hub kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HubState {
    /// Irrigation display hub with built-in climate sensors.
    Display(DisplayHubState),
    /// Mini box hub; carries no device-specific status payload.
    MiniBox,
    /// Fallback for unrecognized hub model codes. Only the common fields
    /// (RF signal, connection) are tracked so new hardware still surfaces.
    Generic,
}

impl HubState {
    /// Human-readable device-kind description.
    #[must_use]
    pub fn friendly_desc(&self) -> &'static str {
        match self {
            Self::Display(_) => "Irrigation Display Hub",
            Self::MiniBox => "Mini Box Hub",
            Self::Generic => "Unknown HomGar hub",
        }
    }
}

/// Decoded status of the irrigation display hub.
///
/// Besides the shared climate triplets, the display hub reports its WiFi
/// uplink through two extra status channels: `"state"` carries battery
/// state and WiFi signal, `"connected"` a boolean connection flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayHubState {
    /// Whether the hub is connected to the cloud.
    pub connected: Option<bool>,
    /// Battery state as reported by the `"state"` channel.
    pub battery_state: Option<i32>,
    /// WiFi signal strength as reported by the `"state"` channel.
    pub wifi_rssi: Option<i32>,
    /// Temperature in milli-Kelvin.
    pub temperature_mk: Option<StatsTriplet>,
    /// Relative humidity in percent.
    pub humidity_percent: Option<StatsTriplet>,
    /// Atmospheric pressure in Pa.
    pub pressure_pa: Option<StatsTriplet>,
}

impl DisplayHubState {
    /// Decodes the device-specific part of a `"D01"` value.
    ///
    /// Observed example:
    /// `781(781/723/1),52(64/50/1),P=10213(10222/10205/1),`
    ///
    /// Comma-separated fields: temperature triplet in tenths of °F,
    /// humidity triplet in percent, pressure triplet in Pa behind a `P=`
    /// prefix. A trailing empty field is ignored. A field that does not
    /// match its grammar is left unset while the others keep decoding.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedField`] if fewer than three fields
    /// are present.
    pub(crate) fn decode_specific(&mut self, s: &str) -> Result<(), DecodeError> {
        let mut parts = s.split(',');
        let (Some(temp), Some(hum), Some(press)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DecodeError::MalformedField {
                field: "display hub status",
                value: s.to_string(),
            });
        };
        self.temperature_mk = StatsTriplet::parse(temp).map(|t| t.map(tenths_f_to_mk));
        self.humidity_percent = StatsTriplet::parse(hum);
        self.pressure_pa = press.strip_prefix("P=").and_then(StatsTriplet::parse);
        Ok(())
    }

    /// Decodes a `"state"` channel value: battery state and WiFi signal
    /// as two comma-separated integers.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedField`] on a wrong field count or
    /// non-numeric field; neither field is updated in that case.
    pub(crate) fn decode_state(&mut self, s: &str) -> Result<(), DecodeError> {
        let malformed = || DecodeError::MalformedField {
            field: "hub state",
            value: s.to_string(),
        };
        let (battery, wifi) = s.split_once(',').ok_or_else(|| malformed())?;
        let battery: i32 = battery.parse().map_err(|_| malformed())?;
        let wifi: i32 = wifi.parse().map_err(|_| malformed())?;
        self.battery_state = Some(battery);
        self.wifi_rssi = Some(wifi);
        Ok(())
    }

    /// Decodes a `"connected"` channel value: `"1"` means connected,
    /// any other integer means not.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedField`] if the value is not an
    /// integer.
    pub(crate) fn decode_connected(&mut self, s: &str) -> Result<(), DecodeError> {
        let flag: i64 = s.trim().parse().map_err(|_| DecodeError::MalformedField {
            field: "connected",
            value: s.to_string(),
        })?;
        self.connected = Some(flag == 1);
        Ok(())
    }

    /// Current temperature in Kelvin, if known.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn temperature_k(&self) -> Option<f64> {
        self.temperature_mk.map(|t| t.current as f64 * 1e-3)
    }

    /// Current temperature in °C, if known.
    #[must_use]
    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature_k().map(|k| k - 273.15)
    }
}

impl fmt::Display for DisplayHubState {
    /// One-line measurement summary, e.g. `298.8K / 52% / 10213Pa`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.temperature_k(), self.humidity_percent, self.pressure_pa) {
            (Some(temp_k), Some(hum), Some(press)) => {
                write!(f, "{temp_k:.1}K / {}% / {}Pa", hum.current, press.current)
            }
            _ => write!(f, "no readings yet"),
        }
    }
}

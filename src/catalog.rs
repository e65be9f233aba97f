// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input types delivered by the `HomGar` cloud API client.
//!
//! The API client (out of scope for this crate) supplies two things per
//! polling session: the device catalog listing each hub and its attached
//! subdevices, and per poll the raw `subDeviceStatus` array of `(id, value)`
//! pairs. Both arrive as JSON; the types here mirror those shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;

/// A home registered in the `HomGar` account.
///
/// A home contains a number of hubs, each of which contains
/// sensors and controllers (subdevices).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Home {
    /// Unique home identifier.
    pub hid: String,
    /// Display name of the home.
    pub name: String,
}

/// One device entry from the catalog, as returned by the device-list API.
///
/// Hubs nest their subdevices under `subDevices`. Entries are immutable
/// once received; [`crate::registry`] turns them into typed, mutable
/// device records.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Numeric model code, the key for device-kind classification.
    #[serde(rename = "modelCode")]
    pub model_code: u32,
    /// Model name string, e.g. `"HWS019WRF-V2"`.
    pub model: String,
    /// Display name assigned by the user.
    pub name: String,
    /// Unique device identifier.
    pub did: String,
    /// Identifier of the sensor network this device belongs to.
    pub mid: String,
    /// Device address within the sensor network. Hubs omit this and
    /// always sit at address 1.
    #[serde(rename = "addr", default = "hub_address")]
    pub address: u8,
    /// Number of ports on the device, e.g. 2 for the 2-zone water timer.
    #[serde(rename = "portNumber", default)]
    pub port_count: u8,
    /// Active alerts. The payload shape is opaque and passed through as-is.
    #[serde(default)]
    pub alerts: Vec<Value>,
    /// Attached subdevices (hubs only).
    #[serde(rename = "subDevices", default)]
    pub subdevices: Vec<CatalogEntry>,
}

/// Fixed address of every hub.
const fn hub_address() -> u8 {
    1
}

/// One raw entry from a status poll's `subDeviceStatus` array.
///
/// Ephemeral: consumed once per poll by the router and not retained.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusEntry {
    /// Identifies which device or channel the value targets,
    /// e.g. `"D02"`, `"state"`, `"connected"`.
    pub id: String,
    /// The vendor-encoded value string.
    pub value: String,
}

impl StatusEntry {
    /// Creates a status entry from an id and raw value.
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Parses a device-list JSON array into catalog entries.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if the payload is not a valid device
/// list.
pub fn parse_device_list(json: &str) -> Result<Vec<CatalogEntry>> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a `subDeviceStatus` JSON array into status entries.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if the payload is not a valid status
/// list.
pub fn parse_status_list(json: &str) -> Result<Vec<StatusEntry>> {
    Ok(serde_json::from_str(json)?)
}

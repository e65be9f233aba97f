// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Routing of raw status entries to device decoders.
//!
//! Each poll delivers a flat `subDeviceStatus` list; the router matches
//! every entry against the ids a device listens to and hands the value to
//! that device's decoder. A plain device listens only to `"Dxx"` where
//! `xx` is its zero-padded address; the display hub additionally listens
//! to `"connected"` and `"state"`. The flow meter's entry arrives under
//! its own `"Dxx"` id but is dispatched by kind to the tagged binary
//! decoder.
//!
//! Decode failures are aggregated, never propagated mid-batch: one bad
//! entry cannot stop the rest of the poll, and entries matching no device
//! are ignored for forward compatibility with catalog additions.

use crate::catalog::StatusEntry;
use crate::device::{Device, Hub, Subdevice};
use crate::error::DecodeError;
use crate::state::{HubState, SubdeviceState};

/// The `"Dxx"` status id for a device address.
fn address_id(address: u8) -> String {
    format!("D{address:02}")
}

/// The status ids a hub listens to.
fn hub_status_ids(hub: &Hub) -> Vec<String> {
    match hub.state {
        HubState::Display(_) => vec![
            "connected".to_string(),
            "state".to_string(),
            address_id(hub.address()),
        ],
        HubState::MiniBox | HubState::Generic => vec![address_id(hub.address())],
    }
}

/// The status ids a device listens to within a poll response.
#[must_use]
pub fn status_ids_for(device: &Device) -> Vec<String> {
    match device {
        Device::Hub(hub) => hub_status_ids(hub),
        Device::Subdevice(sub) => vec![address_id(sub.address)],
    }
}

/// Applies every matching entry of a status batch to one device.
///
/// Returns the decode errors encountered; an empty vector means every
/// matching entry decoded cleanly. Entries that match none of the
/// device's ids are skipped.
pub fn apply_status_batch(device: &mut Device, entries: &[StatusEntry]) -> Vec<DecodeError> {
    let ids = status_ids_for(device);
    let mut errors = Vec::new();
    for entry in entries {
        if !ids.iter().any(|id| id == &entry.id) {
            continue;
        }
        if let Err(e) = apply_entry(device, entry) {
            tracing::warn!(id = %entry.id, error = %e, "failed to decode status entry");
            errors.push(e);
        }
    }
    errors
}

/// Applies a status batch to a hub and all of its subdevices.
///
/// This is the per-poll entry point: hand it the full `subDeviceStatus`
/// list and it routes each entry to the owning device. Unmatched entries
/// are ignored with a trace log.
pub fn apply_hub_status(hub: &mut Hub, entries: &[StatusEntry]) -> Vec<DecodeError> {
    let hub_ids = hub_status_ids(hub);
    let mut errors = Vec::new();
    for entry in entries {
        let result = if hub_ids.iter().any(|id| id == &entry.id) {
            apply_hub_entry(hub, entry)
        } else if let Some(sub) = hub
            .subdevices
            .iter_mut()
            .find(|sub| address_id(sub.address) == entry.id)
        {
            apply_subdevice_entry(sub, entry)
        } else {
            tracing::trace!(id = %entry.id, "status entry matched no device, ignoring");
            continue;
        };
        if let Err(e) = result {
            tracing::warn!(id = %entry.id, error = %e, "failed to decode status entry");
            errors.push(e);
        }
    }
    errors
}

fn apply_entry(device: &mut Device, entry: &StatusEntry) -> Result<(), DecodeError> {
    match device {
        Device::Hub(hub) => apply_hub_entry(hub, entry),
        Device::Subdevice(sub) => apply_subdevice_entry(sub, entry),
    }
}

fn apply_hub_entry(hub: &mut Hub, entry: &StatusEntry) -> Result<(), DecodeError> {
    if let HubState::Display(state) = &mut hub.state {
        match entry.id.as_str() {
            "state" => return state.decode_state(&entry.value),
            "connected" => return state.decode_connected(&entry.value),
            _ => {}
        }
    }

    let (general, specific) = split_d_value(&entry.value)?;
    let general_result = apply_general(&mut hub.rf_rssi, general);
    let specific_result = match &mut hub.state {
        HubState::Display(state) => state.decode_specific(specific),
        // No device-specific payload for these kinds.
        HubState::MiniBox | HubState::Generic => Ok(()),
    };
    general_result.and(specific_result)
}

fn apply_subdevice_entry(sub: &mut Subdevice, entry: &StatusEntry) -> Result<(), DecodeError> {
    // The flow meter envelopes its whole status differently: a tagged
    // binary blob instead of the general;specific split.
    if let SubdeviceState::FlowMeter(state) = &mut sub.state {
        let rf_rssi = state.decode(&entry.value)?;
        sub.rf_rssi = Some(i32::from(rf_rssi));
        return Ok(());
    }

    let (general, specific) = split_d_value(&entry.value)?;
    let general_result = apply_general(&mut sub.rf_rssi, general);
    let specific_result = match &mut sub.state {
        SubdeviceState::SoilMoisture(state) => state.decode_specific(specific),
        SubdeviceState::Rain(state) => state.decode_specific(specific),
        SubdeviceState::Air(state) => state.decode_specific(specific),
        SubdeviceState::ZoneTimer => {
            // Per-zone grammar not reverse-engineered; decoded fields
            // would be guesses, so the payload is intentionally skipped.
            tracing::trace!(value = %entry.value, "2-zone timer payload left undecoded");
            Ok(())
        }
        SubdeviceState::FlowMeter(_) | SubdeviceState::Generic => Ok(()),
    };
    general_result.and(specific_result)
}

/// Splits a `"Dxx"` value into its general and device-specific parts.
fn split_d_value(value: &str) -> Result<(&str, &str), DecodeError> {
    value.split_once(';').ok_or_else(|| {
        DecodeError::InvalidEnvelope(format!("missing ';' separator in {value:?}"))
    })
}

/// Decodes the general status prefix into the device's RF signal field.
/// On failure the field keeps its last known value.
fn apply_general(rf_rssi: &mut Option<i32>, general: &str) -> Result<(), DecodeError> {
    let value = crate::codec::stats::parse_general_status(general)?;
    *rf_rssi = Some(value);
    Ok(())
}

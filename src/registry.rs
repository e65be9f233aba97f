// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model-code classification and device-record construction.
//!
//! The registry maps the catalog's numeric model codes onto device kinds
//! and builds the typed records those entries describe. Unknown model
//! codes never fail: they fall back to a generic hub or subdevice so new
//! hardware still surfaces its RF and connection state.

use crate::catalog::CatalogEntry;
use crate::device::{Device, DeviceInfo, Hub, Subdevice};
use crate::state::{
    AirSensorState, DisplayHubState, FlowMeterState, HubState, RainSensorState,
    SoilMoistureState, SubdeviceState,
};

/// Device kind derived from a catalog model code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Irrigation display hub (model code 264).
    DisplayHub,
    /// Soil moisture sensor (model code 72).
    SoilMoistureSensor,
    /// High precision rain sensor (model code 87).
    RainSensor,
    /// Outdoor air humidity sensor (model code 262).
    AirSensor,
    /// 2-zone water timer (model code 261).
    TwoZoneTimer,
    /// Mini box hub (model code 289).
    MiniBoxHub,
    /// Water flow meter (model code 80).
    WaterFlowMeter,
    /// Model code with no registered decoder.
    Unknown,
}

impl ModelKind {
    /// Whether this kind is a hub rather than a subdevice.
    #[must_use]
    pub fn is_hub(self) -> bool {
        matches!(self, Self::DisplayHub | Self::MiniBoxHub)
    }

    /// Human-readable device-kind description.
    #[must_use]
    pub fn friendly_desc(self) -> &'static str {
        match self {
            Self::DisplayHub => "Irrigation Display Hub",
            Self::SoilMoistureSensor => "Soil Moisture Sensor",
            Self::RainSensor => "High Precision Rain Sensor",
            Self::AirSensor => "Outdoor Air Humidity Sensor",
            Self::TwoZoneTimer => "2-Zone Water Timer",
            Self::MiniBoxHub => "Mini Box Hub",
            Self::WaterFlowMeter => "Water Flow Meter",
            Self::Unknown => "Unknown HomGar device",
        }
    }
}

/// Classifies a catalog model code.
#[must_use]
pub fn classify(model_code: u32) -> ModelKind {
    match model_code {
        264 => ModelKind::DisplayHub,
        72 => ModelKind::SoilMoistureSensor,
        87 => ModelKind::RainSensor,
        262 => ModelKind::AirSensor,
        261 => ModelKind::TwoZoneTimer,
        289 => ModelKind::MiniBoxHub,
        80 => ModelKind::WaterFlowMeter,
        _ => ModelKind::Unknown,
    }
}

fn info_from(entry: &CatalogEntry) -> DeviceInfo {
    DeviceInfo {
        model: entry.model.clone(),
        model_code: entry.model_code,
        name: entry.name.clone(),
        did: entry.did.clone(),
        mid: entry.mid.clone(),
        alerts: entry.alerts.clone(),
    }
}

/// Builds a hub record from a top-level catalog entry, including all of
/// its subdevices.
#[must_use]
pub fn build_hub(entry: &CatalogEntry) -> Hub {
    let kind = classify(entry.model_code);
    let state = match kind {
        ModelKind::DisplayHub => HubState::Display(DisplayHubState::default()),
        ModelKind::MiniBoxHub => HubState::MiniBox,
        _ => {
            tracing::warn!(
                model_code = entry.model_code,
                model = %entry.model,
                "no hub decoder for model code, tracking common fields only"
            );
            HubState::Generic
        }
    };
    Hub {
        info: info_from(entry),
        rf_rssi: None,
        state,
        subdevices: entry.subdevices.iter().map(build_subdevice).collect(),
    }
}

/// Builds a subdevice record from a nested catalog entry.
#[must_use]
pub fn build_subdevice(entry: &CatalogEntry) -> Subdevice {
    let kind = classify(entry.model_code);
    let state = match kind {
        ModelKind::SoilMoistureSensor => SubdeviceState::SoilMoisture(SoilMoistureState::default()),
        ModelKind::RainSensor => SubdeviceState::Rain(RainSensorState::default()),
        ModelKind::AirSensor => SubdeviceState::Air(AirSensorState::default()),
        ModelKind::TwoZoneTimer => SubdeviceState::ZoneTimer,
        ModelKind::WaterFlowMeter => SubdeviceState::FlowMeter(FlowMeterState::default()),
        _ => {
            tracing::warn!(
                model_code = entry.model_code,
                model = %entry.model,
                "no subdevice decoder for model code, tracking common fields only"
            );
            SubdeviceState::Generic
        }
    };
    Subdevice {
        info: info_from(entry),
        address: entry.address,
        port_count: entry.port_count,
        rf_rssi: None,
        state,
    }
}

/// Builds a typed record from a catalog entry, choosing hub or subdevice
/// by the entry's role: top-level entries are hubs, nested ones
/// subdevices.
#[must_use]
pub fn build_device(entry: &CatalogEntry, top_level: bool) -> Device {
    if top_level {
        Device::Hub(build_hub(entry))
    } else {
        Device::Subdevice(build_subdevice(entry))
    }
}

/// Builds hub records for a whole device list.
#[must_use]
pub fn build_devices(entries: &[CatalogEntry]) -> Vec<Hub> {
    entries.iter().map(build_hub).collect()
}

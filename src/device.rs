// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device records.
//!
//! A [`Hub`] is the network gateway and exclusively owns its attached
//! [`Subdevice`]s; subdevices reference their network only through the
//! shared `mid`. Identity fields are fixed at construction from the
//! catalog; the status state and RF signal are the only mutable parts,
//! written solely by [`crate::router`] during a poll.

use std::fmt;

use serde_json::Value;

use crate::state::{HubState, SubdeviceState};

/// Fixed sensor-network address of every hub.
pub const HUB_ADDRESS: u8 = 1;

/// Identity fields shared by hubs and subdevices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Model name string, e.g. `"HWS019WRF-V2"`.
    pub model: String,
    /// Numeric model code.
    pub model_code: u32,
    /// Display name assigned by the user.
    pub name: String,
    /// Unique device identifier.
    pub did: String,
    /// Identifier of the sensor network this device belongs to.
    pub mid: String,
    /// Active alerts, passed through from the catalog.
    pub alerts: Vec<Value>,
}

/// A hub device: the gateway for a sensor network.
#[derive(Debug, Clone, PartialEq)]
pub struct Hub {
    pub(crate) info: DeviceInfo,
    pub(crate) rf_rssi: Option<i32>,
    pub(crate) state: HubState,
    pub(crate) subdevices: Vec<Subdevice>,
}

impl Hub {
    /// Identity fields from the catalog.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Sensor-network address; always 1 for a hub.
    #[must_use]
    pub fn address(&self) -> u8 {
        HUB_ADDRESS
    }

    /// RF signal strength in dBm, once a poll has reported it.
    #[must_use]
    pub fn rf_rssi(&self) -> Option<i32> {
        self.rf_rssi
    }

    /// Decoded status state.
    #[must_use]
    pub fn state(&self) -> &HubState {
        &self.state
    }

    /// The subdevices attached to this hub.
    #[must_use]
    pub fn subdevices(&self) -> &[Subdevice] {
        &self.subdevices
    }
}

impl fmt::Display for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" (DID {}) with {} subdevices",
            self.state.friendly_desc(),
            self.info.name,
            self.info.did,
            self.subdevices.len()
        )?;
        if let HubState::Display(state) = &self.state
            && state.temperature_mk.is_some()
        {
            write!(f, ": {state}")?;
        }
        Ok(())
    }
}

/// A subdevice: a sensor or actuator attached to a hub's sensor network.
#[derive(Debug, Clone, PartialEq)]
pub struct Subdevice {
    pub(crate) info: DeviceInfo,
    pub(crate) address: u8,
    pub(crate) port_count: u8,
    pub(crate) rf_rssi: Option<i32>,
    pub(crate) state: SubdeviceState,
}

impl Subdevice {
    /// Identity fields from the catalog.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Device address within the sensor network.
    #[must_use]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Number of ports on the device, e.g. 2 for the 2-zone water timer.
    #[must_use]
    pub fn port_count(&self) -> u8 {
        self.port_count
    }

    /// RF signal strength in dBm, once a poll has reported it.
    #[must_use]
    pub fn rf_rssi(&self) -> Option<i32> {
        self.rf_rssi
    }

    /// Decoded status state.
    #[must_use]
    pub fn state(&self) -> &SubdeviceState {
        &self.state
    }
}

impl fmt::Display for Subdevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} \"{}\" (DID {}) at address {}",
            self.state.friendly_desc(),
            self.info.name,
            self.info.did,
            self.address
        )?;
        match &self.state {
            SubdeviceState::SoilMoisture(state) if state.temperature_mk.is_some() => {
                write!(f, ": {state}")
            }
            SubdeviceState::Rain(state) if state.total_mm.is_some() => {
                write!(f, ": {state}")
            }
            SubdeviceState::Air(state) if state.temperature_mk.is_some() => {
                write!(f, ": {state}")
            }
            SubdeviceState::FlowMeter(state) if state.total_usage_dl.is_some() => {
                write!(f, ": {state}")
            }
            _ => Ok(()),
        }
    }
}

/// A device record of either role, as built from a catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    /// A hub, owning its subdevices.
    Hub(Hub),
    /// A standalone view of a subdevice.
    Subdevice(Subdevice),
}

impl Device {
    /// Identity fields from the catalog.
    #[must_use]
    pub fn info(&self) -> &DeviceInfo {
        match self {
            Self::Hub(hub) => hub.info(),
            Self::Subdevice(sub) => sub.info(),
        }
    }

    /// Device address within the sensor network.
    #[must_use]
    pub fn address(&self) -> u8 {
        match self {
            Self::Hub(hub) => hub.address(),
            Self::Subdevice(sub) => sub.address(),
        }
    }

    /// RF signal strength in dBm, once a poll has reported it.
    #[must_use]
    pub fn rf_rssi(&self) -> Option<i32> {
        match self {
            Self::Hub(hub) => hub.rf_rssi(),
            Self::Subdevice(sub) => sub.rf_rssi(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hub(hub) => hub.fmt(f),
            Self::Subdevice(sub) => sub.fmt(f),
        }
    }
}

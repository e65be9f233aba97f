// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device-kind status state.
//!
//! Each device kind owns one state struct holding its decoded measurement
//! fields. All fields are optional: a field stays unset until the first
//! poll that decodes it, and keeps its last known value when a later poll
//! omits or garbles it. State is mutated only by the decoders in this
//! module, driven by [`crate::router`].

mod hub;
mod subdevice;

pub use hub::{DisplayHubState, HubState};
pub use subdevice::{
    AirSensorState, FlowMeterState, RainSensorState, SoilMoistureState, SubdeviceState,
};

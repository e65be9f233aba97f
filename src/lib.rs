// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `HomGar` Lib - A Rust library to decode `HomGar` / `RainPoint` device
//! status payloads.
//!
//! The `HomGar` cloud API reports the status of a sensor network (a hub
//! and its attached subdevices) as a flat list of `(id, value)` pairs,
//! where each value is a compact vendor-encoded string or, for the water
//! flow meter, a hex blob of tagged little-endian fields. This library
//! turns those payloads into typed, in-memory device records. HTTP
//! session handling and authentication are out of scope: bring your own
//! API client and feed its device list and `subDeviceStatus` arrays in.
//!
//! # Supported Devices
//!
//! - Irrigation Display Hub (model code 264)
//! - Mini Box Hub (289)
//! - Soil Moisture Sensor (72)
//! - High Precision Rain Sensor (87)
//! - Outdoor Air Humidity Sensor (262)
//! - 2-Zone Water Timer (261; payload grammar not yet reverse-engineered)
//! - Water Flow Meter (80)
//!
//! Unknown model codes degrade to generic records that still track RF
//! signal and connection state.
//!
//! # Quick Start
//!
//! ```
//! use homgar_lib::{SubdeviceState, catalog, registry, router};
//!
//! # fn main() -> homgar_lib::Result<()> {
//! // Device list as returned by the API client
//! let devices_json = r#"[{
//!     "modelCode": 264, "model": "HWS019WRF-V2", "name": "Backyard hub",
//!     "did": "100001", "mid": "900001",
//!     "subDevices": [{
//!         "modelCode": 72, "model": "HCS021FRF", "name": "Flower bed",
//!         "did": "100002", "mid": "900001", "addr": 2, "portNumber": 1
//!     }]
//! }]"#;
//! let mut hubs = registry::build_devices(&catalog::parse_device_list(devices_json)?);
//!
//! // One poll's subDeviceStatus array
//! let status_json = r#"[
//!     {"id": "connected", "value": "1"},
//!     {"id": "D02", "value": "1,-65,1;766,52,G=31351"}
//! ]"#;
//! let entries = catalog::parse_status_list(status_json)?;
//!
//! let errors = router::apply_hub_status(&mut hubs[0], &entries);
//! assert!(errors.is_empty());
//!
//! let soil = &hubs[0].subdevices()[0];
//! assert_eq!(soil.rf_rssi(), Some(-65));
//! if let SubdeviceState::SoilMoisture(state) = soil.state() {
//!     assert_eq!(state.moisture_percent, Some(52));
//! }
//! println!("{soil}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod codec;
pub mod device;
pub mod error;
pub mod registry;
pub mod router;
pub mod state;

pub use catalog::{CatalogEntry, Home, StatusEntry};
pub use codec::stats::StatsTriplet;
pub use device::{Device, DeviceInfo, HUB_ADDRESS, Hub, Subdevice};
pub use error::{DecodeError, Error, Result};
pub use registry::ModelKind;
pub use state::{
    AirSensorState, DisplayHubState, FlowMeterState, HubState, RainSensorState,
    SoilMoistureState, SubdeviceState,
};

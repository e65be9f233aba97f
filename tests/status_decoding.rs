// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end decoding: catalog JSON in, typed device state out.
//!
//! Fixture payloads are values observed on real RainPoint hardware.

use chrono::NaiveDate;
use homgar_lib::{DecodeError, HubState, SubdeviceState, catalog, registry, router};

const DEVICE_LIST: &str = r#"[{
    "modelCode": 264,
    "model": "HWS019WRF-V2",
    "name": "Backyard hub",
    "did": "100001",
    "mid": "900001",
    "subDevices": [
        {"modelCode": 72, "model": "HCS021FRF", "name": "Flower bed",
         "did": "100002", "mid": "900001", "addr": 2, "portNumber": 1},
        {"modelCode": 87, "model": "HCS012ARF", "name": "Rain gauge",
         "did": "100003", "mid": "900001", "addr": 3, "portNumber": 1},
        {"modelCode": 262, "model": "HCS014ARF", "name": "Greenhouse air",
         "did": "100004", "mid": "900001", "addr": 4, "portNumber": 1},
        {"modelCode": 261, "model": "TTV203WRF", "name": "Lawn timer",
         "did": "100005", "mid": "900001", "addr": 5, "portNumber": 2},
        {"modelCode": 80, "model": "HWG005WRF", "name": "Tap meter",
         "did": "100006", "mid": "900001", "addr": 6, "portNumber": 1},
        {"modelCode": 9999, "model": "FUTURE", "name": "New gadget",
         "did": "100007", "mid": "900001", "addr": 7, "portNumber": 1}
    ]
}]"#;

const STATUS_POLL: &str = r#"[
    {"id": "connected", "value": "1"},
    {"id": "state", "value": "3,-55"},
    {"id": "D01", "value": "1,-67,1;781(781/723/1),52(64/50/1),P=10213(10222/10205/1),"},
    {"id": "D02", "value": "1,-65,1;766,52,G=31351"},
    {"id": "D03", "value": "1,-71,1;R=270(0/0/270)"},
    {"id": "D04", "value": "1,-60,1;755(1020/588/1),54(91/24/1),"},
    {"id": "D05", "value": "1,-58,1;0,9,0,0,0,0|0,1291,0,0,0,0"},
    {"id": "D06", "value": "10#E1CE00FF0B00000000DC01990000B7D9E66A16FF0700000000AF000000009F07000000FF0A02000000CB07000000B307000000"},
    {"id": "D07", "value": "1,-75,1;something new"},
    {"id": "D42", "value": "1,-99,1;matches nothing"}
]"#;

#[test]
fn full_poll_cycle() {
    let entries = catalog::parse_device_list(DEVICE_LIST).unwrap();
    let mut hubs = registry::build_devices(&entries);
    assert_eq!(hubs.len(), 1);

    let poll = catalog::parse_status_list(STATUS_POLL).unwrap();
    let errors = router::apply_hub_status(&mut hubs[0], &poll);
    assert!(errors.is_empty(), "unexpected decode errors: {errors:?}");

    let hub = &hubs[0];
    assert_eq!(hub.rf_rssi(), Some(-67));
    let HubState::Display(display) = hub.state() else {
        panic!("expected display hub");
    };
    assert_eq!(display.connected, Some(true));
    assert_eq!(display.battery_state, Some(3));
    assert_eq!(display.wifi_rssi, Some(-55));
    assert_eq!(display.temperature_mk.unwrap().current, 298_761);
    assert_eq!(display.humidity_percent.unwrap().current, 52);
    assert_eq!(display.pressure_pa.unwrap().current, 10213);

    let soil = &hub.subdevices()[0];
    assert_eq!(soil.rf_rssi(), Some(-65));
    let SubdeviceState::SoilMoisture(state) = soil.state() else {
        panic!("expected soil moisture sensor");
    };
    assert_eq!(state.temperature_mk, Some(297_928));
    assert_eq!(state.moisture_percent, Some(52));
    assert!((state.light_lux.unwrap() - 3135.1).abs() < 1e-9);

    let rain = &hub.subdevices()[1];
    let SubdeviceState::Rain(state) = rain.state() else {
        panic!("expected rain sensor");
    };
    assert!((state.total_mm.unwrap() - 27.0).abs() < 1e-9);
    assert!((state.last_7d_mm.unwrap() - 27.0).abs() < 1e-9);

    let air = &hub.subdevices()[2];
    let SubdeviceState::Air(state) = air.state() else {
        panic!("expected air sensor");
    };
    assert_eq!(state.humidity_percent.unwrap().daily_max, 91);

    // Timer payload is deliberately undecoded; common fields still land.
    let timer = &hub.subdevices()[3];
    assert_eq!(timer.rf_rssi(), Some(-58));
    assert!(matches!(timer.state(), SubdeviceState::ZoneTimer));

    let meter = &hub.subdevices()[4];
    assert_eq!(meter.rf_rssi(), Some(-50));
    let SubdeviceState::FlowMeter(state) = meter.state() else {
        panic!("expected flow meter");
    };
    assert_eq!(state.current_duration_s, Some(0));
    assert_eq!(state.last_usage_dl, Some(7));
    assert_eq!(state.last_duration_s, Some(2));
    assert_eq!(state.total_usage_dl, Some(7));
    assert_eq!(
        state.end_of_last_usage,
        Some(
            NaiveDate::from_ymd_opt(2025, 9, 21)
                .unwrap()
                .and_hms_opt(14, 27, 25)
                .unwrap()
        )
    );

    // Unknown model code still surfaces its RF state.
    let gadget = &hub.subdevices()[5];
    assert_eq!(gadget.rf_rssi(), Some(-75));
    assert!(matches!(gadget.state(), SubdeviceState::Generic));
}

#[test]
fn second_poll_overwrites_in_place() {
    let entries = catalog::parse_device_list(DEVICE_LIST).unwrap();
    let mut hubs = registry::build_devices(&entries);
    let poll = catalog::parse_status_list(STATUS_POLL).unwrap();
    router::apply_hub_status(&mut hubs[0], &poll);

    // Next poll only reports the soil sensor; everything else keeps its
    // last known value.
    let next = vec![catalog::StatusEntry::new("D02", "1,-70,1;800,47,G=100")];
    let errors = router::apply_hub_status(&mut hubs[0], &next);
    assert!(errors.is_empty());

    let soil = &hubs[0].subdevices()[0];
    assert_eq!(soil.rf_rssi(), Some(-70));
    let SubdeviceState::SoilMoisture(state) = soil.state() else {
        panic!("expected soil moisture sensor");
    };
    assert_eq!(state.moisture_percent, Some(47));

    // Untouched device retains its previous reading
    let rain = &hubs[0].subdevices()[1];
    let SubdeviceState::Rain(state) = rain.state() else {
        panic!("expected rain sensor");
    };
    assert!((state.total_mm.unwrap() - 27.0).abs() < 1e-9);
}

#[test]
fn decode_errors_are_collected_not_fatal() {
    let entries = catalog::parse_device_list(DEVICE_LIST).unwrap();
    let mut hubs = registry::build_devices(&entries);

    let poll = vec![
        catalog::StatusEntry::new("D01", "no separator"),
        catalog::StatusEntry::new("D06", "10#ZZ"),
        catalog::StatusEntry::new("D02", "1,-65,1;766,52,G=31351"),
    ];
    let errors = router::apply_hub_status(&mut hubs[0], &poll);
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, DecodeError::InvalidEnvelope(_))));

    // The healthy entry still decoded
    let SubdeviceState::SoilMoisture(state) = hubs[0].subdevices()[0].state() else {
        panic!("expected soil moisture sensor");
    };
    assert_eq!(state.moisture_percent, Some(52));
}

#[test]
fn device_summaries() {
    let entries = catalog::parse_device_list(DEVICE_LIST).unwrap();
    let mut hubs = registry::build_devices(&entries);
    let poll = catalog::parse_status_list(STATUS_POLL).unwrap();
    router::apply_hub_status(&mut hubs[0], &poll);

    assert_eq!(
        hubs[0].to_string(),
        "Irrigation Display Hub \"Backyard hub\" (DID 100001) with 6 subdevices: \
         298.8K / 52% / 10213Pa"
    );
    assert_eq!(
        hubs[0].subdevices()[0].to_string(),
        "Soil Moisture Sensor \"Flower bed\" (DID 100002) at address 2: \
         24.8\u{b0}C / 52% / 3135.1lx"
    );
    assert_eq!(
        hubs[0].subdevices()[1].to_string(),
        "High Precision Rain Sensor \"Rain gauge\" (DID 100003) at address 3: \
         27.0mm total / 0.0mm 1h / 0.0mm 24h / 27.0mm 7days"
    );
    assert_eq!(
        hubs[0].subdevices()[4].to_string(),
        "Water Flow Meter \"Tap meter\" (DID 100006) at address 6: 0.7L total"
    );
}

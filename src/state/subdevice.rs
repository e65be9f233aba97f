// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subdevice status state.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::codec::stats::{StatsTriplet, tenths_f_to_mk};
use crate::codec::tagged::{decode_timestamp, parse_tagged_blob};
use crate::error::DecodeError;

/// Status state of a subdevice, one variant per supported sensor or
/// controller kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SubdeviceState {
    /// Soil moisture sensor with temperature and light readings.
    SoilMoisture(SoilMoistureState),
    /// High precision rain sensor.
    Rain(RainSensorState),
    /// Outdoor air temperature and humidity sensor.
    Air(AirSensorState),
    /// 2-zone water timer. Its `|`-separated per-zone payload has not
    /// been reverse-engineered, so its decoder is a deliberate no-op and
    /// only the common fields are tracked.
    ZoneTimer,
    /// Water flow meter, reporting through the tagged binary encoding.
    FlowMeter(FlowMeterState),
    /// Fallback for unrecognized subdevice model codes. Only the common
    /// fields (RF signal) are tracked so new hardware still surfaces.
    Generic,
}

impl SubdeviceState {
    /// Human-readable device-kind description.
    #[must_use]
    pub fn friendly_desc(&self) -> &'static str {
        match self {
            Self::SoilMoisture(_) => "Soil Moisture Sensor",
            Self::Rain(_) => "High Precision Rain Sensor",
            Self::Air(_) => "Outdoor Air Humidity Sensor",
            Self::ZoneTimer => "2-Zone Water Timer",
            Self::FlowMeter(_) => "Water Flow Meter",
            Self::Generic => "Unknown HomGar device",
        }
    }
}

/// Decoded status of the soil moisture sensor.
///
/// Example value: `766,52,G=31351` meaning temperature in tenths of °F,
/// soil moisture in percent, light in tenths of lux behind a `G=` prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SoilMoistureState {
    /// Soil temperature in milli-Kelvin.
    pub temperature_mk: Option<i64>,
    /// Soil moisture in percent.
    pub moisture_percent: Option<i64>,
    /// Light level in lux.
    pub light_lux: Option<f64>,
}

impl SoilMoistureState {
    /// Decodes the device-specific part of a `"Dxx"` value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedField`] if the field count is not
    /// three. Individual malformed fields are left unset while the others
    /// keep decoding.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn decode_specific(&mut self, s: &str) -> Result<(), DecodeError> {
        let parts: Vec<&str> = s.split(',').collect();
        let [temp, moist, light] = parts.as_slice() else {
            return Err(DecodeError::MalformedField {
                field: "soil moisture status",
                value: s.to_string(),
            });
        };
        self.temperature_mk = temp.parse().ok().map(tenths_f_to_mk);
        self.moisture_percent = moist.parse().ok();
        self.light_lux = light
            .strip_prefix("G=")
            .and_then(|v| v.parse::<i64>().ok())
            .map(|tenths| tenths as f64 * 0.1);
        Ok(())
    }

    /// Soil temperature in °C, if known.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature_mk.map(|mk| mk as f64 * 1e-3 - 273.15)
    }
}

impl fmt::Display for SoilMoistureState {
    /// One-line measurement summary, e.g. `24.8°C / 52% / 3135.1lx`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.temperature_c(), self.moisture_percent, self.light_lux) {
            (Some(temp_c), Some(moist), Some(lux)) => {
                write!(f, "{temp_c:.1}\u{b0}C / {moist}% / {lux:.1}lx")
            }
            _ => write!(f, "no readings yet"),
        }
    }
}

/// Decoded status of the high precision rain sensor.
///
/// Example value: `R=270(0/0/270)`. All four triplet positions are in
/// tenths of a millimetre and map to total, last hour, last 24 hours and
/// last 7 days.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RainSensorState {
    /// Total rainfall in mm.
    pub total_mm: Option<f64>,
    /// Rainfall over the last hour in mm.
    pub last_hour_mm: Option<f64>,
    /// Rainfall over the last 24 hours in mm.
    pub last_24h_mm: Option<f64>,
    /// Rainfall over the last 7 days in mm.
    pub last_7d_mm: Option<f64>,
}

impl RainSensorState {
    /// Decodes the device-specific part of a `"Dxx"` value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedField`] if the `R=` prefix is
    /// missing or the triplet does not match the grammar; all fields are
    /// left untouched in that case.
    pub(crate) fn decode_specific(&mut self, s: &str) -> Result<(), DecodeError> {
        let Some(triplet) = s.strip_prefix("R=").and_then(StatsTriplet::parse) else {
            return Err(DecodeError::MalformedField {
                field: "rainfall",
                value: s.to_string(),
            });
        };
        #[allow(clippy::cast_precision_loss)]
        let mm = |tenths: i64| tenths as f64 * 0.1;
        self.total_mm = Some(mm(triplet.current));
        self.last_hour_mm = Some(mm(triplet.daily_max));
        self.last_24h_mm = Some(mm(triplet.daily_min));
        self.last_7d_mm = Some(mm(triplet.trend));
        Ok(())
    }
}

impl fmt::Display for RainSensorState {
    /// One-line measurement summary in mm.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.total_mm, self.last_hour_mm, self.last_24h_mm, self.last_7d_mm) {
            (Some(total), Some(hour), Some(day), Some(week)) => write!(
                f,
                "{total:.1}mm total / {hour:.1}mm 1h / {day:.1}mm 24h / {week:.1}mm 7days"
            ),
            _ => write!(f, "no readings yet"),
        }
    }
}

/// Decoded status of the outdoor air humidity sensor.
///
/// Example value: `755(1020/588/1),54(91/24/1),` with temperature in
/// tenths of °F and humidity in percent. Trailing fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AirSensorState {
    /// Air temperature in milli-Kelvin.
    pub temperature_mk: Option<StatsTriplet>,
    /// Relative humidity in percent.
    pub humidity_percent: Option<StatsTriplet>,
}

impl AirSensorState {
    /// Decodes the device-specific part of a `"Dxx"` value.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedField`] if fewer than two fields
    /// are present.
    pub(crate) fn decode_specific(&mut self, s: &str) -> Result<(), DecodeError> {
        let mut parts = s.split(',');
        let (Some(temp), Some(hum)) = (parts.next(), parts.next()) else {
            return Err(DecodeError::MalformedField {
                field: "air sensor status",
                value: s.to_string(),
            });
        };
        self.temperature_mk = StatsTriplet::parse(temp).map(|t| t.map(tenths_f_to_mk));
        self.humidity_percent = StatsTriplet::parse(hum);
        Ok(())
    }

    /// Current air temperature in °C, if known.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature_mk.map(|t| t.current as f64 * 1e-3 - 273.15)
    }
}

impl fmt::Display for AirSensorState {
    /// One-line measurement summary, e.g. `24.3°C / 54%`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.temperature_c(), self.humidity_percent) {
            (Some(temp_c), Some(hum)) => {
                write!(f, "{temp_c:.1}\u{b0}C / {}%", hum.current)
            }
            _ => write!(f, "no readings yet"),
        }
    }
}

/// Decoded status of the water flow meter.
///
/// Populated from the tagged binary blob; usage counts are in 0.1 L
/// units as reported on the wire, with litre accessors for presentation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlowMeterState {
    /// When the last usage session ended.
    pub end_of_last_usage: Option<NaiveDateTime>,
    /// Duration of the current session in seconds.
    pub current_duration_s: Option<u32>,
    /// Usage of the current session in 0.1 L units.
    pub current_usage_dl: Option<u32>,
    /// Usage of the last session in 0.1 L units.
    pub last_usage_dl: Option<u32>,
    /// Duration of the last session in seconds.
    pub last_duration_s: Option<u32>,
    /// Total usage over the current day in 0.1 L units.
    pub total_usage_today_dl: Option<u32>,
    /// Total usage over the device lifetime in 0.1 L units.
    pub total_usage_dl: Option<u32>,
}

impl FlowMeterState {
    /// Decodes a full `"10#<hex>"` status value and returns the RF signal
    /// strength from the blob header.
    ///
    /// Known tags update their field; unknown tags are logged and skipped.
    /// The update is atomic per entry: on any error this state is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidEnvelope`] for a malformed blob and
    /// [`DecodeError::InvalidTimestamp`] if tag `0xB7` does not carry a
    /// valid calendar time.
    pub(crate) fn decode(&mut self, raw: &str) -> Result<i16, DecodeError> {
        let record = parse_tagged_blob(raw)?;
        let mut next = self.clone();
        for field in &record.fields {
            match field.tag {
                // Reserved: observed on real hardware, meaning unknown.
                0x0B | 0xDC => {}
                0xB7 => next.end_of_last_usage = Some(decode_timestamp(field.value)?),
                0x07 => next.current_duration_s = Some(field.value),
                0xAF => next.current_usage_dl = Some(field.value),
                0x9F => next.last_usage_dl = Some(field.value),
                0x0A => next.last_duration_s = Some(field.value),
                0xCB => next.total_usage_today_dl = Some(field.value),
                0xB3 => next.total_usage_dl = Some(field.value),
                tag => tracing::warn!(
                    tag = format_args!("{tag:#04x}"),
                    value = field.value,
                    "flow meter: unknown tag, skipping"
                ),
            }
        }
        *self = next;
        Ok(record.rf_rssi)
    }

    /// Lifetime total usage in litres, if known.
    #[must_use]
    pub fn total_usage_l(&self) -> Option<f64> {
        self.total_usage_dl.map(|dl| f64::from(dl) * 0.1)
    }

    /// Current-day total usage in litres, if known.
    #[must_use]
    pub fn total_usage_today_l(&self) -> Option<f64> {
        self.total_usage_today_dl.map(|dl| f64::from(dl) * 0.1)
    }
}

impl fmt::Display for FlowMeterState {
    /// One-line usage summary, e.g. `0.7L total`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_usage_l() {
            Some(total) => write!(f, "{total:.1}L total"),
            None => write!(f, "no readings yet"),
        }
    }
}

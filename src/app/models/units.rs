//! Unit-bearing value types.
//!
//! Distances are stored in metres and carry the unit they should be shown
//! in; speeds and pressures keep the unit they were reported in and convert
//! on demand.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SemanticKey;
use crate::constants::{
    HPA_PER_INHG, KMH_PER_KNOT, KMH_PER_MPS, METERS_PER_FOOT, METERS_PER_KILOMETER,
    METERS_PER_MILE,
};
use crate::error::MetarError;

/// Units a distance can be displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl DistanceUnit {
    /// Number of metres in one of this unit
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => METERS_PER_KILOMETER,
            DistanceUnit::Miles => METERS_PER_MILE,
            DistanceUnit::Feet => METERS_PER_FOOT,
        }
    }
}

impl SemanticKey for DistanceUnit {
    fn key(&self) -> &'static str {
        match self {
            DistanceUnit::Meters => "meters",
            DistanceUnit::Kilometers => "kilometers",
            DistanceUnit::Miles => "miles",
            DistanceUnit::Feet => "feet",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = MetarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meters" | "metres" => Ok(DistanceUnit::Meters),
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "mi" | "sm" | "miles" => Ok(DistanceUnit::Miles),
            "ft" | "feet" => Ok(DistanceUnit::Feet),
            other => Err(MetarError::configuration(format!(
                "Unknown distance unit '{}' (expected meters, kilometers, miles or feet)",
                other
            ))),
        }
    }
}

/// A distance held in metres; `None` means the value was not available
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    meters: Option<f64>,
    display_unit: DistanceUnit,
}

impl Distance {
    /// Distance given in `unit`, displayed in that same unit
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self {
            meters: Some(value * unit.meters_per_unit()),
            display_unit: unit,
        }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, DistanceUnit::Meters)
    }

    pub fn kilometers(value: f64) -> Self {
        Self::new(value, DistanceUnit::Kilometers)
    }

    pub fn miles(value: f64) -> Self {
        Self::new(value, DistanceUnit::Miles)
    }

    pub fn feet(value: f64) -> Self {
        Self::new(value, DistanceUnit::Feet)
    }

    /// A distance the station could not measure
    pub fn unavailable(display_unit: DistanceUnit) -> Self {
        Self {
            meters: None,
            display_unit,
        }
    }

    pub fn is_available(&self) -> bool {
        self.meters.is_some()
    }

    pub fn in_meters(&self) -> Option<f64> {
        self.meters
    }

    /// Convert to an arbitrary unit
    pub fn value_in(&self, unit: DistanceUnit) -> Option<f64> {
        self.meters.map(|m| m / unit.meters_per_unit())
    }

    /// Value expressed in the display unit
    pub fn display_value(&self) -> Option<f64> {
        self.value_in(self.display_unit)
    }

    pub fn display_unit(&self) -> DistanceUnit {
        self.display_unit
    }

    /// Same distance, shown in another unit
    pub fn with_display_unit(self, display_unit: DistanceUnit) -> Self {
        Self {
            display_unit,
            ..self
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_value() {
            Some(value) => write!(f, "{:.2} {}", value, self.display_unit.key()),
            None => write!(f, "unavailable"),
        }
    }
}

/// Units wind speeds are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    KilometersPerHour,
    MetersPerSecond,
    Knots,
}

impl SpeedUnit {
    /// Unit for a wind-group suffix; bare digits mean km/h
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "" | "KMH" => Some(SpeedUnit::KilometersPerHour),
            "MPS" => Some(SpeedUnit::MetersPerSecond),
            "KT" => Some(SpeedUnit::Knots),
            _ => None,
        }
    }

    fn kmh_per_unit(&self) -> f64 {
        match self {
            SpeedUnit::KilometersPerHour => 1.0,
            SpeedUnit::MetersPerSecond => KMH_PER_MPS,
            SpeedUnit::Knots => KMH_PER_KNOT,
        }
    }
}

impl SemanticKey for SpeedUnit {
    fn key(&self) -> &'static str {
        match self {
            SpeedUnit::KilometersPerHour => "kilometers_per_hour",
            SpeedUnit::MetersPerSecond => "meters_per_second",
            SpeedUnit::Knots => "knots",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Speed {
    pub value: f64,
    pub unit: SpeedUnit,
}

impl Speed {
    pub fn new(value: f64, unit: SpeedUnit) -> Self {
        Self { value, unit }
    }

    /// Convert to another speed unit
    pub fn in_unit(&self, unit: SpeedUnit) -> f64 {
        self.value * self.unit.kmh_per_unit() / unit.kmh_per_unit()
    }
}

/// Units an altimeter setting is reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    Hectopascals,
    InchesOfMercury,
}

impl SemanticKey for PressureUnit {
    fn key(&self) -> &'static str {
        match self {
            PressureUnit::Hectopascals => "hectopascals",
            PressureUnit::InchesOfMercury => "inches_of_mercury",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pressure {
    pub value: f64,
    pub unit: PressureUnit,
}

impl Pressure {
    pub fn hectopascals(value: f64) -> Self {
        Self {
            value,
            unit: PressureUnit::Hectopascals,
        }
    }

    pub fn inches_of_mercury(value: f64) -> Self {
        Self {
            value,
            unit: PressureUnit::InchesOfMercury,
        }
    }

    pub fn in_unit(&self, unit: PressureUnit) -> f64 {
        match (self.unit, unit) {
            (PressureUnit::Hectopascals, PressureUnit::InchesOfMercury) => {
                self.value / HPA_PER_INHG
            }
            (PressureUnit::InchesOfMercury, PressureUnit::Hectopascals) => {
                self.value * HPA_PER_INHG
            }
            _ => self.value,
        }
    }
}

/// Whole-degree Celsius reading; `None` when the report marks it missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temperature {
    pub celsius: Option<i32>,
}

impl Temperature {
    pub fn celsius(value: i32) -> Self {
        Self {
            celsius: Some(value),
        }
    }

    pub fn missing() -> Self {
        Self { celsius: None }
    }

    pub fn is_missing(&self) -> bool {
        self.celsius.is_none()
    }

    pub fn fahrenheit(&self) -> Option<f64> {
        self.celsius.map(|c| f64::from(c) * 9.0 / 5.0 + 32.0)
    }
}

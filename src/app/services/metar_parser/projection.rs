//! Key/value projection of a parsed report for external consumers
//!
//! Optional fields are left out when unset and lists are left out when
//! empty. `temperature` and `dew_point` are always present; a missing
//! reading is rendered as `null`. Enumerations are rendered as their
//! semantic keys so that a localization layer can translate them.

use serde_json::{Map, Value, json};

use crate::app::models::{
    Distance, ParsedReport, Pressure, RunwayVisibleRange, SemanticKey, SkyCondition, Speed,
    Temperature, Visibility, WeatherPhenomenon, Wind, WindDirection,
};
use crate::config::{Config, MAX_PROJECTION_PRECISION};

/// Top-level keys of the projection
pub mod keys {
    pub const STATION_CODE: &str = "station_code";
    pub const TIME: &str = "time";
    pub const OBSERVER: &str = "observer";
    pub const WIND: &str = "wind";
    pub const VARIABLE_WIND: &str = "variable_wind";
    pub const VISIBILITY: &str = "visibility";
    pub const RUNWAY_VISIBLE_RANGE: &str = "runway_visible_range";
    pub const PRESENT_WEATHER: &str = "present_weather";
    pub const SKY_CONDITIONS: &str = "sky_conditions";
    pub const VERTICAL_VISIBILITY: &str = "vertical_visibility";
    pub const TEMPERATURE: &str = "temperature";
    pub const DEW_POINT: &str = "dew_point";
    pub const SEA_LEVEL_PRESSURE: &str = "sea_level_pressure";
    pub const RECENT_WEATHER: &str = "recent_weather";
    pub const REMARKS: &str = "remarks";
}

/// Build the key/value projection of `report`
pub fn project(report: &ParsedReport, config: &Config) -> Map<String, Value> {
    let renderer = Renderer {
        precision: config.projection_precision.min(MAX_PROJECTION_PRECISION),
    };
    let mut map = Map::new();

    map.insert(keys::STATION_CODE.into(), json!(report.station_code()));
    map.insert(
        keys::TIME.into(),
        json!(report.observation_time().to_rfc3339()),
    );
    map.insert(keys::OBSERVER.into(), json!(report.observer().key()));

    if let Some(wind) = report.wind() {
        map.insert(keys::WIND.into(), renderer.wind(wind));
    }
    if let Some(variable_wind) = report.variable_wind() {
        map.insert(
            keys::VARIABLE_WIND.into(),
            json!({ "from": variable_wind.from, "to": variable_wind.to }),
        );
    }
    if let Some(visibility) = report.visibility() {
        map.insert(keys::VISIBILITY.into(), renderer.visibility(visibility));
    }
    insert_list(
        &mut map,
        keys::RUNWAY_VISIBLE_RANGE,
        report
            .runway_visible_range()
            .iter()
            .map(|rvr| renderer.runway_visible_range(rvr)),
    );
    insert_list(
        &mut map,
        keys::PRESENT_WEATHER,
        report.present_weather().iter().map(weather),
    );
    insert_list(
        &mut map,
        keys::SKY_CONDITIONS,
        report
            .sky_conditions()
            .iter()
            .map(|condition| renderer.sky_condition(condition)),
    );
    if let Some(vertical_visibility) = report.vertical_visibility() {
        map.insert(
            keys::VERTICAL_VISIBILITY.into(),
            renderer.distance(&vertical_visibility.height),
        );
    }

    map.insert(keys::TEMPERATURE.into(), temperature(report.temperature()));
    map.insert(keys::DEW_POINT.into(), temperature(report.dew_point()));

    if let Some(pressure) = report.sea_level_pressure() {
        map.insert(keys::SEA_LEVEL_PRESSURE.into(), renderer.pressure(pressure));
    }
    insert_list(
        &mut map,
        keys::RECENT_WEATHER,
        report.recent_weather().iter().map(weather),
    );
    insert_list(
        &mut map,
        keys::REMARKS,
        report.remarks().iter().map(|remark| json!(remark)),
    );

    map
}

impl ParsedReport {
    /// Key/value projection of this report
    pub fn projection(&self, config: &Config) -> Map<String, Value> {
        project(self, config)
    }
}

fn insert_list(map: &mut Map<String, Value>, key: &str, values: impl Iterator<Item = Value>) {
    let values: Vec<Value> = values.collect();
    if !values.is_empty() {
        map.insert(key.into(), Value::Array(values));
    }
}

fn temperature(temperature: Temperature) -> Value {
    json!(temperature.celsius)
}

fn weather(phenomenon: &WeatherPhenomenon) -> Value {
    let mut map = Map::new();
    map.insert("phenomenon".into(), json!(phenomenon.phenomenon.key()));
    if let Some(modifier) = phenomenon.modifier {
        map.insert("modifier".into(), json!(modifier.key()));
    }
    if let Some(descriptor) = phenomenon.descriptor {
        map.insert("descriptor".into(), json!(descriptor.key()));
    }
    Value::Object(map)
}

struct Renderer {
    precision: usize,
}

impl Renderer {
    fn number(&self, value: f64) -> Value {
        let factor = 10f64.powi(self.precision as i32);
        json!((value * factor).round() / factor)
    }

    fn distance(&self, distance: &Distance) -> Value {
        match distance.display_value() {
            Some(value) => json!({
                "value": self.number(value),
                "unit": distance.display_unit().key(),
            }),
            None => json!("unavailable"),
        }
    }

    fn speed(&self, speed: &Speed) -> Value {
        json!({ "value": self.number(speed.value), "unit": speed.unit.key() })
    }

    fn pressure(&self, pressure: &Pressure) -> Value {
        json!({ "value": self.number(pressure.value), "unit": pressure.unit.key() })
    }

    fn wind(&self, wind: &Wind) -> Value {
        let direction = match wind.direction {
            WindDirection::Degrees(degrees) => json!(degrees),
            other => json!(other.key()),
        };
        let speed = match &wind.speed {
            Some(speed) => self.speed(speed),
            None => json!("unknown"),
        };

        let mut map = Map::new();
        map.insert("direction".into(), direction);
        map.insert("speed".into(), speed);
        if let Some(gusts) = &wind.gusts {
            map.insert("gusts".into(), self.speed(gusts));
        }
        Value::Object(map)
    }

    fn visibility(&self, visibility: &Visibility) -> Value {
        let mut map = Map::new();
        map.insert("distance".into(), self.distance(&visibility.distance));
        if let Some(direction) = visibility.direction {
            map.insert("direction".into(), json!(direction.key()));
        }
        if let Some(comparator) = visibility.comparator {
            map.insert("comparator".into(), json!(comparator.key()));
        }
        Value::Object(map)
    }

    fn runway_visible_range(&self, rvr: &RunwayVisibleRange) -> Value {
        let readings: Vec<Value> = rvr
            .readings()
            .iter()
            .map(|reading| self.visibility(reading))
            .collect();

        let mut map = Map::new();
        map.insert("designator".into(), json!(rvr.designator));
        map.insert("readings".into(), Value::Array(readings));
        if let Some(tendency) = rvr.tendency {
            map.insert("tendency".into(), json!(tendency.key()));
        }
        map.insert("unit".into(), json!(rvr.unit.key()));
        Value::Object(map)
    }

    fn sky_condition(&self, condition: &SkyCondition) -> Value {
        let mut map = Map::new();
        map.insert("condition".into(), json!(condition.key()));
        if let SkyCondition::Layer(layer) = condition {
            map.insert("height".into(), self.distance(&layer.height));
            if let Some(cloud_type) = layer.cloud_type {
                map.insert("cloud_type".into(), json!(cloud_type.key()));
            }
        }
        Value::Object(map)
    }
}

//! Tests for the key/value projection

use super::*;
use crate::app::models::DistanceUnit;
use crate::app::services::metar_parser::projection::keys;
use serde_json::{Value, json};

#[test]
fn test_cavok_projection_keys() {
    let config = Config::default();
    let projection = parse(CAVOK_REPORT).projection(&config);

    let present: Vec<&str> = projection.keys().map(String::as_str).collect();
    for key in [
        keys::STATION_CODE,
        keys::TIME,
        keys::OBSERVER,
        keys::WIND,
        keys::VISIBILITY,
        keys::PRESENT_WEATHER,
        keys::SKY_CONDITIONS,
        keys::TEMPERATURE,
        keys::DEW_POINT,
        keys::SEA_LEVEL_PRESSURE,
    ] {
        assert!(present.contains(&key), "missing {}", key);
    }
    for key in [
        keys::VARIABLE_WIND,
        keys::RUNWAY_VISIBLE_RANGE,
        keys::VERTICAL_VISIBILITY,
        keys::RECENT_WEATHER,
        keys::REMARKS,
    ] {
        assert!(!present.contains(&key), "unexpected {}", key);
    }

    assert_eq!(projection[keys::STATION_CODE], json!("EGLL"));
    assert_eq!(projection[keys::OBSERVER], json!("real"));
    assert_eq!(projection[keys::TIME], json!("2024-03-21T16:50:00+00:00"));
    assert_eq!(
        projection[keys::PRESENT_WEATHER],
        json!([{ "phenomenon": "no_significant_weather" }])
    );
    assert_eq!(
        projection[keys::SKY_CONDITIONS],
        json!([{ "condition": "no_significant_cloud" }])
    );
}

#[test]
fn test_wind_and_visibility_rendering() {
    let projection = parse(STORM_REPORT).projection(&Config::default());

    assert_eq!(
        projection[keys::WIND],
        json!({
            "direction": 240,
            "speed": { "value": 15.0, "unit": "knots" },
            "gusts": { "value": 30.0, "unit": "knots" },
        })
    );
    assert_eq!(projection[keys::VARIABLE_WIND], json!({ "from": 200, "to": 280 }));
    assert_eq!(
        projection[keys::VISIBILITY],
        json!({ "distance": { "value": 3000.0, "unit": "meters" } })
    );
    assert_eq!(
        projection[keys::PRESENT_WEATHER][0],
        json!({ "phenomenon": "rain", "modifier": "heavy", "descriptor": "thunderstorm_and" })
    );
    assert_eq!(
        projection[keys::SKY_CONDITIONS][0],
        json!({
            "condition": "broken",
            "height": { "value": 600.0, "unit": "meters" },
            "cloud_type": "cumulonimbus",
        })
    );
    assert_eq!(projection[keys::RECENT_WEATHER], json!([{ "phenomenon": "thunderstorm" }]));
    assert_eq!(projection[keys::REMARKS], json!(["CB", "W"]));
}

#[test]
fn test_runway_visible_range_rendering() {
    let projection = parse(FOG_REPORT).projection(&Config::default());

    assert_eq!(
        projection[keys::RUNWAY_VISIBLE_RANGE],
        json!([{
            "designator": "24",
            "readings": [
                { "distance": { "value": 600.0, "unit": "feet" } },
                { "distance": { "value": 1500.0, "unit": "feet" } },
            ],
            "unit": "feet",
        }])
    );
    assert_eq!(
        projection[keys::VERTICAL_VISIBILITY],
        json!({ "value": 30.0, "unit": "meters" })
    );
}

#[test]
fn test_missing_temperature_is_null() {
    let projection = parse("EGLL 211650Z 24010KT 9999 17/XX Q1020").projection(&Config::default());

    assert_eq!(projection[keys::TEMPERATURE], json!(17));
    assert_eq!(projection[keys::DEW_POINT], Value::Null);
    assert!(projection.contains_key(keys::DEW_POINT));
}

#[test]
fn test_auto_projection_sentinels() {
    let projection = parse(AUTO_REPORT).projection(&Config::default());

    assert_eq!(projection[keys::OBSERVER], json!("auto"));
    assert_eq!(
        projection[keys::VISIBILITY],
        json!({ "distance": "unavailable" })
    );
    assert_eq!(
        projection[keys::PRESENT_WEATHER],
        json!([{ "phenomenon": "not_observed" }])
    );
    assert_eq!(
        projection[keys::SKY_CONDITIONS],
        json!([{ "condition": "not_observed" }])
    );
}

#[test]
fn test_precision_and_display_unit() {
    let config = Config::default()
        .with_visibility_unit(DistanceUnit::Kilometers)
        .with_projection_precision(1);
    let projection = parse_with(config.clone(), US_REPORT).projection(&config);

    // 10 statute miles is 16.09344 km
    assert_eq!(
        projection[keys::VISIBILITY]["distance"],
        json!({ "value": 16.1, "unit": "kilometers" })
    );
    assert_eq!(
        projection[keys::SEA_LEVEL_PRESSURE],
        json!({ "value": 30.0, "unit": "inches_of_mercury" })
    );
}

#[test]
fn test_precision_is_capped() {
    let config = Config::default().with_projection_precision(usize::MAX);
    let projection = parse_with(config.clone(), FRACTIONAL_REPORT).projection(&config);

    assert_eq!(
        projection[keys::SEA_LEVEL_PRESSURE],
        json!({ "value": 29.92, "unit": "inches_of_mercury" })
    );
    assert_eq!(
        projection[keys::VISIBILITY]["distance"],
        json!({ "value": 1.5, "unit": "miles" })
    );
}

//! Tests for the individual group grammars

use super::*;
use crate::app::models::{
    CloudType, Comparator, CompassPoint, Descriptor, DistanceUnit, Modifier, ObserverMode,
    Phenomenon, PressureUnit, SkyCondition, SkyQuantity, SpeedUnit, Tendency, WindDirection,
};
use crate::app::services::metar_parser::group_parsers::*;
use crate::error::MetarError;

#[test]
fn test_location_grammar() {
    assert_eq!(parse_location("EGLL").matched().as_deref(), Some("EGLL"));
    assert_eq!(parse_location("K1V4").matched().as_deref(), Some("K1V4"));
    assert!(!parse_location("123").is_match());
    assert!(!parse_location("egll").is_match());
    assert!(!parse_location("EGLLX").is_match());
}

#[test]
fn test_date_time_ranges() {
    let day_time = parse_date_time("211650Z").matched().unwrap();
    assert_eq!((day_time.day, day_time.hour, day_time.minute), (21, 16, 50));

    assert!(matches!(parse_date_time("211650"), GroupOutcome::NoMatch));
    assert!(matches!(
        parse_date_time("322450Z"),
        GroupOutcome::Invalid(MetarError::MalformedDateTime { .. })
    ));
    assert!(matches!(
        parse_date_time("001650Z"),
        GroupOutcome::Invalid(MetarError::MalformedDateTime { .. })
    ));
}

#[test]
fn test_observer_literals() {
    assert_eq!(parse_observer("AUTO").matched(), Some(ObserverMode::Auto));
    assert_eq!(parse_observer("COR").matched(), Some(ObserverMode::Corrected));
    assert!(!parse_observer("24010KT").is_match());
}

#[test]
fn test_wind_units_and_gusts() {
    let wind = parse_wind("24015G30KT").matched().unwrap();
    assert_eq!(wind.direction, WindDirection::Degrees(240));
    let speed = wind.speed.unwrap();
    assert_close(speed.value, 15.0);
    assert_eq!(speed.unit, SpeedUnit::Knots);
    assert_close(wind.gusts.unwrap().value, 30.0);

    let wind = parse_wind("VRB03MPS").matched().unwrap();
    assert_eq!(wind.direction, WindDirection::Variable);
    assert_eq!(wind.speed.unwrap().unit, SpeedUnit::MetersPerSecond);
    assert!(wind.gusts.is_none());

    // No suffix means kilometres per hour
    let wind = parse_wind("18020").matched().unwrap();
    assert_eq!(wind.speed.unwrap().unit, SpeedUnit::KilometersPerHour);

    let wind = parse_wind("/////KT").matched().unwrap();
    assert_eq!(wind.direction, WindDirection::Unknown);
    assert!(wind.speed.is_none());

    assert!(!parse_wind("9999").is_match());
    assert!(!parse_wind("CAVOK").is_match());
}

#[test]
fn test_wind_speed_conversion() {
    let wind = parse_wind("27010KT").matched().unwrap();
    assert_close(
        wind.speed.unwrap().in_unit(SpeedUnit::KilometersPerHour),
        18.52,
    );
}

#[test]
fn test_variable_wind() {
    let variable = parse_variable_wind("200V280").matched().unwrap();
    assert_eq!((variable.from, variable.to), (200, 280));
    assert!(!parse_variable_wind("200280").is_match());
}

#[test]
fn test_visibility_meters_and_sentinel() {
    let visibility = parse_visibility("0800").matched().unwrap();
    assert_close(visibility.distance.in_meters().unwrap(), 800.0);
    assert_eq!(visibility.distance.display_unit(), DistanceUnit::Meters);
    assert!(visibility.comparator.is_none());

    let visibility = parse_visibility("9999").matched().unwrap();
    assert_close(visibility.distance.in_meters().unwrap(), 10_000.0);
    assert_eq!(visibility.comparator, Some(Comparator::MoreThan));
}

#[test]
fn test_visibility_us_forms() {
    let visibility = parse_visibility("10SM").matched().unwrap();
    assert_eq!(visibility.distance.display_unit(), DistanceUnit::Miles);
    assert_close(visibility.distance.display_value().unwrap(), 10.0);

    let visibility = parse_visibility("P6SM").matched().unwrap();
    assert_eq!(visibility.comparator, Some(Comparator::MoreThan));

    let visibility = parse_visibility("M1/4SM").matched().unwrap();
    assert_eq!(visibility.comparator, Some(Comparator::LessThan));
    assert_close(visibility.distance.display_value().unwrap(), 0.25);

    let visibility = parse_visibility("3/16SM").matched().unwrap();
    assert_close(visibility.distance.display_value().unwrap(), 0.1875);
}

#[test]
fn test_visibility_kilometers_and_direction() {
    let visibility = parse_visibility("10KM").matched().unwrap();
    assert_eq!(visibility.distance.display_unit(), DistanceUnit::Kilometers);
    assert_close(visibility.distance.in_meters().unwrap(), 10_000.0);

    let visibility = parse_visibility("05NE").matched().unwrap();
    assert_eq!(visibility.direction, Some(CompassPoint::NorthEast));
    assert_eq!(visibility.distance.display_unit(), DistanceUnit::Kilometers);
    assert_close(visibility.distance.in_meters().unwrap(), 5000.0);

    // Four-digit directional groups are metres
    let visibility = parse_visibility("1500SW").matched().unwrap();
    assert_eq!(visibility.direction, Some(CompassPoint::SouthWest));
    assert_eq!(visibility.distance.display_unit(), DistanceUnit::Meters);
    assert_close(visibility.distance.in_meters().unwrap(), 1500.0);

    assert!(!parse_visibility("150SW").is_match());

    assert!(!parse_visibility("FEW020").is_match());
}

#[test]
fn test_fractional_visibility_pair() {
    let visibility = parse_fractional_visibility("1", "1/2SM").matched().unwrap();
    assert_close(visibility.distance.display_value().unwrap(), 1.5);

    let visibility = parse_fractional_visibility("2", "3/4SM").matched().unwrap();
    assert_close(visibility.distance.display_value().unwrap(), 2.75);

    assert!(!parse_fractional_visibility("3", "1/2SM").is_match());
    assert!(!parse_fractional_visibility("1", "M1/2SM").is_match());
    assert!(!parse_fractional_visibility("1", "10SM").is_match());
}

#[test]
fn test_runway_visible_range_meters() {
    let rvr = parse_runway_visible_range("R25L/1200N").matched().unwrap();
    assert_eq!(rvr.designator, "25L");
    assert_eq!(rvr.unit, DistanceUnit::Meters);
    assert_close(rvr.visibility1.distance.in_meters().unwrap(), 1200.0);
    assert!(rvr.visibility2.is_none());
    assert_eq!(rvr.tendency, Some(Tendency::NoChange));

    let rvr = parse_runway_visible_range("R09/P1500/U").matched().unwrap();
    assert_eq!(rvr.visibility1.comparator, Some(Comparator::MoreThan));
    assert_eq!(rvr.tendency, Some(Tendency::Improving));
}

#[test]
fn test_runway_visible_range_variable_feet() {
    let rvr = parse_runway_visible_range("R24/0600V1500FT").matched().unwrap();
    assert_eq!(rvr.designator, "24");
    assert_eq!(rvr.unit, DistanceUnit::Feet);
    assert_close(rvr.visibility1.distance.display_value().unwrap(), 600.0);
    assert_close(rvr.visibility2.unwrap().distance.display_value().unwrap(), 1500.0);
    assert!(rvr.tendency.is_none());
    assert_eq!(rvr.readings().len(), 2);
}

#[test]
fn test_weather_precedence() {
    let heavy_storm = parse_weather_phenomenon("+TSRA").matched().unwrap();
    assert_eq!(heavy_storm.modifier, Some(Modifier::Heavy));
    assert_eq!(heavy_storm.descriptor, Some(Descriptor::ThunderstormAnd));
    assert_eq!(heavy_storm.phenomenon, Phenomenon::Rain);

    let mist = parse_weather_phenomenon("BR").matched().unwrap();
    assert_eq!(mist.phenomenon, Phenomenon::Mist);
    assert!(mist.modifier.is_none() && mist.descriptor.is_none());

    let freezing = parse_weather_phenomenon("-FZDZ").matched().unwrap();
    assert_eq!(freezing.modifier, Some(Modifier::Light));
    assert_eq!(freezing.descriptor, Some(Descriptor::Freezing));
    assert_eq!(freezing.phenomenon, Phenomenon::Drizzle);

    let showers = parse_weather_phenomenon("VCSH").matched().unwrap();
    assert_eq!(showers.modifier, Some(Modifier::Nearby));
    assert_eq!(showers.phenomenon, Phenomenon::Shower);

    let thunder = parse_weather_phenomenon("TS").matched().unwrap();
    assert_eq!(thunder.phenomenon, Phenomenon::Thunderstorm);
    assert!(thunder.descriptor.is_none());
}

#[test]
fn test_combined_precipitation_codes() {
    let mixed = parse_weather_phenomenon("-RADZ").matched().unwrap();
    assert_eq!(mixed.modifier, Some(Modifier::Light));
    assert!(mixed.descriptor.is_none());
    assert_eq!(mixed.phenomenon, Phenomenon::RainAndDrizzle);

    let pellets = parse_weather_phenomenon("SNPL").matched().unwrap();
    assert_eq!(pellets.phenomenon, Phenomenon::SnowAndIcePellets);

    let pellets = parse_weather_phenomenon("+RAPL").matched().unwrap();
    assert_eq!(pellets.phenomenon, Phenomenon::RainAndIcePellets);

    let showers = parse_weather_phenomenon("SHGS").matched().unwrap();
    assert_eq!(showers.descriptor, Some(Descriptor::ShowerOf));
    assert_eq!(showers.phenomenon, Phenomenon::SmallHail);
}

#[test]
fn test_weather_rejects_unknown_codes() {
    assert!(!parse_weather_phenomenon("XYZ").is_match());
    assert!(!parse_weather_phenomenon("+").is_match());
    assert!(!parse_weather_phenomenon("FEW020").is_match());
    assert!(!parse_weather_phenomenon("RMK").is_match());
}

#[test]
fn test_recent_weather_prefix() {
    let recent = parse_recent_weather("RERA").matched().unwrap();
    assert_eq!(recent.phenomenon, Phenomenon::Rain);
    assert!(!parse_recent_weather("RE").is_match());
    assert!(!parse_recent_weather("RA").is_match());
}

#[test]
fn test_sky_condition_layers() {
    let SkyCondition::Layer(layer) = parse_sky_condition("BKN020CB").matched().unwrap() else {
        panic!("Expected a cloud layer");
    };
    assert_eq!(layer.quantity, SkyQuantity::Broken);
    assert_close(layer.height.in_meters().unwrap(), 600.0);
    assert_eq!(layer.cloud_type, Some(CloudType::Cumulonimbus));

    let SkyCondition::Layer(layer) = parse_sky_condition("SCT///").matched().unwrap() else {
        panic!("Expected a cloud layer");
    };
    assert!(!layer.height.is_available());
    assert!(layer.cloud_type.is_none());

    assert_eq!(parse_sky_condition("NSC").matched(), Some(SkyCondition::Clear));
    assert_eq!(parse_sky_condition("SKC").matched(), Some(SkyCondition::Clear));
    assert!(!parse_sky_condition("17/12").is_match());
}

#[test]
fn test_sky_condition_unknown_type_is_invalid() {
    match parse_sky_condition("FEW020XY") {
        GroupOutcome::Invalid(MetarError::UnknownSkyConditionType { token, suffix, .. }) => {
            assert_eq!(token, "FEW020XY");
            assert_eq!(suffix, "XY");
        }
        other => panic!("Expected UnknownSkyConditionType, got {:?}", other),
    }
}

#[test]
fn test_vertical_visibility() {
    let vv = parse_vertical_visibility("VV003").matched().unwrap();
    assert_close(vv.height.in_meters().unwrap(), 90.0);
    assert!(!parse_vertical_visibility("VV///").matched().unwrap().height.is_available());
    assert!(!parse_vertical_visibility("VVV").is_match());
}

#[test]
fn test_temperature_dew_point_forms() {
    let (temperature, dew_point) = parse_temperature_dew_point("M05/M12").matched().unwrap();
    assert_eq!(temperature.celsius, Some(-5));
    assert_eq!(dew_point.celsius, Some(-12));

    let (temperature, dew_point) = parse_temperature_dew_point("17/XX").matched().unwrap();
    assert_eq!(temperature.celsius, Some(17));
    assert!(dew_point.is_missing());

    let (temperature, dew_point) = parse_temperature_dew_point("/////").matched().unwrap();
    assert!(temperature.is_missing() && dew_point.is_missing());

    assert!(!parse_temperature_dew_point("1712").is_match());
}

#[test]
fn test_pressure_units() {
    let pressure = parse_pressure("Q1020").matched().unwrap();
    assert_eq!(pressure.unit, PressureUnit::Hectopascals);
    assert_close(pressure.value, 1020.0);

    let pressure = parse_pressure("A3000").matched().unwrap();
    assert_eq!(pressure.unit, PressureUnit::InchesOfMercury);
    assert_close(pressure.value, 30.0);
    assert!((pressure.in_unit(PressureUnit::Hectopascals) - 1015.917).abs() < 1e-3);

    assert!(!parse_pressure("Q102").is_match());
}

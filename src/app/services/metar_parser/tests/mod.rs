//! Shared fixtures for METAR parser tests
//!
//! Sample reports cover the WMO and US variants, automated stations and the
//! CAVOK shortcut.

use chrono::{DateTime, TimeZone, Utc};

use crate::app::models::ParsedReport;
use crate::app::services::metar_parser::MetarParser;
use crate::config::Config;

// Test modules
mod group_parser_tests;
mod projection_tests;

pub const CAVOK_REPORT: &str = "EGLL 211650Z 24010KT CAVOK 17/12 Q1020";
pub const US_REPORT: &str = "KJFK 211651Z 18010KT 10SM FEW250 24/18 A3000";
pub const AUTO_REPORT: &str = "LFPG 211700Z AUTO 27015G25KT //// // ////// 12/08 Q1013";
pub const STORM_REPORT: &str =
    "EDDF 211650Z 24015G30KT 200V280 3000 R25L/1200N +TSRA BR BKN020CB 18/16 Q1008 RETS RMK CB W";
pub const FRACTIONAL_REPORT: &str = "KSFO 211656Z 29012KT 1 1/2SM -RA OVC008 12/11 A2992";
pub const FOG_REPORT: &str = "EGPH 220620Z 00000KT 0100 R24/0600V1500FT FG VV001 04/04 Q1025";

/// Fixed observation time shared by every fixture
pub fn observation_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 21, 16, 50, 0).unwrap()
}

/// Parse with the default configuration, panicking on failure
pub fn parse(report: &str) -> ParsedReport {
    parse_with(Config::default(), report)
}

pub fn parse_with(config: Config, report: &str) -> ParsedReport {
    MetarParser::new(config)
        .parse(report, observation_time())
        .unwrap_or_else(|e| panic!("Failed to parse '{}': {}", report, e))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {} but got {}",
        expected,
        actual
    );
}

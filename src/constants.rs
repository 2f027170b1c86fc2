//! Application constants for the METAR processor
//!
//! Conversion factors and the immutable code tables consulted by the group
//! parsers. Tables are plain static data; nothing here is mutated at runtime.

use crate::app::models::{CompassPoint, Descriptor, Modifier, Phenomenon};

// =============================================================================
// Unit Conversion Factors
// =============================================================================

pub const METERS_PER_KILOMETER: f64 = 1000.0;
pub const METERS_PER_MILE: f64 = 1609.344;
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Kilometres per hour in one knot
pub const KMH_PER_KNOT: f64 = 1.852;
/// Kilometres per hour in one metre per second
pub const KMH_PER_MPS: f64 = 3.6;

/// Hectopascals in one inch of mercury
pub const HPA_PER_INHG: f64 = 33.8639;

/// Sky-condition and vertical-visibility heights are coded in hundreds of
/// feet, which the report model carries as 30 metre steps.
pub const METERS_PER_HEIGHT_UNIT: f64 = 30.0;

/// Altimeter settings in `A####` groups are hundredths of an inch
pub const ALTIMETER_SCALE: f64 = 100.0;

// =============================================================================
// Visibility Sentinels
// =============================================================================

/// `9999` and CAVOK both mean "10 km or more"
pub const MAX_REPORTED_VISIBILITY_METERS: f64 = 10_000.0;

/// Coded value that stands for the maximum reported visibility
pub const MAX_VISIBILITY_CODE: &str = "9999";

// =============================================================================
// Literal Tokens
// =============================================================================

pub const CAVOK: &str = "CAVOK";
pub const REMARKS_MARKER: &str = "RMK";
pub const AUTO: &str = "AUTO";
pub const CORRECTED: &str = "COR";

/// Missing-group markers emitted by automated stations
pub mod not_observed {
    pub const VISIBILITY: &str = "////";
    pub const PRESENT_WEATHER: &str = "//";
    pub const SKY_CONDITIONS: &[&str] = &["///", "//////"];
}

/// Literal tokens meaning no cloud of interest
pub static CLEAR_SKY_CODES: &[&str] = &["NSC", "NCD", "CLR", "SKC"];

/// Prefix of recent-weather groups (`RERA`, `RETS`)
pub const RECENT_WEATHER_PREFIX: &str = "RE";

// =============================================================================
// Weather Code Tables
// =============================================================================

pub static MODIFIER_CODES: &[(&str, Modifier)] = &[
    ("+", Modifier::Heavy),
    ("-", Modifier::Light),
    ("VC", Modifier::Nearby),
];

pub static DESCRIPTOR_CODES: &[(&str, Descriptor)] = &[
    ("BC", Descriptor::PatchesOf),
    ("BL", Descriptor::Blowing),
    ("DR", Descriptor::LowDrifting),
    ("FZ", Descriptor::Freezing),
    ("MI", Descriptor::Shallow),
    ("PR", Descriptor::Partial),
    ("SH", Descriptor::ShowerOf),
    ("TS", Descriptor::ThunderstormAnd),
];

/// Phenomenon codes. `TSRA` has a single entry; the descriptor table
/// usually claims the `TS` prefix first, so it is only reached after
/// another descriptor (`SHTSRA`).
pub static PHENOMENON_CODES: &[(&str, Phenomenon)] = &[
    ("BR", Phenomenon::Mist),
    ("DU", Phenomenon::Dust),
    ("DZ", Phenomenon::Drizzle),
    ("FG", Phenomenon::Fog),
    ("FU", Phenomenon::Smoke),
    ("GR", Phenomenon::Hail),
    ("GS", Phenomenon::SmallHail),
    ("HZ", Phenomenon::Haze),
    ("IC", Phenomenon::IceCrystals),
    ("PL", Phenomenon::IcePellets),
    ("PO", Phenomenon::DustWhirls),
    ("PY", Phenomenon::Spray),
    ("RA", Phenomenon::Rain),
    ("SA", Phenomenon::Sand),
    ("SG", Phenomenon::SnowGrains),
    ("SN", Phenomenon::Snow),
    ("SQ", Phenomenon::Squall),
    ("SH", Phenomenon::Shower),
    ("UP", Phenomenon::UnknownPhenomenon),
    ("VA", Phenomenon::VolcanicAsh),
    ("FC", Phenomenon::FunnelCloud),
    ("SS", Phenomenon::Sandstorm),
    ("DS", Phenomenon::Duststorm),
    ("TS", Phenomenon::Thunderstorm),
    ("TSRA", Phenomenon::ThunderstormAndRain),
    ("RASN", Phenomenon::RainAndSnow),
    ("SNRA", Phenomenon::SnowAndRain),
    ("DZRA", Phenomenon::DrizzleAndRain),
    ("RADZ", Phenomenon::RainAndDrizzle),
    ("RAPL", Phenomenon::RainAndIcePellets),
    ("PLRA", Phenomenon::IcePelletsAndRain),
    ("SNPL", Phenomenon::SnowAndIcePellets),
    ("PLSN", Phenomenon::IcePelletsAndSnow),
    ("RAGS", Phenomenon::RainAndSmallHail),
    ("SNGS", Phenomenon::SnowAndSmallHail),
    ("NSW", Phenomenon::NoSignificantWeather),
];

pub static COMPASS_POINTS: &[(&str, CompassPoint)] = &[
    ("N", CompassPoint::North),
    ("NE", CompassPoint::NorthEast),
    ("E", CompassPoint::East),
    ("SE", CompassPoint::SouthEast),
    ("S", CompassPoint::South),
    ("SW", CompassPoint::SouthWest),
    ("W", CompassPoint::West),
    ("NW", CompassPoint::NorthWest),
];

/// Look up a code in one of the tables above
pub fn lookup<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, value)| *value)
}

/// Regex alternation of every code in a table, longest codes first and
/// with regex metacharacters escaped
pub fn alternation<T>(table: &[(&str, T)]) -> String {
    let mut codes: Vec<&str> = table.iter().map(|(code, _)| *code).collect();
    codes.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
    codes
        .iter()
        .map(|code| regex::escape(code))
        .collect::<Vec<_>>()
        .join("|")
}

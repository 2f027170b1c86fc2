//! Core data structures for parsed METAR reports.
//!
//! Every enumerable value exposes a stable semantic key through
//! [`SemanticKey`]. Serde serialization uses the same snake_case keys, so
//! consumers that render human-readable text can rely on either.

pub mod units;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use units::{Distance, DistanceUnit, Pressure, PressureUnit, Speed, SpeedUnit, Temperature};

use crate::constants::MAX_REPORTED_VISIBILITY_METERS;

/// Stable identifier for an enumerable choice, independent of any language
pub trait SemanticKey {
    fn key(&self) -> &'static str;
}

/// How the observation was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObserverMode {
    #[default]
    Real,
    Auto,
    Corrected,
}

impl SemanticKey for ObserverMode {
    fn key(&self) -> &'static str {
        match self {
            ObserverMode::Real => "real",
            ObserverMode::Auto => "auto",
            ObserverMode::Corrected => "corrected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    MoreThan,
    LessThan,
}

impl Comparator {
    /// `P` and `M` prefixes used in visibility and runway groups
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(Comparator::MoreThan),
            "M" => Some(Comparator::LessThan),
            _ => None,
        }
    }
}

impl SemanticKey for Comparator {
    fn key(&self) -> &'static str {
        match self {
            Comparator::MoreThan => "more_than",
            Comparator::LessThan => "less_than",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    pub fn degrees(&self) -> u16 {
        match self {
            CompassPoint::North => 0,
            CompassPoint::NorthEast => 45,
            CompassPoint::East => 90,
            CompassPoint::SouthEast => 135,
            CompassPoint::South => 180,
            CompassPoint::SouthWest => 225,
            CompassPoint::West => 270,
            CompassPoint::NorthWest => 315,
        }
    }
}

impl SemanticKey for CompassPoint {
    fn key(&self) -> &'static str {
        match self {
            CompassPoint::North => "north",
            CompassPoint::NorthEast => "north_east",
            CompassPoint::East => "east",
            CompassPoint::SouthEast => "south_east",
            CompassPoint::South => "south",
            CompassPoint::SouthWest => "south_west",
            CompassPoint::West => "west",
            CompassPoint::NorthWest => "north_west",
        }
    }
}

/// Wind direction: compass degrees or one of the two sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindDirection {
    Degrees(u16),
    Variable,
    Unknown,
}

impl SemanticKey for WindDirection {
    fn key(&self) -> &'static str {
        match self {
            WindDirection::Degrees(_) => "degrees",
            WindDirection::Variable => "variable",
            WindDirection::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub direction: WindDirection,
    /// `None` when the speed itself was not reported (`/////`)
    pub speed: Option<Speed>,
    pub gusts: Option<Speed>,
}

/// Range the wind direction oscillates within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableWind {
    pub from: u16,
    pub to: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub distance: Distance,
    pub direction: Option<CompassPoint>,
    pub comparator: Option<Comparator>,
}

impl Visibility {
    pub fn new(distance: Distance) -> Self {
        Self {
            distance,
            direction: None,
            comparator: None,
        }
    }

    pub fn with_comparator(mut self, comparator: Option<Comparator>) -> Self {
        self.comparator = comparator;
        self
    }

    pub fn with_direction(mut self, direction: CompassPoint) -> Self {
        self.direction = Some(direction);
        self
    }

    /// `9999` and CAVOK: 10 km or more
    pub fn more_than_ten_kilometers() -> Self {
        Self::new(Distance::meters(MAX_REPORTED_VISIBILITY_METERS))
            .with_comparator(Some(Comparator::MoreThan))
    }

    /// `////` from an automated station
    pub fn not_observed() -> Self {
        Self::new(Distance::unavailable(DistanceUnit::Meters))
    }

    pub fn is_observed(&self) -> bool {
        self.distance.is_available()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tendency {
    NoChange,
    Improving,
    Worsening,
}

impl Tendency {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "N" => Some(Tendency::NoChange),
            "U" => Some(Tendency::Improving),
            "D" => Some(Tendency::Worsening),
            _ => None,
        }
    }
}

impl SemanticKey for Tendency {
    fn key(&self) -> &'static str {
        match self {
            Tendency::NoChange => "no_change",
            Tendency::Improving => "improving",
            Tendency::Worsening => "worsening",
        }
    }
}

/// Runway visible range; the second reading is present for the `V` form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayVisibleRange {
    pub designator: String,
    pub visibility1: Visibility,
    pub visibility2: Option<Visibility>,
    pub tendency: Option<Tendency>,
    /// Either metres or feet, as coded in the group
    pub unit: DistanceUnit,
}

impl RunwayVisibleRange {
    /// All readings in order
    pub fn readings(&self) -> Vec<Visibility> {
        std::iter::once(self.visibility1)
            .chain(self.visibility2)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Heavy,
    Light,
    Nearby,
}

impl SemanticKey for Modifier {
    fn key(&self) -> &'static str {
        match self {
            Modifier::Heavy => "heavy",
            Modifier::Light => "light",
            Modifier::Nearby => "nearby",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Descriptor {
    PatchesOf,
    Blowing,
    LowDrifting,
    Freezing,
    Shallow,
    Partial,
    ShowerOf,
    ThunderstormAnd,
}

impl SemanticKey for Descriptor {
    fn key(&self) -> &'static str {
        match self {
            Descriptor::PatchesOf => "patches_of",
            Descriptor::Blowing => "blowing",
            Descriptor::LowDrifting => "low_drifting",
            Descriptor::Freezing => "freezing",
            Descriptor::Shallow => "shallow",
            Descriptor::Partial => "partial",
            Descriptor::ShowerOf => "shower_of",
            Descriptor::ThunderstormAnd => "thunderstorm_and",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phenomenon {
    Mist,
    Dust,
    Drizzle,
    Fog,
    Smoke,
    Hail,
    SmallHail,
    Haze,
    IceCrystals,
    IcePellets,
    DustWhirls,
    Spray,
    Rain,
    Sand,
    SnowGrains,
    Snow,
    Squall,
    Shower,
    UnknownPhenomenon,
    VolcanicAsh,
    FunnelCloud,
    Sandstorm,
    Duststorm,
    Thunderstorm,
    ThunderstormAndRain,
    RainAndSnow,
    SnowAndRain,
    DrizzleAndRain,
    RainAndDrizzle,
    RainAndIcePellets,
    IcePelletsAndRain,
    SnowAndIcePellets,
    IcePelletsAndSnow,
    RainAndSmallHail,
    SnowAndSmallHail,
    NoSignificantWeather,
    NotObserved,
}

impl SemanticKey for Phenomenon {
    fn key(&self) -> &'static str {
        match self {
            Phenomenon::Mist => "mist",
            Phenomenon::Dust => "dust",
            Phenomenon::Drizzle => "drizzle",
            Phenomenon::Fog => "fog",
            Phenomenon::Smoke => "smoke",
            Phenomenon::Hail => "hail",
            Phenomenon::SmallHail => "small_hail",
            Phenomenon::Haze => "haze",
            Phenomenon::IceCrystals => "ice_crystals",
            Phenomenon::IcePellets => "ice_pellets",
            Phenomenon::DustWhirls => "dust_whirls",
            Phenomenon::Spray => "spray",
            Phenomenon::Rain => "rain",
            Phenomenon::Sand => "sand",
            Phenomenon::SnowGrains => "snow_grains",
            Phenomenon::Snow => "snow",
            Phenomenon::Squall => "squall",
            Phenomenon::Shower => "shower",
            Phenomenon::UnknownPhenomenon => "unknown_phenomenon",
            Phenomenon::VolcanicAsh => "volcanic_ash",
            Phenomenon::FunnelCloud => "funnel_cloud",
            Phenomenon::Sandstorm => "sandstorm",
            Phenomenon::Duststorm => "duststorm",
            Phenomenon::Thunderstorm => "thunderstorm",
            Phenomenon::ThunderstormAndRain => "thunderstorm_and_rain",
            Phenomenon::RainAndSnow => "rain_and_snow",
            Phenomenon::SnowAndRain => "snow_and_rain",
            Phenomenon::DrizzleAndRain => "drizzle_and_rain",
            Phenomenon::RainAndDrizzle => "rain_and_drizzle",
            Phenomenon::RainAndIcePellets => "rain_and_ice_pellets",
            Phenomenon::IcePelletsAndRain => "ice_pellets_and_rain",
            Phenomenon::SnowAndIcePellets => "snow_and_ice_pellets",
            Phenomenon::IcePelletsAndSnow => "ice_pellets_and_snow",
            Phenomenon::RainAndSmallHail => "rain_and_small_hail",
            Phenomenon::SnowAndSmallHail => "snow_and_small_hail",
            Phenomenon::NoSignificantWeather => "no_significant_weather",
            Phenomenon::NotObserved => "not_observed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeatherPhenomenon {
    pub phenomenon: Phenomenon,
    pub modifier: Option<Modifier>,
    pub descriptor: Option<Descriptor>,
}

impl WeatherPhenomenon {
    pub fn new(phenomenon: Phenomenon) -> Self {
        Self {
            phenomenon,
            modifier: None,
            descriptor: None,
        }
    }

    pub fn no_significant_weather() -> Self {
        Self::new(Phenomenon::NoSignificantWeather)
    }

    pub fn not_observed() -> Self {
        Self::new(Phenomenon::NotObserved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyQuantity {
    Few,
    Scattered,
    Broken,
    Overcast,
}

impl SkyQuantity {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "FEW" => Some(SkyQuantity::Few),
            "SCT" => Some(SkyQuantity::Scattered),
            "BKN" => Some(SkyQuantity::Broken),
            "OVC" => Some(SkyQuantity::Overcast),
            _ => None,
        }
    }
}

impl SemanticKey for SkyQuantity {
    fn key(&self) -> &'static str {
        match self {
            SkyQuantity::Few => "few",
            SkyQuantity::Scattered => "scattered",
            SkyQuantity::Broken => "broken",
            SkyQuantity::Overcast => "overcast",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudType {
    Cumulonimbus,
    ToweringCumulus,
}

impl SemanticKey for CloudType {
    fn key(&self) -> &'static str {
        match self {
            CloudType::Cumulonimbus => "cumulonimbus",
            CloudType::ToweringCumulus => "towering_cumulus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub quantity: SkyQuantity,
    pub height: Distance,
    pub cloud_type: Option<CloudType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkyCondition {
    /// NSC, NCD, CLR or SKC
    Clear,
    /// Appended by CAVOK
    NoSignificantCloud,
    /// `///` or `//////` from an automated station
    NotObserved,
    Layer(CloudLayer),
}

impl SemanticKey for SkyCondition {
    fn key(&self) -> &'static str {
        match self {
            SkyCondition::Clear => "clear",
            SkyCondition::NoSignificantCloud => "no_significant_cloud",
            SkyCondition::NotObserved => "not_observed",
            SkyCondition::Layer(layer) => layer.quantity.key(),
        }
    }
}

/// Vertical visibility into an obscuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalVisibility {
    pub height: Distance,
}

/// A fully parsed report. Built by the parser and not modifiable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReport {
    pub(crate) station_code: String,
    pub(crate) observation_time: DateTime<Utc>,
    pub(crate) observer: ObserverMode,
    pub(crate) wind: Option<Wind>,
    pub(crate) variable_wind: Option<VariableWind>,
    pub(crate) visibility: Option<Visibility>,
    pub(crate) runway_visible_range: Vec<RunwayVisibleRange>,
    pub(crate) present_weather: Vec<WeatherPhenomenon>,
    pub(crate) sky_conditions: Vec<SkyCondition>,
    pub(crate) vertical_visibility: Option<VerticalVisibility>,
    pub(crate) temperature: Temperature,
    pub(crate) dew_point: Temperature,
    pub(crate) sea_level_pressure: Option<Pressure>,
    pub(crate) recent_weather: Vec<WeatherPhenomenon>,
    pub(crate) remarks: Vec<String>,
}

impl ParsedReport {
    pub fn station_code(&self) -> &str {
        &self.station_code
    }

    pub fn observation_time(&self) -> DateTime<Utc> {
        self.observation_time
    }

    pub fn observer(&self) -> ObserverMode {
        self.observer
    }

    pub fn wind(&self) -> Option<&Wind> {
        self.wind.as_ref()
    }

    pub fn variable_wind(&self) -> Option<&VariableWind> {
        self.variable_wind.as_ref()
    }

    pub fn visibility(&self) -> Option<&Visibility> {
        self.visibility.as_ref()
    }

    pub fn runway_visible_range(&self) -> &[RunwayVisibleRange] {
        &self.runway_visible_range
    }

    pub fn present_weather(&self) -> &[WeatherPhenomenon] {
        &self.present_weather
    }

    pub fn sky_conditions(&self) -> &[SkyCondition] {
        &self.sky_conditions
    }

    pub fn vertical_visibility(&self) -> Option<&VerticalVisibility> {
        self.vertical_visibility.as_ref()
    }

    pub fn temperature(&self) -> Temperature {
        self.temperature
    }

    pub fn dew_point(&self) -> Temperature {
        self.dew_point
    }

    pub fn sea_level_pressure(&self) -> Option<&Pressure> {
        self.sea_level_pressure.as_ref()
    }

    pub fn recent_weather(&self) -> &[WeatherPhenomenon] {
        &self.recent_weather
    }

    pub fn remarks(&self) -> &[String] {
        &self.remarks
    }
}

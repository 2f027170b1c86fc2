//! Micro-grammars for the individual METAR groups
//!
//! Each parser looks at a single token (the visibility fraction looks at
//! two) and answers with a [`GroupOutcome`]. None of them touch the token
//! queue; consumption is the caller's job.

use regex::Regex;
use std::sync::LazyLock;

use crate::app::models::{
    CloudLayer, CloudType, Comparator, Distance, DistanceUnit, ObserverMode, Pressure,
    RunwayVisibleRange, SkyCondition, SkyQuantity, Speed, SpeedUnit, Temperature, Tendency,
    VariableWind, VerticalVisibility, Visibility, WeatherPhenomenon, Wind, WindDirection,
};
use crate::constants::{
    self, ALTIMETER_SCALE, AUTO, CLEAR_SKY_CODES, COMPASS_POINTS, CORRECTED, DESCRIPTOR_CODES,
    MAX_VISIBILITY_CODE, METERS_PER_HEIGHT_UNIT, MODIFIER_CODES, PHENOMENON_CODES,
    RECENT_WEATHER_PREFIX,
};
use crate::error::MetarError;

/// Result of trying one group grammar against a token
#[derive(Debug)]
pub enum GroupOutcome<T> {
    /// Not this group; nothing should be consumed
    NoMatch,
    /// Recognised and valid
    Matched(T),
    /// Recognised syntax carrying a value that cannot be accepted
    Invalid(MetarError),
}

impl<T> GroupOutcome<T> {
    pub fn is_match(&self) -> bool {
        matches!(self, GroupOutcome::Matched(_))
    }

    /// Discard errors and no-matches
    pub fn matched(self) -> Option<T> {
        match self {
            GroupOutcome::Matched(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for GroupOutcome<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(GroupOutcome::NoMatch, GroupOutcome::Matched)
    }
}

fn grammar(pattern: &str) -> Regex {
    Regex::new(pattern).expect("METAR group grammar must compile")
}

static LOCATION: LazyLock<Regex> = LazyLock::new(|| grammar(r"^[A-Z][A-Z0-9]{3}$"));
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| grammar(r"^(\d{2})(\d{2})(\d{2})Z$"));
static WIND: LazyLock<Regex> = LazyLock::new(|| {
    grammar(r"^(\d{3}|VRB|///)(\d{2,3}|//)(?:G(\d{2,3}))?(KT|MPS|KMH)?$")
});
static VARIABLE_WIND: LazyLock<Regex> = LazyLock::new(|| grammar(r"^(\d{3})V(\d{3})$"));
static VISIBILITY_METERS: LazyLock<Regex> = LazyLock::new(|| grammar(r"^(\d{4})(?:NDV)?$"));
static VISIBILITY_MILES: LazyLock<Regex> = LazyLock::new(|| grammar(r"^([PM]?)(\d+)SM$"));
static VISIBILITY_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^([PM]?)(\d)/(2|4|8|16)SM$"));
static VISIBILITY_KILOMETERS: LazyLock<Regex> = LazyLock::new(|| grammar(r"^(\d+)KM$"));
static VISIBILITY_DIRECTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    grammar(&format!(
        r"^(\d{{2}}|\d{{4}})({})$",
        constants::alternation(COMPASS_POINTS)
    ))
});
static RUNWAY_VISIBLE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    grammar(r"^R(\d+[RLC]?)/([PM]?)(\d{4})(?:V([PM]?)(\d{4}))?/?([NUD]?)(FT)?$")
});
static WEATHER: LazyLock<Regex> = LazyLock::new(|| {
    grammar(&format!(
        r"^({})?({})?({})$",
        constants::alternation(MODIFIER_CODES),
        constants::alternation(DESCRIPTOR_CODES),
        constants::alternation(PHENOMENON_CODES),
    ))
});
static SKY_LAYER: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^(FEW|SCT|BKN|OVC)(\d{3}|///)(.*)$"));
static VERTICAL_VISIBILITY: LazyLock<Regex> = LazyLock::new(|| grammar(r"^VV(\d{3}|///)$"));
static TEMPERATURE_DEW_POINT: LazyLock<Regex> =
    LazyLock::new(|| grammar(r"^(M?\d+|XX|//)/(M?\d+|XX|//)$"));
static PRESSURE: LazyLock<Regex> = LazyLock::new(|| grammar(r"^([QA])(\d{4})$"));

/// Day, hour and minute from the `DDHHMMZ` group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayTime {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// ICAO station identifier
pub fn parse_location(token: &str) -> GroupOutcome<String> {
    if LOCATION.is_match(token) {
        GroupOutcome::Matched(token.to_string())
    } else {
        GroupOutcome::NoMatch
    }
}

/// `DDHHMMZ`; out-of-range fields are invalid rather than a non-match
pub fn parse_date_time(token: &str) -> GroupOutcome<DayTime> {
    let Some(caps) = DATE_TIME.captures(token) else {
        return GroupOutcome::NoMatch;
    };

    let field = |i: usize| caps[i].parse::<u32>().unwrap_or(u32::MAX);
    let day_time = DayTime {
        day: field(1),
        hour: field(2),
        minute: field(3),
    };

    if (1..=31).contains(&day_time.day) && day_time.hour <= 23 && day_time.minute <= 59 {
        GroupOutcome::Matched(day_time)
    } else {
        GroupOutcome::Invalid(MetarError::malformed_date_time(token))
    }
}

/// `AUTO` or `COR`
pub fn parse_observer(token: &str) -> GroupOutcome<ObserverMode> {
    match token {
        AUTO => GroupOutcome::Matched(ObserverMode::Auto),
        CORRECTED => GroupOutcome::Matched(ObserverMode::Corrected),
        _ => GroupOutcome::NoMatch,
    }
}

pub fn parse_wind(token: &str) -> GroupOutcome<Wind> {
    let Some(caps) = WIND.captures(token) else {
        return GroupOutcome::NoMatch;
    };

    let unit = caps
        .get(4)
        .and_then(|m| SpeedUnit::from_code(m.as_str()))
        .unwrap_or(SpeedUnit::KilometersPerHour);

    let direction = match &caps[1] {
        "VRB" => WindDirection::Variable,
        "///" => WindDirection::Unknown,
        degrees => match degrees.parse() {
            Ok(value) => WindDirection::Degrees(value),
            Err(_) => return GroupOutcome::NoMatch,
        },
    };

    let speed = caps[2]
        .parse::<f64>()
        .ok()
        .map(|value| Speed::new(value, unit));
    let gusts = caps
        .get(3)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|value| Speed::new(value, unit));

    GroupOutcome::Matched(Wind {
        direction,
        speed,
        gusts,
    })
}

/// `DDDVDDD`
pub fn parse_variable_wind(token: &str) -> GroupOutcome<VariableWind> {
    VARIABLE_WIND
        .captures(token)
        .and_then(|caps| {
            Some(VariableWind {
                from: caps[1].parse().ok()?,
                to: caps[2].parse().ok()?,
            })
        })
        .into()
}

/// Single-token prevailing visibility in any of the WMO or US forms
pub fn parse_visibility(token: &str) -> GroupOutcome<Visibility> {
    if let Some(caps) = VISIBILITY_METERS.captures(token) {
        if &caps[1] == MAX_VISIBILITY_CODE {
            return GroupOutcome::Matched(Visibility::more_than_ten_kilometers());
        }
        return parse_number(&caps[1])
            .map(|meters| Visibility::new(Distance::meters(meters)))
            .into();
    }

    if let Some(caps) = VISIBILITY_MILES.captures(token) {
        return parse_number(&caps[2])
            .map(|miles| {
                Visibility::new(Distance::miles(miles))
                    .with_comparator(Comparator::from_code(&caps[1]))
            })
            .into();
    }

    if let Some(caps) = VISIBILITY_FRACTION.captures(token) {
        return fraction(&caps[2], &caps[3])
            .map(|miles| {
                Visibility::new(Distance::miles(miles))
                    .with_comparator(Comparator::from_code(&caps[1]))
            })
            .into();
    }

    if let Some(caps) = VISIBILITY_KILOMETERS.captures(token) {
        return parse_number(&caps[1])
            .map(|km| Visibility::new(Distance::kilometers(km)))
            .into();
    }

    // Two digits are kilometres, four digits are metres
    if let Some(caps) = VISIBILITY_DIRECTIONAL.captures(token) {
        let unit = if caps[1].len() == 2 {
            DistanceUnit::Kilometers
        } else {
            DistanceUnit::Meters
        };
        let direction = constants::lookup(COMPASS_POINTS, &caps[2]);
        return parse_number(&caps[1])
            .zip(direction)
            .map(|(value, direction)| {
                Visibility::new(Distance::new(value, unit)).with_direction(direction)
            })
            .into();
    }

    GroupOutcome::NoMatch
}

/// US mixed-number visibility split over two tokens, e.g. `1 1/2SM`
pub fn parse_fractional_visibility(whole: &str, fraction_token: &str) -> GroupOutcome<Visibility> {
    if whole != "1" && whole != "2" {
        return GroupOutcome::NoMatch;
    }

    let Some(caps) = VISIBILITY_FRACTION.captures(fraction_token) else {
        return GroupOutcome::NoMatch;
    };
    if !caps[1].is_empty() {
        return GroupOutcome::NoMatch;
    }

    parse_number(whole)
        .zip(fraction(&caps[2], &caps[3]))
        .map(|(whole, part)| Visibility::new(Distance::miles(whole + part)))
        .into()
}

pub fn parse_runway_visible_range(token: &str) -> GroupOutcome<RunwayVisibleRange> {
    let Some(caps) = RUNWAY_VISIBLE_RANGE.captures(token) else {
        return GroupOutcome::NoMatch;
    };

    let unit = if caps.get(7).is_some() {
        DistanceUnit::Feet
    } else {
        DistanceUnit::Meters
    };
    let reading = |comparator: &str, count: &str| {
        parse_number(count).map(|value| {
            Visibility::new(Distance::new(value, unit))
                .with_comparator(Comparator::from_code(comparator))
        })
    };

    let Some(visibility1) = reading(&caps[2], &caps[3]) else {
        return GroupOutcome::NoMatch;
    };
    let visibility2 = caps
        .get(5)
        .and_then(|count| reading(&caps[4], count.as_str()));

    GroupOutcome::Matched(RunwayVisibleRange {
        designator: caps[1].to_string(),
        visibility1,
        visibility2,
        tendency: Tendency::from_code(&caps[6]),
        unit,
    })
}

/// Modifier, descriptor and phenomenon, anchored against the whole token
pub fn parse_weather_phenomenon(token: &str) -> GroupOutcome<WeatherPhenomenon> {
    WEATHER
        .captures(token)
        .and_then(|caps| {
            Some(WeatherPhenomenon {
                phenomenon: constants::lookup(PHENOMENON_CODES, &caps[3])?,
                modifier: caps
                    .get(1)
                    .and_then(|m| constants::lookup(MODIFIER_CODES, m.as_str())),
                descriptor: caps
                    .get(2)
                    .and_then(|m| constants::lookup(DESCRIPTOR_CODES, m.as_str())),
            })
        })
        .into()
}

/// `RE` followed by a present-weather group
pub fn parse_recent_weather(token: &str) -> GroupOutcome<WeatherPhenomenon> {
    match token.strip_prefix(RECENT_WEATHER_PREFIX) {
        Some(rest) if !rest.is_empty() => parse_weather_phenomenon(rest),
        _ => GroupOutcome::NoMatch,
    }
}

/// Clear-sky literal or a cloud layer; unknown layer suffixes are invalid
pub fn parse_sky_condition(token: &str) -> GroupOutcome<SkyCondition> {
    if CLEAR_SKY_CODES.contains(&token) {
        return GroupOutcome::Matched(SkyCondition::Clear);
    }

    let Some(caps) = SKY_LAYER.captures(token) else {
        return GroupOutcome::NoMatch;
    };
    let Some(quantity) = SkyQuantity::from_code(&caps[1]) else {
        return GroupOutcome::NoMatch;
    };

    let cloud_type = match &caps[3] {
        "" | "///" => None,
        "CB" => Some(CloudType::Cumulonimbus),
        "TCU" => Some(CloudType::ToweringCumulus),
        suffix => {
            return GroupOutcome::Invalid(MetarError::unknown_sky_condition_type(token, suffix));
        }
    };

    GroupOutcome::Matched(SkyCondition::Layer(CloudLayer {
        quantity,
        height: coded_height(&caps[2]),
        cloud_type,
    }))
}

/// `VV###` or `VV///`
pub fn parse_vertical_visibility(token: &str) -> GroupOutcome<VerticalVisibility> {
    VERTICAL_VISIBILITY
        .captures(token)
        .map(|caps| VerticalVisibility {
            height: coded_height(&caps[1]),
        })
        .into()
}

/// `T/D`; a non-match here is fatal for the caller
pub fn parse_temperature_dew_point(token: &str) -> GroupOutcome<(Temperature, Temperature)> {
    TEMPERATURE_DEW_POINT
        .captures(token)
        .and_then(|caps| Some((parse_temperature(&caps[1])?, parse_temperature(&caps[2])?)))
        .into()
}

/// A single temperature: `M` negates, `XX` and `//` are missing
pub fn parse_temperature(text: &str) -> Option<Temperature> {
    match text {
        "XX" | "//" => Some(Temperature::missing()),
        _ => match text.strip_prefix('M') {
            Some(digits) => digits.parse::<i32>().ok().map(|c| Temperature::celsius(-c)),
            None => text.parse::<i32>().ok().map(Temperature::celsius),
        },
    }
}

/// `Q####` hectopascals or `A####` hundredths of an inch of mercury
pub fn parse_pressure(token: &str) -> GroupOutcome<Pressure> {
    PRESSURE
        .captures(token)
        .and_then(|caps| {
            let value = parse_number(&caps[2])?;
            match &caps[1] {
                "Q" => Some(Pressure::hectopascals(value)),
                "A" => Some(Pressure::inches_of_mercury(value / ALTIMETER_SCALE)),
                _ => None,
            }
        })
        .into()
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<u32>().ok().map(f64::from)
}

fn fraction(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator = parse_number(numerator)?;
    let denominator = parse_number(denominator)?;
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Heights coded in 30 metre steps; `///` is unavailable
fn coded_height(text: &str) -> Distance {
    parse_number(text)
        .map(|units| Distance::meters(units * METERS_PER_HEIGHT_UNIT))
        .unwrap_or_else(|| Distance::unavailable(DistanceUnit::Meters))
}

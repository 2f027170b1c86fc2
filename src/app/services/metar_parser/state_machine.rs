//! State machine driving a report through its sections
//!
//! Each state names the section most recently handled. A single control
//! loop calls [`MetarParser::advance`] until [`ParseState::End`], and every
//! call consumes zero or more tokens from the front of the queue, records
//! what it found and returns the next state. The CAVOK shortcut and the
//! repeated groups are ordinary branches and loops inside `advance`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

use super::group_parsers::{
    parse_date_time, parse_fractional_visibility, parse_location, parse_observer, parse_pressure,
    parse_recent_weather, parse_runway_visible_range, parse_sky_condition,
    parse_temperature_dew_point, parse_variable_wind, parse_vertical_visibility,
    parse_visibility, parse_weather_phenomenon, parse_wind,
};
use super::report_builder::ReportBuilder;
use super::tokenizer::TokenQueue;
use crate::app::models::{
    ObserverMode, ParsedReport, SkyCondition, Visibility, WeatherPhenomenon,
};
use crate::config::Config;
use crate::constants::{CAVOK, REMARKS_MARKER, not_observed};
use crate::error::{MetarError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseState {
    Start,
    Location,
    DateTime,
    Wind,
    VariableWind,
    Visibility,
    RunwayVisibleRange,
    PresentWeather,
    SkyConditions,
    VerticalVisibility,
    TemperatureDewPoint,
    SeaLevelPressure,
    RecentWeather,
    Remarks,
    End,
}

/// One step of the automaton, with the queue length either side of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: ParseState,
    pub to: ParseState,
    pub tokens_before: usize,
    pub tokens_after: usize,
}

impl Transition {
    pub fn tokens_consumed(&self) -> usize {
        self.tokens_before - self.tokens_after
    }
}

/// METAR parser. Holds only read-only configuration, so one instance can
/// serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct MetarParser {
    config: Config,
}

impl MetarParser {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse one report. `observation_time` comes from whoever fetched the
    /// report; the `DDHHMMZ` group is only validated.
    pub fn parse(&self, report: &str, observation_time: DateTime<Utc>) -> Result<ParsedReport> {
        self.parse_traced(report, observation_time)
            .map(|(parsed, _)| parsed)
    }

    /// Parse one report and return every transition taken
    pub fn parse_traced(
        &self,
        report: &str,
        observation_time: DateTime<Utc>,
    ) -> Result<(ParsedReport, Vec<Transition>)> {
        let mut tokens = TokenQueue::tokenize(report);
        let mut builder = ReportBuilder::new(&self.config, observation_time);
        let mut transitions = Vec::new();
        let mut state = ParseState::Start;

        debug!("Parsing METAR with {} tokens", tokens.len());

        while state != ParseState::End {
            let tokens_before = tokens.len();
            let next = self.advance(state, &mut tokens, &mut builder)?;
            debug!(
                "{:?} -> {:?} ({} tokens left)",
                state,
                next,
                tokens.len()
            );
            transitions.push(Transition {
                from: state,
                to: next,
                tokens_before,
                tokens_after: tokens.len(),
            });
            state = next;
        }

        let parsed = builder.build()?;
        debug!("Parsed METAR for station {}", parsed.station_code());
        Ok((parsed, transitions))
    }

    /// Run the stage that follows `state` and return the state reached
    fn advance(
        &self,
        state: ParseState,
        tokens: &mut TokenQueue,
        builder: &mut ReportBuilder<'_>,
    ) -> Result<ParseState> {
        let next = match state {
            ParseState::Start => {
                let station = tokens
                    .take(parse_location)?
                    .ok_or_else(|| MetarError::malformed_location(tokens.describe_front()))?;
                builder.set_station_code(station);
                ParseState::Location
            }

            ParseState::Location => {
                let day_time = tokens
                    .take(parse_date_time)?
                    .ok_or_else(|| MetarError::malformed_date_time(tokens.describe_front()))?;
                debug!(
                    "Report issued day {} at {:02}:{:02}Z",
                    day_time.day, day_time.hour, day_time.minute
                );
                ParseState::DateTime
            }

            ParseState::DateTime => {
                if let Some(observer) = tokens.take(parse_observer)? {
                    builder.set_observer(observer);
                }
                if let Some(wind) = tokens.take(parse_wind)? {
                    builder.set_wind(wind);
                }
                ParseState::Wind
            }

            ParseState::Wind => {
                if let Some(variable_wind) = tokens.take(parse_variable_wind)? {
                    builder.set_variable_wind(variable_wind);
                }
                ParseState::VariableWind
            }

            ParseState::VariableWind => {
                if tokens.take_literal(CAVOK) {
                    debug!("CAVOK: skipping runway visible range and present weather");
                    builder.set_visibility(Visibility::more_than_ten_kilometers());
                    builder.extend_present_weather(vec![WeatherPhenomenon::no_significant_weather()]);
                    builder.extend_sky_conditions(vec![SkyCondition::NoSignificantCloud]);
                    let conditions = tokens.take_while(parse_sky_condition)?;
                    builder.extend_sky_conditions(conditions);
                    ParseState::SkyConditions
                } else {
                    self.seek_visibility(tokens, builder)?;
                    ParseState::Visibility
                }
            }

            ParseState::Visibility => {
                let ranges = tokens.take_while(parse_runway_visible_range)?;
                builder.extend_runway_visible_range(ranges);
                ParseState::RunwayVisibleRange
            }

            ParseState::RunwayVisibleRange => {
                if builder.observer() == ObserverMode::Auto
                    && tokens.take_literal(not_observed::PRESENT_WEATHER)
                {
                    builder.extend_present_weather(vec![WeatherPhenomenon::not_observed()]);
                } else {
                    let phenomena = tokens.take_while(parse_weather_phenomenon)?;
                    builder.extend_present_weather(phenomena);
                }
                ParseState::PresentWeather
            }

            ParseState::PresentWeather => {
                if builder.observer() == ObserverMode::Auto
                    && tokens.take_any_literal(not_observed::SKY_CONDITIONS)
                {
                    builder.extend_sky_conditions(vec![SkyCondition::NotObserved]);
                } else {
                    let conditions = tokens.take_while(parse_sky_condition)?;
                    builder.extend_sky_conditions(conditions);
                }
                ParseState::SkyConditions
            }

            ParseState::SkyConditions => {
                if let Some(vertical_visibility) = tokens.take(parse_vertical_visibility)? {
                    builder.set_vertical_visibility(vertical_visibility);
                }
                ParseState::VerticalVisibility
            }

            ParseState::VerticalVisibility => {
                let (temperature, dew_point) = tokens
                    .take(parse_temperature_dew_point)?
                    .ok_or_else(|| {
                        MetarError::malformed_temperature_dew_point(tokens.describe_front())
                    })?;
                builder.set_temperatures(temperature, dew_point);
                ParseState::TemperatureDewPoint
            }

            ParseState::TemperatureDewPoint => {
                if let Some(pressure) = tokens.take(parse_pressure)? {
                    builder.set_sea_level_pressure(pressure);
                }
                ParseState::SeaLevelPressure
            }

            ParseState::SeaLevelPressure => {
                let recent = tokens.take_while(parse_recent_weather)?;
                builder.extend_recent_weather(recent);
                ParseState::RecentWeather
            }

            ParseState::RecentWeather => {
                tokens.take_literal(REMARKS_MARKER);
                builder.set_remarks(tokens.drain());
                ParseState::Remarks
            }

            ParseState::Remarks | ParseState::End => {
                if !tokens.is_empty() {
                    return Err(MetarError::unexpected_trailing_tokens(
                        tokens.remaining().map(str::to_string).collect(),
                    ));
                }
                ParseState::End
            }
        };

        Ok(next)
    }

    /// Prevailing visibility on the normal (non-CAVOK) path
    fn seek_visibility(&self, tokens: &mut TokenQueue, builder: &mut ReportBuilder<'_>) -> Result<()> {
        if builder.observer() == ObserverMode::Auto
            && tokens.take_literal(not_observed::VISIBILITY)
        {
            builder.set_visibility(Visibility::not_observed());
            return Ok(());
        }

        let visibility = if matches!(tokens.peek(), Some("1" | "2")) {
            match tokens.take_pair(parse_fractional_visibility)? {
                Some(visibility) => Some(visibility),
                None => tokens.take(parse_visibility)?,
            }
        } else {
            tokens.take(parse_visibility)?
        };

        match visibility {
            Some(visibility) => builder.set_visibility(visibility),
            None => trace!("No visibility group at '{}'", tokens.describe_front()),
        }
        Ok(())
    }
}

/// Parse a report with the default configuration
pub fn parse_report(report: &str, observation_time: DateTime<Utc>) -> Result<ParsedReport> {
    MetarParser::default().parse(report, observation_time)
}

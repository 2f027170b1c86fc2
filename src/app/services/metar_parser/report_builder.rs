//! Accumulates the fields found by each parse stage
//!
//! Display-unit preferences from [`Config`] are applied as values arrive,
//! so the finished [`ParsedReport`] is already in its final form.

use chrono::{DateTime, Utc};

use crate::app::models::{
    ObserverMode, ParsedReport, Pressure, RunwayVisibleRange, SkyCondition, Temperature,
    VariableWind, VerticalVisibility, Visibility, WeatherPhenomenon, Wind,
};
use crate::config::Config;
use crate::error::{END_OF_REPORT, MetarError, Result};

#[derive(Debug)]
pub struct ReportBuilder<'a> {
    config: &'a Config,
    observation_time: DateTime<Utc>,
    station_code: Option<String>,
    observer: ObserverMode,
    wind: Option<Wind>,
    variable_wind: Option<VariableWind>,
    visibility: Option<Visibility>,
    runway_visible_range: Vec<RunwayVisibleRange>,
    present_weather: Vec<WeatherPhenomenon>,
    sky_conditions: Vec<SkyCondition>,
    vertical_visibility: Option<VerticalVisibility>,
    temperatures: Option<(Temperature, Temperature)>,
    sea_level_pressure: Option<Pressure>,
    recent_weather: Vec<WeatherPhenomenon>,
    remarks: Vec<String>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a Config, observation_time: DateTime<Utc>) -> Self {
        Self {
            config,
            observation_time,
            station_code: None,
            observer: ObserverMode::default(),
            wind: None,
            variable_wind: None,
            visibility: None,
            runway_visible_range: Vec::new(),
            present_weather: Vec::new(),
            sky_conditions: Vec::new(),
            vertical_visibility: None,
            temperatures: None,
            sea_level_pressure: None,
            recent_weather: Vec::new(),
            remarks: Vec::new(),
        }
    }

    pub fn observer(&self) -> ObserverMode {
        self.observer
    }

    pub fn set_station_code(&mut self, station_code: String) {
        self.station_code = Some(station_code);
    }

    pub fn set_observer(&mut self, observer: ObserverMode) {
        self.observer = observer;
    }

    pub fn set_wind(&mut self, wind: Wind) {
        self.wind = Some(wind);
    }

    pub fn set_variable_wind(&mut self, variable_wind: VariableWind) {
        self.variable_wind = Some(variable_wind);
    }

    pub fn set_visibility(&mut self, mut visibility: Visibility) {
        if let Some(unit) = self.config.visibility_unit {
            visibility.distance = visibility.distance.with_display_unit(unit);
        }
        self.visibility = Some(visibility);
    }

    pub fn extend_runway_visible_range(&mut self, ranges: Vec<RunwayVisibleRange>) {
        self.runway_visible_range.extend(ranges);
    }

    pub fn extend_present_weather(&mut self, phenomena: Vec<WeatherPhenomenon>) {
        self.present_weather.extend(phenomena);
    }

    pub fn extend_sky_conditions(&mut self, conditions: Vec<SkyCondition>) {
        let unit = self.config.cloud_height_unit;
        self.sky_conditions
            .extend(conditions.into_iter().map(|condition| match condition {
                SkyCondition::Layer(mut layer) => {
                    layer.height = layer.height.with_display_unit(unit);
                    SkyCondition::Layer(layer)
                }
                other => other,
            }));
    }

    pub fn set_vertical_visibility(&mut self, mut vertical_visibility: VerticalVisibility) {
        vertical_visibility.height = vertical_visibility
            .height
            .with_display_unit(self.config.cloud_height_unit);
        self.vertical_visibility = Some(vertical_visibility);
    }

    pub fn set_temperatures(&mut self, temperature: Temperature, dew_point: Temperature) {
        self.temperatures = Some((temperature, dew_point));
    }

    pub fn set_sea_level_pressure(&mut self, pressure: Pressure) {
        self.sea_level_pressure = Some(pressure);
    }

    pub fn extend_recent_weather(&mut self, phenomena: Vec<WeatherPhenomenon>) {
        self.recent_weather.extend(phenomena);
    }

    pub fn set_remarks(&mut self, remarks: Vec<String>) {
        self.remarks = remarks;
    }

    /// Freeze the collected fields into a report. Fails if a mandatory
    /// group was never recorded.
    pub fn build(self) -> Result<ParsedReport> {
        let station_code = self
            .station_code
            .ok_or_else(|| MetarError::malformed_location(END_OF_REPORT))?;
        let (temperature, dew_point) = self
            .temperatures
            .ok_or_else(|| MetarError::malformed_temperature_dew_point(END_OF_REPORT))?;

        Ok(ParsedReport {
            station_code,
            observation_time: self.observation_time,
            observer: self.observer,
            wind: self.wind,
            variable_wind: self.variable_wind,
            visibility: self.visibility,
            runway_visible_range: self.runway_visible_range,
            present_weather: self.present_weather,
            sky_conditions: self.sky_conditions,
            vertical_visibility: self.vertical_visibility,
            temperature,
            dew_point,
            sea_level_pressure: self.sea_level_pressure,
            recent_weather: self.recent_weather,
            remarks: self.remarks,
        })
    }
}

//! Weather overlay types, in the shape the front end renders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct WeatherReport {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: i64,
    pub feels_like: i64,
    pub condition: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct HourlyForecast {
    /// Hour of day at the park (0-23).
    pub hour: u32,
    pub temperature: i64,
    pub feels_like: i64,
    /// Probability of precipitation, percent.
    pub precipitation: i64,
    pub condition: String,
    pub icon: String,
}

//! OpenWeather One Call client for the park weather overlay.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::{CurrentWeather, HourlyForecast, WeatherReport};
use crate::park::ParkProfile;
use crate::utils::js_round;

use super::client::{check_response, http_client};
use super::ApiError;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";

/// Hourly entries returned to the front end.
const HOURLY_FORECAST_HOURS: usize = 24;

#[derive(Debug, Deserialize)]
pub struct OneCallResponse {
    current: OneCallCurrent,
    #[serde(default)]
    hourly: Vec<OneCallHour>,
}

#[derive(Debug, Deserialize)]
struct OneCallCurrent {
    temp: f64,
    feels_like: f64,
    #[serde(default)]
    weather: Vec<OneCallCondition>,
}

#[derive(Debug, Deserialize)]
struct OneCallHour {
    dt: i64,
    temp: f64,
    feels_like: f64,
    /// Probability of precipitation, 0.0-1.0.
    #[serde(default)]
    pop: f64,
    #[serde(default)]
    weather: Vec<OneCallCondition>,
}

#[derive(Debug, Clone, Deserialize)]
struct OneCallCondition {
    main: String,
    icon: String,
}

fn first_condition(conditions: &[OneCallCondition]) -> Result<&OneCallCondition, ApiError> {
    conditions
        .first()
        .ok_or_else(|| ApiError::InvalidResponse("weather entry without a condition".to_string()))
}

impl OneCallResponse {
    /// Reshape into the report the front end renders: rounded imperial
    /// temperatures and the next 24 hours keyed by park-local hour.
    pub fn into_report(self, park: &ParkProfile) -> Result<WeatherReport, ApiError> {
        let condition = first_condition(&self.current.weather)?;
        let current = CurrentWeather {
            temperature: js_round(self.current.temp),
            feels_like: js_round(self.current.feels_like),
            condition: condition.main.clone(),
            icon: condition.icon.clone(),
        };

        let hourly = self
            .hourly
            .iter()
            .take(HOURLY_FORECAST_HOURS)
            .map(|hour| {
                let condition = first_condition(&hour.weather)?;
                let local_hour = park
                    .local_hour(hour.dt)
                    .ok_or_else(|| ApiError::InvalidResponse(format!("invalid timestamp {}", hour.dt)))?;
                Ok(HourlyForecast {
                    hour: local_hour,
                    temperature: js_round(hour.temp),
                    feels_like: js_round(hour.feels_like),
                    precipitation: js_round(hour.pop * 100.0),
                    condition: condition.main.clone(),
                    icon: condition.icon.clone(),
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(WeatherReport { current, hourly })
    }
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch current conditions and the hourly forecast at the park.
    pub async fn fetch(&self, park: &ParkProfile) -> Result<WeatherReport> {
        let api_key = self.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let url = format!("{}/data/3.0/onecall", self.base_url);
        debug!(url = %url, lat = park.latitude, lon = park.longitude, "Fetching weather");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", park.latitude.to_string()),
                ("lon", park.longitude.to_string()),
                ("exclude", "minutely,daily,alerts".to_string()),
                ("units", "imperial".to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await
            .context("Failed to send weather request")?;

        let response = check_response(response).await?;
        let raw: OneCallResponse = response
            .json()
            .await
            .context("Failed to parse weather response")?;

        Ok(raw.into_report(park)?)
    }
}

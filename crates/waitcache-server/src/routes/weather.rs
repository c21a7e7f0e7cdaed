use axum::extract::State;
use axum::Json;
use waitcache_core::models::WeatherReport;

use crate::error::{Result, ServerError};
use crate::state::AppState;

pub async fn weather(State(state): State<AppState>) -> Result<Json<WeatherReport>> {
    if !state.weather.is_configured() {
        return Err(ServerError::Internal("Weather API key is not configured.".to_string()));
    }

    let report = state
        .weather
        .fetch(state.park())
        .await
        .map_err(|e| ServerError::internal("Failed to fetch weather data.", &e))?;

    Ok(Json(report))
}

//! Completed-ride tracking.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ServerError};
use crate::state::AppState;

pub(crate) const RIDE_NAME_REQUIRED: &str = "Ride name is required";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequest {
    pub ride_name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRideResponse {
    pub success: bool,
    pub completed_rides: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Pull a non-empty `rideName` out of a JSON body.
///
/// Missing, blank and unparseable bodies are all the same 400.
pub(crate) fn ride_name_from(body: &[u8]) -> Result<String> {
    serde_json::from_slice::<RideRequest>(body)
        .ok()
        .and_then(|req| req.ride_name)
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest(RIDE_NAME_REQUIRED.to_string()))
}

pub async fn complete_ride(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CompleteRideResponse>> {
    let name = ride_name_from(&body)?;

    let mut completed = state.completed.write().await;
    if !completed.add(&name) {
        debug!(ride = %name, "Ride already completed");
    }

    Ok(Json(CompleteRideResponse {
        success: true,
        completed_rides: completed.to_vec(),
    }))
}

pub async fn completed_rides(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.completed.read().await.to_vec())
}

pub async fn reset_rides(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.completed.write().await.clear();
    Json(SuccessResponse { success: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ride_name_from() {
        assert_eq!(ride_name_from(br#"{"rideName":"Stardust Racers"}"#).unwrap(), "Stardust Racers");
        assert!(ride_name_from(b"").is_err());
        assert!(ride_name_from(br#"{"rideName":"  "}"#).is_err());
        assert!(ride_name_from(br#"{"other":1}"#).is_err());
        assert!(ride_name_from(b"not json").is_err());
    }
}

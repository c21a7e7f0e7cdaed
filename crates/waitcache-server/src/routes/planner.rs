//! Ride planner endpoints.
//!
//! The planner state lives in one JSON file; each mutation rewrites it and
//! returns the full state so the client can re-render from the response.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use waitcache_core::models::{PlanItem, PlannerSettings, PlannerState, Timeline};
use waitcache_core::planner::build_timeline;

use super::rides::ride_name_from;
use super::wait_times::load_today;
use crate::error::{Result, ServerError};
use crate::state::AppState;

type JsonBody<T> = std::result::Result<Json<T>, JsonRejection>;

pub async fn state(State(state): State<AppState>) -> Json<PlannerState> {
    Json(state.planner.lock().await.state().clone())
}

pub async fn set_plan(
    State(state): State<AppState>,
    body: JsonBody<Vec<PlanItem>>,
) -> Result<Json<PlannerState>> {
    let Json(plan) = body?;

    let updated = state
        .with_planner(move |planner| {
            planner.set_plan(plan)?;
            Ok(planner.state().clone())
        })
        .await
        .map_err(|e| ServerError::internal("Failed to save plan", &e))?;

    info!(items = updated.plan.len(), "Plan updated");
    Ok(Json(updated))
}

pub async fn set_settings(
    State(state): State<AppState>,
    body: JsonBody<PlannerSettings>,
) -> Result<Json<PlannerState>> {
    let Json(settings) = body?;

    let updated = state
        .with_planner(move |planner| {
            planner.set_settings(settings)?;
            Ok(planner.state().clone())
        })
        .await
        .map_err(|e| ServerError::internal("Failed to save planner settings", &e))?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
struct RideCountRequest {
    #[serde(default = "one")]
    delta: i32,
}

fn one() -> i32 {
    1
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideCountResponse {
    pub ride_name: String,
    pub count: u32,
}

/// Body `{rideName, delta?}`; `delta` defaults to +1.
pub async fn ride_count(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RideCountResponse>> {
    let ride_name = ride_name_from(&body)?;
    let delta = serde_json::from_slice::<RideCountRequest>(&body)
        .map(|req| req.delta)
        .map_err(|_| ServerError::BadRequest("delta must be an integer".to_string()))?;

    let name = ride_name.clone();
    let count = state
        .with_planner(move |planner| planner.bump_ride_count(&name, delta))
        .await
        .map_err(|e| ServerError::internal("Failed to save ride count", &e))?;

    Ok(Json(RideCountResponse { ride_name, count }))
}

pub async fn reset_counts(State(state): State<AppState>) -> Result<Json<PlannerState>> {
    let updated = state
        .with_planner(|planner| {
            planner.reset_ride_counts()?;
            Ok(planner.state().clone())
        })
        .await
        .map_err(|e| ServerError::internal("Failed to reset ride counts", &e))?;
    Ok(Json(updated))
}

/// Timeline over today's snapshot. Without one every wait counts as unknown.
pub async fn timeline(State(state): State<AppState>) -> Result<Json<Timeline>> {
    let today = load_today(&state).await?;

    let planner = state.planner.lock().await;
    let current = planner.state();
    let timeline = build_timeline(&current.plan, &current.settings, |name| {
        today.as_ref().and_then(|s| s.ride(name)).and_then(|r| r.wait_time)
    });

    Ok(Json(timeline))
}

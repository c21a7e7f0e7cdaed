//! Wait-time snapshot endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use waitcache_core::chart::{self, ChartData};
use waitcache_core::models::{LiveRide, Ride, Snapshot, WaitPoint};
use waitcache_core::planner::{next_best_rides, DEFAULT_NEXT_RIDES};

use super::rides::RIDE_NAME_REQUIRED;
use crate::error::{Result, ServerError};
use crate::state::AppState;

/// Days between "today" and the comparison day.
const LAST_WEEK_OFFSET_DAYS: i64 = 7;

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Override for the park-local date, `YYYY-MM-DD`.
    pub today: Option<String>,
}

/// The requested date if it is a well-formed `YYYY-MM-DD`, else today at the park.
fn resolve_today(state: &AppState, requested: Option<&str>) -> NaiveDate {
    requested
        .filter(|s| s.len() == 10)
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or_else(|| state.park().today())
}

fn last_week_of(today: NaiveDate) -> NaiveDate {
    today - Duration::days(LAST_WEEK_OFFSET_DAYS)
}

pub(crate) async fn load_today(state: &AppState) -> Result<Option<Snapshot>> {
    state
        .with_snapshots(|store| store.latest_today())
        .await
        .map_err(|e| ServerError::internal("Failed to load today data", &e))
}

async fn require_today(state: &AppState) -> Result<Snapshot> {
    load_today(state)
        .await?
        .ok_or_else(|| ServerError::NotFound("No today data found".to_string()))
}

async fn load_last_week(state: &AppState, target: NaiveDate) -> Result<Option<Snapshot>> {
    state
        .with_snapshots(move |store| store.closest_last_week(target))
        .await
        .map(|found| found.map(|(_, snapshot)| snapshot))
        .map_err(|e| ServerError::internal("Failed to load last week data", &e))
}

fn series(ride: Option<&Ride>) -> &[WaitPoint] {
    ride.map(|r| r.wait_times.as_slice()).unwrap_or(&[])
}

pub async fn today(State(state): State<AppState>) -> Result<Json<Snapshot>> {
    let snapshot = require_today(&state).await?;
    info!(date = %snapshot.date, rides = snapshot.rides.len(), "Serving today data");
    Ok(Json(snapshot))
}

pub async fn last_week(
    State(state): State<AppState>,
    query: std::result::Result<Query<DateQuery>, QueryRejection>,
) -> Result<Json<Snapshot>> {
    let Query(query) = query?;
    let target = last_week_of(resolve_today(&state, query.today.as_deref()));

    load_last_week(&state, target)
        .await?
        .map(Json)
        .ok_or_else(|| ServerError::NotFound("No historical data files found".to_string()))
}

/// Live table scrape, kept for older front ends.
pub async fn live(State(state): State<AppState>) -> Result<Json<Vec<LiveRide>>> {
    let done = state.completed.read().await.clone();

    let rides = state
        .thrill
        .fetch_live_table(state.park(), |name| done.contains(name))
        .await
        .map_err(|e| ServerError::internal("Failed to fetch wait times", &e))?;

    Ok(Json(rides))
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub ride: Option<String>,
    pub today: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub ride: String,
    #[serde(flatten)]
    pub chart: ChartData,
    /// Last week's wait nearest to the current park time.
    pub last_week_now: Option<WaitPoint>,
}

pub async fn chart(
    State(state): State<AppState>,
    query: std::result::Result<Query<ChartQuery>, QueryRejection>,
) -> Result<Json<ChartResponse>> {
    let Query(query) = query?;
    let ride = query
        .ride
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ServerError::BadRequest(RIDE_NAME_REQUIRED.to_string()))?;
    let target = last_week_of(resolve_today(&state, query.today.as_deref()));

    let today = load_today(&state).await?;
    let last_week = load_last_week(&state, target).await?;

    let today_ride = today.as_ref().and_then(|s| s.ride(&ride));
    let last_week_ride = last_week.as_ref().and_then(|s| s.ride(&ride));
    if today_ride.is_none() && last_week_ride.is_none() {
        return Err(ServerError::NotFound(format!("No wait-time data for ride: {}", ride)));
    }

    let now = state.park().now().time();

    Ok(Json(ChartResponse {
        chart: chart::align(series(today_ride), series(last_week_ride)),
        last_week_now: chart::nearest_wait(series(last_week_ride), now).cloned(),
        ride,
    }))
}

#[derive(Debug, Deserialize)]
pub struct NextRidesQuery {
    pub limit: Option<usize>,
}

pub async fn next_rides(
    State(state): State<AppState>,
    query: std::result::Result<Query<NextRidesQuery>, QueryRejection>,
) -> Result<Json<Vec<Ride>>> {
    let Query(query) = query?;
    let snapshot = require_today(&state).await?;
    let done = state.completed.read().await;
    let limit = query.limit.unwrap_or(DEFAULT_NEXT_RIDES);

    let next = next_best_rides(&snapshot.rides, |name| done.contains(name), limit)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(next))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub data: Snapshot,
    pub rides_count: usize,
}

/// Fetch today's heat map and store it as the today snapshot.
pub async fn refresh(State(state): State<AppState>) -> Result<Json<RefreshResponse>> {
    let date = state.park().today();
    info!(date = %date, "Refreshing today data");

    let result = async {
        let snapshot = state.thrill.fetch_snapshot(state.park(), date).await?;
        let saved = snapshot.clone();
        let path = state.with_snapshots(move |store| store.save_today(&saved)).await?;
        Ok::<_, anyhow::Error>((snapshot, path))
    }
    .await;

    match result {
        Ok((snapshot, path)) => {
            info!(path = %path.display(), rides = snapshot.rides.len(), "Data refresh completed");
            Ok(Json(RefreshResponse {
                success: true,
                message: "Data refreshed successfully".to_string(),
                rides_count: snapshot.rides.len(),
                data: snapshot,
            }))
        }
        Err(e) => Err(ServerError::internal(format!("Failed to trigger data refresh: {}", e), &e)),
    }
}

#[derive(Debug, Serialize)]
pub struct HistoricalResponse {
    pub success: bool,
    pub message: String,
    pub date: NaiveDate,
    pub data: Snapshot,
}

/// Fetch the day one week back and store it as a last-week snapshot.
pub async fn fetch_historical(State(state): State<AppState>) -> Result<Json<HistoricalResponse>> {
    let date = last_week_of(state.park().today());
    info!(date = %date, "Fetching historical data");

    let result = async {
        let snapshot = state.thrill.fetch_snapshot(state.park(), date).await?;
        let saved = snapshot.clone();
        state.with_snapshots(move |store| store.save_last_week(&saved)).await?;
        Ok::<_, anyhow::Error>(snapshot)
    }
    .await;

    match result {
        Ok(snapshot) => {
            if snapshot.rides.is_empty() {
                warn!(date = %date, "Historical heat map had no rides");
            }
            Ok(Json(HistoricalResponse {
                success: true,
                message: format!("Historical data for {} fetched and saved successfully", date),
                date,
                data: snapshot,
            }))
        }
        Err(e) => Err(ServerError::internal(format!("Failed to fetch historical data: {}", e), &e)),
    }
}

//! HTTP routes.
//!
//! Everything under `/api` is JSON; any other path is served from the
//! static front-end directory.

pub mod planner;
pub mod rides;
pub mod wait_times;
pub mod weather;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/wait-times", get(wait_times::live))
        .route("/wait-times/today", get(wait_times::today))
        .route("/wait-times/last-week", get(wait_times::last_week))
        .route("/wait-times/chart", get(wait_times::chart))
        .route("/refresh-data", post(wait_times::refresh))
        .route("/get-historical-data", post(wait_times::fetch_historical))
        .route("/next-rides", get(wait_times::next_rides))
        .route("/weather", get(weather::weather))
        .route("/complete-ride", post(rides::complete_ride))
        .route("/completed-rides", get(rides::completed_rides))
        .route("/reset-rides", post(rides::reset_rides))
        .route("/planner", get(planner::state))
        .route("/planner/plan", put(planner::set_plan))
        .route("/planner/settings", put(planner::set_settings))
        .route("/planner/ride-count", post(planner::ride_count))
        .route("/planner/reset-counts", post(planner::reset_counts))
        .route("/planner/timeline", get(planner::timeline));

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

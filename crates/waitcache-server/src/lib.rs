//! HTTP server for waitcache: serves stored wait-time snapshots, the weather
//! overlay and the ride planner, plus the built front end.

pub mod error;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;

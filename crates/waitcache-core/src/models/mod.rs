//! Data models for wait-time data and planning state.
//!
//! - `Snapshot`, `Ride`, `WaitPoint`: dated wait-time files
//! - `LiveRide`: a row of the live wait-time table
//! - `WeatherReport`: the weather overlay
//! - Planner types: `PlanItem`, `PlannerState`, `Timeline`

pub mod plan;
pub mod ride;
pub mod weather;

pub use plan::{
    PlanItem, PlannerSettings, PlannerState, Timeline, TimelineEntry, TimelineKind,
    DEFAULT_RIDE_DURATION_MINUTES,
};
pub use ride::{LiveRide, Ride, RideStatus, Snapshot, WaitPoint};
pub use weather::{CurrentWeather, HourlyForecast, WeatherReport};

//! Core library for waitcache.
//!
//! Fetches ride wait times for a theme park, keeps dated snapshots on disk,
//! and computes what the planner UI shows: itinerary timing, next-ride
//! suggestions and aligned chart series.

pub mod api;
pub mod chart;
pub mod config;
pub mod models;
pub mod park;
pub mod planner;
pub mod scrape;
pub mod store;
pub mod utils;

pub use config::Config;
pub use park::{ParkProfile, EPIC_UNIVERSE};

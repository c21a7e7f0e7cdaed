//! Clients for the upstream services.
//!
//! - `ThrillDataClient`: wait-time heat map and live table from thrill-data.com
//! - `WeatherClient`: OpenWeather One Call forecast for the park
//!
//! Both are consumed opportunistically: a failure is reported to the caller
//! and never retried.

pub mod client;
pub mod error;
pub mod weather;

pub use client::ThrillDataClient;
pub use error::ApiError;
pub use weather::WeatherClient;

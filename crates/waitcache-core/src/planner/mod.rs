//! Itinerary planning over the current wait times.
//!
//! `build_timeline` turns the ordered plan into start/end times;
//! `next_best_rides` suggests what to ride next.

pub mod recommend;
pub mod timeline;

pub use recommend::{next_best_rides, DEFAULT_NEXT_RIDES};
pub use timeline::build_timeline;

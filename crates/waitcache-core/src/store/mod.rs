//! Local persistence.
//!
//! - `SnapshotStore`: dated wait-time JSON files (`today_waits_<date>.json`,
//!   `last_week_waits_<date>.json`) in the data directory
//! - `PlannerStore`: the ride plan, ride counts and planner settings
//! - `CompletedRides`: the in-memory set of rides done today

pub mod completed;
pub mod planner;
pub mod snapshots;

pub use completed::CompletedRides;
pub use planner::PlannerStore;
pub use snapshots::{SnapshotKind, SnapshotStore};

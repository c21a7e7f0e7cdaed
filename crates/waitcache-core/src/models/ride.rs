use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::park::UNKNOWN_LAND;

/// Operating status derived from whether a ride has a current wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum RideStatus {
    Open,
    Down,
    #[serde(other)]
    Unknown,
}

impl RideStatus {
    pub fn from_wait(wait: Option<u32>) -> Self {
        if wait.is_some() {
            RideStatus::Open
        } else {
            RideStatus::Down
        }
    }
}

impl std::fmt::Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RideStatus::Open => write!(f, "Open"),
            RideStatus::Down => write!(f, "Down"),
            RideStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One point of a ride's wait-time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct WaitPoint {
    pub time: String,
    pub wait: Option<u32>,
}

impl WaitPoint {
    pub fn new(time: impl Into<String>, wait: Option<u32>) -> Self {
        Self {
            time: time.into(),
            wait,
        }
    }
}

fn unknown_land() -> String {
    UNKNOWN_LAND.to_string()
}

/// A ride record as stored in a snapshot file.
///
/// Key spelling follows the snapshot files on disk: `waitTime` is camelCase
/// while `wait_times` is snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Ride {
    pub name: String,
    #[serde(rename = "waitTime")]
    pub wait_time: Option<u32>,
    pub status: RideStatus,
    #[serde(default)]
    pub wait_times: Vec<WaitPoint>,
    #[serde(default = "unknown_land")]
    pub land: String,
}

impl Ride {
    /// Build a ride from its day series; the current wait is the latest
    /// non-null point.
    pub fn from_series(name: String, land: String, wait_times: Vec<WaitPoint>) -> Self {
        let wait_time = wait_times.iter().rev().find_map(|p| p.wait);
        Self {
            name,
            wait_time,
            status: RideStatus::from_wait(wait_time),
            wait_times,
            land,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RideStatus::Open && self.wait_time.is_some()
    }
}

/// A dated wait-time snapshot for a whole park.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Snapshot {
    pub date: NaiveDate,
    pub park: String,
    pub rides: Vec<Ride>,
}

impl Snapshot {
    pub fn ride(&self, name: &str) -> Option<&Ride> {
        self.rides.iter().find(|r| r.name == name)
    }
}

/// A row of the live wait-time table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LiveRide {
    pub name: String,
    #[serde(rename = "waitTime")]
    pub wait_time: u32,
    #[serde(rename = "heightReq")]
    pub height_req: String,
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_series_takes_latest_known_wait() {
        let ride = Ride::from_series(
            "Stardust Racers".to_string(),
            "Celestial Park".to_string(),
            vec![
                WaitPoint::new("9:00 AM", Some(30)),
                WaitPoint::new("9:15 AM", Some(45)),
                WaitPoint::new("9:30 AM", None),
            ],
        );
        assert_eq!(ride.wait_time, Some(45));
        assert_eq!(ride.status, RideStatus::Open);
        assert!(ride.is_open());
    }

    #[test]
    fn test_from_series_all_null_is_down() {
        let ride = Ride::from_series(
            "Fyre Drill".to_string(),
            "Isle of Berk".to_string(),
            vec![WaitPoint::new("9:00 AM", None)],
        );
        assert_eq!(ride.wait_time, None);
        assert_eq!(ride.status, RideStatus::Down);
    }

    #[test]
    fn test_parse_snapshot_file_without_land() {
        let json = r#"{
            "date": "2025-06-10",
            "park": "Epic Universe",
            "rides": [
                {"name": "Yoshi's Adventure", "waitTime": 25, "status": "Open",
                 "wait_times": [{"time": "9:00 AM", "wait": 25}, {"time": "9:15 AM", "wait": null}]},
                {"name": "Fyre Drill", "waitTime": null, "status": "Closed"}
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).expect("Failed to parse snapshot");
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(snapshot.rides.len(), 2);
        assert_eq!(snapshot.rides[0].land, UNKNOWN_LAND);
        assert_eq!(snapshot.rides[0].wait_times[1].wait, None);
        assert_eq!(snapshot.rides[1].status, RideStatus::Unknown);
        assert!(snapshot.rides[1].wait_times.is_empty());
    }

    #[test]
    fn test_ride_serializes_with_file_key_spelling() {
        let ride = Ride::from_series(
            "Fyre Drill".to_string(),
            "Isle of Berk".to_string(),
            vec![WaitPoint::new("9:00 AM", Some(10))],
        );
        let value = serde_json::to_value(&ride).unwrap();
        assert_eq!(value["waitTime"], 10);
        assert_eq!(value["status"], "Open");
        assert_eq!(value["wait_times"][0]["time"], "9:00 AM");
        assert_eq!(value["land"], "Isle of Berk");
    }
}

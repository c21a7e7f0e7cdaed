//! Ride plan and planner state.
//!
//! These types were browser local-storage entries in the first version of
//! the planner; they are now persisted by `store::PlannerStore`.

use std::collections::BTreeMap;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::utils::format::hhmm;

/// Minutes spent on a ride once the queue is done (load, ride, exit).
pub const DEFAULT_RIDE_DURATION_MINUTES: u32 = 5;

/// Default park arrival time.
pub const DEFAULT_START_HOUR: u32 = 9;

/// One step of the user's ordered plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlanItem {
    Ride {
        name: String,
        /// Expected wait entered by the user; replaces the live wait.
        #[serde(rename = "waitOverride", default, skip_serializing_if = "Option::is_none")]
        wait_override: Option<u32>,
    },
    Break {
        label: String,
        minutes: u32,
    },
}

impl PlanItem {
    pub fn ride(name: impl Into<String>) -> Self {
        PlanItem::Ride {
            name: name.into(),
            wait_override: None,
        }
    }

    pub fn break_for(label: impl Into<String>, minutes: u32) -> Self {
        PlanItem::Break {
            label: label.into(),
            minutes,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PlanItem::Ride { name, .. } => name,
            PlanItem::Break { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerSettings {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub start_time: NaiveTime,
    pub ride_duration_minutes: u32,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
            ride_duration_minutes: DEFAULT_RIDE_DURATION_MINUTES,
        }
    }
}

/// Everything the planner remembers between visits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerState {
    pub plan: Vec<PlanItem>,
    /// Times each ride has been ridden, keyed by ride name.
    pub ride_counts: BTreeMap<String, u32>,
    pub settings: PlannerSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub enum TimelineKind {
    Ride,
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub index: usize,
    pub kind: TimelineKind,
    pub label: String,
    pub wait_minutes: u32,
    /// False when a ride had no override and no live wait (counted as 0).
    pub wait_known: bool,
    pub duration_minutes: u32,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "ts", ts(type = "string"))]
    pub end: NaiveTime,
    pub total_minutes: u32,
    pub entries: Vec<TimelineEntry>,
}

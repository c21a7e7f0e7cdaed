//! Chart data for the wait-time graphs: today's series against last week's
//! on one time axis.

use std::collections::{HashMap, HashSet};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::WaitPoint;
use crate::utils::parse_time_label;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub today: Vec<Option<u32>>,
    pub last_week: Vec<Option<u32>>,
}

fn by_label(points: &[WaitPoint]) -> HashMap<&str, Option<u32>> {
    let mut map = HashMap::with_capacity(points.len());
    for p in points {
        map.entry(p.time.as_str()).or_insert(p.wait);
    }
    map
}

/// Align two series on the union of their time labels.
///
/// Labels are ordered by time of day; labels that don't parse as a time go
/// last in the order first seen. A series without a point at a label gets
/// `None` there.
pub fn align(today: &[WaitPoint], last_week: &[WaitPoint]) -> ChartData {
    let mut seen = HashSet::new();
    let mut labels: Vec<String> = today
        .iter()
        .chain(last_week)
        .filter(|p| seen.insert(p.time.as_str()))
        .map(|p| p.time.clone())
        .collect();

    labels.sort_by_key(|label| match parse_time_label(label) {
        Some(time) => (false, time),
        None => (true, NaiveTime::MIN),
    });

    let today_by_label = by_label(today);
    let last_week_by_label = by_label(last_week);
    let column = |map: &HashMap<&str, Option<u32>>| -> Vec<Option<u32>> {
        labels
            .iter()
            .map(|label| map.get(label.as_str()).copied().flatten())
            .collect()
    };

    ChartData {
        today: column(&today_by_label),
        last_week: column(&last_week_by_label),
        labels,
    }
}

/// The point with a known wait closest in time to `at`; ties go to the
/// earlier point.
pub fn nearest_wait(points: &[WaitPoint], at: NaiveTime) -> Option<&WaitPoint> {
    points
        .iter()
        .filter(|p| p.wait.is_some())
        .filter_map(|p| parse_time_label(&p.time).map(|time| (time, p)))
        .min_by_key(|(time, _)| ((*time - at).num_minutes().abs(), *time))
        .map(|(_, p)| p)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(time: &str, wait: Option<u32>) -> WaitPoint {
        WaitPoint::new(time, wait)
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_align_merges_and_sorts_labels() {
        let today = vec![p("9:15 AM", Some(30)), p("10:00 AM", Some(45)), p("1:00 PM", None)];
        let last_week = vec![p("9:00 AM", Some(20)), p("9:15 AM", Some(25)), p("12:30 PM", Some(60))];

        let chart = align(&today, &last_week);
        assert_eq!(chart.labels, vec!["9:00 AM", "9:15 AM", "10:00 AM", "12:30 PM", "1:00 PM"]);
        assert_eq!(chart.today, vec![None, Some(30), Some(45), None, None]);
        assert_eq!(chart.last_week, vec![Some(20), Some(25), None, Some(60), None]);
    }

    #[test]
    fn test_align_unparseable_labels_last() {
        let today = vec![p("Closing", Some(5)), p("9:00 AM", Some(10))];
        let chart = align(&today, &[]);
        assert_eq!(chart.labels, vec!["9:00 AM", "Closing"]);
        assert_eq!(chart.today, vec![Some(10), Some(5)]);
        assert_eq!(chart.last_week, vec![None, None]);
    }

    #[test]
    fn test_align_empty() {
        assert_eq!(align(&[], &[]), ChartData::default());
    }

    #[test]
    fn test_nearest_wait_skips_nulls_and_prefers_earlier() {
        let points = vec![
            p("9:00 AM", Some(20)),
            p("9:30 AM", None),
            p("10:00 AM", Some(40)),
        ];
        assert_eq!(nearest_wait(&points, t(9, 35)).map(|p| p.wait), Some(Some(40)));
        // 9:30 is equidistant from 9:00 and 10:00
        assert_eq!(nearest_wait(&points, t(9, 30)).map(|p| p.wait), Some(Some(20)));
        assert!(nearest_wait(&[p("9:00 AM", None)], t(9, 0)).is_none());
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::models::Snapshot;

const SNAPSHOT_EXT: &str = ".json";

/// Which day a snapshot file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Today,
    LastWeek,
}

impl SnapshotKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            SnapshotKind::Today => "today_waits_",
            SnapshotKind::LastWeek => "last_week_waits_",
        }
    }

    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}{}{}", self.prefix(), date.format("%Y-%m-%d"), SNAPSHOT_EXT)
    }

    /// Date encoded in a file name of this kind, if it is one.
    fn parse_file_name(&self, name: &str) -> Option<NaiveDate> {
        let date = name.strip_prefix(self.prefix())?.strip_suffix(SNAPSHOT_EXT)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    fn matches(&self, name: &str) -> bool {
        name.starts_with(self.prefix()) && name.ends_with(SNAPSHOT_EXT)
    }
}

/// Dated wait-time snapshot files in one data directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    data_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn path_for(&self, kind: SnapshotKind, date: NaiveDate) -> PathBuf {
        self.data_dir.join(kind.file_name(date))
    }

    fn file_names(&self, kind: SnapshotKind) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.data_dir)
            .with_context(|| format!("Failed to read data directory: {}", self.data_dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if kind.matches(name) {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }

    fn load(&self, name: &str) -> Result<Snapshot> {
        let path = self.data_dir.join(name);
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot file: {}", name))?;

        let snapshot: Snapshot = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse snapshot file: {}", name))?;

        debug!(file = name, bytes = contents.len(), rides = snapshot.rides.len(), "Loaded snapshot");
        Ok(snapshot)
    }

    /// Most recent today file, by file name.
    pub fn latest_today(&self) -> Result<Option<Snapshot>> {
        let mut names = self.file_names(SnapshotKind::Today)?;
        names.sort();
        match names.last() {
            Some(name) => self.load(name).map(Some),
            None => Ok(None),
        }
    }

    /// Last-week file whose date is closest to `target`; ties go to the
    /// earlier date. Returns the file's date with the snapshot.
    pub fn closest_last_week(&self, target: NaiveDate) -> Result<Option<(NaiveDate, Snapshot)>> {
        let kind = SnapshotKind::LastWeek;
        let closest = self
            .file_names(kind)?
            .into_iter()
            .filter_map(|name| kind.parse_file_name(&name).map(|date| (date, name)))
            .min_by_key(|(date, _)| ((*date - target).num_days().abs(), *date));

        match closest {
            Some((date, name)) => {
                debug!(file = %name, date = %date, requested = %target, "Using last week data file");
                Ok(Some((date, self.load(&name)?)))
            }
            None => Ok(None),
        }
    }

    /// Write a snapshot as pretty JSON, named after its kind and date.
    pub fn save(&self, kind: SnapshotKind, snapshot: &Snapshot) -> Result<PathBuf> {
        let path = self.path_for(kind, snapshot.date);
        let contents = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write snapshot file: {}", path.display()))?;
        Ok(path)
    }

    pub fn save_today(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        self.save(SnapshotKind::Today, snapshot)
    }

    pub fn save_last_week(&self, snapshot: &Snapshot) -> Result<PathBuf> {
        self.save(SnapshotKind::LastWeek, snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ride, WaitPoint};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot(on: NaiveDate, ride: &str) -> Snapshot {
        Snapshot {
            date: on,
            park: "Epic Universe".to_string(),
            rides: vec![Ride::from_series(
                ride.to_string(),
                "Celestial Park".to_string(),
                vec![WaitPoint::new("9:00 AM", Some(30))],
            )],
        }
    }

    #[test]
    fn test_latest_today_picks_greatest_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.latest_today().unwrap().is_none());

        store.save_today(&snapshot(date(2025, 6, 16), "Old")).unwrap();
        store.save_today(&snapshot(date(2025, 6, 17), "New")).unwrap();
        store.save_last_week(&snapshot(date(2025, 6, 20), "Not today")).unwrap();

        let latest = store.latest_today().unwrap().expect("a today snapshot");
        assert_eq!(latest.date, date(2025, 6, 17));
        assert_eq!(latest.rides[0].name, "New");
    }

    #[test]
    fn test_closest_last_week_prefers_nearest_then_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.closest_last_week(date(2025, 6, 10)).unwrap().is_none());

        store.save_last_week(&snapshot(date(2025, 6, 8), "Eighth")).unwrap();
        store.save_last_week(&snapshot(date(2025, 6, 12), "Twelfth")).unwrap();
        store.save_last_week(&snapshot(date(2025, 5, 1), "May")).unwrap();

        let (found, snap) = store.closest_last_week(date(2025, 6, 11)).unwrap().unwrap();
        assert_eq!(found, date(2025, 6, 12));
        assert_eq!(snap.rides[0].name, "Twelfth");

        // 06-10 is two days from both; the earlier file wins
        let (found, _) = store.closest_last_week(date(2025, 6, 10)).unwrap().unwrap();
        assert_eq!(found, date(2025, 6, 8));
    }

    #[test]
    fn test_unrelated_and_malformed_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("last_week_waits_latest.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        assert!(store.closest_last_week(date(2025, 6, 10)).unwrap().is_none());
        assert!(store.latest_today().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_today_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("today_waits_2025-06-17.json"), "{not json").unwrap();
        assert!(store.latest_today().is_err());
    }

    #[test]
    fn test_save_writes_expected_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().to_path_buf()).unwrap();
        let path = store.save_today(&snapshot(date(2025, 6, 17), "Ride")).unwrap();
        assert_eq!(path, dir.path().join("today_waits_2025-06-17.json"));

        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains("\"waitTime\": 30"));
        assert!(raw.contains("\"date\": \"2025-06-17\""));
    }
}

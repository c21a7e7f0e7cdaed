use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{PlanItem, PlannerSettings, PlannerState};

/// Planner state persisted as a single JSON file. Every mutation writes the
/// whole file; the last write wins.
pub struct PlannerStore {
    path: PathBuf,
    state: PlannerState,
}

impl PlannerStore {
    /// Load the state file, starting empty if it does not exist yet.
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read planner file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse planner file: {}", path.display()))?
        } else {
            PlannerState::default()
        };

        debug!(path = %path.display(), items = state.plan.len(), "Opened planner state");
        Ok(Self { path, state })
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    fn write(&self, state: &PlannerState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create planner directory: {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write planner file: {}", self.path.display()))?;
        Ok(())
    }

    /// Persist `next` and only then make it the current state, so a failed
    /// write leaves memory matching the file.
    fn commit(&mut self, next: PlannerState) -> Result<()> {
        self.write(&next)?;
        self.state = next;
        Ok(())
    }

    pub fn set_plan(&mut self, plan: Vec<PlanItem>) -> Result<()> {
        let next = PlannerState {
            plan,
            ..self.state.clone()
        };
        self.commit(next)
    }

    pub fn set_settings(&mut self, settings: PlannerSettings) -> Result<()> {
        let next = PlannerState {
            settings,
            ..self.state.clone()
        };
        self.commit(next)
    }

    /// Adjust a ride's count by `delta`, never going below zero. Rides that
    /// drop to zero are removed. Returns the new count.
    pub fn bump_ride_count(&mut self, ride: &str, delta: i32) -> Result<u32> {
        let current = self.state.ride_counts.get(ride).copied().unwrap_or(0);
        let updated = current.saturating_add_signed(delta);

        let mut next = self.state.clone();
        if updated == 0 {
            next.ride_counts.remove(ride);
        } else {
            next.ride_counts.insert(ride.to_string(), updated);
        }

        self.commit(next)?;
        Ok(updated)
    }

    pub fn reset_ride_counts(&mut self) -> Result<()> {
        let mut next = self.state.clone();
        next.ride_counts.clear();
        self.commit(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_open_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlannerStore::open(dir.path().join("planner.json")).unwrap();
        assert_eq!(store.state(), &PlannerState::default());
    }

    #[test]
    fn test_mutations_persist_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("planner.json");

        let mut store = PlannerStore::open(path.clone()).unwrap();
        store
            .set_plan(vec![PlanItem::ride("Stardust Racers"), PlanItem::break_for("Lunch", 30)])
            .unwrap();
        store
            .set_settings(PlannerSettings {
                start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                ride_duration_minutes: 6,
            })
            .unwrap();
        assert_eq!(store.bump_ride_count("Stardust Racers", 1).unwrap(), 1);
        assert_eq!(store.bump_ride_count("Stardust Racers", 2).unwrap(), 3);

        let reopened = PlannerStore::open(path).unwrap();
        assert_eq!(reopened.state().plan.len(), 2);
        assert_eq!(reopened.state().settings.ride_duration_minutes, 6);
        assert_eq!(reopened.state().ride_counts.get("Stardust Racers"), Some(&3));
    }

    #[test]
    fn test_ride_count_saturates_and_removes_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = PlannerStore::open(dir.path().join("planner.json")).unwrap();

        store.bump_ride_count("Fyre Drill", 2).unwrap();
        assert_eq!(store.bump_ride_count("Fyre Drill", -5).unwrap(), 0);
        assert!(!store.state().ride_counts.contains_key("Fyre Drill"));

        store.bump_ride_count("Fyre Drill", 1).unwrap();
        store.bump_ride_count("Yoshi's Adventure", 1).unwrap();
        store.reset_ride_counts().unwrap();
        assert!(store.state().ride_counts.is_empty());
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(PlannerStore::open(path).is_err());
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.json");
        let mut store = PlannerStore::open(path.clone()).unwrap();
        store.set_plan(vec![PlanItem::ride("Stardust Racers")]).unwrap();
        store.bump_ride_count("Stardust Racers", 1).unwrap();

        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        store.path = blocker.join("planner.json");

        assert!(store.set_plan(vec![PlanItem::break_for("Lunch", 30)]).is_err());
        assert!(store.bump_ride_count("Stardust Racers", 4).is_err());
        assert!(store.reset_ride_counts().is_err());
        assert!(store.set_settings(PlannerSettings::default()).is_err());

        assert_eq!(store.state().plan, vec![PlanItem::ride("Stardust Racers")]);
        assert_eq!(store.state().ride_counts.get("Stardust Racers"), Some(&1));

        // The file on disk still holds the last good state too.
        let reopened = PlannerStore::open(path).unwrap();
        assert_eq!(reopened.state(), store.state());
    }
}

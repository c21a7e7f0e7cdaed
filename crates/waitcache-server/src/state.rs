use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{Mutex, RwLock};
use waitcache_core::api::{ThrillDataClient, WeatherClient};
use waitcache_core::store::{CompletedRides, PlannerStore, SnapshotStore};
use waitcache_core::{Config, ParkProfile};

/// Shared handler state. Clone is cheap; everything mutable sits behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub snapshots: SnapshotStore,
    pub thrill: ThrillDataClient,
    pub weather: WeatherClient,
    pub completed: Arc<RwLock<CompletedRides>>,
    pub planner: Arc<Mutex<PlannerStore>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let snapshots = SnapshotStore::new(config.data_dir.clone())?;
        let planner = PlannerStore::open(config.planner_file.clone())?;
        let thrill = ThrillDataClient::new(config.thrill_data_base_url.clone())?;
        let weather = WeatherClient::new(config.weather_base_url.clone(), config.weather_api_key.clone())?;

        Ok(Self {
            config: Arc::new(config),
            snapshots,
            thrill,
            weather,
            completed: Arc::new(RwLock::new(CompletedRides::new())),
            planner: Arc::new(Mutex::new(planner)),
        })
    }

    pub fn park(&self) -> &ParkProfile {
        &self.config.park
    }

    /// Run snapshot file I/O on the blocking pool.
    pub async fn with_snapshots<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SnapshotStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.snapshots.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .context("Snapshot task failed")?
    }

    /// Lock the planner and run `f` against it on the blocking pool. The lock
    /// is held until the write finishes.
    pub async fn with_planner<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut PlannerStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut planner = Arc::clone(&self.planner).lock_owned().await;
        tokio::task::spawn_blocking(move || f(&mut *planner))
            .await
            .context("Planner task failed")?
    }
}

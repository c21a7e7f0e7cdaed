//! Application configuration.
//!
//! Configuration comes from the environment (a `.env` file is loaded by the
//! binary before this runs). Every setting has a default except the weather
//! API key; without it the weather endpoint reports that it is not
//! configured.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::api::client::DEFAULT_BASE_URL;
use crate::api::weather::DEFAULT_WEATHER_BASE_URL;
use crate::park::{ParkProfile, EPIC_UNIVERSE};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_STATIC_DIR: &str = "dist";
const PLANNER_FILE: &str = "planner.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub planner_file: PathBuf,
    pub weather_api_key: Option<String>,
    pub thrill_data_base_url: String,
    pub weather_base_url: String,
    pub log_dir: Option<PathBuf>,
    pub park: ParkProfile,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            planner_file: data_dir.join(PLANNER_FILE),
            data_dir,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            weather_api_key: None,
            thrill_data_base_url: DEFAULT_BASE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            log_dir: None,
            park: EPIC_UNIVERSE,
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = match var("HOST") {
            Some(h) => h.parse().with_context(|| format!("Invalid HOST: {}", h))?,
            None => defaults.host,
        };
        let port = match var("PORT") {
            Some(p) => p.parse().with_context(|| format!("Invalid PORT: {}", p))?,
            None => defaults.port,
        };

        let data_dir = var("WAITCACHE_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir);
        let planner_file = var("WAITCACHE_PLANNER_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(PLANNER_FILE));

        Ok(Self {
            host,
            port,
            planner_file,
            data_dir,
            static_dir: var("WAITCACHE_STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
            weather_api_key: var("WEATHER_API_KEY"),
            thrill_data_base_url: var("THRILL_DATA_BASE_URL").unwrap_or(defaults.thrill_data_base_url),
            weather_base_url: var("WEATHER_BASE_URL").unwrap_or(defaults.weather_base_url),
            log_dir: var("WAITCACHE_LOG_DIR").map(PathBuf::from),
            park: defaults.park,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

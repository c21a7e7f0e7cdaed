//! HTTP client for the thrill-data wait-time site.
//!
//! Two pages are used: the park heat map (JSON wrapping a Plotly chart with
//! the whole day's waits) and the live wait-time table (HTML).

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info};

use crate::models::{LiveRide, Snapshot};
use crate::park::ParkProfile;
use crate::scrape::{self, HeatmapTrace};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "https://www.thrill-data.com";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The site serves the heat map only to browser-looking clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Heat-map bucket size; `min` gives one column per sample.
const HEATMAP_TAG: &str = "min";

/// Build the shared reqwest client used by every upstream API.
pub(crate) fn http_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(BROWSER_USER_AGENT));

    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")
}

/// Check if response is successful, returning an error with body if not.
pub(crate) async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body).into())
    }
}

#[derive(Debug, Deserialize)]
struct HeatmapPage {
    plot1: String,
}

/// Client for thrill-data.com.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ThrillDataClient {
    client: Client,
    base_url: String,
}

impl ThrillDataClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the park heat map for one day and return its first trace.
    pub async fn fetch_heatmap(&self, park: &ParkProfile, date: NaiveDate) -> Result<HeatmapTrace> {
        let url = format!("{}/waits/graph/quick/parkheat", self.base_url);
        let date_str = date.format("%Y-%m-%d").to_string();
        debug!(url = %url, park = park.id, date = %date_str, "Fetching heat map");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("id", park.id.to_string()),
                ("dateStart", date_str),
                ("tag", HEATMAP_TAG.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = check_response(response).await?;

        let page: HeatmapPage = response
            .json()
            .await
            .context("Failed to parse heat-map response")?;

        Ok(scrape::parse_heatmap(&page.plot1).map_err(ApiError::from)?)
    }

    /// Fetch one day's heat map as a snapshot.
    pub async fn fetch_snapshot(&self, park: &ParkProfile, date: NaiveDate) -> Result<Snapshot> {
        let trace = self.fetch_heatmap(park, date).await?;
        let snapshot = scrape::build_snapshot(&trace, date, park);
        info!(
            date = %date,
            rides = snapshot.rides.len(),
            time_points = trace.x.len(),
            "Fetched wait-time snapshot"
        );
        Ok(snapshot)
    }

    /// Scrape the live wait-time table.
    pub async fn fetch_live_table(
        &self,
        park: &ParkProfile,
        is_completed: impl Fn(&str) -> bool,
    ) -> Result<Vec<LiveRide>> {
        let url = format!("{}/waittimes/{}", self.base_url, park.slug);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = check_response(response).await?;
        let html = response
            .text()
            .await
            .context("Failed to read live wait-time page")?;

        let rides = scrape::parse_live_table(&html, is_completed);
        debug!(rides = rides.len(), "Parsed live wait-time table");
        Ok(rides)
    }
}

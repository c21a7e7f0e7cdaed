//! Errors from the upstream wait-time and weather services.

use thiserror::Error;

use crate::scrape::ScrapeError;
use crate::utils::truncate_string;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Upstream refused the request: {0}")]
    Forbidden(String),

    /// The weather service rejects unknown or inactive keys with 401.
    #[error("Upstream rejected the API key")]
    Unauthorized,

    #[error("Upstream page not found: {0}")]
    NotFound(String),

    #[error("Rate limited by upstream")]
    RateLimited,

    #[error("Upstream unavailable: {0}")]
    Unavailable(String),

    #[error("Unexpected upstream response: {0}")]
    InvalidResponse(String),

    #[error("Scrape failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Weather API key is not configured.")]
    MissingApiKey,
}

/// Response bodies are cut to this many characters in messages.
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = truncate_string(body, MAX_ERROR_BODY_LENGTH);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::Unavailable(truncated),
            _ => ApiError::InvalidResponse(format!("HTTP {}: {}", status.as_u16(), truncated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(ApiError::from_status(StatusCode::UNAUTHORIZED, ""), ApiError::Unauthorized));
        assert!(matches!(ApiError::from_status(StatusCode::NOT_FOUND, "gone"), ApiError::NotFound(b) if b == "gone"));
        assert!(matches!(ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""), ApiError::RateLimited));
        assert!(matches!(ApiError::from_status(StatusCode::BAD_GATEWAY, ""), ApiError::Unavailable(_)));
        assert!(matches!(ApiError::from_status(StatusCode::FORBIDDEN, "blocked"), ApiError::Forbidden(_)));
        match ApiError::from_status(StatusCode::IM_A_TEAPOT, "short") {
            ApiError::InvalidResponse(msg) => assert_eq!(msg, "HTTP 418: short"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_status_truncates_long_bodies() {
        let body = "x".repeat(2000);
        match ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body) {
            ApiError::Unavailable(msg) => {
                assert_eq!(msg.chars().count(), MAX_ERROR_BODY_LENGTH);
                assert!(msg.ends_with("..."));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Open-Meteo daily forecast client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::WeatherConfig;
use crate::constants::{DAILY_FIELDS, DEFAULT_FORECAST_DAYS, DEFAULT_PAST_DAYS};
use crate::models::ForecastResponse;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Request could not be sent or the body could not be read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Service answered with a 5xx status
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Body was not the expected JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid forecast window: forecast_days must be at least 1")]
    InvalidWindow,
}

/// A window of days to fetch, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub forecast_days: u32,
    pub past_days: u32,
}

impl ForecastWindow {
    pub const fn new(forecast_days: u32, past_days: u32) -> Self {
        Self {
            forecast_days,
            past_days,
        }
    }

    /// Number of entries each daily array carries
    pub const fn day_count(&self) -> u32 {
        self.forecast_days + self.past_days
    }
}

impl Default for ForecastWindow {
    fn default() -> Self {
        Self::new(DEFAULT_FORECAST_DAYS, DEFAULT_PAST_DAYS)
    }
}

/// Source of daily forecast data
#[async_trait]
pub trait WeatherClient: Send + Sync {
    async fn fetch(&self, window: ForecastWindow) -> Result<ForecastResponse, WeatherError>;
}

#[async_trait]
impl<C: WeatherClient + ?Sized> WeatherClient for Arc<C> {
    async fn fetch(&self, window: ForecastWindow) -> Result<ForecastResponse, WeatherError> {
        (**self).fetch(window).await
    }
}

/// HTTP client for the fixed location in [`WeatherConfig`]
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Arc<Client>,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            config,
        })
    }

    pub fn with_defaults() -> Result<Self, WeatherError> {
        Self::new(WeatherConfig::default())
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    fn query(&self, window: ForecastWindow) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.config.latitude.to_string()),
            ("longitude", self.config.longitude.to_string()),
            ("daily", DAILY_FIELDS.to_string()),
            ("timezone", self.config.timezone.clone()),
            ("forecast_days", window.forecast_days.to_string()),
            ("past_days", window.past_days.to_string()),
        ]
    }
}

#[async_trait]
impl WeatherClient for OpenMeteoClient {
    #[instrument(skip(self), fields(forecast_days = window.forecast_days, past_days = window.past_days))]
    async fn fetch(&self, window: ForecastWindow) -> Result<ForecastResponse, WeatherError> {
        if window.forecast_days == 0 {
            return Err(WeatherError::InvalidWindow);
        }

        let url = self.forecast_url();
        debug!(url = %url, "Fetching daily forecast");

        let response = self
            .client
            .get(&url)
            .query(&self.query(window))
            .send()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimitExceeded);
        }
        if status.is_server_error() {
            return Err(WeatherError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(WeatherError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| WeatherError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window() {
        let window = ForecastWindow::default();
        assert_eq!(window.forecast_days, 3);
        assert_eq!(window.past_days, 1);
        assert_eq!(window.day_count(), 4);
    }

    #[test]
    fn test_forecast_url_trims_slash() {
        let config = WeatherConfig {
            base_url: "http://localhost:1234/v1/".to_string(),
            ..Default::default()
        };
        let client = OpenMeteoClient::new(config).unwrap();
        assert_eq!(client.forecast_url(), "http://localhost:1234/v1/forecast");
    }

    #[test]
    fn test_query_parameters() {
        let client = OpenMeteoClient::with_defaults().unwrap();
        let query = client.query(ForecastWindow::new(7, 0));

        let get = |key: &str| {
            query
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("latitude"), Some("35.6785"));
        assert_eq!(get("longitude"), Some("139.6823"));
        assert_eq!(get("timezone"), Some("Asia/Tokyo"));
        assert_eq!(get("daily"), Some(DAILY_FIELDS));
        assert_eq!(get("forecast_days"), Some("7"));
        assert_eq!(get("past_days"), Some("0"));
    }

    #[tokio::test]
    async fn test_zero_forecast_days_rejected() {
        let client = OpenMeteoClient::with_defaults().unwrap();
        let result = client.fetch(ForecastWindow::new(0, 1)).await;
        assert!(matches!(result, Err(WeatherError::InvalidWindow)));
    }

    #[test]
    fn test_weather_error_display() {
        assert!(WeatherError::RateLimitExceeded
            .to_string()
            .contains("Rate limit"));
        assert_eq!(
            WeatherError::ServiceUnavailable("HTTP 503".into()).to_string(),
            "Service unavailable: HTTP 503"
        );
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE, OPEN_METEO_API_BASE, USER_AGENT,
};

/// Forecast endpoint and location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo API base URL (default: <https://api.open-meteo.com/v1>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// IANA timezone the daily buckets are computed in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    OPEN_METEO_API_BASE.to_string()
}

const fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

const fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_user_agent() -> String {
    USER_AGENT.to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
            user_agent: default_user_agent(),
        }
    }
}

impl WeatherConfig {
    /// Reads a JSON config file, or returns the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

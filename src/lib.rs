//! Daily forecast cards for a fixed location.
//!
//! Fetches Open-Meteo daily forecasts and writes them into the today and
//! tomorrow cards and the five-day list of a page, through a
//! [`RenderTarget`](dom::RenderTarget) so any document implementation can be
//! driven. [`Document`](dom::Document) is the in-memory one.

pub mod client;
pub mod config;
pub mod constants;
pub mod dom;
pub mod formatters;
pub mod models;
pub mod page;
pub mod service;
pub mod viewport;
pub mod views;
pub mod weather_codes;

pub use client::{ForecastWindow, OpenMeteoClient, WeatherClient, WeatherError};
pub use config::WeatherConfig;
pub use dom::{Document, RenderTarget};
pub use models::{DailyWeatherRecord, ForecastResponse};
pub use service::{PageReport, WeatherPage};
pub use viewport::{ViewportMode, ViewportSwitcher};
pub use views::ViewError;
pub use weather_codes::{WeatherCodeResolver, WeatherInfo, WmoWeatherCodes};

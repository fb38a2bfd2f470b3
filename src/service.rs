use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::client::{OpenMeteoClient, WeatherClient, WeatherError};
use crate::config::WeatherConfig;
use crate::dom::RenderTarget;
use crate::views::today_tomorrow::{self, TodayTomorrowReport};
use crate::views::weekly::{self, WeeklyReport};
use crate::views::ViewError;
use crate::weather_codes::{WeatherCodeResolver, WmoWeatherCodes};

/// Outcome of one page load, one entry per view
#[derive(Debug)]
pub struct PageReport {
    pub today_tomorrow: Result<TodayTomorrowReport, ViewError>,
    pub weekly: Result<WeeklyReport, ViewError>,
}

/// Loads forecasts into a page. Each view fetches on its own and writes
/// only after its own response arrives.
#[derive(Clone)]
pub struct WeatherPage<C> {
    client: C,
    resolver: Arc<dyn WeatherCodeResolver>,
}

impl WeatherPage<OpenMeteoClient> {
    /// Creates a page backed by the Open-Meteo client
    pub fn from_config(config: WeatherConfig) -> Result<Self, WeatherError> {
        Ok(Self::new(OpenMeteoClient::new(config)?))
    }
}

impl<C: WeatherClient> WeatherPage<C> {
    pub fn new(client: C) -> Self {
        Self::with_resolver(client, Arc::new(WmoWeatherCodes))
    }

    pub fn with_resolver(client: C, resolver: Arc<dyn WeatherCodeResolver>) -> Self {
        Self { client, resolver }
    }

    pub async fn load_today_and_tomorrow<T: RenderTarget + ?Sized>(
        &self,
        target: &Mutex<T>,
    ) -> Result<TodayTomorrowReport, ViewError> {
        let response = today_tomorrow::fetch(&self.client).await?;
        let mut target = target.lock().await;
        let report = today_tomorrow::render(&mut *target, &response, self.resolver.as_ref())?;
        info!(?report, "Today and tomorrow rendered");
        Ok(report)
    }

    pub async fn load_weekly<T: RenderTarget + ?Sized>(
        &self,
        target: &Mutex<T>,
    ) -> Result<WeeklyReport, ViewError> {
        let response = weekly::fetch(&self.client).await?;
        let mut target = target.lock().await;
        let report = weekly::render(&mut *target, &response, self.resolver.as_ref())?;
        info!(?report, "Weekly forecast rendered");
        Ok(report)
    }

    /// Runs both views concurrently. A failed view is logged and leaves its
    /// part of the page untouched.
    pub async fn load<T: RenderTarget + ?Sized>(&self, target: &Mutex<T>) -> PageReport {
        let (today_tomorrow, weekly) = tokio::join!(
            self.load_today_and_tomorrow(target),
            self.load_weekly(target)
        );

        if let Err(e) = &today_tomorrow {
            warn!(error = %e, "Today and tomorrow forecast not rendered");
        }
        if let Err(e) = &weekly {
            warn!(error = %e, "Weekly forecast not rendered");
        }

        PageReport {
            today_tomorrow,
            weekly,
        }
    }
}

pub mod card;
pub mod today_tomorrow;
pub mod weekly;

use thiserror::Error;

use crate::client::WeatherError;
use crate::dom::{NodeId, RenderTarget, Selector, SelectorError};
use crate::models::{Anchor, DailyWeatherRecord, ForecastDay};

pub use card::{CardReport, CardStep, Lookup, Write};

/// Why a view did not render
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Failed to fetch forecast: {0}")]
    Fetch(#[from] WeatherError),

    #[error("Forecast has {available} days, day {index} is required")]
    MissingDay { index: usize, available: usize },

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Record for `days[index]`, diffed against the day before it
pub(crate) fn record_at(days: &[ForecastDay], index: usize) -> Result<DailyWeatherRecord, ViewError> {
    let missing = || ViewError::MissingDay {
        index,
        available: days.len(),
    };
    let previous = index.checked_sub(1).and_then(|i| days.get(i)).ok_or_else(missing)?;
    let current = days.get(index).ok_or_else(missing)?;
    Ok(DailyWeatherRecord::from_days(previous, current))
}

/// Resolves an anchor against the whole document
pub(crate) fn locate<T: RenderTarget + ?Sized>(
    target: &T,
    anchor: &Anchor,
) -> Result<Option<NodeId>, ViewError> {
    Ok(target.query(target.root(), &Selector::parse(anchor.selector())?))
}

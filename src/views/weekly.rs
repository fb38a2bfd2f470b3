//! Five-day list built from a template, starting the day after tomorrow.

use tracing::{debug, info};

use super::card::{apply_steps, CardReport, CardStep, Write};
use super::{locate, record_at, ViewError};
use crate::client::{ForecastWindow, WeatherClient};
use crate::dom::{RenderTarget, Selector, SelectorError};
use crate::formatters::{format_date, format_temp_diff, format_temperature};
use crate::models::{Anchor, DailyWeatherRecord, ForecastResponse, ViewBinding};
use crate::weather_codes::WeatherCodeResolver;

/// Today plus the six following days
pub const WINDOW: ForecastWindow = ForecastWindow::new(7, 0);

pub const CONTAINER_SELECTOR: &str = "#js-weekly-weather-container";
pub const TEMPLATE_SELECTOR: &str = "#js-weekly-weather-template";

const LABEL: &str = "週間天気";

/// Window indices shown in the list; 0 and 1 belong to the today/tomorrow cards
const DAYS: std::ops::Range<usize> = 2..7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeeklyReport {
    /// Container or template missing; the document was not touched
    Skipped { missing: String },
    Rendered { cards: Vec<CardReport> },
}

pub fn build_bindings(response: &ForecastResponse) -> Result<Vec<ViewBinding>, ViewError> {
    let days = response.days();
    DAYS.map(|index| {
        Ok(ViewBinding {
            label: LABEL,
            record: record_at(&days, index)?,
            anchor: Anchor::Template(TEMPLATE_SELECTOR.to_string()),
        })
    })
    .collect()
}

/// Card title, falling back to the raw date when it does not parse
fn title(date: &str) -> String {
    match format_date(date) {
        Ok(formatted) => formatted.formatted,
        Err(err) => {
            debug!(date, error = %err, "Unparseable forecast date");
            date.to_string()
        }
    }
}

/// Steps that fill one template clone. Every anchor is required.
pub fn card_steps(
    record: &DailyWeatherRecord,
    resolver: &dyn WeatherCodeResolver,
) -> Result<Vec<CardStep>, SelectorError> {
    let info = resolver.resolve(record.weather_code);
    let high_diff = format_temp_diff(record.max_temp_diff);
    let low_diff = format_temp_diff(record.min_temp_diff);

    Ok(vec![
        CardStep::required(".js-weather-title", vec![Write::Text(title(&record.date))])?,
        CardStep::required(".js-weather-telop", vec![Write::Text(info.label.to_string())])?,
        CardStep::required(
            ".js-weather-icon img",
            vec![Write::Attribute("src", info.icon.to_string())],
        )?,
        CardStep::required(
            ".js-weather-temp-high-value",
            vec![Write::Text(format_temperature(record.max_temp))],
        )?,
        CardStep::required(".js-weather-temp-high-diff", vec![Write::Text(high_diff.text)])?,
        CardStep::required(
            ".js-weather-temp-high-diff-label",
            vec![Write::Attribute("aria-label", high_diff.aria_label)],
        )?,
        CardStep::required(
            ".js-weather-temp-low-value",
            vec![Write::Text(format_temperature(record.min_temp))],
        )?,
        CardStep::required(".js-weather-temp-low-diff", vec![Write::Text(low_diff.text)])?,
        CardStep::required(
            ".js-weather-temp-low-diff-label",
            vec![Write::Attribute("aria-label", low_diff.aria_label)],
        )?,
    ])
}

/// Replaces the container's content with one card per day
pub fn render<T: RenderTarget + ?Sized>(
    target: &mut T,
    response: &ForecastResponse,
    resolver: &dyn WeatherCodeResolver,
) -> Result<WeeklyReport, ViewError> {
    let bindings = build_bindings(response)?;
    render_bindings(target, &bindings, resolver)
}

/// Writes prepared bindings, each instantiated from the template its anchor
/// names. The container and every template must resolve before anything is
/// written.
pub fn render_bindings<T: RenderTarget + ?Sized>(
    target: &mut T,
    bindings: &[ViewBinding],
    resolver: &dyn WeatherCodeResolver,
) -> Result<WeeklyReport, ViewError> {
    let Some(container) = target.query(target.root(), &Selector::parse(CONTAINER_SELECTOR)?)
    else {
        debug!("Weekly container not found");
        return Ok(WeeklyReport::Skipped {
            missing: CONTAINER_SELECTOR.to_string(),
        });
    };

    let mut templates = Vec::with_capacity(bindings.len());
    for binding in bindings {
        let Some(template) = locate(target, &binding.anchor)? else {
            debug!(
                label = binding.label,
                anchor = binding.anchor.selector(),
                "Weekly template not found"
            );
            return Ok(WeeklyReport::Skipped {
                missing: binding.anchor.selector().to_string(),
            });
        };
        templates.push(template);
    }

    // build every step list up front so a selector error cannot leave the
    // container half cleared
    let steps = bindings
        .iter()
        .map(|binding| card_steps(&binding.record, resolver))
        .collect::<Result<Vec<_>, _>>()?;

    target.clear_children(container);

    let mut cards = Vec::with_capacity(bindings.len());
    for ((binding, steps), template) in bindings.iter().zip(&steps).zip(templates) {
        let fragment = target.instantiate_template(template);
        let report = apply_steps(target, fragment, steps);
        debug!(
            label = binding.label,
            date = %binding.record.date,
            completed = report.completed,
            total = report.total,
            "Weekly card built"
        );
        target.append_child(container, fragment);
        cards.push(report);
    }

    Ok(WeeklyReport::Rendered { cards })
}

pub async fn fetch<C: WeatherClient + ?Sized>(client: &C) -> Result<ForecastResponse, ViewError> {
    info!("Fetching weekly forecast");
    Ok(client.fetch(WINDOW).await?)
}

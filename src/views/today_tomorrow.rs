//! Today and tomorrow cards, filled in place.

use tracing::{debug, info};

use super::card::{apply_steps, CardReport, CardStep, Write};
use super::{locate, record_at, ViewError};
use crate::client::{ForecastWindow, WeatherClient};
use crate::constants::{ICON_HEIGHT, ICON_WIDTH, PRECIPITATION_HOURS};
use crate::dom::{NodeId, RenderTarget, SelectorError};
use crate::formatters::{
    format_precipitation, format_precipitation_label, format_temp_diff, format_temperature,
};
use crate::models::{Anchor, DailyWeatherRecord, ForecastResponse, Period, ViewBinding};
use crate::weather_codes::WeatherCodeResolver;

/// Yesterday, today, tomorrow and one more day. The last day is never shown.
pub const WINDOW: ForecastWindow = ForecastWindow::new(3, 1);

const TODAY_INDEX: usize = 1;
const TOMORROW_INDEX: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodayTomorrowReport {
    /// A card was not in the document; neither card was touched
    Skipped { missing: Period },
    Rendered {
        today: CardReport,
        tomorrow: CardReport,
    },
}

/// Today and tomorrow records, each diffed against the day before
pub fn build_bindings(response: &ForecastResponse) -> Result<[ViewBinding; 2], ViewError> {
    let days = response.days();
    let binding = |period: Period, index: usize| -> Result<ViewBinding, ViewError> {
        Ok(ViewBinding {
            label: period.label(),
            record: record_at(&days, index)?,
            anchor: Anchor::Card(period.card_selector()),
        })
    };

    Ok([
        binding(Period::Today, TODAY_INDEX)?,
        binding(Period::Tomorrow, TOMORROW_INDEX)?,
    ])
}

/// Steps that fill one existing card, in write order
pub fn card_steps(
    record: &DailyWeatherRecord,
    resolver: &dyn WeatherCodeResolver,
) -> Result<Vec<CardStep>, SelectorError> {
    let info = resolver.resolve(record.weather_code);
    let high_diff = format_temp_diff(record.max_temp_diff);
    let low_diff = format_temp_diff(record.min_temp_diff);

    let mut steps = vec![
        CardStep::required(".js-weather-telop", vec![Write::Text(info.label.to_string())])?,
        CardStep::required(
            ".js-weather-icon img",
            vec![
                Write::Attribute("src", info.icon.to_string()),
                Write::Attribute("width", ICON_WIDTH.to_string()),
                Write::Attribute("height", ICON_HEIGHT.to_string()),
            ],
        )?,
        CardStep::all(
            ".js-weather-temp-high-value",
            vec![Write::Text(format_temperature(record.max_temp))],
        )?,
        CardStep::all(".js-weather-temp-high-diff", vec![Write::Text(high_diff.text)])?,
        CardStep::required(
            ".js-weather-temp-high-diff-label",
            vec![Write::Attribute("aria-label", high_diff.aria_label)],
        )?,
        CardStep::all(
            ".js-weather-temp-low-value",
            vec![Write::Text(format_temperature(record.min_temp))],
        )?,
        CardStep::all(".js-weather-temp-low-diff", vec![Write::Text(low_diff.text)])?,
        CardStep::required(
            ".js-weather-temp-low-diff-label",
            vec![Write::Attribute("aria-label", low_diff.aria_label)],
        )?,
    ];

    if let Some(probability) = record.precip_probability {
        for hour in PRECIPITATION_HOURS {
            steps.push(CardStep::optional(
                &format!(".js-weather-precipitation-{hour}"),
                vec![
                    Write::Text(format_precipitation(probability)),
                    Write::Attribute("aria-label", format_precipitation_label(probability)),
                ],
            )?);
        }
    }

    Ok(steps)
}

fn fill<T: RenderTarget + ?Sized>(
    target: &mut T,
    card: NodeId,
    binding: &ViewBinding,
    resolver: &dyn WeatherCodeResolver,
) -> Result<CardReport, ViewError> {
    let steps = card_steps(&binding.record, resolver)?;
    let report = apply_steps(target, card, &steps);
    debug!(
        label = binding.label,
        date = %binding.record.date,
        completed = report.completed,
        total = report.total,
        "Weather card updated"
    );
    Ok(report)
}

/// Writes a fetched response into the today and tomorrow cards. Both cards
/// must be present before either is written.
pub fn render<T: RenderTarget + ?Sized>(
    target: &mut T,
    response: &ForecastResponse,
    resolver: &dyn WeatherCodeResolver,
) -> Result<TodayTomorrowReport, ViewError> {
    let [today, tomorrow] = build_bindings(response)?;

    let Some(today_card) = locate(target, &today.anchor)? else {
        debug!("Today card not found");
        return Ok(TodayTomorrowReport::Skipped {
            missing: Period::Today,
        });
    };
    let Some(tomorrow_card) = locate(target, &tomorrow.anchor)? else {
        debug!("Tomorrow card not found");
        return Ok(TodayTomorrowReport::Skipped {
            missing: Period::Tomorrow,
        });
    };

    Ok(TodayTomorrowReport::Rendered {
        today: fill(target, today_card, &today, resolver)?,
        tomorrow: fill(target, tomorrow_card, &tomorrow, resolver)?,
    })
}

pub async fn fetch<C: WeatherClient + ?Sized>(client: &C) -> Result<ForecastResponse, ViewError> {
    info!("Fetching today and tomorrow forecast");
    Ok(client.fetch(WINDOW).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Selector};
    use crate::page::default_document;
    use crate::weather_codes::WmoWeatherCodes;

    fn response() -> ForecastResponse {
        serde_json::from_value(serde_json::json!({
            "daily": {
                "time": ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07"],
                "weathercode": [0, 3, 61, 2],
                "temperature_2m_max": [10.0, 12.0, 15.0, 14.0],
                "temperature_2m_min": [2.0, 3.0, 1.0, 4.0],
                "precipitation_probability_max": [0, 20, 70, 10]
            }
        }))
        .unwrap()
    }

    fn card(doc: &Document, period: Period) -> NodeId {
        doc.query(doc.root(), &Selector::parse(&period.card_selector()).unwrap())
            .unwrap()
    }

    fn first(doc: &Document, scope: NodeId, selector: &str) -> NodeId {
        doc.query(scope, &Selector::parse(selector).unwrap()).unwrap()
    }

    fn all(doc: &Document, scope: NodeId, selector: &str) -> Vec<NodeId> {
        doc.query_all(scope, &Selector::parse(selector).unwrap())
    }

    #[test]
    fn test_window_includes_spare_day() {
        assert_eq!(WINDOW.forecast_days, 3);
        assert_eq!(WINDOW.past_days, 1);
    }

    #[test]
    fn test_bindings_diff_against_previous_day() {
        let [today, tomorrow] = build_bindings(&response()).unwrap();
        assert_eq!(today.label, "今日の天気");
        assert_eq!(today.record.date, "2024-03-05");
        assert_eq!(today.record.max_temp_diff, 2);
        assert_eq!(today.record.min_temp_diff, 1);

        assert_eq!(tomorrow.record.date, "2024-03-06");
        assert_eq!(tomorrow.record.max_temp_diff, 3);
        assert_eq!(tomorrow.record.min_temp_diff, -2);
        assert_eq!(
            tomorrow.anchor,
            Anchor::Card(".js-weather-card[data-period=\"tomorrow\"]".to_string())
        );
    }

    #[test]
    fn test_bindings_require_three_days() {
        let mut short = response();
        short.daily.time.truncate(2);
        let err = build_bindings(&short).unwrap_err();
        assert!(matches!(
            err,
            ViewError::MissingDay {
                index: 2,
                available: 2
            }
        ));
    }

    #[test]
    fn test_render_fills_both_cards() {
        let mut doc = default_document();
        let report = render(&mut doc, &response(), &WmoWeatherCodes).unwrap();
        let TodayTomorrowReport::Rendered { today, tomorrow } = report else {
            panic!("expected rendered report");
        };
        assert!(today.is_complete());
        assert!(tomorrow.is_complete());

        let today = card(&doc, Period::Today);
        assert_eq!(doc.text_content(first(&doc, today, ".js-weather-telop")), "曇り");
        let icon = first(&doc, today, ".js-weather-icon img");
        assert_eq!(
            doc.attribute(icon, "src"),
            Some("/assets/images/weather/cloudy.svg")
        );
        assert_eq!(doc.attribute(icon, "width"), Some("50"));
        assert_eq!(doc.attribute(icon, "height"), Some("34"));

        for node in all(&doc, today, ".js-weather-temp-high-value") {
            assert_eq!(doc.text_content(node), "12.0");
        }
        assert_eq!(
            doc.text_content(first(&doc, today, ".js-weather-temp-high-diff")),
            "+2"
        );
        assert_eq!(
            doc.attribute(
                first(&doc, today, ".js-weather-temp-high-diff-label"),
                "aria-label"
            ),
            Some("前日比プラス2度")
        );
        assert_eq!(
            doc.text_content(first(&doc, today, ".js-weather-temp-low-value")),
            "3.0"
        );

        for hour in PRECIPITATION_HOURS {
            let slot = first(&doc, today, &format!(".js-weather-precipitation-{hour}"));
            assert_eq!(doc.text_content(slot), "20%");
            assert_eq!(doc.attribute(slot, "aria-label"), Some("降水確率 20パーセント"));
        }

        let tomorrow = card(&doc, Period::Tomorrow);
        assert_eq!(doc.text_content(first(&doc, tomorrow, ".js-weather-telop")), "雨");
        assert_eq!(
            doc.text_content(first(&doc, tomorrow, ".js-weather-temp-low-diff")),
            "-2"
        );
        assert_eq!(
            doc.attribute(
                first(&doc, tomorrow, ".js-weather-temp-low-diff-label"),
                "aria-label"
            ),
            Some("前日比マイナス2度")
        );
    }

    #[test]
    fn test_each_day_diffs_against_index_before() {
        let days = response().days();
        // max temps [10, 12, 15, 14]
        let diffs: Vec<_> = (1..4)
            .map(|i| record_at(&days, i).unwrap().max_temp_diff)
            .collect();
        assert_eq!(diffs, vec![2, 3, -1]);
    }

    #[test]
    fn test_missing_high_diff_label_aborts_rest_of_card() {
        let mut doc = default_document();
        let today = card(&doc, Period::Today);
        // drop the hook but keep the diff slot nested inside it
        let label = first(&doc, today, ".js-weather-temp-high-diff-label");
        doc.set_attribute(label, "class", "");

        let report = render(&mut doc, &response(), &WmoWeatherCodes).unwrap();
        let TodayTomorrowReport::Rendered { today: report, tomorrow } = report else {
            panic!("expected rendered report");
        };
        assert_eq!(report.completed, 4);
        assert_eq!(
            report.aborted_at.as_deref(),
            Some(".js-weather-temp-high-diff-label")
        );
        assert!(tomorrow.is_complete());

        assert_eq!(
            doc.text_content(first(&doc, today, ".js-weather-temp-high-value")),
            "12.0"
        );
        assert_eq!(
            doc.text_content(first(&doc, today, ".js-weather-temp-high-diff")),
            "+2"
        );
        assert_eq!(
            doc.text_content(first(&doc, today, ".js-weather-temp-low-value")),
            "--"
        );
        let slot = first(&doc, today, ".js-weather-precipitation-12");
        assert_eq!(doc.text_content(slot), "--%");
        assert_eq!(doc.attribute(slot, "aria-label"), None);
    }

    #[test]
    fn test_missing_tomorrow_card_skips_both() {
        let mut doc = default_document();
        let tomorrow = card(&doc, Period::Tomorrow);
        doc.remove(tomorrow);

        let report = render(&mut doc, &response(), &WmoWeatherCodes).unwrap();
        assert_eq!(
            report,
            TodayTomorrowReport::Skipped {
                missing: Period::Tomorrow
            }
        );

        let today = card(&doc, Period::Today);
        assert_eq!(doc.text_content(first(&doc, today, ".js-weather-telop")), "--");
    }

    #[test]
    fn test_missing_today_card_skips_both() {
        let mut doc = default_document();
        let today = card(&doc, Period::Today);
        doc.remove(today);

        let report = render(&mut doc, &response(), &WmoWeatherCodes).unwrap();
        assert_eq!(
            report,
            TodayTomorrowReport::Skipped {
                missing: Period::Today
            }
        );

        let tomorrow = card(&doc, Period::Tomorrow);
        assert_eq!(doc.text_content(first(&doc, tomorrow, ".js-weather-telop")), "--");
        assert_eq!(
            doc.text_content(first(&doc, tomorrow, ".js-weather-precipitation-0")),
            "--%"
        );
    }

    #[test]
    fn test_null_precipitation_leaves_slots() {
        let mut response = response();
        response.daily.precipitation_probability_max[1] = None;

        let mut doc = default_document();
        render(&mut doc, &response, &WmoWeatherCodes).unwrap();

        let today = card(&doc, Period::Today);
        let slot = first(&doc, today, ".js-weather-precipitation-0");
        assert_eq!(doc.text_content(slot), "--%");

        let tomorrow = card(&doc, Period::Tomorrow);
        let slot = first(&doc, tomorrow, ".js-weather-precipitation-0");
        assert_eq!(doc.text_content(slot), "70%");
    }

    #[test]
    fn test_card_steps_without_precipitation() {
        let [today, _] = build_bindings(&response()).unwrap();
        assert_eq!(card_steps(&today.record, &WmoWeatherCodes).unwrap().len(), 12);

        let mut record = today.record;
        record.precip_probability = None;
        assert_eq!(card_steps(&record, &WmoWeatherCodes).unwrap().len(), 8);
    }
}

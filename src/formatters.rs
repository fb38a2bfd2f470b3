use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Weekday labels indexed by days since Sunday
const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// A date broken into its display parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedDate {
    pub month: u32,
    pub day: u32,
    pub weekday: &'static str,
    pub formatted: String,
}

/// Display text and accessibility label for a day-over-day delta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempDiffText {
    pub text: String,
    pub aria_label: String,
}

/// Formats an ISO date (`2024-03-05`, optionally with a `T..` time part) as
/// `3月5日(火)`. The date is taken as written, without timezone conversion.
pub fn format_date(date: &str) -> Result<FormattedDate, chrono::ParseError> {
    let date = parse_date(date)?;
    let month = date.month();
    let day = date.day();
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];

    Ok(FormattedDate {
        month,
        day,
        weekday,
        formatted: format!("{month}月{day}日({weekday})"),
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(err) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .map(|dt| dt.date())
            .map_err(|_| err),
    }
}

/// Formats a whole-degree delta against the previous day
pub fn format_temp_diff(diff: i32) -> TempDiffText {
    let sign = if diff > 0 { "+" } else { "" };
    let label = match diff.signum() {
        -1 => "マイナス",
        1 => "プラス",
        _ => "",
    };

    TempDiffText {
        text: format!("{sign}{diff}"),
        aria_label: format!("前日比{label}{}度", diff.unsigned_abs()),
    }
}

/// Temperature with one decimal place
pub fn format_temperature(value: f64) -> String {
    format!("{value:.1}")
}

pub fn format_precipitation(probability: i32) -> String {
    format!("{probability}%")
}

pub fn format_precipitation_label(probability: i32) -> String {
    format!("降水確率 {probability}パーセント")
}

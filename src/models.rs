use serde::Deserialize;

// ============================================================================
// Open-Meteo API Models
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub timezone: String,
    pub daily: DailyData,
}

/// Index-aligned daily arrays, index 0 being the earliest past day
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyData {
    pub time: Vec<String>,
    #[serde(rename = "weathercode")]
    pub weather_code: Vec<i32>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    #[serde(rename = "precipitation_probability_max", default)]
    pub precipitation_probability_max: Vec<Option<i32>>,
}

impl ForecastResponse {
    /// Zips the daily arrays into one entry per day.
    ///
    /// The sequence stops at the shortest temperature/code/date array. A
    /// missing precipitation entry is treated as `None`.
    pub fn days(&self) -> Vec<ForecastDay> {
        let daily = &self.daily;
        daily
            .time
            .iter()
            .zip(&daily.weather_code)
            .zip(daily.temperature_max.iter().zip(&daily.temperature_min))
            .enumerate()
            .map(|(i, ((date, &weather_code), (&max_temp, &min_temp)))| ForecastDay {
                date: date.clone(),
                weather_code,
                max_temp,
                min_temp,
                precip_probability: daily
                    .precipitation_probability_max
                    .get(i)
                    .copied()
                    .flatten(),
            })
            .collect()
    }
}

/// One day of the forecast response
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub weather_code: i32,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precip_probability: Option<i32>,
}

// ============================================================================
// Render Models
// ============================================================================

/// A day ready for display, with deltas against the previous day
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeatherRecord {
    pub date: String,
    pub weather_code: i32,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precip_probability: Option<i32>,
    pub max_temp_diff: i32,
    pub min_temp_diff: i32,
}

impl DailyWeatherRecord {
    pub fn from_days(previous: &ForecastDay, current: &ForecastDay) -> Self {
        Self {
            date: current.date.clone(),
            weather_code: current.weather_code,
            max_temp: current.max_temp,
            min_temp: current.min_temp,
            precip_probability: current.precip_probability,
            max_temp_diff: round_diff(current.max_temp - previous.max_temp),
            min_temp_diff: round_diff(current.min_temp - previous.min_temp),
        }
    }
}

/// Rounds half up to a whole degree (-0.5 rounds to 0, 0.5 to 1)
fn round_diff(delta: f64) -> i32 {
    (delta + 0.5).floor() as i32
}

/// Which existing card a binding targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Tomorrow,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "今日の天気",
            Self::Tomorrow => "明日の天気",
        }
    }

    /// Selector of the card element for this period
    pub fn card_selector(self) -> String {
        format!(".js-weather-card[data-period=\"{}\"]", self.as_str())
    }
}

/// A record paired with where it is rendered, alive for one render pass
#[derive(Debug, Clone)]
pub struct ViewBinding {
    pub label: &'static str,
    pub record: DailyWeatherRecord,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// An element already present in the document
    Card(String),
    /// A template to instantiate once per record
    Template(String),
}

impl Anchor {
    pub fn selector(&self) -> &str {
        match self {
            Self::Card(selector) | Self::Template(selector) => selector,
        }
    }
}

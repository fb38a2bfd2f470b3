/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-cards/0.1.0";

/// Open-Meteo API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Forecast location (Tokyo)
pub const DEFAULT_LATITUDE: f64 = 35.6785;
pub const DEFAULT_LONGITUDE: f64 = 139.6823;
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

/// Daily variables requested from the forecast endpoint
pub const DAILY_FIELDS: &str =
    "weathercode,temperature_2m_max,temperature_2m_min,precipitation_probability_max";

pub const DEFAULT_FORECAST_DAYS: u32 = 3;
pub const DEFAULT_PAST_DAYS: u32 = 1;

/// Window widths below this pin the viewport to a fixed width
pub const DEVICE_WIDTH: u32 = 375;

/// Hours that receive a copy of the daily precipitation probability
pub const PRECIPITATION_HOURS: [u32; 4] = [0, 6, 12, 18];

/// Rendered icon size on the today/tomorrow cards
pub const ICON_WIDTH: &str = "50";
pub const ICON_HEIGHT: &str = "34";

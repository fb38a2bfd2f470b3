/// Display label and icon for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherInfo {
    pub label: &'static str,
    pub icon: &'static str,
}

/// Maps a numeric weather code to what a card shows for it
pub trait WeatherCodeResolver: Send + Sync {
    fn resolve(&self, code: i32) -> WeatherInfo;
}

/// WMO weather interpretation codes as used by Open-Meteo,
/// see <https://open-meteo.com/en/docs#weathervariables>
#[derive(Debug, Clone, Copy, Default)]
pub struct WmoWeatherCodes;

impl WeatherCodeResolver for WmoWeatherCodes {
    fn resolve(&self, code: i32) -> WeatherInfo {
        let (label, icon) = match code {
            0 => ("快晴", "sunny"),
            1 => ("晴れ", "sunny"),
            2 => ("晴れ時々曇り", "partly-cloudy"),
            3 => ("曇り", "cloudy"),
            45 | 48 => ("霧", "fog"),
            51 | 53 | 55 => ("霧雨", "drizzle"),
            56 | 57 => ("着氷性の霧雨", "sleet"),
            61 | 63 => ("雨", "rainy"),
            65 => ("大雨", "heavy-rain"),
            66 | 67 => ("着氷性の雨", "sleet"),
            71 | 73 | 75 => ("雪", "snowy"),
            77 => ("霧雪", "snowy"),
            80 | 81 => ("にわか雨", "rainy"),
            82 => ("激しいにわか雨", "heavy-rain"),
            85 | 86 => ("にわか雪", "snowy"),
            95 => ("雷雨", "thunder"),
            96 | 99 => ("雹を伴う雷雨", "thunder"),
            _ => ("不明", "unknown"),
        };

        WeatherInfo {
            label,
            icon: icon_path(icon),
        }
    }
}

fn icon_path(name: &str) -> &'static str {
    match name {
        "sunny" => "/assets/images/weather/sunny.svg",
        "partly-cloudy" => "/assets/images/weather/partly-cloudy.svg",
        "cloudy" => "/assets/images/weather/cloudy.svg",
        "fog" => "/assets/images/weather/fog.svg",
        "drizzle" => "/assets/images/weather/drizzle.svg",
        "sleet" => "/assets/images/weather/sleet.svg",
        "rainy" => "/assets/images/weather/rainy.svg",
        "heavy-rain" => "/assets/images/weather/heavy-rain.svg",
        "snowy" => "/assets/images/weather/snowy.svg",
        "thunder" => "/assets/images/weather/thunder.svg",
        _ => "/assets/images/weather/unknown.svg",
    }
}

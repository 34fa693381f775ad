//! Projection of a [`WeatherReport`] onto display text.

use crate::model::WeatherReport;

pub const UNKNOWN_LOCATION: &str = "Unknown location";
pub const MISSING_TEMPERATURE: &str = "--";

/// Condition icon to show next to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailLine {
    FeelsLike(f64),
    Humidity(f64),
    Wind(f64),
}

impl std::fmt::Display for DetailLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetailLine::FeelsLike(t) => write!(f, "Feels like: {}", format_temperature(*t)),
            DetailLine::Humidity(h) => write!(f, "Humidity: {h}%"),
            DetailLine::Wind(speed) => write!(f, "Wind: {speed} m/s"),
        }
    }
}

/// Everything the surface needs, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub icon: Option<IconImage>,
    pub details: Vec<DetailLine>,
}

impl DisplayModel {
    pub fn from_report(report: &WeatherReport, icon_base_url: &str) -> Self {
        let location = match (report.location_name(), report.country()) {
            (Some(name), Some(country)) => format!("{name}, {country}"),
            (Some(name), None) => name.to_string(),
            (None, _) => UNKNOWN_LOCATION.to_string(),
        };

        let temperature = report
            .temperature_c()
            .map(format_temperature)
            .unwrap_or_else(|| MISSING_TEMPERATURE.to_string());

        let description = report.description().map(capitalize).unwrap_or_default();

        let icon = report.icon_code().map(|code| IconImage {
            url: icon_url(icon_base_url, code),
            alt: report.description().unwrap_or("weather icon").to_string(),
        });

        let details = [
            report.feels_like_c().map(DetailLine::FeelsLike),
            report.humidity_pct().map(DetailLine::Humidity),
            report.wind_speed_mps().map(DetailLine::Wind),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            location,
            temperature,
            description,
            icon,
            details,
        }
    }
}

/// Whole degrees Celsius, halves rounded up: `21.7` → `"22°C"`, `-2.5` → `"-2°C"`.
pub fn format_temperature(celsius: f64) -> String {
    let rounded = (celsius + 0.5).floor();
    // -0.4 would otherwise print as "-0°C"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}°C")
}

pub fn icon_url(icon_base_url: &str, code: &str) -> String {
    format!("{}/img/wn/{code}@2x.png", icon_base_url.trim_end_matches('/'))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

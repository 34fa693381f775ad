use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A geographic position in decimal degrees.
///
/// Deserialization goes through [`Coordinates::new`], so out-of-range values
/// in a config file are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InputError> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if !lat_ok || !lon_ok {
            return Err(InputError::CoordinatesOutOfRange {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = InputError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// What to ask the provider for. Built per user action, never stored.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates(Coordinates),
}

impl Query {
    /// Build a city query from raw user input. Surrounding whitespace is dropped.
    pub fn city(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyCity);
        }
        Ok(Query::City(trimmed.to_string()))
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Result<Self, InputError> {
        Coordinates::new(latitude, longitude).map(Query::Coordinates)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::City(name) => f.write_str(name),
            Query::Coordinates(c) => write!(f, "({c})"),
        }
    }
}

/// Current weather as returned by the provider.
///
/// Mirrors the provider's JSON layout. Every field is optional: a partial body
/// still decodes, and the renderer leaves out whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub name: Option<String>,
    pub sys: Option<SysInfo>,
    pub main: Option<MainReadings>,
    pub weather: Option<Vec<Conditions>>,
    pub wind: Option<Wind>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SysInfo {
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: Option<f64>,
}

impl WeatherReport {
    pub fn location_name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    pub fn country(&self) -> Option<&str> {
        non_empty(self.sys.as_ref().and_then(|s| s.country.as_deref()))
    }

    /// Temperature in °C (the query always asks for metric units).
    pub fn temperature_c(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.temp)
    }

    pub fn feels_like_c(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.feels_like)
    }

    pub fn humidity_pct(&self) -> Option<f64> {
        self.main.as_ref().and_then(|m| m.humidity)
    }

    /// Wind speed in m/s.
    pub fn wind_speed_mps(&self) -> Option<f64> {
        self.wind.as_ref().and_then(|w| w.speed)
    }

    /// Description of the primary condition, e.g. "light rain".
    pub fn description(&self) -> Option<&str> {
        non_empty(self.primary_conditions().and_then(|w| w.description.as_deref()))
    }

    /// Icon code of the primary condition, e.g. "10d".
    pub fn icon_code(&self) -> Option<&str> {
        non_empty(self.primary_conditions().and_then(|w| w.icon.as_deref()))
    }

    fn primary_conditions(&self) -> Option<&Conditions> {
        self.weather.as_deref().and_then(<[Conditions]>::first)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_is_trimmed() {
        let query = Query::city("  Lisbon \n").expect("non-empty city");
        assert_eq!(query, Query::City("Lisbon".to_string()));
    }

    #[test]
    fn blank_city_is_rejected() {
        assert_eq!(Query::city("").unwrap_err(), InputError::EmptyCity);
        assert_eq!(Query::city(" \t ").unwrap_err(), InputError::EmptyCity);
    }

    #[test]
    fn coordinates_must_be_in_range() {
        assert!(Query::coordinates(51.5, -0.12).is_ok());
        assert!(Query::coordinates(90.0, 180.0).is_ok());
        assert!(Query::coordinates(91.0, 0.0).is_err());
        assert!(Query::coordinates(0.0, -180.5).is_err());
        assert!(Query::coordinates(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn full_report_decodes() {
        let body = r#"{
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 21.7, "feels_like": 21.2, "humidity": 64, "pressure": 1012},
            "wind": {"speed": 4.1, "deg": 80},
            "sys": {"country": "GB"},
            "name": "London",
            "cod": 200
        }"#;

        let report: WeatherReport = serde_json::from_str(body).expect("valid report");

        assert_eq!(report.location_name(), Some("London"));
        assert_eq!(report.country(), Some("GB"));
        assert_eq!(report.temperature_c(), Some(21.7));
        assert_eq!(report.feels_like_c(), Some(21.2));
        assert_eq!(report.humidity_pct(), Some(64.0));
        assert_eq!(report.wind_speed_mps(), Some(4.1));
        assert_eq!(report.description(), Some("light rain"));
        assert_eq!(report.icon_code(), Some("10d"));
    }

    #[test]
    fn sparse_report_decodes() {
        let report: WeatherReport =
            serde_json::from_str(r#"{"name": "Nowhere", "main": {"temp": 3}}"#).expect("decodes");

        assert_eq!(report.temperature_c(), Some(3.0));
        assert_eq!(report.wind_speed_mps(), None);
        assert_eq!(report.description(), None);
        assert_eq!(report.icon_code(), None);
        assert_eq!(report.country(), None);
    }

    #[test]
    fn null_sections_decode_as_missing() {
        let report: WeatherReport = serde_json::from_str(
            r#"{"name": "Quito", "weather": null, "wind": null, "main": {"temp": null, "humidity": 80}}"#,
        )
        .expect("decodes");

        assert_eq!(report.location_name(), Some("Quito"));
        assert_eq!(report.description(), None);
        assert_eq!(report.icon_code(), None);
        assert_eq!(report.wind_speed_mps(), None);
        assert_eq!(report.temperature_c(), None);
        assert_eq!(report.humidity_pct(), Some(80.0));
    }

    #[test]
    fn fractional_humidity_decodes() {
        let report: WeatherReport =
            serde_json::from_str(r#"{"main": {"humidity": 56.5}}"#).expect("decodes");
        assert_eq!(report.humidity_pct(), Some(56.5));
    }

    #[test]
    fn empty_weather_list_has_no_conditions() {
        let report: WeatherReport = serde_json::from_str(r#"{"weather": []}"#).expect("decodes");
        assert_eq!(report.description(), None);
        assert_eq!(report.icon_code(), None);
    }

    #[test]
    fn coordinates_deserialize_through_validation() {
        let ok: Coordinates =
            serde_json::from_str(r#"{"latitude": 52.52, "longitude": 13.405}"#).expect("valid");
        assert_eq!(ok, Coordinates::new(52.52, 13.405).expect("valid"));

        let err = serde_json::from_str::<Coordinates>(r#"{"latitude": 999, "longitude": 0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let report: WeatherReport =
            serde_json::from_str(r#"{"name": "", "weather": [{"description": "", "icon": ""}]}"#)
                .expect("decodes");

        assert_eq!(report.location_name(), None);
        assert_eq!(report.description(), None);
        assert_eq!(report.icon_code(), None);
    }
}

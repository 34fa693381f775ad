use reqwest::StatusCode;
use thiserror::Error;

pub const MSG_EMPTY_CITY: &str = "Please enter a city name.";
pub const MSG_CITY_NOT_FOUND: &str = "City not found. Try a different city name.";
pub const MSG_INVALID_API_KEY: &str =
    "Invalid API key. Run `skycast configure` and enter a valid OpenWeatherMap key.";
pub const MSG_FETCH_FAILED: &str = "Could not fetch weather. Check your network or the logs for details.";

/// A query rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("city name is empty")]
    EmptyCity,

    #[error("coordinates out of range: lat={latitude}, lon={longitude}")]
    CoordinatesOutOfRange { latitude: f64, longitude: f64 },
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}")]
    Provider { status: StatusCode, body: String },

    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WeatherError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(InputError::EmptyCity) => MSG_EMPTY_CITY,
            Self::InvalidInput(InputError::CoordinatesOutOfRange { .. }) => {
                "Invalid coordinates. Latitude must be within ±90 and longitude within ±180."
            }
            Self::Provider { status, .. } if *status == StatusCode::NOT_FOUND => MSG_CITY_NOT_FOUND,
            Self::Provider { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                MSG_INVALID_API_KEY
            }
            Self::Provider { .. } | Self::Transport(_) | Self::Decode(_) => MSG_FETCH_FAILED,
        }
    }

    /// HTTP status of a provider rejection, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Failures with a dedicated user message; the rest are unexpected and get logged in full.
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidInput(_) => true,
            Self::Provider { status, .. } => {
                *status == StatusCode::NOT_FOUND || *status == StatusCode::UNAUTHORIZED
            }
            Self::Transport(_) | Self::Decode(_) => false,
        }
    }
}

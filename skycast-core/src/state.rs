use crate::model::WeatherReport;

/// What the surface currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Rendered(WeatherReport),
    Error(String),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            DisplayState::Rendered(report) => Some(report),
            _ => None,
        }
    }
}

//! Device location lookup.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Coordinates;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("location request timed out")]
    Timeout,
}

#[async_trait]
pub trait Locator: Send + Sync {
    /// Whether this platform can locate the device at all.
    fn is_available(&self) -> bool {
        true
    }

    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Always reports the same position, e.g. a configured home location.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl Locator for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PositionUnavailable(
            "no location capability".to_string(),
        ))
    }
}

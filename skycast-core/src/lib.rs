//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap current-weather provider
//! - Report models and their projection onto display text
//! - The [`WeatherClient`] flow that drives a [`DisplaySurface`]
//!
//! It is used by `skycast-cli`, but any front end that implements
//! [`DisplaySurface`] can drive it.

pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;
pub mod state;
pub mod surface;

pub use client::WeatherClient;
pub use config::Config;
pub use error::{InputError, WeatherError};
pub use location::{FixedLocator, LocationError, Locator, Unavailable};
pub use model::{Coordinates, Query, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use render::{DetailLine, DisplayModel, IconImage};
pub use state::DisplayState;
pub use surface::DisplaySurface;

use crate::{Config, Query, WeatherError, WeatherReport, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current-weather reports.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, query: &Query) -> Result<WeatherReport, WeatherError>;
}

/// Construct the OpenWeatherMap provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = config.api_key()?;

    let mut provider =
        OpenWeatherProvider::new(api_key.to_owned()).with_base_url(&config.api_base_url);

    if let Some(timeout) = config.timeout() {
        provider = provider.with_timeout(timeout)?;
    }

    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No OpenWeatherMap API key configured"));
    }

    #[test]
    fn provider_from_config_uses_configured_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.api_base_url = "http://localhost:9999/".into();
        cfg.timeout_secs = Some(3);

        let provider = provider_from_config(&cfg).expect("provider");
        assert_eq!(provider.base_url(), "http://localhost:9999");
    }
}

use async_trait::async_trait;
use reqwest::{Client, Request};
use std::time::Duration;
use tracing::debug;

use crate::{WeatherError, config::DEFAULT_API_BASE_URL, model::{Query, WeatherReport}};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Abort requests that take longer than `timeout`. The expiry surfaces as a transport error.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, WeatherError> {
        self.http = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the GET request for `query`. Parameters are URL-encoded.
    pub fn build_request(&self, query: &Query) -> Result<Request, WeatherError> {
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let mut params: Vec<(&str, String)> = match query {
            Query::City(name) => vec![("q", name.clone())],
            Query::Coordinates(c) => vec![
                ("lat", c.latitude.to_string()),
                ("lon", c.longitude.to_string()),
            ],
        };
        params.push(("units", "metric".to_string()));
        params.push(("appid", self.api_key.clone()));

        Ok(self.http.get(url).query(&params).build()?)
    }

    async fn fetch_current(&self, query: &Query) -> Result<WeatherReport, WeatherError> {
        let request = self.build_request(query)?;
        debug!(%query, path = request.url().path(), "requesting current weather");

        let res = self.http.execute(request).await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "provider returned an error status");
            return Err(WeatherError::Provider { status, body });
        }

        let report: WeatherReport = serde_json::from_str(&body)?;
        debug!(%query, location = ?report.location_name(), "weather report decoded");

        Ok(report)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, query: &Query) -> Result<WeatherReport, WeatherError> {
        self.fetch_current(query).await
    }
}

/// Shorten a response body for logs without splitting a UTF-8 sequence.
pub fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

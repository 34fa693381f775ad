//! The search/locate → fetch → render flow.
//!
//! Overlapping actions are allowed. Each user action takes a ticket; when a
//! fetch completes after a newer action has started, its outcome is dropped so
//! only the latest action reaches the surface. The loading indicator follows an
//! in-flight request count rather than a single flag.

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    config::DEFAULT_ICON_BASE_URL,
    error::WeatherError,
    location::Locator,
    model::{Query, WeatherReport},
    provider::{WeatherProvider, openweather::truncate_body},
    render::DisplayModel,
    state::DisplayState,
    surface::DisplaySurface,
};

#[derive(Debug, Default)]
struct Screen {
    state: DisplayState,
    latest_ticket: u64,
}

pub struct WeatherClient<P, S> {
    provider: P,
    surface: S,
    icon_base_url: String,
    display: Mutex<Screen>,
    in_flight: Mutex<usize>,
}

impl<P, S> WeatherClient<P, S>
where
    P: WeatherProvider,
    S: DisplaySurface,
{
    pub fn new(provider: P, surface: S) -> Self {
        Self {
            provider,
            surface,
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            display: Mutex::new(Screen::default()),
            in_flight: Mutex::new(0),
        }
    }

    pub fn with_icon_base_url(mut self, icon_base_url: &str) -> Self {
        self.icon_base_url = icon_base_url.to_string();
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn state(&self) -> DisplayState {
        self.display.lock().state.clone()
    }

    /// Whether any request is outstanding.
    pub fn is_loading(&self) -> bool {
        *self.in_flight.lock() > 0
    }

    pub async fn fetch_by_city(&self, name: &str) -> Result<WeatherReport, WeatherError> {
        let query = Query::city(name)?;
        self.fetch(&query).await
    }

    pub async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, WeatherError> {
        let query = Query::coordinates(latitude, longitude)?;
        self.fetch(&query).await
    }

    /// Project `report` onto the surface and clear any shown error.
    pub fn render(&self, report: &WeatherReport) {
        let mut display = self.display.lock();
        self.render_locked(&mut display, report);
    }

    pub fn report_error(&self, message: &str) {
        let mut display = self.display.lock();
        self.report_error_locked(&mut display, message);
    }

    /// Handle a submitted search box value.
    pub async fn on_search_submit(&self, raw_input: &str) {
        let query = match Query::city(raw_input) {
            Ok(query) => query,
            Err(err) => {
                debug!(error = %err, "rejected search input");
                let mut display = self.display.lock();
                display.latest_ticket += 1;
                self.report_error_locked(&mut display, WeatherError::from(err).user_message());
                return;
            }
        };

        let (ticket, _) = self.begin_action();

        match self.fetch(&query).await {
            Ok(report) => {
                let mut display = self.display.lock();
                if display.latest_ticket != ticket {
                    debug!(%query, "dropping report for superseded search");
                    return;
                }
                self.render_locked(&mut display, &report);
            }
            Err(err) => {
                log_failure(&query, &err);
                let mut display = self.display.lock();
                if display.latest_ticket != ticket {
                    debug!(%query, "dropping error for superseded search");
                    return;
                }
                self.report_error_locked(&mut display, err.user_message());
            }
        }
    }

    /// Show weather for the device location, if it can be determined.
    ///
    /// Nothing here is reported to the user: location and fetch failures are
    /// logged, and the display returns to what it showed before. A lookup only
    /// supersedes older actions once it has a report to show, so a failed
    /// lookup never discards a search that is still in flight.
    pub async fn load_current_location<L>(&self, locator: &L)
    where
        L: Locator + ?Sized,
    {
        if !locator.is_available() {
            debug!("location capability unavailable, skipping");
            return;
        }

        let (seen, previous) = self.mark_loading();
        let _loading = self.loading();

        let query = match locator.locate().await {
            Ok(c) => match Query::coordinates(c.latitude, c.longitude) {
                Ok(query) => query,
                Err(err) => {
                    warn!(error = %err, "locator returned unusable coordinates");
                    self.restore(seen, previous);
                    return;
                }
            },
            Err(err) => {
                warn!(error = %err, "could not determine current location");
                self.restore(seen, previous);
                return;
            }
        };

        match self.fetch(&query).await {
            Ok(report) => {
                let mut display = self.display.lock();
                if display.latest_ticket != seen {
                    debug!(%query, "dropping location report superseded by a newer action");
                    return;
                }
                display.latest_ticket += 1;
                self.render_locked(&mut display, &report);
            }
            Err(err) => {
                log_failure(&query, &err);
                self.restore(seen, previous);
            }
        }
    }

    async fn fetch(&self, query: &Query) -> Result<WeatherReport, WeatherError> {
        let _loading = self.loading();
        let report = self.provider.current_weather(query).await?;
        info!(%query, location = ?report.location_name(), "fetched current weather");
        Ok(report)
    }

    fn begin_action(&self) -> (u64, DisplayState) {
        let mut display = self.display.lock();
        display.latest_ticket += 1;
        let previous = std::mem::replace(&mut display.state, DisplayState::Loading);
        (display.latest_ticket, previous)
    }

    /// Show `Loading` without taking a ticket. Returns the current ticket and
    /// the state to fall back to.
    fn mark_loading(&self) -> (u64, DisplayState) {
        let mut display = self.display.lock();
        let previous = std::mem::replace(&mut display.state, DisplayState::Loading);
        (display.latest_ticket, previous)
    }

    /// Undo [`Self::mark_loading`] unless another action has started or settled since.
    /// A `Loading` fallback belongs to an older action still in flight, which settles it.
    fn restore(&self, seen: u64, previous: DisplayState) {
        let mut display = self.display.lock();
        if display.latest_ticket == seen && display.state.is_loading() {
            display.state = previous;
        }
    }

    fn render_locked(&self, display: &mut Screen, report: &WeatherReport) {
        let model = DisplayModel::from_report(report, &self.icon_base_url);

        self.surface.clear_error();
        self.surface.set_city(&model.location);
        self.surface.set_temperature(&model.temperature);
        self.surface.set_description(&model.description);
        self.surface.set_details(&model.details);
        self.surface.set_icon(model.icon.as_ref());

        display.state = DisplayState::Rendered(report.clone());
    }

    fn report_error_locked(&self, display: &mut Screen, message: &str) {
        if !self.surface.show_error(message) {
            self.surface.alert(message);
        }
        display.state = DisplayState::Error(message.to_string());
    }

    fn loading(&self) -> LoadingGuard<'_> {
        LoadingGuard::start(&self.in_flight, &self.surface)
    }
}

/// Counts one outstanding request for as long as it lives.
struct LoadingGuard<'a> {
    in_flight: &'a Mutex<usize>,
    surface: &'a dyn DisplaySurface,
}

impl<'a> LoadingGuard<'a> {
    fn start(in_flight: &'a Mutex<usize>, surface: &'a dyn DisplaySurface) -> Self {
        let mut count = in_flight.lock();
        *count += 1;
        if *count == 1 {
            surface.set_loading(true);
        }
        Self { in_flight, surface }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut count = self.in_flight.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.surface.set_loading(false);
        }
    }
}

fn log_failure(query: &Query, err: &WeatherError) {
    match err {
        WeatherError::Provider { status, body } if err.is_expected() => {
            warn!(%query, %status, body = %truncate_body(body), "provider rejected request");
        }
        WeatherError::Provider { status, body } => {
            error!(%query, %status, body = %truncate_body(body), "provider request failed");
        }
        _ if err.is_expected() => warn!(%query, error = %err, "weather request rejected"),
        _ => error!(%query, error = %err, "could not fetch weather"),
    }
}

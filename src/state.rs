//! Application state shared across handlers

use std::sync::Arc;

use crate::config::SkycastConfig;
use crate::render::Renderer;
use crate::weather::{ForecastFetcher, WeatherApiClient};

/// Shared, read-only state. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<SkycastConfig>,
    /// Forecast source
    pub fetcher: Arc<dyn ForecastFetcher>,
    /// Compiled page templates
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Wire the production fetcher and renderer for a loaded configuration
    pub fn from_config(config: SkycastConfig) -> crate::Result<Self> {
        let fetcher = WeatherApiClient::new(config.weather.clone())?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Same as [`AppState::from_config`] with a caller-supplied fetcher
    pub fn with_fetcher(
        config: SkycastConfig,
        fetcher: Arc<dyn ForecastFetcher>,
    ) -> crate::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            fetcher,
            renderer: Arc::new(Renderer::new()?),
        })
    }
}

//! WeatherAPI forecast client
//!
//! Issues exactly one GET per lookup. There is no retry and no timeout
//! unless one is configured; any failure becomes a single user-facing
//! [`SkycastError::Fetch`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info, instrument, warn};

use super::{ForecastFetcher, LocationQuery};
use crate::config::WeatherConfig;
use crate::models::{ForecastResponse, ProviderErrorBody};
use crate::{Result, SkycastError};

/// HTTP client for the WeatherAPI `forecast.json` endpoint
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherApiClient {
    /// Create a new client from the weather section of the configuration
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SkycastError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Build the request URL for a forecast lookup
    #[must_use]
    pub fn forecast_url(&self, query: &LocationQuery) -> String {
        format!(
            "{}/forecast.json?key={}&q={}&days={}&aqi={}&alerts={}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(self.config.api_key.as_deref().unwrap_or_default()),
            urlencoding::encode(query.as_str()),
            self.config.forecast_days,
            yes_no(self.config.include_air_quality),
            yes_no(self.config.include_alerts),
        )
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Turn a provider body into the message shown to the user
fn failure_message(body: &str) -> SkycastError {
    ProviderErrorBody::message_from(body).map_or_else(SkycastError::fetch_generic, SkycastError::fetch)
}

#[async_trait]
impl ForecastFetcher for WeatherApiClient {
    #[instrument(skip(self, query), fields(location = %query))]
    async fn fetch(&self, query: &LocationQuery) -> Result<ForecastResponse> {
        let start_time = Instant::now();
        debug!(days = self.config.forecast_days, "Requesting forecast from {}", self.config.base_url);

        let response = self
            .client
            .get(self.forecast_url(query))
            .send()
            .await
            .map_err(|e| {
                error!("Weather API transport failure: {}", e);
                SkycastError::fetch_generic()
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read weather API response body: {}", e);
            SkycastError::fetch_generic()
        })?;

        if !status.is_success() {
            error!(%status, body = %body, "Weather API returned an error");
            return Err(failure_message(&body));
        }

        // Some provider errors arrive with a 2xx status
        if ProviderErrorBody::message_from(&body).is_some() {
            error!(body = %body, "Weather API reported an error");
            return Err(failure_message(&body));
        }

        let forecast: ForecastResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse weather API response: {}", e);
            SkycastError::fetch_generic()
        })?;

        let elapsed = start_time.elapsed();
        info!(
            days = forecast.forecast.forecastday.len(),
            "Retrieved forecast for {} in {:.3}s",
            forecast.location.name,
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(forecast)
    }
}

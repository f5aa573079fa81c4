//! Forecast retrieval and reshaping
//!
//! [`ForecastFetcher`] talks to the provider; [`build_view_model`] turns what
//! it returns into the structure the templates render.

use std::fmt;

use async_trait::async_trait;

use crate::Result;
use crate::models::{ForecastResponse, ViewModel};

pub mod client;
pub mod view_model;

pub use client::WeatherApiClient;
pub use view_model::{build_view_model, classify, location_label};

/// A trimmed, non-empty location string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery(String);

impl LocationQuery {
    /// Trim the submitted text, falling back to `default` when it is blank
    #[must_use]
    pub fn parse(input: &str, default: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self(default.trim().to_string())
        } else {
            Self(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of raw forecast payloads
#[async_trait]
pub trait ForecastFetcher: Send + Sync {
    /// Fetch current conditions plus the configured number of forecast days
    async fn fetch(&self, query: &LocationQuery) -> Result<ForecastResponse>;
}

/// Fetch and reshape in one step. A failure yields no partial view model.
pub async fn lookup(fetcher: &dyn ForecastFetcher, query: &LocationQuery) -> Result<ViewModel> {
    let response = fetcher.fetch(query).await?;
    Ok(build_view_model(&response))
}

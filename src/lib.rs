//! `Skycast` - server-rendered weather lookup
//!
//! This library provides the forecast fetcher, the view model builder and
//! the axum web layer that renders the result as HTML.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod state;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::SkycastConfig;
pub use error::SkycastError;
pub use models::{ForecastResponse, ViewModel, WeatherCategory};
pub use render::Renderer;
pub use state::AppState;
pub use weather::{ForecastFetcher, LocationQuery, WeatherApiClient, build_view_model};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;

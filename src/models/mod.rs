//! Data models for the Skycast service
//!
//! This module contains the core models organized by concern:
//! - Provider: the WeatherAPI forecast payload as received
//! - View: the flattened, template-ready structure built from it

pub mod provider;
pub mod view;

// Re-export all public types for convenient access
pub use provider::{AirQuality, Alert, Astro, Condition, ForecastResponse, ProviderErrorBody};
pub use view::{ChartData, CurrentConditions, DaySummary, ForecastDay, ViewModel, WeatherCategory};

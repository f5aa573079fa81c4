//! Template-ready view model
//!
//! Built once per request from a [`ForecastResponse`](super::ForecastResponse)
//! and never mutated afterwards.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::provider::{AirQuality, Alert, Astro};

/// Everything the result page needs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewModel {
    /// "City, Region Country" label
    pub location: String,
    /// Provider local time at the location
    pub localtime: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub chart: ChartData,
    pub category: WeatherCategory,
    /// Active alerts; empty unless alerts were requested
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition_text: String,
    pub condition_icon: String,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity: f64,
    pub feelslike_c: f64,
    pub vis_km: f64,
    pub cloud: f64,
    pub gust_kph: f64,
    pub uv: f64,
    pub precip_mm: f64,
    /// `None` when the provider omitted the block
    pub aqi: Option<AirQuality>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
    pub astro: Astro,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub condition_text: String,
    pub condition_icon: String,
    pub daily_chance_of_rain: u8,
    pub daily_chance_of_snow: u8,
    pub totalprecip_mm: f64,
}

/// Parallel per-day arrays consumed by the client chart
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChartData {
    pub dates: Vec<String>,
    pub max_temps: Vec<f64>,
    pub min_temps: Vec<f64>,
    pub avg_temps: Vec<f64>,
    pub rain_chances: Vec<u8>,
}

impl ChartData {
    /// Number of days charted
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Coarse category selecting the decorative background
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Clear,
    Rain,
    Snow,
    Cloudy,
}

impl WeatherCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherCategory::Clear => "clear",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Snow => "snow",
            WeatherCategory::Cloudy => "cloudy",
        }
    }
}

impl fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&WeatherCategory::Cloudy).unwrap(),
            "\"cloudy\""
        );
        assert_eq!(WeatherCategory::Rain.to_string(), "rain");
    }
}

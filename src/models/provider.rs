//! WeatherAPI `forecast.json` response structures
//!
//! Only the fields the view model consumes are declared; everything else in
//! the payload is ignored by serde.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Successful response of the forecast endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: ProviderLocation,
    pub current: ProviderCurrent,
    pub forecast: ProviderForecast,
    #[serde(default)]
    pub alerts: Option<ProviderAlerts>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderLocation {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub localtime: String,
}

/// Textual condition plus icon reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderCurrent {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    #[serde(default)]
    pub wind_dir: String,
    pub humidity: f64,
    pub feelslike_c: f64,
    pub vis_km: f64,
    pub cloud: f64,
    pub gust_kph: f64,
    pub uv: f64,
    pub precip_mm: f64,
    #[serde(default)]
    pub air_quality: Option<AirQuality>,
}

/// Air-quality block, only present when requested with `aqi=yes`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AirQuality {
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    #[serde(rename(deserialize = "us-epa-index"))]
    pub us_epa_index: Option<u8>,
    #[serde(rename(deserialize = "gb-defra-index"))]
    pub gb_defra_index: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderForecast {
    #[serde(default)]
    pub forecastday: Vec<ProviderForecastDay>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderForecastDay {
    pub date: NaiveDate,
    pub day: ProviderDay,
    #[serde(default)]
    pub astro: Astro,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderDay {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub condition: Condition,
    #[serde(default)]
    pub daily_chance_of_rain: Option<u8>,
    #[serde(default)]
    pub daily_chance_of_snow: Option<u8>,
    #[serde(default)]
    pub totalprecip_mm: f64,
}

/// Sun and moon times, passed through as the provider formats them
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Astro {
    #[serde(default)]
    pub sunrise: String,
    #[serde(default)]
    pub sunset: String,
    #[serde(default)]
    pub moonrise: Option<String>,
    #[serde(default)]
    pub moonset: Option<String>,
    #[serde(default)]
    pub moon_phase: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderAlerts {
    #[serde(default)]
    pub alert: Vec<Alert>,
}

/// Weather alert, present only when requested with `alerts=yes`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub effective: String,
    #[serde(default)]
    pub expires: String,
    #[serde(default)]
    pub desc: String,
}

/// Error envelope: `{"error": {"code": 1006, "message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorDetail {
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderErrorBody {
    /// Provider error text, if the body is an error envelope with a non-blank message
    #[must_use]
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .and_then(|b| b.error.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"code":1006,"message":"No matching location found."}}"#;
        assert_eq!(
            ProviderErrorBody::message_from(body).as_deref(),
            Some("No matching location found.")
        );
    }

    #[test]
    fn test_error_message_missing() {
        assert!(ProviderErrorBody::message_from("<html>bad gateway</html>").is_none());
        assert!(ProviderErrorBody::message_from(r#"{"error":{"code":2006}}"#).is_none());
        assert!(ProviderErrorBody::message_from(r#"{"error":{"message":"  "}}"#).is_none());
    }

    #[test]
    fn test_air_quality_dashed_keys() {
        let json = r#"{"co":230.3,"pm2_5":4.1,"us-epa-index":1,"gb-defra-index":2}"#;
        let aq: AirQuality = serde_json::from_str(json).unwrap();
        assert_eq!(aq.co, Some(230.3));
        assert_eq!(aq.us_epa_index, Some(1));
        assert_eq!(aq.gb_defra_index, Some(2));
        assert!(aq.no2.is_none());
    }
}

//! Integration tests for the Skycast HTTP surface

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use skycast::config::WeatherConfig;
use skycast::{
    AppState, ForecastFetcher, ForecastResponse, LocationQuery, SkycastConfig, SkycastError,
    WeatherApiClient, web,
};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Fetcher returning a canned outcome and recording the queries it saw
struct StubFetcher {
    outcome: Result<serde_json::Value, String>,
    seen: Mutex<Vec<String>>,
}

impl StubFetcher {
    fn ok(body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(body),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ForecastFetcher for StubFetcher {
    async fn fetch(&self, query: &LocationQuery) -> skycast::Result<ForecastResponse> {
        self.seen.lock().unwrap().push(query.as_str().to_string());
        match &self.outcome {
            Ok(body) => Ok(serde_json::from_value(body.clone()).unwrap()),
            Err(message) => Err(SkycastError::fetch(message.clone())),
        }
    }
}

fn forecast_body(condition: &str, days: usize) -> serde_json::Value {
    let forecastday: Vec<_> = (0..days)
        .map(|i| {
            serde_json::json!({
                "date": format!("2024-03-{:02}", 1 + i),
                "day": {
                    "maxtemp_c": 12.0, "mintemp_c": 4.0, "avgtemp_c": 8.0,
                    "condition": { "text": condition, "icon": "//cdn.weatherapi.com/113.png" },
                    "daily_chance_of_rain": 30,
                    "totalprecip_mm": 0.0
                },
                "astro": { "sunrise": "06:45 AM", "sunset": "05:50 PM" }
            })
        })
        .collect();

    serde_json::json!({
        "location": { "name": "Oslo", "region": "", "country": "Norway", "localtime": "2024-03-01 9:05" },
        "current": {
            "temp_c": -2.0, "temp_f": 28.4,
            "condition": { "text": condition, "icon": "//cdn.weatherapi.com/338.png" },
            "wind_kph": 9.0, "wind_dir": "N", "humidity": 91,
            "feelslike_c": -6.0, "vis_km": 2.0, "cloud": 100,
            "gust_kph": 15.0, "uv": 0.0, "precip_mm": 1.4
        },
        "forecast": { "forecastday": forecastday }
    })
}

fn test_config() -> SkycastConfig {
    let mut config = SkycastConfig::default();
    config.weather.api_key = Some("test-key".to_string());
    config
}

fn app_with(fetcher: Arc<dyn ForecastFetcher>) -> axum::Router {
    web::router(AppState::with_fetcher(test_config(), fetcher).unwrap())
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/weather")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_index_renders_form() {
    let app = app_with(StubFetcher::ok(forecast_body("Sunny", 4)));
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("name=\"location\""));
    assert!(!html.contains("class=\"error\""));
}

#[tokio::test]
async fn test_form_submission_renders_forecast() {
    let fetcher = StubFetcher::ok(forecast_body("Heavy snow", 4));
    let app = app_with(fetcher.clone());

    let response = app.oneshot(form_post("location=Oslo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Oslo, Norway"));
    assert!(html.contains("data-weather=\"snow\""));
    assert!(html.contains("id=\"chart-data\""));
    assert_eq!(html.matches("class=\"forecast-day card\"").count(), 4);
    assert_eq!(fetcher.seen(), vec!["Oslo".to_string()]);
}

#[tokio::test]
async fn test_blank_location_falls_back_to_default_city() {
    let fetcher = StubFetcher::ok(forecast_body("Sunny", 4));
    let app = app_with(fetcher.clone());

    let response = app.oneshot(form_post("location=+++")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(fetcher.seen(), vec!["London".to_string()]);
}

#[tokio::test]
async fn test_city_field_alias_is_accepted() {
    let fetcher = StubFetcher::ok(forecast_body("Sunny", 4));
    let app = app_with(fetcher.clone());

    app.oneshot(form_post("city=Bergen")).await.unwrap();
    assert_eq!(fetcher.seen(), vec!["Bergen".to_string()]);
}

#[tokio::test]
async fn test_fetch_failure_shows_message_on_form() {
    let app = app_with(StubFetcher::failing("No matching location found."));

    let response = app.oneshot(form_post("location=Atlantis")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("No matching location found."));
    assert!(!html.contains("forecast-day"));
    assert!(!html.contains("chart-data"));
}

#[tokio::test]
async fn test_provider_http_error_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": { "code": 1006, "message": "No matching location found." }
        })))
        .mount(&server)
        .await;

    let client = WeatherApiClient::new(WeatherConfig {
        api_key: Some("test-key".to_string()),
        base_url: server.uri(),
        ..WeatherConfig::default()
    })
    .unwrap();
    let app = app_with(Arc::new(client));

    let html = body_text(app.oneshot(form_post("location=Atlantis")).await.unwrap()).await;
    assert!(html.contains("<p class=\"error\" role=\"alert\">No matching location found.</p>"));
    assert!(!html.contains("forecast-day"));
}

#[tokio::test]
async fn test_api_forecast_returns_view_model_json() {
    let app = app_with(StubFetcher::ok(forecast_body("Overcast", 3)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forecast?location=Oslo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["category"], "cloudy");
    assert_eq!(json["location"], "Oslo, Norway");
    assert_eq!(json["chart"]["dates"].as_array().map(Vec::len), Some(3));
    assert!(json["current"]["aqi"].is_null());
}

#[tokio::test]
async fn test_api_forecast_failure_is_bad_gateway() {
    let app = app_with(StubFetcher::failing("No matching location found."));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forecast?location=Atlantis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["error"], "No matching location found.");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_with(StubFetcher::ok(forecast_body("Sunny", 1)));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], skycast::VERSION);
}

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    SkycastError,
    models::ViewModel,
    state::AppState,
    weather::{self, LocationQuery},
};

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    #[serde(default, alias = "city")]
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl IntoResponse for SkycastError {
    fn into_response(self) -> Response {
        let status = match &self {
            SkycastError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ApiErrorBody {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(get_forecast))
}

async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ViewModel>, SkycastError> {
    let query = LocationQuery::parse(&params.location, &state.config.weather.default_location);
    let view_model = weather::lookup(state.fetcher.as_ref(), &query)
        .await
        .inspect_err(|e| warn!(location = %query, "Forecast lookup failed: {e}"))?;
    Ok(Json(view_model))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

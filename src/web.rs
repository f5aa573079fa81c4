use anyhow::{Context, Result, anyhow};
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::{
    api,
    state::AppState,
    weather::{self, LocationQuery},
};

/// Form bodies are a single short text field
const MAX_FORM_BYTES: usize = 16 * 1024;

#[derive(Debug, Deserialize)]
pub struct WeatherForm {
    #[serde(default, alias = "city")]
    pub location: String,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(index))
        .route("/weather", get(index).post(submit_weather))
        .route("/health", get(api::health_check))
        .nest("/api", api::router())
        .nest_service("/public", static_dir)
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn index(State(state): State<AppState>) -> Response {
    html_page(state.renderer.render_index(None, None))
}

async fn submit_weather(State(state): State<AppState>, Form(form): Form<WeatherForm>) -> Response {
    let query = LocationQuery::parse(&form.location, &state.config.weather.default_location);

    match weather::lookup(state.fetcher.as_ref(), &query).await {
        Ok(view_model) => html_page(state.renderer.render_result(&view_model)),
        Err(err) => {
            warn!(location = %query, "Forecast lookup failed: {}", err);
            html_page(
                state
                    .renderer
                    .render_index(Some(&err.user_message()), Some(query.as_str())),
            )
        }
    }
}

fn html_page(rendered: crate::Result<String>) -> Response {
    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            error!("Failed to render page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.user_message()).into_response()
        }
    }
}

pub async fn run(state: AppState) -> Result<()> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;
    let addr = tokio::net::lookup_host((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to resolve {host}:{port}"))?
        .next()
        .ok_or_else(|| anyhow!("No address found for {host}:{port}"))?;

    #[cfg(feature = "tls")]
    let tls_files = state
        .config
        .server
        .tls_cert
        .clone()
        .zip(state.config.server.tls_key.clone());
    #[cfg(not(feature = "tls"))]
    {
        if state.config.server.tls_cert.is_some() {
            warn!("TLS certificate configured but the `tls` feature is disabled; serving plain HTTP");
        }
    }

    let app = router(state);

    #[cfg(feature = "tls")]
    {
        if let Some((cert, key)) = tls_files {
            let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert, &key)
                .await
                .with_context(|| format!("Failed to load TLS files {}", cert.display()))?;
            info!("Web server running at https://localhost:{}", port);
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await
                .context("HTTPS server failed")?;
            return Ok(());
        }
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

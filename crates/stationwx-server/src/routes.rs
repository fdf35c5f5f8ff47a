//! HTTP surface of the proxy.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use stationwx_gateway::{LogicalQuery, UpstreamError, UpstreamGateway};
use stationwx_normalize::{normalize, parse_stations};

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<UpstreamGateway>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/proxy", get(proxy))
        .route("/api/stations", get(stations))
        .route("/api/weather", get(weather))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    path: Option<String>,
    station: Option<String>,
}

/// `GET /api/proxy?path=<"/stations"|"/historical_weather">&station=<id>`
///
/// Returns the upstream payload verbatim. Failures surface as a degraded
/// 502 response, never as a crash.
async fn proxy(State(state): State<AppState>, Query(params): Query<ProxyParams>) -> Response {
    let query = match logical_query(&params) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match state.gateway.resolve(&query).await {
        Ok(payload) => json_response(StatusCode::OK, &payload),
        Err(err) => upstream_failure(&err),
    }
}

/// `GET /api/stations` — the station list, coerced into the canonical shape.
async fn stations(State(state): State<AppState>) -> Response {
    match state.gateway.resolve(&LogicalQuery::Stations).await {
        Ok(payload) => {
            let stations = parse_stations(&payload);
            json_response(StatusCode::OK, &json!(stations))
        }
        Err(err) => upstream_failure(&err),
    }
}

#[derive(Debug, Deserialize)]
pub struct WeatherParams {
    station: Option<String>,
}

/// `GET /api/weather?station=<id>` — historical weather for one station,
/// normalized into canonical rows.
async fn weather(State(state): State<AppState>, Query(params): Query<WeatherParams>) -> Response {
    let Some(station_id) = params.station.filter(|s| !s.is_empty()) else {
        return missing_station();
    };

    let query = LogicalQuery::HistoricalWeather { station_id };
    match state.gateway.resolve(&query).await {
        Ok(payload) => {
            let rows = normalize(&payload);
            json_response(StatusCode::OK, &json!(rows))
        }
        Err(err) => upstream_failure(&err),
    }
}

/// Map query parameters to a logical query. An absent or unrecognized
/// `path` defaults to the station list.
fn logical_query(params: &ProxyParams) -> Result<LogicalQuery, Response> {
    match params.path.as_deref() {
        Some("/historical_weather") => {
            let station_id = params
                .station
                .clone()
                .filter(|s| !s.is_empty())
                .ok_or_else(missing_station)?;
            Ok(LogicalQuery::HistoricalWeather { station_id })
        }
        _ => Ok(LogicalQuery::Stations),
    }
}

fn missing_station() -> Response {
    json_response(
        StatusCode::BAD_REQUEST,
        &json!({
            "error": "missing_station",
            "detail": "station query parameter is required for historical weather",
        }),
    )
}

fn upstream_failure(err: &UpstreamError) -> Response {
    tracing::error!(error = %err, "upstream query failed");
    json_response(
        StatusCode::BAD_GATEWAY,
        &json!({ "error": "proxy_upstream_error", "detail": err.to_string() }),
    )
}

fn json_response(status: StatusCode, payload: &Value) -> Response {
    let body = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    (
        status,
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response()
}

// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`.  A dashboard loads one price window
// via POST /series, then queries indicators computed over that window.
//
// Responses are JSON throughout; warm-up entries of indicator series
// serialise as `null`.  Missing data answers 404, invalid parameters 422.
//
// CORS is configured permissively for development; tighten the allowed
// origins in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::{AppState, PriceDataset};
use crate::indicators::bollinger::calculate_bollinger;
use crate::indicators::ma::calculate_ma;
use crate::indicators::macd::calculate_macd;
use crate::indicators::pivot::calculate_pivots;
use crate::indicators::rsi::calculate_rsi;
use crate::signals::composite::{macd_signal, rsi_signal};
use crate::signals::summary::build_summary;
use crate::stats::summarize;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/series", post(load_series))
        .route("/api/v1/series", get(series_info))
        .route("/api/v1/indicators/ma", get(moving_average))
        .route("/api/v1/indicators/bollinger", get(bollinger_bands))
        .route("/api/v1/indicators/rsi", get(rsi))
        .route("/api/v1/indicators/macd", get(macd))
        .route("/api/v1/pivots", get(pivots))
        .route("/api/v1/stats", get(stats))
        .route("/api/v1/summary", get(summary))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Shared response helpers
// =============================================================================

fn no_series_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "no price series loaded" })),
    )
        .into_response()
}

fn invalid_period_response(period: usize, len: usize) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": format!("invalid period {period} for a series of {len} points"),
        })),
    )
        .into_response()
}

/// Fetch the loaded price window or produce the 404 response.
fn prices_or_404(state: &AppState) -> Result<Vec<f64>, Response> {
    state.prices().ok_or_else(no_series_response)
}

/// Reject `period == 0` and periods longer than the window.
fn check_period(period: usize, len: usize) -> Result<(), Response> {
    if period == 0 || period > len {
        Err(invalid_period_response(period, len))
    } else {
        Ok(())
    }
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "state_version": state.current_state_version(),
        "server_time": chrono::Utc::now().timestamp_millis(),
        "uptime_seconds": state.start_time.elapsed().as_secs(),
    }))
}

// =============================================================================
// Series loading
// =============================================================================

#[derive(Deserialize)]
struct LoadSeriesRequest {
    ticker: String,
    #[serde(default = "default_column")]
    column: String,
    prices: Vec<f64>,
}

fn default_column() -> String {
    "Close".to_string()
}

async fn load_series(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoadSeriesRequest>,
) -> Response {
    if req.prices.is_empty() {
        warn!(ticker = %req.ticker, "rejected empty price series");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "price series must not be empty" })),
        )
            .into_response();
    }

    // The engine assumes finite doubles; screen them here at the boundary.
    if let Some(pos) = req.prices.iter().position(|p| !p.is_finite()) {
        warn!(ticker = %req.ticker, index = pos, "rejected non-finite price");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": format!("non-finite price at index {pos}"),
            })),
        )
            .into_response();
    }

    let dataset = PriceDataset {
        ticker: req.ticker,
        column: req.column,
        prices: req.prices,
        loaded_at: chrono::Utc::now(),
    };

    info!(
        ticker = %dataset.ticker,
        column = %dataset.column,
        points = dataset.prices.len(),
        "price series loaded"
    );

    state.load_dataset(dataset);
    let info = state.dataset_info();
    (StatusCode::OK, Json(json!({ "loaded": info }))).into_response()
}

async fn series_info(State(state): State<Arc<AppState>>) -> Response {
    match state.dataset_info() {
        Some(info) => Json(info).into_response(),
        None => no_series_response(),
    }
}

// =============================================================================
// Indicators
// =============================================================================

#[derive(Deserialize)]
struct PeriodQuery {
    period: Option<usize>,
}

async fn moving_average(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PeriodQuery>,
) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let period = q.period.unwrap_or(state.config.indicators.ma_period);
    if let Err(resp) = check_period(period, prices.len()) {
        return resp;
    }

    let values = calculate_ma(&prices, period);
    Json(json!({ "period": period, "values": values })).into_response()
}

#[derive(Deserialize)]
struct BollingerQuery {
    period: Option<usize>,
    std_dev: Option<f64>,
}

async fn bollinger_bands(
    State(state): State<Arc<AppState>>,
    Query(q): Query<BollingerQuery>,
) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let period = q.period.unwrap_or(state.config.indicators.bollinger_period);
    let std_dev = q.std_dev.unwrap_or(state.config.indicators.bollinger_std_dev);
    if let Err(resp) = check_period(period, prices.len()) {
        return resp;
    }

    let bands = calculate_bollinger(&prices, period, std_dev);
    Json(json!({
        "period": period,
        "std_dev": std_dev,
        "middle": bands.middle,
        "upper": bands.upper,
        "lower": bands.lower,
    }))
    .into_response()
}

async fn rsi(State(state): State<Arc<AppState>>, Query(q): Query<PeriodQuery>) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let period = q.period.unwrap_or(state.config.indicators.rsi_period);
    if let Err(resp) = check_period(period, prices.len()) {
        return resp;
    }

    let values = calculate_rsi(&prices, period);
    let last = values.last().copied().flatten();
    Json(json!({
        "period": period,
        "values": values,
        "last": last,
        "signal": last.map(rsi_signal),
    }))
    .into_response()
}

async fn macd(State(state): State<Arc<AppState>>) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let params = &state.config.indicators;
    let series = calculate_macd(&prices, params.macd_fast, params.macd_slow, params.macd_signal);
    let last_macd = series.last_macd();
    let signal = last_macd.map(|m| macd_signal(m, series.last_histogram()));

    Json(json!({
        "fast": params.macd_fast,
        "slow": params.macd_slow,
        "signal_period": params.macd_signal,
        "macd": series.macd,
        "signal_line": series.signal,
        "histogram": series.histogram,
        "last_macd": last_macd,
        "signal": signal,
    }))
    .into_response()
}

// =============================================================================
// Pivots, statistics, summary
// =============================================================================

async fn pivots(State(state): State<Arc<AppState>>) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match calculate_pivots(&prices) {
        Some(levels) => Json(levels).into_response(),
        None => no_series_response(),
    }
}

async fn stats(State(state): State<Arc<AppState>>) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match summarize(&prices) {
        Some(stats) => Json(stats).into_response(),
        None => no_series_response(),
    }
}

#[derive(Deserialize)]
struct SummaryQuery {
    rsi_period: Option<usize>,
}

async fn summary(State(state): State<Arc<AppState>>, Query(q): Query<SummaryQuery>) -> Response {
    let prices = match prices_or_404(&state) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    let mut params = state.config.indicators.clone();
    if let Some(rsi_period) = q.rsi_period {
        if let Err(resp) = check_period(rsi_period, prices.len()) {
            return resp;
        }
        params.rsi_period = rsi_period;
    }

    match build_summary(&prices, &params) {
        Some(summary) => Json(summary).into_response(),
        None => no_series_response(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn empty_state() -> Arc<AppState> {
        Arc::new(AppState::new(EngineConfig::default()))
    }

    fn request(prices: Vec<f64>) -> LoadSeriesRequest {
        LoadSeriesRequest {
            ticker: "AAPL".to_string(),
            column: "Close".to_string(),
            prices,
        }
    }

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ---- series loading --------------------------------------------------

    #[tokio::test]
    async fn load_then_query_ma_preserves_length_and_warm_up() {
        let state = empty_state();
        let resp = load_series(State(state.clone()), Json(request(vec![10.0, 20.0, 30.0]))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = moving_average(State(state), Query(PeriodQuery { period: Some(2) })).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let values = body["values"].as_array().unwrap();
        assert_eq!(values.len(), 3);
        assert!(values[0].is_null());
        assert_eq!(values[1], 15.0);
        assert_eq!(values[2], 25.0);
    }

    #[tokio::test]
    async fn load_rejects_empty_series() {
        let resp = load_series(State(empty_state()), Json(request(Vec::new()))).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn load_rejects_non_finite_prices() {
        let resp = load_series(
            State(empty_state()),
            Json(request(vec![1.0, f64::NAN, 3.0])),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("index 1"));
    }

    #[tokio::test]
    async fn load_bumps_state_version() {
        let state = empty_state();
        let before = state.current_state_version();
        let _ = load_series(State(state.clone()), Json(request(vec![1.0, 2.0]))).await;
        assert_eq!(state.current_state_version(), before + 1);
    }

    // ---- missing-data and bad-parameter contracts ------------------------

    #[tokio::test]
    async fn indicators_404_without_series() {
        let state = empty_state();
        let resp = moving_average(State(state.clone()), Query(PeriodQuery { period: None })).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = stats(State(state.clone())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = summary(State(state), Query(SummaryQuery { rsi_period: None })).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ma_rejects_invalid_periods() {
        let state = empty_state();
        let _ = load_series(State(state.clone()), Json(request(vec![1.0, 2.0, 3.0]))).await;

        let resp = moving_average(State(state.clone()), Query(PeriodQuery { period: Some(0) })).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = moving_average(State(state), Query(PeriodQuery { period: Some(4) })).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn rsi_reports_last_value_and_signal() {
        let state = empty_state();
        let prices: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let _ = load_series(State(state.clone()), Json(request(prices))).await;

        let resp = rsi(State(state), Query(PeriodQuery { period: Some(14) })).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["values"].as_array().unwrap().len(), 30);
        assert!(body["last"].as_f64().unwrap() > 99.0);
        assert_eq!(body["signal"], "SELL");
    }

    #[tokio::test]
    async fn health_reports_ok_without_series() {
        let resp = health(State(empty_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["state_version"], 1);
    }
}

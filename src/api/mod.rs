//! HTTP API for the map frontend
//!
//! Thin axum handlers over the risk engine: request parsing and status-code
//! mapping live here, every estimate comes from the engine. All shared
//! state is built once at startup and published read-only.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::EngineConfig;
use crate::dataset::LocationDataset;
use crate::error::RiskMapError;
use crate::models::{LocationRecord, RiskEstimate, RiskTrend};
use crate::risk::{
    FeatureImputer, PointClassifier, PointRiskPredictor, RiskTimeSeries, SeasonalInterpolator,
    parse_date,
};

/// Immutable engine handles shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    dataset: Arc<LocationDataset>,
    interpolator: SeasonalInterpolator,
    predictor: Arc<PointRiskPredictor>,
    max_trend_days: usize,
}

impl AppState {
    /// Wire the engine together from its loaded parts
    pub fn new(
        dataset: Arc<LocationDataset>,
        classifier: Arc<dyn PointClassifier>,
        engine: &EngineConfig,
    ) -> Result<Self, RiskMapError> {
        let imputer = FeatureImputer::with_neighbors(&dataset, engine.neighbors)?;
        let interpolator = SeasonalInterpolator::new(Arc::clone(&dataset));
        let predictor = Arc::new(PointRiskPredictor::new(imputer, classifier));

        Ok(Self {
            dataset,
            interpolator,
            predictor,
            max_trend_days: engine.max_trend_days,
        })
    }
}

/// Engine error wrapped for HTTP responses
struct ApiError(RiskMapError);

impl From<RiskMapError> for ApiError {
    fn from(err: RiskMapError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RiskMapError::InvalidDate { .. } | RiskMapError::InvalidCoordinate { .. } => {
                StatusCode::BAD_REQUEST
            }
            RiskMapError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.user_message() }))).into_response()
    }
}

#[derive(Deserialize)]
struct RiskQuery {
    date: Option<String>,
}

#[derive(Deserialize)]
struct PointRiskQuery {
    date: Option<String>,
    lat: f64,
    lng: f64,
    elevation: Option<f64>,
    water_distance: Option<f64>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiPointRisk {
    pub risk: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
}

#[derive(Deserialize)]
struct TrendQuery {
    start: String,
    end: String,
    lat: f64,
    lng: f64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/risk", get(get_all_risk))
        .route("/point-risk", get(get_point_risk))
        .route("/locations/{name}", get(get_location))
        .route("/trend", get(get_trend))
        .with_state(state)
}

/// Requests without a date default to today, matching the map's initial view
fn resolve_date(date: Option<&str>) -> Result<NaiveDate, RiskMapError> {
    match date {
        Some(raw) => parse_date(raw),
        None => Ok(Utc::now().date_naive()),
    }
}

async fn get_all_risk(
    State(state): State<AppState>,
    Query(params): Query<RiskQuery>,
) -> Result<Json<Vec<RiskEstimate>>, ApiError> {
    let date = resolve_date(params.date.as_deref())?;
    Ok(Json(state.interpolator.interpolate_on(date)))
}

async fn get_point_risk(
    State(state): State<AppState>,
    Query(params): Query<PointRiskQuery>,
) -> Result<Json<ApiPointRisk>, ApiError> {
    let date = resolve_date(params.date.as_deref())?;
    let risk = state.predictor.predict_on(
        date,
        params.lat,
        params.lng,
        params.elevation,
        params.water_distance,
    )?;

    Ok(Json(ApiPointRisk {
        risk,
        latitude: params.lat,
        longitude: params.lng,
        date,
    }))
}

async fn get_location(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<LocationRecord>, ApiError> {
    let record = state.dataset.get(&name)?;
    Ok(Json(record.clone()))
}

async fn get_trend(
    State(state): State<AppState>,
    Query(params): Query<TrendQuery>,
) -> Result<Json<RiskTrend>, ApiError> {
    let trend = RiskTimeSeries::new(&state.predictor)
        .with_max_days(state.max_trend_days)
        .trend(&params.start, &params.end, params.lat, params.lng)?;
    Ok(Json(trend))
}

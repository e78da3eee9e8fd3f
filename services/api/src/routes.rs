use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use credential_tracker::error::AppError;
use credential_tracker::workflows::credentials::{
    CredentialFilter, CredentialOrder, CredentialStatus,
};
use credential_tracker::workflows::transcript::{
    ReportOptions, TranscriptImporter, TranscriptReportView,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub(crate) struct CredentialReportRequest {
    /// The already-fetched transcript document; `null` means the fetch failed.
    #[serde(default)]
    pub(crate) transcript: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) order: CredentialOrder,
    #[serde(default)]
    pub(crate) search: Option<String>,
    #[serde(default)]
    pub(crate) statuses: Vec<CredentialStatus>,
    #[serde(default)]
    pub(crate) recent_limit: Option<usize>,
}

pub(crate) fn with_report_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/credentials/report", post(credential_report_endpoint))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn credential_report_endpoint(
    Json(payload): Json<CredentialReportRequest>,
) -> Result<Json<TranscriptReportView>, AppError> {
    let CredentialReportRequest {
        transcript,
        today,
        order,
        search,
        statuses,
        recent_limit,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let mut options = ReportOptions::new(today);
    options.order = order;
    options.filter = CredentialFilter {
        query: search,
        statuses,
    };
    if let Some(limit) = recent_limit {
        options.recent_limit = limit;
    }

    let document = transcript.unwrap_or(Value::Null);
    let report = TranscriptImporter::from_value(&document, &options)?;
    Ok(Json(report.to_view()))
}

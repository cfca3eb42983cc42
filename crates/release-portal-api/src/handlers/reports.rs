//! Metrics and report export handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use release_portal_application::ReleaseMetrics;

use crate::{error::ApiResult, state::AppState};

/// `GET /metrics/releases`
pub async fn release_metrics(State(state): State<AppState>) -> ApiResult<Json<ReleaseMetrics>> {
    Ok(Json(state.reports.release_metrics().await?))
}

/// `GET /releases/:release_id/report.csv`
pub async fn export_status_report(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let report = state.reports.export_status_report(&release_id).await?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report.file_name),
        ),
    ];
    Ok((headers, report.content))
}

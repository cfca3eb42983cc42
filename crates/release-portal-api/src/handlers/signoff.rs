//! Status mutator, sign-off summary and approval notification handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use release_portal_application::{ApprovalDispatchReport, StatusChangeView};
use release_portal_domain::signoff::SignOffSummary;

use crate::{
    error::ApiResult,
    models::{
        AppOwnerSignOffRequest, OverallSignOffRequest, QaSignOffRequest, QaStatusRequest,
        ReleaseStatusRequest, ScanStatusRequest,
    },
    state::AppState,
};

/// `PUT .../components/:component_id/scan`
pub async fn set_scan_status(
    State(state): State<AppState>,
    Path((_release_id, _team_id, component_id)): Path<(String, String, String)>,
    body: Result<Json<ScanStatusRequest>, JsonRejection>,
) -> ApiResult<Json<StatusChangeView>> {
    let Json(request) = body?;
    let change = state
        .signoff
        .set_scan_status(&component_id, &request.scan_type, &request.status)
        .await?;
    Ok(Json(change))
}

/// `PUT .../user-stories/:story_id/qa-status`
pub async fn set_user_story_qa_status(
    State(state): State<AppState>,
    Path((_release_id, _team_id, story_id)): Path<(String, String, String)>,
    body: Result<Json<QaStatusRequest>, JsonRejection>,
) -> ApiResult<Json<StatusChangeView>> {
    let Json(request) = body?;
    let change = state
        .signoff
        .set_user_story_qa_status(&story_id, &request.qa_status)
        .await?;
    Ok(Json(change))
}

/// `PUT .../teams/:team_id/qa-signoff`
pub async fn set_team_qa_sign_off(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
    body: Result<Json<QaSignOffRequest>, JsonRejection>,
) -> ApiResult<Json<StatusChangeView>> {
    let Json(request) = body?;
    let change = state
        .signoff
        .set_team_qa_sign_off(&team_id, &request.qa_signed_off)
        .await?;
    Ok(Json(change))
}

/// `PUT .../teams/:team_id/appowner-signoff`
pub async fn set_team_app_owner_sign_off(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
    body: Result<Json<AppOwnerSignOffRequest>, JsonRejection>,
) -> ApiResult<Json<StatusChangeView>> {
    let Json(request) = body?;
    let change = state
        .signoff
        .set_team_app_owner_sign_off(&team_id, &request.app_owner_signed_off)
        .await?;
    Ok(Json(change))
}

/// `PUT /releases/:release_id/overall-signoff`
pub async fn set_overall_sign_off(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
    body: Result<Json<OverallSignOffRequest>, JsonRejection>,
) -> ApiResult<Json<StatusChangeView>> {
    let Json(request) = body?;
    let change = state
        .signoff
        .set_overall_app_owner_sign_off(&release_id, &request.overall_app_owner_signed_off)
        .await?;
    Ok(Json(change))
}

/// `PUT /releases/:release_id/status`
pub async fn set_release_status(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
    body: Result<Json<ReleaseStatusRequest>, JsonRejection>,
) -> ApiResult<Json<StatusChangeView>> {
    let Json(request) = body?;
    let change = state.signoff.set_release_status(&release_id, &request.status).await?;
    Ok(Json(change))
}

/// `GET /releases/:release_id/signoff-summary`
pub async fn sign_off_summary(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
) -> ApiResult<Json<SignOffSummary>> {
    Ok(Json(state.signoff.sign_off_summary(&release_id).await?))
}

/// `POST /releases/:release_id/notify`
///
/// Answers 200 even when delivery failed; see `delivered` and `failure`.
pub async fn notify_approval(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
) -> ApiResult<Json<ApprovalDispatchReport>> {
    Ok(Json(state.signoff.trigger_approval_notification(&release_id).await?))
}

//! Release handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use release_portal_application::{
    CreateReleaseCommand, CreatedRelease, DeletionSummary, ReleaseView, UpdateReleaseCommand,
};

use crate::{error::ApiResult, state::AppState};

/// `GET /releases`
pub async fn list_releases(State(state): State<AppState>) -> ApiResult<Json<Vec<ReleaseView>>> {
    Ok(Json(state.hierarchy.list_releases().await?))
}

/// `POST /releases`
///
/// Unknown `teamIds` are skipped and echoed back in `unresolvedTeamIds`.
pub async fn create_release(
    State(state): State<AppState>,
    body: Result<Json<CreateReleaseCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedRelease>)> {
    let Json(command) = body?;
    let created = state.hierarchy.create_release(command).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /releases/:release_id`
pub async fn get_release(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
) -> ApiResult<Json<ReleaseView>> {
    Ok(Json(state.hierarchy.get_release(&release_id).await?))
}

/// `PUT /releases/:release_id`
pub async fn update_release(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
    body: Result<Json<UpdateReleaseCommand>, JsonRejection>,
) -> ApiResult<Json<ReleaseView>> {
    let Json(command) = body?;
    Ok(Json(state.hierarchy.update_release(&release_id, command).await?))
}

/// `DELETE /releases/:release_id`
pub async fn delete_release(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
) -> ApiResult<Json<DeletionSummary>> {
    Ok(Json(state.hierarchy.delete_release(&release_id).await?))
}

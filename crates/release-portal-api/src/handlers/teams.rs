//! Team handlers
//!
//! The release segment of nested paths only addresses the team; the team
//! id alone identifies it.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use release_portal_application::{
    AddTeamCommand, DeletionSummary, TeamView, UpdateTeamCommand,
};

use crate::{error::ApiResult, state::AppState};

/// `GET /teams`, across all releases
pub async fn list_teams(State(state): State<AppState>) -> ApiResult<Json<Vec<TeamView>>> {
    Ok(Json(state.hierarchy.list_teams().await?))
}

/// `POST /releases/:release_id/teams`
pub async fn add_team(
    State(state): State<AppState>,
    Path(release_id): Path<String>,
    body: Result<Json<AddTeamCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TeamView>)> {
    let Json(command) = body?;
    let team = state.hierarchy.add_team(&release_id, command).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// `GET /releases/:release_id/teams/:team_id`
pub async fn get_team(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
) -> ApiResult<Json<TeamView>> {
    Ok(Json(state.hierarchy.get_team(&team_id).await?))
}

/// `PUT /releases/:release_id/teams/:team_id`
pub async fn update_team(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
    body: Result<Json<UpdateTeamCommand>, JsonRejection>,
) -> ApiResult<Json<TeamView>> {
    let Json(command) = body?;
    Ok(Json(state.hierarchy.update_team(&team_id, command).await?))
}

/// `DELETE /releases/:release_id/teams/:team_id`
pub async fn delete_team(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
) -> ApiResult<Json<DeletionSummary>> {
    Ok(Json(state.hierarchy.delete_team(&team_id).await?))
}

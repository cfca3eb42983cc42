//! User story handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use release_portal_application::{
    AddUserStoryCommand, CreatedUserStory, DeletionSummary, TeamChild, UpdateUserStoryCommand,
    UserStoryView,
};
use release_portal_domain::value_objects::UserStoryId;

use crate::{error::ApiResult, state::AppState};

type UserStoryPath = Path<(String, String, String)>;

/// `POST /releases/:release_id/teams/:team_id/user-stories`
///
/// Component ids that do not resolve are dropped and listed in
/// `unresolvedComponentIds`.
pub async fn add_user_story(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
    body: Result<Json<AddUserStoryCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedUserStory>)> {
    let Json(command) = body?;
    let created = state.hierarchy.add_user_story(&team_id, command).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET .../user-stories/:story_id`
pub async fn get_user_story(
    State(state): State<AppState>,
    Path((_release_id, _team_id, story_id)): UserStoryPath,
) -> ApiResult<Json<UserStoryView>> {
    Ok(Json(state.hierarchy.get_user_story(&story_id).await?))
}

/// `PUT .../user-stories/:story_id`
pub async fn update_user_story(
    State(state): State<AppState>,
    Path((_release_id, _team_id, story_id)): UserStoryPath,
    body: Result<Json<UpdateUserStoryCommand>, JsonRejection>,
) -> ApiResult<Json<UserStoryView>> {
    let Json(command) = body?;
    Ok(Json(state.hierarchy.update_user_story(&story_id, command).await?))
}

/// `DELETE .../user-stories/:story_id`
pub async fn delete_user_story(
    State(state): State<AppState>,
    Path((_release_id, team_id, story_id)): UserStoryPath,
) -> ApiResult<Json<DeletionSummary>> {
    let child = TeamChild::UserStory(UserStoryId::new(story_id));
    Ok(Json(state.hierarchy.delete_team_child(&team_id, child).await?))
}

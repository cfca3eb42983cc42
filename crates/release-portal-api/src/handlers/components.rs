//! Component handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use release_portal_application::{
    AddComponentCommand, ComponentView, DeletionSummary, TeamChild, UpdateComponentCommand,
};
use release_portal_domain::value_objects::ComponentId;

use crate::{error::ApiResult, state::AppState};

type ComponentPath = Path<(String, String, String)>;

/// `POST /releases/:release_id/teams/:team_id/components`
pub async fn add_component(
    State(state): State<AppState>,
    Path((_release_id, team_id)): Path<(String, String)>,
    body: Result<Json<AddComponentCommand>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ComponentView>)> {
    let Json(command) = body?;
    let component = state.hierarchy.add_component(&team_id, command).await?;
    Ok((StatusCode::CREATED, Json(component)))
}

/// `GET .../components/:component_id`
pub async fn get_component(
    State(state): State<AppState>,
    Path((_release_id, _team_id, component_id)): ComponentPath,
) -> ApiResult<Json<ComponentView>> {
    Ok(Json(state.hierarchy.get_component(&component_id).await?))
}

/// `PUT .../components/:component_id`
pub async fn update_component(
    State(state): State<AppState>,
    Path((_release_id, _team_id, component_id)): ComponentPath,
    body: Result<Json<UpdateComponentCommand>, JsonRejection>,
) -> ApiResult<Json<ComponentView>> {
    let Json(command) = body?;
    Ok(Json(state.hierarchy.update_component(&component_id, command).await?))
}

/// `DELETE .../components/:component_id`
///
/// 404 unless the component belongs to the addressed team.
pub async fn delete_component(
    State(state): State<AppState>,
    Path((_release_id, team_id, component_id)): ComponentPath,
) -> ApiResult<Json<DeletionSummary>> {
    let child = TeamChild::Component(ComponentId::new(component_id));
    Ok(Json(state.hierarchy.delete_team_child(&team_id, child).await?))
}

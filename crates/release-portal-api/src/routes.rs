//! API route definitions

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    handlers::{components, health, releases, reports, signoff, teams, user_stories},
    middleware::logging_middleware,
    state::AppState,
};

const TEAM: &str = "/releases/:release_id/teams/:team_id";

/// Routes relative to `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics/releases", get(reports::release_metrics))
        .route("/teams", get(teams::list_teams))
        .route(
            "/releases",
            get(releases::list_releases).post(releases::create_release),
        )
        .route(
            "/releases/:release_id",
            get(releases::get_release)
                .put(releases::update_release)
                .delete(releases::delete_release),
        )
        .route("/releases/:release_id/status", put(signoff::set_release_status))
        .route(
            "/releases/:release_id/overall-signoff",
            put(signoff::set_overall_sign_off),
        )
        .route(
            "/releases/:release_id/signoff-summary",
            get(signoff::sign_off_summary),
        )
        .route("/releases/:release_id/notify", post(signoff::notify_approval))
        .route(
            "/releases/:release_id/report.csv",
            get(reports::export_status_report),
        )
        .route("/releases/:release_id/teams", post(teams::add_team))
        .route(
            TEAM,
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(&format!("{TEAM}/qa-signoff"), put(signoff::set_team_qa_sign_off))
        .route(
            &format!("{TEAM}/appowner-signoff"),
            put(signoff::set_team_app_owner_sign_off),
        )
        .route(&format!("{TEAM}/components"), post(components::add_component))
        .route(
            &format!("{TEAM}/components/:component_id"),
            get(components::get_component)
                .put(components::update_component)
                .delete(components::delete_component),
        )
        .route(
            &format!("{TEAM}/components/:component_id/scan"),
            put(signoff::set_scan_status),
        )
        .route(&format!("{TEAM}/user-stories"), post(user_stories::add_user_story))
        .route(
            &format!("{TEAM}/user-stories/:story_id"),
            get(user_stories::get_user_story)
                .put(user_stories::update_user_story)
                .delete(user_stories::delete_user_story),
        )
        .route(
            &format!("{TEAM}/user-stories/:story_id/qa-status"),
            put(signoff::set_user_story_qa_status),
        )
}

/// The complete application: `/api` routes, request logging and permissive CORS
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

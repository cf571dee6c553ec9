pub mod health;
pub mod meta;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::complaints::handlers as complaints;
use crate::impact;
use crate::representatives::handlers as representatives;
use crate::state::AppState;
use crate::teams::handlers as teams;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::root_handler))
        .route("/health", get(health::health_handler))
        .route("/about", get(meta::about_handler))
        .route("/impact", get(impact::handle_impact))
        // Representatives
        .route(
            "/seed/representatives",
            post(representatives::handle_seed_representatives),
        )
        .route("/seed/example", post(representatives::handle_seed_example))
        .route(
            "/representatives",
            get(representatives::handle_list_representatives),
        )
        // Complaints
        .route(
            "/complaints",
            post(complaints::handle_create_complaint).get(complaints::handle_list_complaints),
        )
        .route("/complaints/:id", get(complaints::handle_get_complaint))
        .route(
            "/complaints/:id/status",
            patch(complaints::handle_update_status),
        )
        .route("/complaints/:id/vote", post(complaints::handle_vote))
        .route("/complaints/:id/summary", get(complaints::handle_summary))
        // Volunteer teams
        .route(
            "/teams",
            post(teams::handle_create_team).get(teams::handle_list_teams),
        )
        .route("/teams/active", get(teams::handle_list_active_teams))
        .route(
            "/teams/:id",
            get(teams::handle_get_team).patch(teams::handle_update_team),
        )
        .route("/teams/:id/join", post(teams::handle_join_team))
        .with_state(state)
}

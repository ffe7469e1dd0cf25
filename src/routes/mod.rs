pub mod auth;
pub mod profiles;
pub mod projects;
pub mod tech;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        // Projects
        .route(
            "/api/v1/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/api/v1/projects/{id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/api/v1/projects/{id}/rating", post(projects::rate))
        // Profiles
        .route("/api/v1/profiles/{username}", get(profiles::get))
        .route(
            "/api/v1/profiles/{username}/projects",
            get(profiles::list_projects),
        )
        .route("/api/v1/profile", put(profiles::update_own))
        // Tech gallery
        .route("/api/v1/tech", get(tech::list))
}

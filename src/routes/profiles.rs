use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::gallery;
use crate::models::{Profile, ProjectView};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateProfile {
    pub name: String,
    pub bio: Option<String>,
    /// Opaque blob-store URL; this API never inspects it.
    pub avatar_url: Option<String>,
}

pub async fn get(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = db::profiles::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

pub async fn list_projects(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<ProjectView>>, AppError> {
    let profile = db::profiles::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let views = gallery::list_user_project_views(&state.pool, profile).await?;
    Ok(Json(views))
}

pub async fn update_own(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfile>,
) -> Result<Json<Profile>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let profile = db::profiles::update(
        &state.pool,
        auth.user_id,
        &req.name,
        req.bio.as_deref(),
        req.avatar_url.as_deref(),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Profile not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(profile))
}

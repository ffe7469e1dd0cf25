use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::projects::{ProjectCreate, ProjectFilter};
use crate::error::AppError;
use crate::gallery;
use crate::models::{Project, ProjectStatus, ProjectView, Rating};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub tech: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct ProjectRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<ProjectStatus>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub tech_stack: Vec<String>,
}

#[derive(Deserialize)]
pub struct RateRequest {
    pub rating: i32,
}

impl ListQuery {
    /// Decode loose query strings into a typed filter. An unknown status is
    /// rejected here instead of being sent to the store.
    fn into_filter(self) -> Result<ProjectFilter, AppError> {
        let status = self
            .status
            .map(|s| s.parse::<ProjectStatus>())
            .transpose()
            .map_err(AppError::BadRequest)?;

        Ok(ProjectFilter {
            status,
            tech: self.tech,
            search: self.search,
        })
    }
}

impl ProjectRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if self.tech_stack.is_empty() {
            return Err(AppError::BadRequest(
                "At least one tech stack entry is required".to_string(),
            ));
        }
        Ok(())
    }

    fn as_create(&self, user_id: Uuid) -> ProjectCreate<'_> {
        ProjectCreate {
            user_id,
            title: &self.title,
            description: &self.description,
            image_url: self.image_url.as_deref(),
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status.unwrap_or(ProjectStatus::Ongoing),
            project_url: self.project_url.as_deref(),
            github_url: self.github_url.as_deref(),
            tech_stack: &self.tech_stack,
        }
    }
}

pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ProjectView>>, AppError> {
    let filter = query.into_filter()?;
    let views = gallery::list_project_views(&state.pool, &filter).await?;
    Ok(Json(views))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<Project>, AppError> {
    req.validate()?;

    let project = db::projects::create(&state.pool, &req.as_create(auth.user_id)).await?;
    Ok(Json(project))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProjectView>, AppError> {
    let view = gallery::get_project_view(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(Json(view))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<Project>, AppError> {
    req.validate()?;
    require_owner(&state, id, auth.user_id).await?;

    let project = db::projects::update(&state.pool, id, &req.as_create(auth.user_id)).await?;
    Ok(Json(project))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_owner(&state, id, auth.user_id).await?;

    db::projects::delete(&state.pool, id).await?;
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn rate(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RateRequest>,
) -> Result<Json<Rating>, AppError> {
    let rating = gallery::submit_rating(&state.pool, id, auth.user_id, req.rating).await?;
    Ok(Json(rating))
}

async fn require_owner(state: &SharedState, project_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    let project = db::projects::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    if project.user_id != user_id {
        return Err(AppError::Forbidden(
            "Only the project owner can modify it".to_string(),
        ));
    }
    Ok(())
}

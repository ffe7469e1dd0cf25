use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::db;
use crate::error::AppError;
use crate::state::SharedState;

#[derive(Serialize)]
pub struct TechTag {
    pub tag: String,
    pub project_count: i64,
}

/// Distinct tech tags in use, most popular first. Backs the tech gallery page.
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<TechTag>>, AppError> {
    let tags = db::projects::tech_tag_counts(&state.pool).await?;
    Ok(Json(
        tags.into_iter()
            .map(|(tag, project_count)| TechTag { tag, project_count })
            .collect(),
    ))
}

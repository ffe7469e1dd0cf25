use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Rating;

/// Last-write-wins upsert keyed on (project_id, user_id). An existing row
/// keeps its id and created_at; only the value changes.
pub async fn upsert(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
    rating: i32,
) -> Result<Rating, sqlx::Error> {
    sqlx::query_as::<_, Rating>(
        "INSERT INTO ratings (project_id, user_id, rating)
         VALUES ($1, $2, $3)
         ON CONFLICT (project_id, user_id) DO UPDATE SET rating = EXCLUDED.rating
         RETURNING *",
    )
    .bind(project_id)
    .bind(user_id)
    .bind(rating)
    .fetch_one(pool)
    .await
}

pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Rating>, sqlx::Error> {
    sqlx::query_as::<_, Rating>(
        "SELECT * FROM ratings WHERE project_id = $1 ORDER BY created_at",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

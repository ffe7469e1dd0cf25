use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Profile;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    username: &str,
    name: &str,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (id, username, name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(id)
    .bind(username)
    .bind(name)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Batched lookup for the list-assembly join: one round trip for the whole
/// id set instead of one per project.
pub async fn find_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}

pub async fn find_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    bio: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET name = $2, bio = $3, avatar_url = $4
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(name)
    .bind(bio)
    .bind(avatar_url)
    .fetch_one(pool)
    .await
}

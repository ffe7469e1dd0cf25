use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user's 1-5 rating of a project. At most one row exists per
/// (project_id, user_id) pair.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

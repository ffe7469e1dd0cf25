use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Profile, Rating};

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "project_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Ongoing,
    Finished,
    Stopped,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Ongoing => "ongoing",
            ProjectStatus::Finished => "finished",
            ProjectStatus::Stopped => "stopped",
        }
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ongoing" => Ok(ProjectStatus::Ongoing),
            "finished" => Ok(ProjectStatus::Finished),
            "stopped" => Ok(ProjectStatus::Stopped),
            other => Err(format!("Unknown project status: {other}")),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: ProjectStatus,
    pub upload_date: DateTime<Utc>,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
    pub tech_stack: Vec<String>,
}

/// Denormalized read model: a project joined with its owner's profile and,
/// on the single-project path, its ratings and recomputed mean. Built fresh
/// on every read, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    /// None when the owning profile no longer exists; the project still renders.
    pub user: Option<Profile>,
    /// Mean of all ratings. None when the project has no ratings — an unrated
    /// project is not a zero-star project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_rating: Option<f64>,
    /// Raw rating rows, so a caller can find the viewer's own rating without
    /// another query. Omitted on the list path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<Rating>>,
}

//! Assembly of denormalized project views and the rating upsert.
//!
//! The store has no reliable relational join for these reads, so a list is
//! assembled in two steps: fetch the matching projects, then fetch the
//! distinct owner profiles in one batched query and zip the two sets in
//! memory. N projects cost one project query plus one profile query.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::db::projects::ProjectFilter;
use crate::error::AppError;
use crate::models::{Profile, Project, ProjectView, Rating};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Record a user's rating of a project. Upserts on (project_id, user_id):
/// rating the same project twice replaces the earlier value, it never adds
/// a second row.
pub async fn submit_rating(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
    value: i32,
) -> Result<Rating, AppError> {
    validate_rating(value)?;

    db::ratings::upsert(pool, project_id, user_id, value)
        .await
        .map_err(|e| match e {
            // Either referenced row can be gone: the project, or the rater's
            // account deleted while its token was still valid.
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                if db_err.constraint() == Some("ratings_user_id_fkey") {
                    AppError::NotFound("User not found".to_string())
                } else {
                    AppError::NotFound("Project not found".to_string())
                }
            }
            _ => AppError::Database(e),
        })
}

fn validate_rating(value: i32) -> Result<(), AppError> {
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Assemble the full view of one project: owner profile, all rating rows,
/// and the mean recomputed from those rows. `None` means the project itself
/// is gone; a missing owner or an empty rating set only degrades the view.
pub async fn get_project_view(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Option<ProjectView>, sqlx::Error> {
    let Some(project) = db::projects::find_by_id(pool, project_id).await? else {
        return Ok(None);
    };

    let user = db::profiles::find_by_id(pool, project.user_id).await?;
    let ratings = db::ratings::list_by_project(pool, project_id).await?;

    Ok(Some(ProjectView {
        avg_rating: mean_rating(&ratings),
        user,
        ratings: Some(ratings),
        project,
    }))
}

/// Assemble views for every project matching `filter`, newest upload first.
/// Ratings are not aggregated here; list pages don't pay for per-project
/// rating queries.
pub async fn list_project_views(
    pool: &PgPool,
    filter: &ProjectFilter,
) -> Result<Vec<ProjectView>, sqlx::Error> {
    let projects = db::projects::list(pool, filter).await?;
    if projects.is_empty() {
        return Ok(Vec::new());
    }

    // The id set comes from the project rows, so the profile fetch has to
    // wait for them.
    let owner_ids = distinct_owner_ids(&projects);
    let profiles = db::profiles::find_by_ids(pool, &owner_ids).await?;

    Ok(zip_with_owners(projects, profiles))
}

/// Views of one user's projects, newest first. Same two-step shape as
/// [`list_project_views`] with a single known owner.
pub async fn list_user_project_views(
    pool: &PgPool,
    owner: Profile,
) -> Result<Vec<ProjectView>, sqlx::Error> {
    let projects = db::projects::list_by_user(pool, owner.id).await?;
    Ok(zip_with_owners(projects, vec![owner]))
}

fn distinct_owner_ids(projects: &[Project]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = Vec::new();
    for project in projects {
        if !ids.contains(&project.user_id) {
            ids.push(project.user_id);
        }
    }
    ids
}

/// Pair each project with its owner's profile. A project whose owner has no
/// profile row keeps `user: None` and still appears in the result.
fn zip_with_owners(projects: Vec<Project>, profiles: Vec<Profile>) -> Vec<ProjectView> {
    let by_id: HashMap<Uuid, Profile> =
        profiles.into_iter().map(|p| (p.id, p)).collect();

    projects
        .into_iter()
        .map(|project| ProjectView {
            user: by_id.get(&project.user_id).cloned(),
            avg_rating: None,
            ratings: None,
            project,
        })
        .collect()
}

fn mean_rating(ratings: &[Rating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

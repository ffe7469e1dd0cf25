use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Project, ProjectStatus};

/// Browse filters. All optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub tech: Option<String>,
    pub search: Option<String>,
}

pub struct ProjectCreate<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub image_url: Option<&'a str>,
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    pub status: ProjectStatus,
    pub project_url: Option<&'a str>,
    pub github_url: Option<&'a str>,
    pub tech_stack: &'a [String],
}

/// Filtered list, newest upload first. The ordering is part of the API
/// contract, not a display preference.
pub async fn list(pool: &PgPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
    let sql = build_list_sql(filter);

    let mut query = sqlx::query_as::<_, Project>(&sql);
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(tech) = &filter.tech {
        query = query.bind(tech);
    }
    if let Some(search) = &filter.search {
        query = query.bind(format!("%{}%", escape_like(search)));
    }

    query.fetch_all(pool).await
}

/// Escape ILIKE metacharacters so a search term is a literal substring,
/// not a pattern.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn build_list_sql(filter: &ProjectFilter) -> String {
    let mut clauses: Vec<String> = Vec::new();
    let mut arg = 0;

    if filter.status.is_some() {
        arg += 1;
        clauses.push(format!("status = ${arg}"));
    }
    if filter.tech.is_some() {
        arg += 1;
        clauses.push(format!("${arg} = ANY(tech_stack)"));
    }
    if filter.search.is_some() {
        arg += 1;
        clauses.push(format!("title ILIKE ${arg}"));
    }

    let mut sql = String::from("SELECT * FROM projects");
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY upload_date DESC");
    sql
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT * FROM projects WHERE user_id = $1 ORDER BY upload_date DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create(pool: &PgPool, params: &ProjectCreate<'_>) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects
             (user_id, title, description, image_url, start_date, end_date,
              status, project_url, github_url, tech_stack)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *",
    )
    .bind(params.user_id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.image_url)
    .bind(params.start_date)
    .bind(params.end_date)
    .bind(params.status)
    .bind(params.project_url)
    .bind(params.github_url)
    .bind(params.tech_stack)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    params: &ProjectCreate<'_>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET
             title = $2, description = $3, image_url = $4, start_date = $5,
             end_date = $6, status = $7, project_url = $8, github_url = $9,
             tech_stack = $10
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(params.title)
    .bind(params.description)
    .bind(params.image_url)
    .bind(params.start_date)
    .bind(params.end_date)
    .bind(params.status)
    .bind(params.project_url)
    .bind(params.github_url)
    .bind(params.tech_stack)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Distinct tech tags across all projects with how many projects carry each.
pub async fn tech_tag_counts(pool: &PgPool) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as::<_, (String, i64)>(
        "SELECT tag, COUNT(*) FROM projects, unnest(tech_stack) AS tag
         GROUP BY tag ORDER BY COUNT(*) DESC, tag",
    )
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_sql_without_filters_has_no_where() {
        let sql = build_list_sql(&ProjectFilter::default());
        assert_eq!(sql, "SELECT * FROM projects ORDER BY upload_date DESC");
    }

    #[test]
    fn list_sql_combines_filters_with_and() {
        let filter = ProjectFilter {
            status: Some(ProjectStatus::Ongoing),
            tech: Some("react".to_string()),
            search: Some("chat".to_string()),
        };
        let sql = build_list_sql(&filter);
        assert_eq!(
            sql,
            "SELECT * FROM projects WHERE status = $1 AND $2 = ANY(tech_stack) \
             AND title ILIKE $3 ORDER BY upload_date DESC"
        );
    }

    #[test]
    fn search_terms_are_literal_substrings() {
        assert_eq!(escape_like("100% done"), "100\\% done");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("chat"), "chat");
    }

    #[test]
    fn list_sql_numbers_placeholders_per_present_filter() {
        let filter = ProjectFilter {
            status: None,
            tech: None,
            search: Some("chat".to_string()),
        };
        let sql = build_list_sql(&filter);
        assert_eq!(
            sql,
            "SELECT * FROM projects WHERE title ILIKE $1 ORDER BY upload_date DESC"
        );
    }
}

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::job::JobListing;

/// Fixed rows inserted into an empty `jobs` table at startup.
const SEED_JOBS: &[(i64, &str, &str, &str, &str, &str)] = &[
    (
        1,
        "Desenvolvedor Frontend",
        "Tech Solutions",
        "React/TypeScript",
        "R$ 8.000",
        "https://exemplo.com/vaga1",
    ),
    (
        2,
        "Engenheiro de Dados",
        "Data Corp",
        "Python/SQL",
        "R$ 12.000",
        "https://exemplo.com/vaga2",
    ),
    (
        3,
        "Desenvolvedor Backend",
        "Nuvem Sistemas",
        "Node.js/Docker",
        "R$ 10.000",
        "https://exemplo.com/vaga3",
    ),
];

/// Creates and returns a SQLite connection pool, creating the database file
/// (and its parent directory) if needed.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Opening SQLite database {database_url}...");

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid DATABASE_URL '{database_url}'"))?
        .create_if_missing(true);

    let filename = options.clone().get_filename();
    if let Some(parent) = filename.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            company TEXT NOT NULL,
            skills TEXT NOT NULL,
            salary TEXT NOT NULL,
            link TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Inserts the fixed listings if the table is empty. Returns the number of rows inserted.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<usize> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        info!("jobs table already holds {count} rows, skipping seed");
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for (id, title, company, skills, salary, link) in SEED_JOBS {
        sqlx::query(
            "INSERT INTO jobs (id, title, company, skills, salary, link) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(*id)
        .bind(*title)
        .bind(*company)
        .bind(*skills)
        .bind(*salary)
        .bind(*link)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!("Seeded jobs table with {} listings", SEED_JOBS.len());
    Ok(SEED_JOBS.len())
}

/// Returns listings whose `skills` contain any of `keywords` (case-insensitive for ASCII),
/// deduplicated and ordered by id.
pub async fn search_jobs(
    pool: &SqlitePool,
    keywords: &[String],
) -> Result<Vec<JobListing>, sqlx::Error> {
    let mut found = BTreeMap::new();
    for keyword in keywords.iter().filter(|k| !k.trim().is_empty()) {
        let pattern = format!("%{}%", escape_like(keyword.trim()));
        let rows: Vec<JobListing> = sqlx::query_as(
            "SELECT id, title, company, skills, salary, link, created_at FROM jobs WHERE skills LIKE ?1 ESCAPE '\\'",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await?;
        for row in rows {
            found.entry(row.id).or_insert(row);
        }
    }
    Ok(found.into_values().collect())
}

pub async fn list_jobs(pool: &SqlitePool) -> Result<Vec<JobListing>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, title, company, skills, salary, link, created_at FROM jobs ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    // A single connection keeps every query on the same in-memory database.
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

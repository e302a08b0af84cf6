//! Database initialization
//!
//! Creates the store file when missing, opens the shared connection and
//! applies both table schemas. Schema failures are logged and reported but
//! never abort startup; the affected table then fails at request time.

use crate::db::models::Table;
use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

/// How long a request waits for the shared connection before failing
///
/// Requests queue behind the single connection; one still waiting after this
/// long fails with `PoolTimedOut` and is reported as a store error.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of the per-table `CREATE TABLE IF NOT EXISTS` pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStatus {
    /// `None` when ready, otherwise the store's error message
    pub submissions: Option<String>,
    pub tag_submissions: Option<String>,
}

impl TableStatus {
    pub fn all_ready(&self) -> bool {
        self.submissions.is_none() && self.tag_submissions.is_none()
    }

    pub fn is_ready(&self, table: Table) -> bool {
        match table {
            Table::Submissions => self.submissions.is_none(),
            Table::TagSubmissions => self.tag_submissions.is_none(),
        }
    }
}

/// Ensure the store file exists, connect, and create both tables if needed
///
/// Connection failures are returned as errors. Table creation failures are
/// captured in the returned [`TableStatus`] instead.
pub async fn init_database(db_path: &Path) -> Result<(SqlitePool, TableStatus)> {
    let newly_created = ensure_database_file(db_path).await?;

    // One connection: every request shares the same store handle
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    let status = create_tables(&pool).await;
    Ok((pool, status))
}

/// Write an empty store file if none exists yet
///
/// Returns `true` when the file was created by this call.
pub async fn ensure_database_file(db_path: &Path) -> Result<bool> {
    if tokio::fs::try_exists(db_path).await? {
        return Ok(false);
    }

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    tokio::fs::write(db_path, b"").await?;
    Ok(true)
}

/// Apply both schemas, each independently
pub async fn create_tables(pool: &SqlitePool) -> TableStatus {
    TableStatus {
        submissions: log_table_result(Table::Submissions, create_submissions_table(pool).await),
        tag_submissions: log_table_result(
            Table::TagSubmissions,
            create_tag_submissions_table(pool).await,
        ),
    }
}

fn log_table_result(table: Table, result: Result<()>) -> Option<String> {
    match result {
        Ok(()) => {
            info!("Table \"{}\" is ready.", table);
            None
        }
        Err(e) => {
            error!("Error creating \"{}\" table: {}", table, e);
            Some(e.to_string())
        }
    }
}

async fn create_submissions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            chname TEXT NOT NULL,
            cpname TEXT NOT NULL,
            name TEXT NOT NULL,
            pnumber TEXT NOT NULL,
            nvcount INTEGER NOT NULL,
            vcount INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_tag_submissions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tag_submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tags TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

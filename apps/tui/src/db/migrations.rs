use color_eyre::Result;
use sqlx::{migrate::MigrateDatabase, query, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// Creates the tables used by the session cache if they don't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(
        "CREATE TABLE IF NOT EXISTS session_cache (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Creates a database connection pool for the given SQLite URL
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!(database_url, "initializing session database");

    let db_path = extract_db_path_from_url(database_url)?;
    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tracing::debug!(path = %parent.display(), "creating database directory");
            std::fs::create_dir_all(parent).map_err(|e| {
                color_eyre::eyre::eyre!("Failed to create database directory: {e}")
            })?;
        }
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Error checking database: {e}"))?;
    if !db_exists {
        tracing::info!(path = %db_path, "creating session database");
        Sqlite::create_database(database_url)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to create SQLite database: {e}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA journal_mode = WAL;").await?;
                conn.execute("PRAGMA synchronous = NORMAL;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to connect to SQLite database: {e}"))?;

    setup_database(&pool)
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to set up database schema: {e}"))?;

    Ok(pool)
}

/// Single-connection in-memory pool with the schema applied
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    setup_database(&pool).await?;
    Ok(pool)
}

/// Helper function to extract the database path from a SQLite URL
fn extract_db_path_from_url(url: &str) -> Result<String> {
    if !url.starts_with("sqlite://") {
        return Err(color_eyre::eyre::eyre!("Not a valid SQLite URL: {url}"));
    }

    let path_part = url.trim_start_matches("sqlite://");

    // Unix-like absolute path: sqlite:///path
    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_and_relative_urls() -> Result<()> {
        assert_eq!(extract_db_path_from_url("sqlite:///tmp/a.db")?, "/tmp/a.db");
        assert_eq!(extract_db_path_from_url("sqlite://a.db")?, "a.db");
        assert!(extract_db_path_from_url("postgres://x").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn schema_setup_is_repeatable() -> Result<(), sqlx::Error> {
        let pool = create_memory_pool().await?;
        setup_database(&pool).await?;
        Ok(())
    }
}

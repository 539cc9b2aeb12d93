use sqlx::{query, query_as, SqlitePool};

use crate::domain::SearchResult;

pub const QUERY_KEY: &str = "q";
pub const RESULTS_KEY: &str = "results";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// What the previous session left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub query: Option<String>,
    pub results: Option<Vec<SearchResult>>,
}

/// Last search query and its results, kept across runs.
#[derive(Debug, Clone)]
pub struct SessionCache {
    pool: SqlitePool,
}

impl SessionCache {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Overwrites both entries.
    pub async fn save(&self, query_text: &str, results: &[SearchResult]) -> Result<(), SessionError> {
        let encoded = serde_json::to_string(results)?;
        let updated = chrono::Utc::now().to_rfc3339();

        let mut tx = self.pool.begin().await?;
        for (key, value) in [(QUERY_KEY, query_text), (RESULTS_KEY, encoded.as_str())] {
            query(
                "INSERT INTO session_cache (key, value, updated) VALUES (?, ?, ?)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
            )
            .bind(key)
            .bind(value)
            .bind(&updated)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(query = query_text, count = results.len(), "session cache saved");
        Ok(())
    }

    /// Saves a completed search unless it came back empty.
    ///
    /// Returns whether the cache was written.
    pub async fn remember(
        &self,
        query_text: &str,
        results: &[SearchResult],
    ) -> Result<bool, SessionError> {
        if results.is_empty() {
            tracing::debug!(query = query_text, "empty result set, cache left untouched");
            return Ok(false);
        }
        self.save(query_text, results).await?;
        Ok(true)
    }

    pub async fn restore(&self) -> Result<SessionSnapshot, SessionError> {
        let rows = query_as::<_, (String, String)>(
            "SELECT key, value FROM session_cache WHERE key IN (?, ?)",
        )
        .bind(QUERY_KEY)
        .bind(RESULTS_KEY)
        .fetch_all(&self.pool)
        .await?;

        let mut snapshot = SessionSnapshot::default();
        for (key, value) in rows {
            match key.as_str() {
                QUERY_KEY => snapshot.query = Some(value),
                RESULTS_KEY => match serde_json::from_str::<Vec<SearchResult>>(&value) {
                    Ok(results) => snapshot.results = Some(results),
                    Err(error) => {
                        tracing::warn!(%error, "discarding unreadable cached results");
                    }
                },
                _ => {}
            }
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::create_memory_pool;

    fn hit(doc_id: &str) -> SearchResult {
        SearchResult {
            doc_id: doc_id.to_string(),
            title: "Title".to_string(),
            url: String::new(),
            year: "2001".to_string(),
            authors: "A. Author".to_string(),
            abstract_text: String::new(),
            score: 1.25,
            pages: 3,
            status: "INFORMATIONAL".to_string(),
            area: String::new(),
            workgroup: String::new(),
            stream: String::new(),
        }
    }

    #[tokio::test]
    async fn fresh_cache_restores_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        assert_eq!(cache.restore().await?, SessionSnapshot::default());
        Ok(())
    }

    #[tokio::test]
    async fn save_then_restore() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        cache.save("tcp", &[hit("RFC0793")]).await?;

        let snapshot = cache.restore().await?;
        assert_eq!(snapshot.query.as_deref(), Some("tcp"));
        assert_eq!(snapshot.results, Some(vec![hit("RFC0793")]));
        Ok(())
    }

    #[tokio::test]
    async fn save_overwrites_previous_entry() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        cache.save("tcp", &[hit("RFC0793")]).await?;
        cache.save("udp", &[hit("RFC0768")]).await?;

        let snapshot = cache.restore().await?;
        assert_eq!(snapshot.query.as_deref(), Some("udp"));
        assert_eq!(snapshot.results, Some(vec![hit("RFC0768")]));
        Ok(())
    }

    #[tokio::test]
    async fn empty_search_leaves_cache_unchanged() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        cache.save("tcp", &[hit("RFC0793")]).await?;
        let before = cache.restore().await?;

        let written = cache.remember("zzzz", &[]).await?;

        assert!(!written);
        assert_eq!(cache.restore().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_results_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let pool = create_memory_pool().await?;
        query("INSERT INTO session_cache (key, value, updated) VALUES ('results', '<p>', 'x')")
            .execute(&pool)
            .await?;

        let snapshot = SessionCache::new(pool).restore().await?;
        assert_eq!(snapshot.results, None);
        Ok(())
    }
}

pub mod http;
pub mod wire;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{SearchResult, TopicSet};
use wire::{SearchResponse, TopicsResponse};

pub use http::HttpBackend;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport or decode failure.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    /// The topics query succeeded but returned nothing usable.
    #[error("no topics found for [{0}]")]
    NoTopics(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Unavailable(error.to_string())
    }
}

/// Raw access to the two backend endpoints.
#[async_trait]
pub trait CorpusBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError>;
    async fn topics(&self, doc_id: &str) -> Result<TopicsResponse, ApiError>;
}

/// Issues queries and turns backend bodies into domain values.
///
/// Calls are one-shot: nothing is retried, cached or deduplicated here.
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn CorpusBackend>,
}

impl ApiClient {
    pub fn new(backend: Arc<dyn CorpusBackend>) -> Self {
        Self { backend }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        tracing::debug!(query, "issuing search");
        match self.backend.search(query).await {
            Ok(response) => Ok(response.results),
            Err(error) => {
                tracing::warn!(%error, "search request failed");
                Err(error)
            }
        }
    }

    pub async fn fetch_topics(&self, doc_id: &str) -> Result<TopicSet, ApiError> {
        tracing::debug!(doc_id, "issuing topics query");
        let response = self.backend.topics(doc_id).await.map_err(|error| {
            tracing::warn!(%error, doc_id, "topics request failed");
            error
        })?;

        let (set, dropped) = response.into_topic_set(doc_id);
        if !dropped.is_empty() {
            tracing::warn!(doc_id, ?dropped, "topic keys missing from words or docs");
        }
        if set.is_empty() {
            return Err(ApiError::NoTopics(doc_id.to_string()));
        }
        Ok(set)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-process backend that replays canned JSON bodies.
    #[derive(Default)]
    pub struct FakeBackend {
        pub search_body: Mutex<Option<String>>,
        pub topics_body: Mutex<Option<String>>,
        pub search_calls: AtomicUsize,
        pub topics_calls: AtomicUsize,
    }

    impl FakeBackend {
        pub fn with_search(body: &str) -> Self {
            let backend = Self::default();
            backend.set_search(body);
            backend
        }

        pub fn with_topics(body: &str) -> Self {
            let backend = Self::default();
            backend.set_topics(body);
            backend
        }

        pub fn set_search(&self, body: &str) {
            if let Ok(mut slot) = self.search_body.lock() {
                *slot = Some(body.to_string());
            }
        }

        pub fn set_topics(&self, body: &str) {
            if let Ok(mut slot) = self.topics_body.lock() {
                *slot = Some(body.to_string());
            }
        }

        fn decode<T: serde::de::DeserializeOwned>(
            slot: &Mutex<Option<String>>,
        ) -> Result<T, ApiError> {
            let body = slot
                .lock()
                .ok()
                .and_then(|body| body.clone())
                .ok_or_else(|| ApiError::Unavailable("connection refused".to_string()))?;
            serde_json::from_str(&body).map_err(|e| ApiError::Unavailable(e.to_string()))
        }
    }

    #[async_trait]
    impl CorpusBackend for FakeBackend {
        async fn search(&self, _query: &str) -> Result<SearchResponse, ApiError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Self::decode(&self.search_body)
        }

        async fn topics(&self, _doc_id: &str) -> Result<TopicsResponse, ApiError> {
            self.topics_calls.fetch_add(1, Ordering::SeqCst);
            Self::decode(&self.topics_body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;

    #[tokio::test]
    async fn empty_topics_map_is_reported_as_no_topics() {
        let client = ApiClient::new(Arc::new(FakeBackend::with_topics(
            r#"{"k": 20, "topics": {}, "words": {}, "docs": {}}"#,
        )));
        let result = client.fetch_topics("RFC1234").await;
        assert_eq!(result, Err(ApiError::NoTopics("RFC1234".to_string())));
    }

    #[tokio::test]
    async fn undecodable_body_is_unavailable() {
        let client = ApiClient::new(Arc::new(FakeBackend::with_search("<html>")));
        let result = client.search("bgp").await;
        assert!(matches!(result, Err(ApiError::Unavailable(_))));
    }

    #[tokio::test]
    async fn search_keeps_backend_ranking() -> Result<(), ApiError> {
        let client = ApiClient::new(Arc::new(FakeBackend::with_search(
            r#"{"results": [
                {"doc-id": "RFC0002", "score": 1.0},
                {"doc-id": "RFC0001", "score": 3.0}
            ]}"#,
        )));
        let results = client.search("").await?;
        let ids: Vec<_> = results.iter().map(|r| r.doc_id.as_str()).collect();
        assert_eq!(ids, vec!["RFC0002", "RFC0001"]);
        Ok(())
    }

    #[tokio::test]
    async fn identical_calls_are_not_deduplicated() -> Result<(), ApiError> {
        let backend = Arc::new(FakeBackend::with_search(r#"{"results": []}"#));
        let client = ApiClient::new(backend.clone());
        client.search("tcp").await?;
        client.search("tcp").await?;
        assert_eq!(
            backend
                .search_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            2
        );
        Ok(())
    }
}

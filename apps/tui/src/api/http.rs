use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::wire::{SearchResponse, TopicsResponse};
use super::{ApiError, CorpusBackend};

/// Backend reached over HTTP (`GET /search`, `GET /topics`).
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).query(params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(ApiError::Unavailable(format!("HTTP {status} from {url}")));
        }

        let body = response.json::<T>().await?;
        Ok(body)
    }
}

#[async_trait]
impl CorpusBackend for HttpBackend {
    async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        self.get("/search", &[("q", query)]).await
    }

    async fn topics(&self, doc_id: &str) -> Result<TopicsResponse, ApiError> {
        self.get("/topics", &[("docid", doc_id)]).await
    }
}

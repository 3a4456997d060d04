use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::error::CatalogError;
use super::types::{
    GenresResponse, ListsResponse, RandomResponse, TitleFilter, TitleInfo, TitleResponse,
    TitlesPage,
};
use super::CatalogApi;
use crate::config::CatalogConfig;

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Keeps error bodies short enough for logs.
const MAX_ERROR_BODY: usize = 512;

/// reqwest-backed [`CatalogApi`].
///
/// Every request carries the configured timeout; timeouts, connection
/// failures, 429 and 5xx responses are retried with exponential backoff.
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    backoff_base: Duration,
}

impl HttpCatalog {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(config.base_url.clone()));
        }

        let mut headers = HeaderMap::new();
        match config.resolve_api_key() {
            Some(key) => {
                let mut value = HeaderValue::from_str(key.expose())
                    .map_err(|_| CatalogError::InvalidHeader(API_KEY_HEADER.to_string()))?;
                value.set_sensitive(true);
                headers.insert(HeaderName::from_static(API_KEY_HEADER), value);
            }
            None => tracing::warn!("No catalog API key configured; requests may be rejected"),
        }
        let host = HeaderValue::from_str(&config.api_host)
            .map_err(|_| CatalogError::InvalidHeader(API_HOST_HEADER.to_string()))?;
        headers.insert(HeaderName::from_static(API_HOST_HEADER), host);

        let timeout = Duration::from_secs(u64::from(config.timeout_seconds));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            base_url,
            timeout,
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.retry_backoff_base_ms),
        })
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        let mut attempt = 0u32;
        loop {
            match self.fetch(&url).await {
                Ok(body) => {
                    return serde_json::from_slice(&body).map_err(|source| CatalogError::Decode {
                        endpoint: url.path().to_string(),
                        source,
                    });
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self
                        .backoff_base
                        .saturating_mul(2u32.saturating_pow(attempt));
                    attempt += 1;
                    tracing::warn!(
                        endpoint = url.path(),
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Catalog request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, CatalogError> {
        tracing::debug!(endpoint = url.path(), query = url.query().unwrap_or(""), "Catalog request");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;

        tracing::trace!(endpoint = url.path(), status = status.as_u16(), bytes = body.len(), "Catalog response");

        if !status.is_success() {
            let text: String = String::from_utf8_lossy(&body)
                .chars()
                .take(MAX_ERROR_BODY)
                .collect();
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(body.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error) -> CatalogError {
        if err.is_timeout() {
            CatalogError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            CatalogError::Connection(err)
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn titles(&self, page: u32, filter: &TitleFilter) -> Result<TitlesPage, CatalogError> {
        let mut query = vec![("page", page.to_string())];
        if let Some(genre) = &filter.genre {
            query.push(("genre", genre.clone()));
        }
        if let Some(list) = &filter.list {
            query.push(("list", list.clone()));
        }
        let url = self.endpoint(&["titles"], &query)?;
        self.get_json(url).await
    }

    async fn title(&self, id: &str) -> Result<TitleInfo, CatalogError> {
        let url = self.endpoint(&["titles", id], &[])?;
        let response: TitleResponse = self.get_json(url).await?;
        response
            .results
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() })
    }

    async fn genres(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint(&["titles", "utils", "genres"], &[])?;
        let response: GenresResponse = self.get_json(url).await?;
        Ok(response.results.into_iter().flatten().collect())
    }

    async fn lists(&self) -> Result<Vec<String>, CatalogError> {
        let url = self.endpoint(&["titles", "utils", "lists"], &[])?;
        let response: ListsResponse = self.get_json(url).await?;
        Ok(response.results)
    }

    async fn random_title(&self) -> Result<TitleInfo, CatalogError> {
        let query = [
            ("titleType", "movie".to_string()),
            ("limit", "1".to_string()),
            ("list", "most_pop_movies".to_string()),
        ];
        let url = self.endpoint(&["titles", "random"], &query)?;
        let endpoint = url.path().to_string();
        let response: RandomResponse = self.get_json(url).await?;
        response
            .results
            .into_iter()
            .next()
            .ok_or(CatalogError::EmptyResult { endpoint })
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<TitlesPage, CatalogError> {
        let url = self.endpoint(
            &["titles", "search", "keyword", keyword],
            &[("page", page.to_string())],
        )?;
        self.get_json(url).await
    }
}

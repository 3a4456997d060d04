//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_catalog;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use movieshelf::catalog::{
    CatalogApi, CatalogError, HttpCatalog, TitleFilter, TitleInfo, TitleText, TitlesPage,
};
use movieshelf::config::CatalogConfig;
use movieshelf::mvi::Subscription;
use parking_lot::Mutex;
use tempfile::TempDir;

use mock_catalog::MockCatalog;

/// How long a test waits for a screen before failing.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Waits until the subscription's state satisfies `done`.
pub async fn settle<S>(subscription: &mut Subscription<S>, done: impl FnMut(&S) -> bool) -> S
where
    S: Clone + Send + Sync + 'static,
{
    tokio::time::timeout(SETTLE_TIMEOUT, subscription.wait_for(done))
        .await
        .expect("screen did not settle in time")
        .expect("container went away")
}

/// Catalog settings pointing at a mock server, with fast retries.
pub fn catalog_config(base_url: &str) -> CatalogConfig {
    CatalogConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
        max_retries: 2,
        retry_backoff_base_ms: 10,
        ..CatalogConfig::default()
    }
}

pub fn http_catalog(server: &MockCatalog) -> Arc<dyn CatalogApi> {
    Arc::new(HttpCatalog::new(&catalog_config(&server.base_url())).expect("valid catalog config"))
}

/// Writes `content` to a config file inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn title(id: &str) -> TitleInfo {
    TitleInfo {
        internal_id: format!("internal-{}", id),
        id: id.to_string(),
        primary_image: None,
        title_type: None,
        title_text: Some(TitleText {
            text: format!("Title {}", id),
        }),
        original_title_text: None,
        release_year: None,
        release_date: None,
    }
}

/// In-process catalog with a switchable failure mode and call log.
#[derive(Default)]
pub struct FakeCatalog {
    failing: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    title_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn title_calls(&self) -> usize {
        self.title_calls.load(Ordering::SeqCst)
    }

    fn call(&self, name: String) -> Result<(), CatalogError> {
        self.calls.lock().push(name);
        if *self.failing.lock() {
            return Err(CatalogError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn titles(&self, page: u32, _filter: &TitleFilter) -> Result<TitlesPage, CatalogError> {
        self.call(format!("titles:{}", page))?;
        Ok(TitlesPage {
            page,
            next: None,
            entries: 1,
            results: vec![title(&format!("tt-page-{}", page))],
        })
    }

    async fn title(&self, id: &str) -> Result<TitleInfo, CatalogError> {
        self.title_calls.fetch_add(1, Ordering::SeqCst);
        self.call(format!("title:{}", id))?;
        Ok(title(id))
    }

    async fn genres(&self) -> Result<Vec<String>, CatalogError> {
        self.call("genres".to_string())?;
        Ok(vec!["Drama".to_string()])
    }

    async fn lists(&self) -> Result<Vec<String>, CatalogError> {
        self.call("lists".to_string())?;
        Ok(vec!["most_pop_movies".to_string()])
    }

    async fn random_title(&self) -> Result<TitleInfo, CatalogError> {
        self.call("random".to_string())?;
        Ok(title("tt-random"))
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<TitlesPage, CatalogError> {
        self.call(format!("search:{}:{}", keyword, page))?;
        Ok(TitlesPage {
            page,
            next: None,
            entries: 1,
            results: vec![title(&format!("tt-{}", keyword))],
        })
    }
}

//! Scripted catalog shared by the screen unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::catalog::{CatalogApi, CatalogError, TitleFilter, TitleInfo, TitleText, TitlesPage};

pub(crate) fn title(id: &str) -> TitleInfo {
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

/// Serves `pages` pages of two titles each for listings and searches.
///
/// The next `fail_next` calls of any kind answer with a 500. A search for
/// `"nothing"` returns an empty page.
pub(crate) struct ScriptedCatalog {
    pages: u32,
    fail_next: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCatalog {
    pub(crate) fn new(pages: u32) -> Self {
        Self {
            pages,
            fail_next: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(self, count: usize) -> Self {
        self.fail_next.store(count, Ordering::SeqCst);
        self
    }

    pub(crate) fn fail_next(&self, count: usize) {
        self.fail_next.store(count, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) -> Result<(), CatalogError> {
        self.calls.lock().push(call);
        let remaining = self.fail_next.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_next.store(remaining - 1, Ordering::SeqCst);
            return Err(CatalogError::Status {
                status: 500,
                body: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    fn page(&self, prefix: &str, page: u32) -> TitlesPage {
        TitlesPage {
            page,
            next: (page < self.pages).then(|| format!("/next?page={}", page + 1)),
            entries: 2,
            results: (0..2).map(|i| title(&format!("{}{}-{}", prefix, page, i))).collect(),
        }
    }
}

#[async_trait]
impl CatalogApi for ScriptedCatalog {
    async fn titles(&self, page: u32, filter: &TitleFilter) -> Result<TitlesPage, CatalogError> {
        let genre = filter.genre.as_deref().unwrap_or("-");
        let list = filter.list.as_deref().unwrap_or("-");
        self.record(format!("titles:{}:{}:{}", page, genre, list))?;
        Ok(self.page(&format!("{}-", genre), page))
    }

    async fn title(&self, id: &str) -> Result<TitleInfo, CatalogError> {
        self.record(format!("title:{}", id))?;
        Ok(title(id))
    }

    async fn genres(&self) -> Result<Vec<String>, CatalogError> {
        self.record("genres".to_string())?;
        Ok(vec!["Comedy".to_string(), "Drama".to_string()])
    }

    async fn lists(&self) -> Result<Vec<String>, CatalogError> {
        self.record("lists".to_string())?;
        Ok(vec!["top_rated_250".to_string()])
    }

    async fn random_title(&self) -> Result<TitleInfo, CatalogError> {
        self.record("random".to_string())?;
        Ok(title("tt-random"))
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<TitlesPage, CatalogError> {
        self.record(format!("search:{}:{}", keyword, page))?;
        if keyword == "nothing" {
            return Ok(TitlesPage::default());
        }
        Ok(self.page(&format!("{}-", keyword), page))
    }
}

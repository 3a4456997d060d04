use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::now_millis;
use super::table::{Record, Rows, Table};
use crate::live::{derive, Live};

/// A search query that returned results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryItem {
    pub id: String,
    pub query: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl SearchHistoryItem {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            query: query.into(),
            created_at: now_millis(),
        }
    }
}

impl Record for SearchHistoryItem {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    /// All entries, newest first.
    fn all(&self) -> Live<Vec<SearchHistoryItem>>;

    fn by_id(&self, id: &str) -> Live<Option<SearchHistoryItem>>;

    async fn insert(&self, item: SearchHistoryItem) -> Result<(), StoreError>;

    async fn update(&self, item: SearchHistoryItem) -> Result<(), StoreError>;

    async fn delete(&self, item: &SearchHistoryItem) -> Result<(), StoreError>;
}

/// Search history kept in a local [`Table`].
pub struct LocalSearchHistory {
    table: Table<SearchHistoryItem>,
}

impl LocalSearchHistory {
    pub const FILE_NAME: &'static str = "search_history.json";

    pub fn in_memory() -> Self {
        Self {
            table: Table::in_memory("search_history"),
        }
    }

    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            table: Table::open("search_history", data_dir.join(Self::FILE_NAME))?,
        })
    }
}

#[async_trait]
impl SearchHistoryRepository for LocalSearchHistory {
    fn all(&self) -> Live<Vec<SearchHistoryItem>> {
        derive(self.table.watch(), |rows: &Rows<SearchHistoryItem>| {
            let mut items = rows.to_vec();
            items.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then_with(|| a.id.cmp(&b.id))
            });
            items
        })
    }

    fn by_id(&self, id: &str) -> Live<Option<SearchHistoryItem>> {
        let id = id.to_string();
        derive(self.table.watch(), move |rows: &Rows<SearchHistoryItem>| {
            rows.iter().find(|item| item.id == id).cloned()
        })
    }

    async fn insert(&self, item: SearchHistoryItem) -> Result<(), StoreError> {
        self.table.insert(item)
    }

    async fn update(&self, item: SearchHistoryItem) -> Result<(), StoreError> {
        self.table.update(item)
    }

    async fn delete(&self, item: &SearchHistoryItem) -> Result<(), StoreError> {
        self.table.delete(&item.id)
    }
}

//! Multi-select set used by list screens.

use crate::store::Record;

/// Selected records in the order they were picked, unique by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Selection<T> {
    /// Adds `item` if absent, removes it if present.
    ///
    /// Returns whether the item is selected afterwards.
    pub fn toggle(&mut self, item: T) -> bool {
        let key = item.key();
        match self.items.iter().position(|selected| selected.key() == key) {
            Some(index) => {
                self.items.remove(index);
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        let key = item.key();
        self.items.iter().any(|selected| selected.key() == key)
    }

    /// Keeps only the entries `keep` accepts.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    /// Empties the selection, returning what was selected.
    pub fn take(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

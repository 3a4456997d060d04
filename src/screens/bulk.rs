use std::future::Future;

use crate::error::AppError;
use crate::store::{Record, StoreError};

/// Deletes every item, reporting the first failure after trying them all.
pub(crate) async fn remove_all<T, F, Fut>(items: Vec<T>, mut delete: F) -> Result<(), AppError>
where
    T: Record,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<(), StoreError>>,
{
    let mut first_error: Option<StoreError> = None;
    for item in items {
        let key = item.key();
        if let Err(err) = delete(item).await {
            tracing::warn!(key = %key, error = %err, "Failed to remove selected entry");
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

//! Recipe search
//!
//! Query construction, the external search client, and the cursor that
//! pages through one fetched batch at a time.

mod cursor;
mod edamam;
mod error;
mod query;
mod types;

pub use cursor::{CursorItem, ResultCursor};
pub use edamam::EdamamClient;
pub use error::{SearchError, SearchErrorKind};
pub use query::SearchQuery;
pub use types::RecipeSummary;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for recipe search backends
#[async_trait]
pub trait RecipeClient: Send + Sync {
    /// Issue one search request. Zero matches is an empty vec, not an error.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, SearchError>;
}

#[async_trait]
impl<T: RecipeClient + ?Sized> RecipeClient for Arc<T> {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, SearchError> {
        (**self).search(query).await
    }
}

/// Logging wrapper for recipe clients
pub struct LoggingClient {
    inner: Arc<dyn RecipeClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn RecipeClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecipeClient for LoggingClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, SearchError> {
        let start = std::time::Instant::now();
        let result = self.inner.search(query).await;
        let duration = start.elapsed();

        match &result {
            Ok(recipes) => {
                tracing::info!(
                    term = %query.term(),
                    duration_ms = %duration.as_millis(),
                    count = recipes.len(),
                    "Recipe search completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    term = %query.term(),
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Recipe search failed"
                );
            }
        }

        result
    }
}

//! Lazily refilled, destructive result cursor

use super::{RecipeClient, RecipeSummary, SearchError, SearchQuery};
use std::collections::VecDeque;

/// Outcome of asking the cursor for the next recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorItem {
    Recipe(RecipeSummary),
    /// Nothing left to serve. `fresh_fetch` is true when the batch was
    /// fetched by this very call, i.e. the search found nothing at all.
    Exhausted { fresh_fetch: bool },
}

/// Serves one fetched batch of results front to back, never repeating.
///
/// A refill happens when the query differs from the one the current batch
/// was fetched for, or when the previous call reported exhaustion.
#[derive(Debug, Default)]
pub struct ResultCursor {
    results: VecDeque<RecipeSummary>,
    query: Option<SearchQuery>,
    exhausted: bool,
}

impl ResultCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn next<C>(
        &mut self,
        client: &C,
        query: &SearchQuery,
    ) -> Result<CursorItem, SearchError>
    where
        C: RecipeClient + ?Sized,
    {
        let fresh_fetch = self.needs_refill(query);
        if fresh_fetch {
            match client.search(query).await {
                Ok(results) => {
                    self.results = results.into();
                    self.query = Some(query.clone());
                    self.exhausted = false;
                }
                Err(e) => {
                    // A failed refill must not leave a batch from another query servable
                    self.invalidate();
                    return Err(e);
                }
            }
        }

        match self.results.pop_front() {
            Some(recipe) => Ok(CursorItem::Recipe(recipe)),
            None => {
                self.exhausted = true;
                Ok(CursorItem::Exhausted { fresh_fetch })
            }
        }
    }

    /// Forget the current batch and query
    pub fn invalidate(&mut self) {
        self.results.clear();
        self.query = None;
        self.exhausted = false;
    }

    #[allow(dead_code)] // Used in tests
    pub fn remaining(&self) -> usize {
        self.results.len()
    }

    fn needs_refill(&self, query: &SearchQuery) -> bool {
        self.exhausted || self.query.as_ref() != Some(query)
    }
}

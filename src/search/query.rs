//! Translation of session filters into search parameters

use crate::filters::{Category, FilterSet};
use std::collections::BTreeMap;
use thiserror::Error;

/// The ingredient term is the only mandatory search field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("at least one ingredient is required")]
pub struct MissingIngredientError;

/// Search request parameters derived from a `FilterSet`.
///
/// Equal filter selections always produce equal queries, which is what the
/// result cursor compares to decide whether to re-fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    term: String,
    /// Only categories with at least one selected token
    filters: BTreeMap<Category, Vec<&'static str>>,
}

impl SearchQuery {
    pub fn build(filters: &FilterSet) -> Result<Self, MissingIngredientError> {
        let term = filters
            .ingredient()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(MissingIngredientError)?;

        let selections: BTreeMap<Category, Vec<&'static str>> = Category::ALL
            .into_iter()
            .filter(|c| !filters.is_empty(*c))
            .map(|c| (c, filters.selected(c).collect()))
            .collect();

        Ok(Self {
            term: term.to_string(),
            filters: selections,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Selected tokens for a category; `None` when the category is omitted
    #[allow(dead_code)] // Used in tests
    pub fn tokens(&self, category: Category) -> Option<&[&'static str]> {
        self.filters.get(&category).map(Vec::as_slice)
    }

    /// Query string pairs: `q` first, then one pair per selected token.
    ///
    /// Credentials and the `type` parameter are added by the client.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("q", self.term.as_str())];
        for (category, tokens) in &self.filters {
            params.extend(tokens.iter().map(|t| (category.api_param(), *t)));
        }
        params
    }
}

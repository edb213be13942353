//! Per-session filter selections
//!
//! A `FilterSet` holds the toggled tokens for each of the five search
//! categories plus the free-text ingredient term.

mod vocabulary;

pub use vocabulary::{vocabulary, VocabEntry};

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// Filter category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Diet,
    Health,
    MealType,
    DishType,
    CuisineType,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Diet,
        Category::Health,
        Category::MealType,
        Category::DishType,
        Category::CuisineType,
    ];

    /// Query parameter name used by the search API
    pub fn api_param(self) -> &'static str {
        match self {
            Category::Diet => "diet",
            Category::Health => "health",
            Category::MealType => "mealType",
            Category::DishType => "dishType",
            Category::CuisineType => "cuisineType",
        }
    }

    pub fn from_api_param(param: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.api_param() == param)
    }

    /// Menu button label
    pub fn label(self) -> &'static str {
        match self {
            Category::Diet => "Diet",
            Category::Health => "Health",
            Category::MealType => "Meal type",
            Category::DishType => "Dish type",
            Category::CuisineType => "Cuisine type",
        }
    }

    /// Heading shown above the category's menu
    pub fn prompt(self) -> &'static str {
        match self {
            Category::Diet => "Choose your diet:",
            Category::Health => "Choose health labels:",
            Category::MealType => "Choose meal type:",
            Category::DishType => "Choose dish type:",
            Category::CuisineType => "Choose cuisine type:",
        }
    }

    pub fn vocabulary(self) -> &'static [VocabEntry] {
        vocabulary(self)
    }

    /// Find a vocabulary entry by its API token
    pub fn lookup(self, token: &str) -> Option<&'static VocabEntry> {
        self.vocabulary().iter().find(|e| e.token == token)
    }

    fn index(self) -> usize {
        match self {
            Category::Diet => 0,
            Category::Health => 1,
            Category::MealType => 2,
            Category::DishType => 3,
            Category::CuisineType => 4,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_param())
    }
}

/// Token outside a category's vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{token:?} is not a valid {category} value")]
pub struct InvalidTokenError {
    pub category: Category,
    pub token: String,
}

/// Selected filter tokens and the ingredient term for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    selections: [BTreeSet<&'static str>; 5],
    ingredient: Option<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `token` in `category`.
    ///
    /// Returns whether the token is selected after the flip.
    pub fn toggle(&mut self, category: Category, token: &str) -> Result<bool, InvalidTokenError> {
        let entry = category.lookup(token).ok_or_else(|| InvalidTokenError {
            category,
            token: token.to_string(),
        })?;

        let set = &mut self.selections[category.index()];
        if set.remove(entry.token) {
            Ok(false)
        } else {
            set.insert(entry.token);
            Ok(true)
        }
    }

    /// Empty every category and forget the ingredient term
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self, category: Category) -> bool {
        self.selections[category.index()].is_empty()
    }

    pub fn is_selected(&self, category: Category, token: &str) -> bool {
        self.selections[category.index()].contains(token)
    }

    /// Selected tokens for a category, in sorted order
    pub fn selected(&self, category: Category) -> impl Iterator<Item = &'static str> + '_ {
        self.selections[category.index()].iter().copied()
    }

    pub fn ingredient(&self) -> Option<&str> {
        self.ingredient.as_deref()
    }

    /// Store the ingredient term verbatim
    pub fn set_ingredient(&mut self, text: impl Into<String>) {
        self.ingredient = Some(text.into());
    }
}

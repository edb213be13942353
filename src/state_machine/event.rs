//! Events that can occur in a chat session

use crate::filters::Category;
use crate::search::{RecipeSummary, SearchErrorKind};

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // User events
    Start {
        first_name: Option<String>,
    },
    MenuSelect(MenuTarget),
    ToggleFilter {
        category: Category,
        token: String,
    },
    TextEntered {
        text: String,
    },
    RequestNextRecipe,
    RequestNewSearch,

    // Search events
    RecipeFetched(FetchOutcome),
}

/// Menu entries reachable from buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Main,
    Ingredients,
    Category(Category),
    Recipe,
}

/// Result of executing `Effect::FetchNextRecipe`
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Served(RecipeSummary),
    Exhausted { fresh_fetch: bool },
    Failed(SearchErrorKind),
}

/// Button payload, decoded once at the transport boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackData {
    MainMenu,
    Ingredients,
    Category(Category),
    Toggle { category: Category, token: String },
    FindRecipe,
    NextRecipe,
    NewSearch,
}

impl From<CallbackData> for Event {
    fn from(data: CallbackData) -> Self {
        match data {
            CallbackData::MainMenu => Event::MenuSelect(MenuTarget::Main),
            CallbackData::Ingredients => Event::MenuSelect(MenuTarget::Ingredients),
            CallbackData::Category(category) => Event::MenuSelect(MenuTarget::Category(category)),
            CallbackData::Toggle { category, token } => Event::ToggleFilter { category, token },
            CallbackData::FindRecipe => Event::MenuSelect(MenuTarget::Recipe),
            CallbackData::NextRecipe => Event::RequestNextRecipe,
            CallbackData::NewSearch => Event::RequestNewSearch,
        }
    }
}

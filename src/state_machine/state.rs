//! Session state types

use crate::filters::{Category, FilterSet};

/// Which menu the chat is currently looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    /// Waiting for the user to type ingredients
    IngredientPrompt,
    CategoryMenu(Category),
    RecipeView,
}

impl Screen {
    /// Short name for logs
    pub fn name(self) -> &'static str {
        match self {
            Screen::MainMenu => "main_menu",
            Screen::IngredientPrompt => "ingredient_prompt",
            Screen::CategoryMenu(_) => "category_menu",
            Screen::RecipeView => "recipe_view",
        }
    }
}

/// Mutable state of one chat session.
///
/// The result cursor is not part of this value: it is owned by the session
/// runtime, which drives it through `Effect::FetchNextRecipe`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub screen: Screen,
    pub filters: FilterSet,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_screen(mut self, screen: Screen) -> Self {
        self.screen = screen;
        self
    }
}

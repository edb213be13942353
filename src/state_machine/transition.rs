//! Pure state transition function

use super::{view, Effect, Event, FetchOutcome, MenuTarget, Screen, SessionState};
use crate::filters::InvalidTokenError;
use crate::search::SearchQuery;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error(transparent)]
    InvalidToken(#[from] InvalidTokenError),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            TransitionError::InvalidToken(_) => "That option is not available here.",
            TransitionError::InvalidTransition(_) => "Please use the menu buttons.",
        }
    }
}

/// Pure transition function
///
/// Given the same state and event it always produces the same result, with
/// no I/O. Recipe fetching is requested through `Effect::FetchNextRecipe`
/// and its outcome comes back as `Event::RecipeFetched`.
pub fn transition(state: &SessionState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state.screen, event) {
        // ============================================================
        // Session reset
        // ============================================================
        (_, Event::Start { first_name }) => {
            let new_state = reset(state);
            let menu = view::main_menu(&new_state.filters);
            Ok(TransitionResult::new(new_state).with_effects([
                Effect::InvalidateCursor,
                Effect::Render(view::greeting(first_name.as_deref())),
                Effect::Render(menu),
            ]))
        }

        (_, Event::RequestNewSearch) => {
            let new_state = reset(state);
            let menu = view::main_menu(&new_state.filters);
            Ok(TransitionResult::new(new_state)
                .with_effect(Effect::InvalidateCursor)
                .with_effect(Effect::Render(menu)))
        }

        // ============================================================
        // Menu navigation
        // ============================================================

        // Browsing back to the main menu keeps the selections
        (_, Event::MenuSelect(MenuTarget::Main)) => {
            let new_state = state.clone().with_screen(Screen::MainMenu);
            let menu = view::main_menu(&new_state.filters);
            Ok(TransitionResult::new(new_state).with_effect(Effect::Render(menu)))
        }

        (_, Event::MenuSelect(MenuTarget::Ingredients)) => Ok(TransitionResult::new(
            state.clone().with_screen(Screen::IngredientPrompt),
        )
        .with_effect(Effect::Render(view::ingredient_prompt()))),

        (_, Event::MenuSelect(MenuTarget::Category(category))) => {
            let new_state = state.clone().with_screen(Screen::CategoryMenu(category));
            let menu = view::category_menu(category, &new_state.filters);
            Ok(TransitionResult::new(new_state).with_effect(Effect::Render(menu)))
        }

        (_, Event::MenuSelect(MenuTarget::Recipe) | Event::RequestNextRecipe) => {
            Ok(request_recipe(state))
        }

        // ============================================================
        // Filter toggles
        // ============================================================
        (Screen::CategoryMenu(open), Event::ToggleFilter { category, token }) if open == category => {
            let mut new_state = state.clone();
            new_state.filters.toggle(category, &token)?;
            let menu = view::category_menu(category, &new_state.filters);
            Ok(TransitionResult::new(new_state).with_effect(Effect::Render(menu)))
        }

        // Toggle for a category that is not open
        (_, Event::ToggleFilter { category, token }) => {
            Err(InvalidTokenError { category, token }.into())
        }

        // ============================================================
        // Ingredient entry
        // ============================================================
        (Screen::IngredientPrompt, Event::TextEntered { text }) => {
            let mut new_state = state.clone().with_screen(Screen::MainMenu);
            new_state.filters.set_ingredient(text);
            let menu = view::main_menu(&new_state.filters);
            Ok(TransitionResult::new(new_state).with_effect(Effect::Render(menu)))
        }

        (screen, Event::TextEntered { .. }) => Err(TransitionError::InvalidTransition(format!(
            "text entered on {}",
            screen.name()
        ))),

        // ============================================================
        // Search results
        // ============================================================
        (Screen::RecipeView, Event::RecipeFetched(outcome)) => {
            let render = match outcome {
                FetchOutcome::Served(recipe) => view::recipe_card(&recipe),
                FetchOutcome::Exhausted { fresh_fetch: true } => view::nothing_found(),
                FetchOutcome::Exhausted { fresh_fetch: false } => view::seen_all(),
                FetchOutcome::Failed(kind) => view::search_failed(kind),
            };
            Ok(TransitionResult::new(state.clone()).with_effect(Effect::Render(render)))
        }

        (screen, Event::RecipeFetched(_)) => Err(TransitionError::InvalidTransition(format!(
            "recipe fetched on {}",
            screen.name()
        ))),
    }
}

/// Back to an empty main menu
fn reset(state: &SessionState) -> SessionState {
    let mut new_state = state.clone().with_screen(Screen::MainMenu);
    new_state.filters.clear();
    new_state
}

/// Build the query and ask for the next recipe, or re-prompt for ingredients
fn request_recipe(state: &SessionState) -> TransitionResult {
    match SearchQuery::build(&state.filters) {
        Ok(query) => TransitionResult::new(state.clone().with_screen(Screen::RecipeView))
            .with_effect(Effect::FetchNextRecipe { query }),
        Err(_) => {
            let new_state = state.clone().with_screen(Screen::MainMenu);
            let menu = view::main_menu(&new_state.filters);
            TransitionResult::new(new_state).with_effects([
                Effect::Render(view::missing_ingredient()),
                Effect::Render(menu),
            ])
        }
    }
}

//! Message and keyboard layouts for each screen

use super::{Button, CallbackData, Keyboard, Render};
use crate::filters::{Category, FilterSet};
use crate::search::{RecipeSummary, SearchErrorKind};

const MAIN_MENU_MESSAGE: &str = "Choose options:";
const INGREDIENT_LABEL_CHARS: usize = 24;
/// Keeps the menu well under Telegram's message length limit
const INGREDIENT_TEXT_CHARS: usize = 200;
/// Vocabularies longer than this are laid out two buttons per row
const SINGLE_COLUMN_MAX: usize = 8;
const SELECTED_MARK: &str = "✔";

fn main_menu_button() -> Button {
    Button::callback("<<Main menu", CallbackData::MainMenu)
}

fn new_search_button() -> Button {
    Button::callback("<< New search", CallbackData::NewSearch)
}

/// Cut `term` to at most `max` characters, marking the cut with an ellipsis
fn shorten(term: &str, max: usize) -> String {
    let mut chars = term.chars();
    let short: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{short}…")
    } else {
        short
    }
}

fn category_button(category: Category, filters: &FilterSet) -> Button {
    let count = filters.selected(category).count();
    let label = if count == 0 {
        category.label().to_string()
    } else {
        format!("{} ({count})", category.label())
    };
    Button::callback(label, CallbackData::Category(category))
}

pub fn greeting(first_name: Option<&str>) -> Render {
    let text = match first_name {
        Some(name) if !name.trim().is_empty() => format!("Hi, {name}!"),
        _ => "Hi!".to_string(),
    };
    Render::text(text, Keyboard::none())
}

pub fn main_menu(filters: &FilterSet) -> Render {
    let ingredient_label = match filters.ingredient() {
        Some(term) if !term.trim().is_empty() => {
            format!("Ingredients: {}", shorten(term, INGREDIENT_LABEL_CHARS))
        }
        _ => "Ingredients (required)".to_string(),
    };

    let keyboard = Keyboard::default()
        .row([
            Button::callback(ingredient_label, CallbackData::Ingredients),
            category_button(Category::Diet, filters),
        ])
        .row([
            category_button(Category::Health, filters),
            category_button(Category::CuisineType, filters),
        ])
        .row([
            category_button(Category::MealType, filters),
            category_button(Category::DishType, filters),
        ])
        .row([Button::callback("Find recipe", CallbackData::FindRecipe)]);

    Render::text(main_menu_text(filters), keyboard)
}

fn main_menu_text(filters: &FilterSet) -> String {
    let mut lines = Vec::new();
    if let Some(term) = filters.ingredient().filter(|t| !t.trim().is_empty()) {
        lines.push(format!("Ingredients: {}", shorten(term, INGREDIENT_TEXT_CHARS)));
    }
    for category in Category::ALL {
        let labels: Vec<&str> = filters
            .selected(category)
            .filter_map(|token| category.lookup(token))
            .map(|entry| entry.label)
            .collect();
        if !labels.is_empty() {
            lines.push(format!("{}: {}", category.label(), labels.join(", ")));
        }
    }
    lines.push(MAIN_MENU_MESSAGE.to_string());
    lines.join("\n")
}

pub fn ingredient_prompt() -> Render {
    Render::text(
        "Enter ingredients you have:",
        Keyboard::default().row([main_menu_button()]),
    )
}

pub fn category_menu(category: Category, filters: &FilterSet) -> Render {
    let buttons: Vec<Button> = category
        .vocabulary()
        .iter()
        .map(|entry| {
            let label = if filters.is_selected(category, entry.token) {
                format!("{}{SELECTED_MARK}", entry.label)
            } else {
                entry.label.to_string()
            };
            Button::callback(
                label,
                CallbackData::Toggle {
                    category,
                    token: entry.token.to_string(),
                },
            )
        })
        .collect();

    let per_row = if buttons.len() > SINGLE_COLUMN_MAX { 2 } else { 1 };
    let mut keyboard = Keyboard::default();
    for chunk in buttons.chunks(per_row) {
        keyboard = keyboard.row(chunk.iter().cloned());
    }
    keyboard = keyboard.row([main_menu_button()]);

    Render::text(category.prompt(), keyboard)
}

pub fn recipe_card(recipe: &RecipeSummary) -> Render {
    Render::Photo {
        image_url: recipe.image_url.clone(),
        caption: recipe.title.clone(),
        keyboard: Keyboard::default()
            .row([Button::url("Go to the recipe", recipe.page_url.clone())])
            .row([
                new_search_button(),
                Button::callback("Another recipe", CallbackData::NextRecipe),
            ]),
    }
}

pub fn nothing_found() -> Render {
    Render::text(
        "Nothing found for your request",
        Keyboard::default().row([new_search_button(), main_menu_button()]),
    )
}

pub fn seen_all() -> Render {
    Render::text(
        "You have seen all dishes for your search",
        Keyboard::default().row([
            new_search_button(),
            Button::callback("Start over", CallbackData::NextRecipe),
        ]),
    )
}

pub fn search_failed(kind: SearchErrorKind) -> Render {
    Render::text(
        kind.user_message(),
        Keyboard::default().row([
            new_search_button(),
            Button::callback("Try again", CallbackData::NextRecipe),
        ]),
    )
}

pub fn missing_ingredient() -> Render {
    Render::text("Enter at least one ingredient!", Keyboard::none())
}

/// Reply to an event that makes no sense on the current screen
pub fn not_available(message: &str) -> Render {
    Render::text(message, Keyboard::default().row([main_menu_button()]))
}

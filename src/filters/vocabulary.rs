//! Fixed selectable values for each filter category
//!
//! Tokens are the exact values accepted by the recipe search API; labels are
//! what the user sees on menu buttons.

use super::Category;

/// A selectable filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabEntry {
    pub label: &'static str,
    pub token: &'static str,
}

const fn entry(label: &'static str, token: &'static str) -> VocabEntry {
    VocabEntry { label, token }
}

const DIETS: &[VocabEntry] = &[
    entry("Balanced diet", "balanced"),
    entry("High-fiber diet", "high-fiber"),
    entry("High-protein diet", "high-protein"),
    entry("Low-carb diet", "low-carb"),
    entry("Low-fat diet", "low-fat"),
    entry("Low-sodium diet", "low-sodium"),
];

const HEALTH: &[VocabEntry] = &[
    entry("Alcohol-free", "alcohol-free"),
    entry("Celery-free", "celery-free"),
    entry("Crustacean-free", "crustacean-free"),
    entry("Dairy-free", "dairy-free"),
    entry("DASH", "DASH"),
    entry("Egg-free", "egg-free"),
    entry("Fish-free", "fish-free"),
    entry("FODMAP-free", "fodmap-free"),
    entry("Gluten-free", "gluten-free"),
    entry("Keto-friendly", "keto-friendly"),
    entry("Kidney-friendly", "kidney-friendly"),
    entry("Kosher", "kosher"),
    entry("Low potassium", "low-potassium"),
    entry("Low sugar", "low-sugar"),
    entry("Mediterranean", "Mediterranean"),
    entry("Mustard-free", "mustard-free"),
    entry("No oil added", "No-oil-added"),
    entry("Paleo", "paleo"),
    entry("Peanut-free", "peanut-free"),
    entry("Pescatarian", "pescatarian"),
    entry("Pork-free", "pork-free"),
    entry("Red-meat-free", "red-meat-free"),
    entry("Sesame-free", "sesame-free"),
    entry("Shellfish-free", "shellfish-free"),
    entry("Soy-free", "soy-free"),
    entry("Sugar-conscious", "sugar-conscious"),
    entry("Tree-nut-free", "tree-nut-free"),
    entry("Vegan", "vegan"),
    entry("Vegetarian", "vegetarian"),
    entry("Wheat-free", "wheat-free"),
];

const MEAL_TYPES: &[VocabEntry] = &[
    entry("Breakfast", "Breakfast"),
    entry("Lunch", "Lunch"),
    entry("Dinner", "Dinner"),
    entry("Snack", "Snack"),
    entry("Teatime", "Teatime"),
];

const DISH_TYPES: &[VocabEntry] = &[
    entry("Biscuits and cookies", "Biscuits and cookies"),
    entry("Bread", "Bread"),
    entry("Cereals", "Cereals"),
    entry("Condiments and sauces", "Condiments and sauces"),
    entry("Desserts", "Desserts"),
    entry("Drinks", "Drinks"),
    entry("Main course", "Main course"),
    entry("Pancake", "Pancake"),
    entry("Preps", "Preps"),
    entry("Preserve", "Preserve"),
    entry("Salad", "Salad"),
    entry("Sandwiches", "Sandwiches"),
    entry("Side dish", "Side dish"),
    entry("Soup", "Soup"),
    entry("Starter", "Starter"),
    entry("Sweets", "Sweets"),
];

const CUISINES: &[VocabEntry] = &[
    entry("American", "American"),
    entry("Asian", "Asian"),
    entry("British", "British"),
    entry("Caribbean", "Caribbean"),
    entry("Central Europe", "Central Europe"),
    entry("Chinese", "Chinese"),
    entry("Eastern Europe", "Eastern Europe"),
    entry("French", "French"),
    entry("Indian", "Indian"),
    entry("Italian", "Italian"),
    entry("Japanese", "Japanese"),
    entry("Kosher", "Kosher"),
    entry("Mediterranean", "Mediterranean"),
    entry("Mexican", "Mexican"),
    entry("Middle Eastern", "Middle Eastern"),
    entry("Nordic", "Nordic"),
    entry("South American", "South American"),
    entry("South East Asian", "South East Asian"),
];

/// Get the vocabulary for a category
pub fn vocabulary(category: Category) -> &'static [VocabEntry] {
    match category {
        Category::Diet => DIETS,
        Category::Health => HEALTH,
        Category::MealType => MEAL_TYPES,
        Category::DishType => DISH_TYPES,
        Category::CuisineType => CUISINES,
    }
}

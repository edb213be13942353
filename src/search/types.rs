//! Normalized recipe data

use serde::{Deserialize, Serialize};

/// One usable search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub title: String,
    pub image_url: String,
    /// Canonical external link to the recipe page
    pub page_url: String,
}

impl RecipeSummary {
    /// Build a summary, or `None` when any field is missing or blank
    pub fn from_parts(
        title: Option<String>,
        image_url: Option<String>,
        page_url: Option<String>,
    ) -> Option<Self> {
        let non_blank = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Some(Self {
            title: non_blank(title)?,
            image_url: non_blank(image_url)?,
            page_url: non_blank(page_url)?,
        })
    }
}

//! Wire encoding for inline button payloads

use crate::filters::Category;
use crate::state_machine::CallbackData;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized callback data: {0:?}")]
pub struct UnknownCallback(pub String);

impl fmt::Display for CallbackData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackData::MainMenu => f.write_str("main"),
            CallbackData::Ingredients => f.write_str("ingr"),
            CallbackData::Category(category) => write!(f, "menu:{}", category.api_param()),
            CallbackData::Toggle { category, token } => {
                write!(f, "toggle:{}:{token}", category.api_param())
            }
            CallbackData::FindRecipe => f.write_str("recipe"),
            CallbackData::NextRecipe => f.write_str("next"),
            CallbackData::NewSearch => f.write_str("new"),
        }
    }
}

impl FromStr for CallbackData {
    type Err = UnknownCallback;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCallback(s.to_string());
        let mut parts = s.splitn(3, ':');
        let head = parts.next().unwrap_or_default();
        let category = parts.next().map(Category::from_api_param);
        let token = parts.next();

        match (head, category, token) {
            ("main", None, None) => Ok(CallbackData::MainMenu),
            ("ingr", None, None) => Ok(CallbackData::Ingredients),
            ("recipe", None, None) => Ok(CallbackData::FindRecipe),
            ("next", None, None) => Ok(CallbackData::NextRecipe),
            ("new", None, None) => Ok(CallbackData::NewSearch),
            ("menu", Some(Some(category)), None) => Ok(CallbackData::Category(category)),
            // Token validity is checked by the filter set, not here
            ("toggle", Some(Some(category)), Some(token)) => Ok(CallbackData::Toggle {
                category,
                token: token.to_string(),
            }),
            _ => Err(unknown()),
        }
    }
}

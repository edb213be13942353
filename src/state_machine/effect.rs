//! Effects produced by state transitions

use crate::search::SearchQuery;
use crate::state_machine::event::CallbackData;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a message to the chat
    Render(Render),

    /// Ask the session's result cursor for the next recipe
    FetchNextRecipe { query: SearchQuery },

    /// Drop the cursor's batch so the next request fetches afresh
    InvalidateCursor,
}

/// A message for the chat transport to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render {
    Text {
        text: String,
        keyboard: Keyboard,
    },
    Photo {
        image_url: String,
        caption: String,
        keyboard: Keyboard,
    },
}

impl Render {
    pub fn text(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Render::Text {
            text: text.into(),
            keyboard,
        }
    }

    pub fn keyboard(&self) -> &Keyboard {
        match self {
            Render::Text { keyboard, .. } | Render::Photo { keyboard, .. } => keyboard,
        }
    }
}

/// Inline keyboard, rows top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn row(mut self, buttons: impl IntoIterator<Item = Button>) -> Self {
        self.rows.push(buttons.into_iter().collect());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    #[allow(dead_code)] // Used in tests
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(label: impl Into<String>, data: CallbackData) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(data),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Callback(CallbackData),
    Url(String),
}

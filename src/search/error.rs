//! Recipe search error types

use thiserror::Error;

/// Search failure with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SearchError {
    pub kind: SearchErrorKind,
    pub message: String,
}

impl SearchError {
    pub fn new(kind: SearchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::Transport, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(SearchErrorKind::MalformedResponse, message)
    }
}

/// Error classification, drives the message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    /// Network issues, timeouts, non-2xx responses
    Transport,
    /// Response body did not have the expected shape
    MalformedResponse,
}

impl SearchErrorKind {
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Transport => "Could not reach the recipe service, please try again.",
            Self::MalformedResponse => "Recipe search is unavailable right now.",
        }
    }
}

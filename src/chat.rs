//! Chat transport boundary
//!
//! Decodes incoming updates into session events and renders outgoing
//! messages for the chat service.

mod callback;
pub mod telegram;

pub use telegram::{run_polling, TelegramTransport};

use std::fmt;

/// Identity of one chat; sessions are keyed by it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

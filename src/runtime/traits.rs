//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the session runtime with mock implementations.

use crate::chat::ChatId;
use crate::state_machine::Render;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Delivery failure reported by a chat transport
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Outbound side of the chat transport
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver one rendered message to a chat
    async fn deliver(&self, chat_id: ChatId, render: &Render) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: ChatTransport + ?Sized> ChatTransport for Arc<T> {
    async fn deliver(&self, chat_id: ChatId, render: &Render) -> Result<(), TransportError> {
        (**self).deliver(chat_id, render).await
    }
}

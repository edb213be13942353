//! Runtime for executing chat sessions
//!
//! Every chat gets its own task and event queue, so events for one chat are
//! handled in order while different chats proceed in parallel.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::SessionRuntime;
pub use traits::*;

/// Type alias for production runtime with trait-object backends
pub type ProductionRuntime = SessionRuntime<dyn RecipeClient, dyn ChatTransport>;

use crate::chat::ChatId;
use crate::search::RecipeClient;
use crate::state_machine::Event;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;

const EVENT_QUEUE_CAPACITY: usize = 32;

/// Manager for all session runtimes
pub struct SessionManager {
    client: Arc<dyn RecipeClient>,
    transport: Arc<dyn ChatTransport>,
    idle_ttl: Duration,
    sessions: Arc<RwLock<HashMap<ChatId, SessionHandle>>>,
}

/// Handle to interact with a running session
#[derive(Clone)]
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<Event>,
    /// Cancelled once the runtime has handled its last event
    stopped: CancellationToken,
}

/// Why an event could not be queued for a chat
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("session for chat {0} is busy, event dropped")]
    Busy(ChatId),
    #[error("session for chat {0} is closed")]
    Closed(ChatId),
}

impl DispatchError {
    fn from_try_send(chat_id: ChatId, e: &TrySendError<Event>) -> Self {
        match e {
            TrySendError::Full(_) => DispatchError::Busy(chat_id),
            TrySendError::Closed(_) => DispatchError::Closed(chat_id),
        }
    }
}

impl SessionManager {
    pub fn new(
        client: Arc<dyn RecipeClient>,
        transport: Arc<dyn ChatTransport>,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            client,
            transport,
            idle_ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get or create a runtime for a chat
    pub async fn get_or_create(&self, chat_id: ChatId) -> SessionHandle {
        {
            let sessions = self.sessions.read().await;
            if let Some(handle) = sessions.get(&chat_id) {
                if !handle.event_tx.is_closed() {
                    return handle.clone();
                }
            }
        }

        let mut sessions = self.sessions.write().await;
        // Another caller may have started it while we waited for the lock
        if let Some(handle) = sessions.get(&chat_id) {
            if !handle.event_tx.is_closed() {
                return handle.clone();
            }
        }

        // Only a closed handle can still be here; its runtime may be draining
        let previous = sessions.get(&chat_id).map(|h| h.stopped.clone());

        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        let runtime: ProductionRuntime = SessionRuntime::new(
            chat_id,
            Arc::clone(&self.client),
            Arc::clone(&self.transport),
            event_rx,
            self.idle_ttl,
        );

        // Start runtime in background; it removes its own handle when done
        let stopped = CancellationToken::new();
        let registry = Arc::clone(&self.sessions);
        let done = stopped.clone();
        tokio::spawn(async move {
            // Replies of an evicted runtime go out before the new one starts
            if let Some(previous) = previous {
                previous.cancelled().await;
            }
            runtime.run().await;
            done.cancel();
            let mut sessions = registry.write().await;
            if sessions
                .get(&chat_id)
                .is_some_and(|h| h.event_tx.is_closed())
            {
                sessions.remove(&chat_id);
            }
        });

        let handle = SessionHandle { event_tx, stopped };
        sessions.insert(chat_id, handle.clone());
        handle
    }

    /// Queue an event for a chat's session, starting one if needed.
    ///
    /// Never waits on the session itself: a chat whose queue is full has the
    /// event dropped so other chats keep being dispatched.
    pub async fn send_event(&self, chat_id: ChatId, event: Event) -> Result<(), DispatchError> {
        let handle = self.get_or_create(chat_id).await;
        let event = match handle.event_tx.try_send(event) {
            Ok(()) => return Ok(()),
            Err(TrySendError::Closed(event)) => event,
            Err(e) => return Err(DispatchError::from_try_send(chat_id, &e)),
        };

        // The session was evicted between lookup and send; start a fresh one
        tracing::debug!(chat_id = %chat_id, "Session closed during send, restarting");
        let handle = self.get_or_create(chat_id).await;
        handle
            .event_tx
            .try_send(event)
            .map_err(|e| DispatchError::from_try_send(chat_id, &e))
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

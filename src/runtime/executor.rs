//! Session runtime executor

use super::traits::ChatTransport;
use crate::chat::ChatId;
use crate::search::{CursorItem, RecipeClient, ResultCursor};
use crate::state_machine::{transition, view, Effect, Event, FetchOutcome, Render, SessionState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runtime for one chat: owns the session state and result cursor and
/// handles that chat's events strictly one at a time.
pub struct SessionRuntime<C, T>
where
    C: RecipeClient + ?Sized + 'static,
    T: ChatTransport + ?Sized + 'static,
{
    chat_id: ChatId,
    state: SessionState,
    cursor: ResultCursor,
    client: Arc<C>,
    transport: Arc<T>,
    event_rx: mpsc::Receiver<Event>,
    /// The runtime stops after this long without events
    idle_ttl: Duration,
}

impl<C, T> SessionRuntime<C, T>
where
    C: RecipeClient + ?Sized + 'static,
    T: ChatTransport + ?Sized + 'static,
{
    pub fn new(
        chat_id: ChatId,
        client: Arc<C>,
        transport: Arc<T>,
        event_rx: mpsc::Receiver<Event>,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            chat_id,
            state: SessionState::new(),
            cursor: ResultCursor::new(),
            client,
            transport,
            event_rx,
            idle_ttl,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub async fn run(mut self) {
        tracing::info!(chat_id = %self.chat_id, "Starting session runtime");

        loop {
            match tokio::time::timeout(self.idle_ttl, self.event_rx.recv()).await {
                Ok(Some(event)) => self.process_event(event).await,
                Ok(None) => break,
                Err(_) => {
                    tracing::info!(chat_id = %self.chat_id, "Session idle, evicting");
                    // Refuse new events, but handle anything already queued
                    self.event_rx.close();
                    while let Some(event) = self.event_rx.recv().await {
                        self.process_event(event).await;
                    }
                    break;
                }
            }
        }

        tracing::info!(chat_id = %self.chat_id, "Session runtime stopped");
    }

    pub(crate) async fn process_event(&mut self, event: Event) {
        // Fetch outcomes are fed back through the transition function
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let result = match transition(&self.state, current_event) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!(
                        chat_id = %self.chat_id,
                        screen = self.state.screen.name(),
                        error = %e,
                        "Rejected event"
                    );
                    self.deliver(&view::not_available(e.user_message())).await;
                    return;
                }
            };

            if result.new_state.screen != self.state.screen {
                tracing::debug!(
                    chat_id = %self.chat_id,
                    from = self.state.screen.name(),
                    to = result.new_state.screen.name(),
                    "Screen change"
                );
            }
            self.state = result.new_state;

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }
    }

    /// Execute an effect and optionally return a generated event
    async fn execute_effect(&mut self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::Render(render) => {
                self.deliver(&render).await;
                None
            }

            Effect::FetchNextRecipe { query } => {
                let outcome = match self.cursor.next(self.client.as_ref(), &query).await {
                    Ok(CursorItem::Recipe(recipe)) => FetchOutcome::Served(recipe),
                    Ok(CursorItem::Exhausted { fresh_fetch }) => {
                        tracing::info!(chat_id = %self.chat_id, fresh_fetch, "No recipe to serve");
                        FetchOutcome::Exhausted { fresh_fetch }
                    }
                    Err(e) => {
                        tracing::warn!(chat_id = %self.chat_id, error = %e, kind = ?e.kind, "Search failed");
                        FetchOutcome::Failed(e.kind)
                    }
                };
                Some(Event::RecipeFetched(outcome))
            }

            Effect::InvalidateCursor => {
                self.cursor.invalidate();
                None
            }
        }
    }

    async fn deliver(&self, render: &Render) {
        if let Err(e) = self.transport.deliver(self.chat_id, render).await {
            tracing::error!(chat_id = %self.chat_id, error = %e, "Failed to deliver message");
        }
    }
}

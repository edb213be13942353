//! Telegram Bot API transport
//!
//! Long-polls `getUpdates`, decodes updates into session events, and
//! delivers rendered messages with inline keyboards.

use super::ChatId;
use crate::runtime::{ChatTransport, SessionManager, TransportError};
use crate::state_machine::{ButtonAction, CallbackData, Event, Keyboard, Render};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 30;
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// Telegram Bot API client
pub struct TelegramTransport {
    client: Client,
    /// `{api_url}/bot{token}`; never logged
    base_url: String,
}

impl TelegramTransport {
    pub fn new(token: &str, api_url: Option<&str>) -> Self {
        let api_url = api_url.unwrap_or(DEFAULT_API_URL).trim_end_matches('/');

        // Must outlive the long-poll timeout
        let client = Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("{api_url}/bot{token}"),
        }
    }

    async fn call<P, R>(&self, method: &str, payload: &P) -> Result<R, TransportError>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(format!("{}/{method}", self.base_url))
            .json(payload)
            .send()
            .await
            // reqwest errors include the URL, which carries the bot token
            .map_err(|e| TransportError::new(format!("{method} failed: {}", e.without_url())))?;

        let status = response.status();
        let envelope: ApiResponse<R> = response.json().await.map_err(|e| {
            TransportError::new(format!("{method}: unreadable response ({status}): {}", e.without_url()))
        })?;

        match envelope {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(TransportError::new(format!(
                "{method} rejected ({status}): {}",
                description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }

    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TransportError> {
        self.call(
            "getUpdates",
            &GetUpdates {
                offset,
                timeout: POLL_TIMEOUT_SECS,
                allowed_updates: &["message", "callback_query"],
            },
        )
        .await
    }

    pub async fn answer_callback(&self, callback_query_id: &str) -> Result<(), TransportError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackQuery { callback_query_id },
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn deliver(&self, chat_id: ChatId, render: &Render) -> Result<(), TransportError> {
        let _: serde_json::Value = match render {
            Render::Text { text, keyboard } => {
                self.call(
                    "sendMessage",
                    &SendMessage {
                        chat_id: chat_id.0,
                        text,
                        reply_markup: inline_markup(keyboard),
                    },
                )
                .await?
            }
            Render::Photo {
                image_url,
                caption,
                keyboard,
            } => {
                self.call(
                    "sendPhoto",
                    &SendPhoto {
                        chat_id: chat_id.0,
                        photo: image_url,
                        caption,
                        reply_markup: inline_markup(keyboard),
                    },
                )
                .await?
            }
        };
        Ok(())
    }
}

/// Poll for updates and dispatch them to sessions until cancelled
pub async fn run_polling(
    transport: Arc<TelegramTransport>,
    sessions: Arc<SessionManager>,
    cancel: CancellationToken,
) {
    let mut offset = 0;
    tracing::info!("Polling for updates");

    loop {
        let updates = tokio::select! {
            biased;

            () = cancel.cancelled() => break,
            result = transport.get_updates(offset) => result,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "Polling failed, backing off");
                tokio::select! {
                    () = cancel.cancelled() => break,
                    () = tokio::time::sleep(POLL_ERROR_BACKOFF) => continue,
                }
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            if let Some(callback) = &update.callback_query {
                if let Err(e) = transport.answer_callback(&callback.id).await {
                    tracing::debug!(error = %e, "Failed to answer callback query");
                }
            }

            let Some((chat_id, event)) = decode_update(update) else {
                continue;
            };
            if let Err(e) = sessions.send_event(chat_id, event).await {
                tracing::warn!(chat_id = %chat_id, error = %e, "Failed to dispatch event");
            }
        }
    }

    tracing::info!("Polling stopped");
}

/// Turn a Telegram update into a session event, if it carries one
pub fn decode_update(update: Update) -> Option<(ChatId, Event)> {
    if let Some(callback) = update.callback_query {
        let chat_id = ChatId(callback.message?.chat.id);
        let data = callback.data?;
        return match data.parse::<CallbackData>() {
            Ok(data) => Some((chat_id, data.into())),
            Err(e) => {
                tracing::warn!(chat_id = %chat_id, error = %e, "Ignoring callback");
                None
            }
        };
    }

    let message = update.message?;
    let chat_id = ChatId(message.chat.id);
    let text = message.text?;

    if let Some(command) = text.strip_prefix('/') {
        let name = command.split_whitespace().next().unwrap_or_default();
        // Commands may be addressed as /start@SomeBot
        if name.split('@').next() == Some("start") {
            return Some((
                chat_id,
                Event::Start {
                    first_name: message.from.map(|u| u.first_name),
                },
            ));
        }
        tracing::debug!(chat_id = %chat_id, command = name, "Ignoring unknown command");
        return None;
    }

    Some((chat_id, Event::TextEntered { text }))
}

fn inline_markup(keyboard: &Keyboard) -> Option<InlineKeyboardMarkup<'_>> {
    if keyboard.is_empty() {
        return None;
    }
    let inline_keyboard = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.action {
                    ButtonAction::Callback(data) => InlineButton {
                        text: &button.label,
                        callback_data: Some(data.to_string()),
                        url: None,
                    },
                    ButtonAction::Url(url) => InlineButton {
                        text: &button.label,
                        callback_data: None,
                        url: Some(url.as_str()),
                    },
                })
                .collect()
        })
        .collect();
    Some(InlineKeyboardMarkup { inline_keyboard })
}

// Telegram API types

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdates<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQuery<'a> {
    callback_query_id: &'a str,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct SendPhoto<'a> {
    chat_id: i64,
    photo: &'a str,
    caption: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup<'a>>,
}

#[derive(Debug, Serialize)]
struct InlineKeyboardMarkup<'a> {
    inline_keyboard: Vec<Vec<InlineButton<'a>>>,
}

#[derive(Debug, Serialize)]
struct InlineButton<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub first_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub message: Option<Message>,
    pub data: Option<String>,
}

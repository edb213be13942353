//! Mock implementations for testing
//!
//! These mocks enable session tests without real I/O.

use super::traits::*;
use crate::chat::ChatId;
use crate::search::{RecipeClient, RecipeSummary, SearchError, SearchQuery};
use crate::state_machine::Render;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A complete summary whose fields derive from `title`
pub fn recipe(title: &str) -> RecipeSummary {
    RecipeSummary {
        title: title.to_string(),
        image_url: format!("https://img.example/{title}.jpg"),
        page_url: format!("https://recipes.example/{title}"),
    }
}

// ============================================================================
// Mock Recipe Client
// ============================================================================

/// Mock recipe client that returns queued responses
#[derive(Default)]
pub struct MockRecipeClient {
    responses: Mutex<VecDeque<Result<Vec<RecipeSummary>, SearchError>>>,
    /// Record of all queries made
    pub queries: Mutex<Vec<SearchQuery>>,
}

#[allow(dead_code)]
impl MockRecipeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful batch
    pub fn queue_results(&self, results: Vec<RecipeSummary>) {
        self.responses.lock().unwrap().push_back(Ok(results));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: SearchError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded queries
    pub fn recorded_queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeClient for MockRecipeClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, SearchError> {
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SearchError::transport("No mock response queued")))
    }
}

/// Recipe client whose searches never complete
pub struct HangingRecipeClient;

#[async_trait]
impl RecipeClient for HangingRecipeClient {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<RecipeSummary>, SearchError> {
        std::future::pending().await
    }
}

// ============================================================================
// Recording Transport
// ============================================================================

/// Transport that records every delivery, optionally failing them
#[derive(Default)]
pub struct RecordingTransport {
    pub deliveries: Mutex<Vec<(ChatId, Render)>>,
    fail: bool,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose deliveries all fail (after being recorded)
    pub fn failing() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn recorded(&self) -> Vec<(ChatId, Render)> {
        self.deliveries.lock().unwrap().clone()
    }

    /// Drain recorded renders for one chat
    pub fn take_for(&self, chat_id: ChatId) -> Vec<Render> {
        let mut deliveries = self.deliveries.lock().unwrap();
        let (mine, rest): (Vec<_>, Vec<_>) = deliveries.drain(..).partition(|(id, _)| *id == chat_id);
        *deliveries = rest;
        mine.into_iter().map(|(_, render)| render).collect()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn deliver(&self, chat_id: ChatId, render: &Render) -> Result<(), TransportError> {
        self.deliveries.lock().unwrap().push((chat_id, render.clone()));
        if self.fail {
            Err(TransportError::new("delivery failed"))
        } else {
            Ok(())
        }
    }
}

/// Message text or photo caption
pub fn render_text(render: &Render) -> &str {
    match render {
        Render::Text { text, .. } => text,
        Render::Photo { caption, .. } => caption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Category;
    use crate::runtime::{DispatchError, SessionHandle, SessionManager, SessionRuntime};
    use crate::search::SearchErrorKind;
    use crate::state_machine::{Event, MenuTarget, Screen};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    const CHAT: ChatId = ChatId(1);

    struct TestSession {
        runtime: SessionRuntime<MockRecipeClient, RecordingTransport>,
        client: Arc<MockRecipeClient>,
        transport: Arc<RecordingTransport>,
        _event_tx: mpsc::Sender<Event>,
    }

    impl TestSession {
        fn new() -> Self {
            Self::with_transport(RecordingTransport::new())
        }

        fn with_transport(transport: RecordingTransport) -> Self {
            let client = Arc::new(MockRecipeClient::new());
            let transport = Arc::new(transport);
            let (event_tx, event_rx) = mpsc::channel(8);
            let runtime = SessionRuntime::new(
                CHAT,
                client.clone(),
                transport.clone(),
                event_rx,
                Duration::from_secs(60),
            );
            Self {
                runtime,
                client,
                transport,
                _event_tx: event_tx,
            }
        }

        async fn send(&mut self, event: Event) -> Vec<String> {
            self.runtime.process_event(event).await;
            self.transport
                .take_for(CHAT)
                .iter()
                .map(|r| render_text(r).to_string())
                .collect()
        }

        fn screen(&self) -> Screen {
            self.runtime.state().screen
        }
    }

    async fn enter_ingredient(session: &mut TestSession, text: &str) {
        session.send(Event::MenuSelect(MenuTarget::Ingredients)).await;
        session.send(Event::TextEntered { text: text.to_string() }).await;
    }

    #[tokio::test]
    async fn test_mock_recipe_client() {
        let mock = MockRecipeClient::new();
        mock.queue_results(vec![recipe("a")]);
        let mut filters = crate::filters::FilterSet::new();
        filters.set_ingredient("x");
        let query = SearchQuery::build(&filters).unwrap();

        assert_eq!(mock.search(&query).await.unwrap(), vec![recipe("a")]);
        assert!(mock.search(&query).await.is_err());
        assert_eq!(mock.recorded_queries().len(), 2);
    }

    #[tokio::test]
    async fn test_pages_through_results_then_refetches() {
        let mut session = TestSession::new();
        session.send(Event::Start { first_name: Some("Ada".into()) }).await;
        enter_ingredient(&mut session, "chicken").await;
        assert_eq!(session.screen(), Screen::MainMenu);

        session
            .client
            .queue_results(vec![recipe("soup"), recipe("salad"), recipe("stew")]);

        assert_eq!(session.send(Event::MenuSelect(MenuTarget::Recipe)).await, vec!["soup"]);
        assert_eq!(session.send(Event::RequestNextRecipe).await, vec!["salad"]);
        assert_eq!(session.send(Event::RequestNextRecipe).await, vec!["stew"]);
        assert_eq!(
            session.send(Event::RequestNextRecipe).await,
            vec!["You have seen all dishes for your search"]
        );
        assert_eq!(session.client.recorded_queries().len(), 1);
        assert_eq!(session.screen(), Screen::RecipeView);

        // Only the term is sent when no filters are selected
        let query = &session.client.recorded_queries()[0];
        assert_eq!(query.params(), vec![("q", "chicken")]);

        session.client.queue_results(vec![recipe("soup")]);
        assert_eq!(session.send(Event::RequestNextRecipe).await, vec!["soup"]);
        assert_eq!(session.client.recorded_queries().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_ingredient_short_circuits() {
        let mut session = TestSession::new();
        session.send(Event::Start { first_name: None }).await;

        let texts = session.send(Event::MenuSelect(MenuTarget::Recipe)).await;
        assert_eq!(texts[0], "Enter at least one ingredient!");
        assert_eq!(session.screen(), Screen::MainMenu);
        assert!(session.client.recorded_queries().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_response_stays_in_recipe_view() {
        let mut session = TestSession::new();
        enter_ingredient(&mut session, "chicken").await;
        session
            .client
            .queue_error(SearchError::malformed("missing field `hits`"));

        let texts = session.send(Event::MenuSelect(MenuTarget::Recipe)).await;
        assert_eq!(texts, vec![SearchErrorKind::MalformedResponse.user_message()]);
        assert_eq!(session.screen(), Screen::RecipeView);

        // Retrying after a failure fetches again
        session.client.queue_results(vec![recipe("soup")]);
        assert_eq!(session.send(Event::RequestNextRecipe).await, vec!["soup"]);
    }

    #[tokio::test]
    async fn test_filter_change_forces_refetch() {
        let mut session = TestSession::new();
        enter_ingredient(&mut session, "rice").await;
        session.client.queue_results(vec![recipe("a"), recipe("b")]);
        session.send(Event::MenuSelect(MenuTarget::Recipe)).await;

        session
            .send(Event::MenuSelect(MenuTarget::Category(Category::Diet)))
            .await;
        session
            .send(Event::ToggleFilter {
                category: Category::Diet,
                token: "low-fat".into(),
            })
            .await;
        session.send(Event::MenuSelect(MenuTarget::Main)).await;

        session.client.queue_results(vec![recipe("x")]);
        assert_eq!(session.send(Event::MenuSelect(MenuTarget::Recipe)).await, vec!["x"]);

        let queries = session.client.recorded_queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].tokens(Category::Diet), Some(&["low-fat"][..]));
    }

    #[tokio::test]
    async fn test_new_search_clears_selection() {
        let mut session = TestSession::new();
        enter_ingredient(&mut session, "rice").await;
        session.client.queue_results(vec![recipe("a"), recipe("b")]);
        session.send(Event::MenuSelect(MenuTarget::Recipe)).await;

        session.send(Event::RequestNewSearch).await;
        assert_eq!(session.screen(), Screen::MainMenu);
        assert_eq!(session.runtime.state().filters.ingredient(), None);

        let texts = session.send(Event::RequestNextRecipe).await;
        assert_eq!(texts[0], "Enter at least one ingredient!");
        assert_eq!(session.client.recorded_queries().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_toggle_renders_notice() {
        let mut session = TestSession::new();
        session
            .send(Event::MenuSelect(MenuTarget::Category(Category::Diet)))
            .await;

        let texts = session
            .send(Event::ToggleFilter {
                category: Category::Health,
                token: "vegan".into(),
            })
            .await;
        assert_eq!(texts, vec!["That option is not available here."]);
        assert_eq!(session.screen(), Screen::CategoryMenu(Category::Diet));
        assert!(session.runtime.state().filters.is_empty(Category::Health));
    }

    #[tokio::test]
    async fn test_delivery_failure_keeps_session_alive() {
        let mut session = TestSession::with_transport(RecordingTransport::failing());
        enter_ingredient(&mut session, "rice").await;
        session.client.queue_results(vec![recipe("a")]);

        let texts = session.send(Event::MenuSelect(MenuTarget::Recipe)).await;
        assert_eq!(texts, vec!["a"]);
        assert_eq!(session.screen(), Screen::RecipeView);
    }

    #[tokio::test]
    async fn test_manager_isolates_chats() {
        let client = Arc::new(MockRecipeClient::new());
        let transport = Arc::new(RecordingTransport::new());
        let manager = SessionManager::new(client.clone(), transport.clone(), Duration::from_secs(60));

        manager.send_event(ChatId(1), Event::MenuSelect(MenuTarget::Ingredients)).await.unwrap();
        manager.send_event(ChatId(2), Event::MenuSelect(MenuTarget::Ingredients)).await.unwrap();
        manager
            .send_event(ChatId(1), Event::TextEntered { text: "rice".into() })
            .await
            .unwrap();

        client.queue_results(vec![]);
        manager.send_event(ChatId(1), Event::MenuSelect(MenuTarget::Recipe)).await.unwrap();
        // Chat 2 never entered an ingredient
        manager.send_event(ChatId(2), Event::MenuSelect(MenuTarget::Recipe)).await.unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while transport.recorded().len() < 6 && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        let chat1: Vec<String> = transport.take_for(ChatId(1)).iter().map(|r| render_text(r).to_string()).collect();
        let chat2: Vec<String> = transport.take_for(ChatId(2)).iter().map(|r| render_text(r).to_string()).collect();
        assert_eq!(chat1.last().map(String::as_str), Some("Nothing found for your request"));
        assert_eq!(chat2[1], "Enter at least one ingredient!");
        assert_eq!(client.recorded_queries().len(), 1);
        assert_eq!(manager.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_idle_session_evicted_and_restarted() {
        let client = Arc::new(MockRecipeClient::new());
        let transport = Arc::new(RecordingTransport::new());
        let manager = SessionManager::new(client, transport.clone(), Duration::from_millis(50));

        manager.send_event(CHAT, Event::MenuSelect(MenuTarget::Ingredients)).await.unwrap();
        manager.send_event(CHAT, Event::TextEntered { text: "rice".into() }).await.unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while manager.session_count().await > 0 && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert_eq!(manager.session_count().await, 0);
        transport.take_for(CHAT);

        // A fresh session has no ingredient
        manager.send_event(CHAT, Event::MenuSelect(MenuTarget::Recipe)).await.unwrap();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while transport.recorded().is_empty() && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(render_text(&transport.recorded()[0].1), "Enter at least one ingredient!");
    }

    async fn wait_for_deliveries(transport: &RecordingTransport, chat_id: ChatId, count: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while transport.recorded().iter().filter(|(id, _)| *id == chat_id).count() < count
            && tokio::time::Instant::now() < deadline
        {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn test_stuck_chat_does_not_block_dispatch() {
        let transport = Arc::new(RecordingTransport::new());
        let manager = SessionManager::new(
            Arc::new(HangingRecipeClient),
            transport.clone(),
            Duration::from_secs(60),
        );
        let stuck = ChatId(1);
        let other = ChatId(2);

        manager.send_event(stuck, Event::MenuSelect(MenuTarget::Ingredients)).await.unwrap();
        manager
            .send_event(stuck, Event::TextEntered { text: "rice".into() })
            .await
            .unwrap();

        // The first request hangs in search; the rest pile up behind it
        let mut dropped = 0;
        for _ in 0..40 {
            let sent = tokio::time::timeout(
                Duration::from_millis(200),
                manager.send_event(stuck, Event::RequestNextRecipe),
            )
            .await
            .expect("dispatch waited on a busy session");
            if sent == Err(DispatchError::Busy(stuck)) {
                dropped += 1;
            }
        }
        assert!(dropped > 0);

        manager.send_event(other, Event::MenuSelect(MenuTarget::Ingredients)).await.unwrap();
        wait_for_deliveries(&transport, other, 1).await;
        assert_eq!(
            render_text(&transport.take_for(other)[0]),
            "Enter ingredients you have:"
        );
    }

    #[tokio::test]
    async fn test_restart_waits_for_evicted_runtime() {
        let client = Arc::new(MockRecipeClient::new());
        let transport = Arc::new(RecordingTransport::new());
        let manager = SessionManager::new(client, transport.clone(), Duration::from_secs(60));

        // A runtime that has closed its queue but is still draining
        let (event_tx, event_rx) = mpsc::channel(1);
        drop(event_rx);
        let draining = CancellationToken::new();
        manager.sessions.write().await.insert(
            CHAT,
            SessionHandle {
                event_tx,
                stopped: draining.clone(),
            },
        );

        manager.send_event(CHAT, Event::MenuSelect(MenuTarget::Ingredients)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(transport.recorded().is_empty());

        draining.cancel();
        wait_for_deliveries(&transport, CHAT, 1).await;
        assert_eq!(
            render_text(&transport.take_for(CHAT)[0]),
            "Enter ingredients you have:"
        );
        assert_eq!(manager.session_count().await, 1);
    }
}

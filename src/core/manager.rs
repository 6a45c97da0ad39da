//! Joke manager
//!
//! Owns the joke lists, the display and the in-flight guard, and orchestrates
//! fetching. One instance is shared by every request handler.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::display::{
    Display, ANY_CATEGORY, COPIED_LABEL, COPY_LABEL, ERROR_TEXT, LOADING_TEXT, NOT_FOUND_TEXT,
};
use super::fetcher::{JokeApiClient, JokeProvider};
use super::keys::{triggers_new_joke, Focus};
use super::normalizer::normalize;
use crate::config::{UserConfig, COPY_FEEDBACK_MS, SIDEBAR_LIMIT};
use crate::models::{Joke, JokeId};
use crate::plugins::{CapabilityError, Clipboard, CommandClipboard, CommandSpeaker, Speaker};
use crate::serializers::{DisplayView, FavoritesView, SidebarView};
use crate::stores::JokeStore;
use crate::utils::threading::{spawn_background, spawn_delayed};

/// How a joke request ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Another request was already in flight; nothing happened
    Skipped,
    Displayed(Joke),
    NotFound,
    Failed,
}

/// Holds the in-flight flag until the fetch task finishes
struct InFlight(Arc<JokeManager>);

impl InFlight {
    fn acquire(manager: &Arc<JokeManager>) -> Option<Self> {
        manager
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(Arc::clone(manager)))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetching.store(false, Ordering::Release);
    }
}

pub struct JokeManager {
    store: RwLock<JokeStore>,
    display: RwLock<Display>,
    category: RwLock<String>,
    fetching: AtomicBool,
    provider: Arc<dyn JokeProvider>,
    clipboard: Arc<dyn Clipboard>,
    speaker: Arc<dyn Speaker>,
}

impl JokeManager {
    /// Create a manager with no clipboard or speech configured
    pub fn new(provider: Arc<dyn JokeProvider>) -> Self {
        Self {
            store: RwLock::new(JokeStore::new()),
            display: RwLock::new(Display::new()),
            category: RwLock::new(ANY_CATEGORY.to_string()),
            fetching: AtomicBool::new(false),
            provider,
            clipboard: Arc::new(CommandClipboard::new(Vec::new())),
            speaker: Arc::new(CommandSpeaker::new(Vec::new())),
        }
    }

    pub fn from_config(config: &UserConfig) -> Self {
        Self::new(Arc::new(JokeApiClient::from_config(config)))
            .with_clipboard(Arc::new(CommandClipboard::new(
                config.clipboard_command.clone(),
            )))
            .with_speaker(Arc::new(CommandSpeaker::new(config.speech_command.clone())))
            .with_category(&config.default_category)
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_speaker(mut self, speaker: Arc<dyn Speaker>) -> Self {
        self.speaker = speaker;
        self
    }

    pub fn with_category(self, category: &str) -> Self {
        self.select_category(category);
        self
    }

    /// Fetch a joke and show it
    ///
    /// Uses the selected category when `category` is `None`. A call made while
    /// another is in flight is dropped before any request goes out. The fetch
    /// runs in its own task, so it completes even if the caller goes away.
    pub async fn request_joke(self: &Arc<Self>, category: Option<&str>) -> FetchOutcome {
        let Some(in_flight) = InFlight::acquire(self) else {
            tracing::debug!("Joke request already in flight, ignoring");
            return FetchOutcome::Skipped;
        };

        self.display.write().set_text(LOADING_TEXT);

        let category = match category {
            Some(c) if !c.trim().is_empty() => c.to_string(),
            Some(_) => ANY_CATEGORY.to_string(),
            None => self.selected_category(),
        };

        let task = spawn_background(async move {
            let outcome = in_flight.0.fetch_and_show(&category).await;
            drop(in_flight);
            outcome
        });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("Joke fetch task failed: {}", e);
                FetchOutcome::Failed
            }
        }
    }

    async fn fetch_and_show(&self, category: &str) -> FetchOutcome {
        let outcome = match self.provider.fetch(category).await {
            Ok(body) => match normalize(Some(&body)) {
                Some(joke) => {
                    tracing::debug!("Fetched joke {} ({})", joke.id, joke.category);
                    self.store.write().push(Some(joke.clone()));
                    self.display.write().show_joke(&joke);
                    FetchOutcome::Displayed(joke)
                }
                None => {
                    tracing::info!("No joke found for category {}", category);
                    self.display.write().set_text(NOT_FOUND_TEXT);
                    FetchOutcome::NotFound
                }
            },
            Err(e) => {
                tracing::warn!("Failed to fetch joke: {}", e);
                self.display.write().set_text(ERROR_TEXT);
                FetchOutcome::Failed
            }
        };

        self.display.write().animate();
        outcome
    }

    /// Run the keyboard shortcut, if the key maps to one
    pub async fn handle_key(self: &Arc<Self>, code: &str, focus: Focus) -> Option<FetchOutcome> {
        if triggers_new_joke(code, focus) {
            Some(self.request_joke(None).await)
        } else {
            None
        }
    }

    pub fn select_category(&self, category: &str) {
        let category = category.trim();
        *self.category.write() = if category.is_empty() {
            ANY_CATEGORY.to_string()
        } else {
            category.to_string()
        };
    }

    pub fn selected_category(&self) -> String {
        self.category.read().clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Display a joke already in the list (or in favorites)
    pub fn show(&self, id: &JokeId) -> Option<Joke> {
        let joke = self.store.read().get(id).cloned()?;
        self.display.write().show_joke(&joke);
        Some(joke)
    }

    /// Toggle favorite on a known joke, returning the new membership
    pub fn toggle_favorite(&self, id: &JokeId) -> Option<bool> {
        let mut store = self.store.write();
        let joke = store.get(id).cloned();
        store.toggle_favorite(joke.as_ref())
    }

    /// Toggle favorite on the joke on screen
    pub fn toggle_current_favorite(&self) -> Option<bool> {
        let current = self.display.read().current().cloned();
        self.store.write().toggle_favorite(current.as_ref())
    }

    /// Copy the displayed text to the clipboard
    pub async fn copy_current(self: &Arc<Self>) -> Result<(), CapabilityError> {
        let text = self.display.read().text().to_string();
        self.clipboard.write_text(&text).await?;

        self.display.write().set_copy_label(COPIED_LABEL);
        let manager = Arc::clone(self);
        spawn_delayed(Duration::from_millis(COPY_FEEDBACK_MS), move || {
            manager.display.write().set_copy_label(COPY_LABEL);
        });

        Ok(())
    }

    /// Read the displayed text aloud
    pub async fn speak_current(&self) -> Result<(), CapabilityError> {
        let text = self.display.read().text().to_string();
        self.speaker.speak(&text).await
    }

    pub fn display_view(&self) -> DisplayView {
        let display = self.display.read();
        let store = self.store.read();
        DisplayView::build(&display, &store, self.is_fetching())
    }

    pub fn sidebar(&self, query: &str) -> SidebarView {
        SidebarView::build(&self.store.read(), query, SIDEBAR_LIMIT)
    }

    pub fn favorites_view(&self) -> FavoritesView {
        FavoritesView::build(&self.store.read())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::fetcher::FetchError;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Semaphore;

    /// Provider that replays canned responses, optionally waiting on a gate
    #[derive(Default)]
    pub(crate) struct FakeProvider {
        responses: Mutex<VecDeque<Result<Value, FetchError>>>,
        categories: Mutex<Vec<String>>,
        calls: AtomicUsize,
        gate: Option<Semaphore>,
    }

    impl FakeProvider {
        pub(crate) fn new(responses: Vec<Result<Value, FetchError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                ..Default::default()
            }
        }

        fn gated(responses: Vec<Result<Value, FetchError>>) -> Self {
            Self {
                gate: Some(Semaphore::new(0)),
                ..Self::new(responses)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JokeProvider for FakeProvider {
        async fn fetch(&self, category: &str) -> Result<Value, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.categories.lock().push(category.to_string());
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
            self.responses
                .lock()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Mutex<Vec<String>>,
        broken: bool,
    }

    #[async_trait]
    impl Clipboard for MemoryClipboard {
        async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
            if self.broken {
                return Err(CapabilityError::Unavailable("clipboard"));
            }
            self.contents.lock().push(text.to_string());
            Ok(())
        }
    }

    pub(crate) fn single(id: i64, text: &str) -> Value {
        json!({"type": "single", "joke": text, "category": "Programming", "id": id})
    }

    fn decode_error() -> FetchError {
        serde_json::from_str::<Value>("{").unwrap_err().into()
    }

    #[tokio::test]
    async fn test_request_displays_and_lists() {
        let provider = Arc::new(FakeProvider::new(vec![Ok(single(1, "A")), Ok(single(2, "B"))]));
        let manager = Arc::new(JokeManager::new(provider.clone()));

        let outcome = manager.request_joke(None).await;
        assert!(matches!(outcome, FetchOutcome::Displayed(ref j) if j.text == "A"));
        manager.request_joke(Some("Pun")).await;

        let view = manager.display_view();
        assert_eq!(view.text, "B");
        assert_eq!(view.category, "Programming");
        assert_eq!(view.transition, 2);
        assert!(!view.fetching);

        let sidebar = manager.sidebar("");
        assert_eq!(sidebar.joke_count, 2);
        assert_eq!(sidebar.items[0].title, "B");
        assert_eq!(*provider.categories.lock(), vec!["Any", "Pun"]);
    }

    #[tokio::test]
    async fn test_request_not_found_and_error() {
        let provider = Arc::new(FakeProvider::new(vec![
            Ok(json!({"error": true, "message": "No matching joke found"})),
            Err(decode_error()),
        ]));
        let manager = Arc::new(JokeManager::new(provider));

        assert_eq!(manager.request_joke(None).await, FetchOutcome::NotFound);
        assert_eq!(manager.display_view().text, "No joke found.");

        assert_eq!(manager.request_joke(None).await, FetchOutcome::Failed);
        let view = manager.display_view();
        assert_eq!(view.text, "Error fetching joke.");
        assert_eq!(view.transition, 2);
        assert!(!manager.is_fetching());
        assert_eq!(manager.sidebar("").joke_count, 0);
    }

    #[tokio::test]
    async fn test_concurrent_request_is_dropped() {
        let provider = Arc::new(FakeProvider::gated(vec![Ok(single(1, "A"))]));
        let manager = Arc::new(JokeManager::new(provider.clone()));

        let first = {
            let manager = Arc::clone(&manager);
            tokio::spawn(async move { manager.request_joke(None).await })
        };
        while provider.calls() == 0 {
            tokio::task::yield_now().await;
        }

        assert!(manager.is_fetching());
        assert_eq!(manager.display_view().text, "Loading...");

        assert_eq!(manager.request_joke(None).await, FetchOutcome::Skipped);
        assert_eq!(provider.calls(), 1);
        assert_eq!(manager.display_view().transition, 0);

        provider.gate.as_ref().unwrap().add_permits(1);
        assert!(matches!(first.await.unwrap(), FetchOutcome::Displayed(_)));
        assert!(!manager.is_fetching());
        assert_eq!(manager.display_view().transition, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_caller_still_completes_fetch() {
        let provider = Arc::new(FakeProvider::gated(vec![Ok(single(3, "C"))]));
        let manager = Arc::new(JokeManager::new(provider.clone()));

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), manager.request_joke(None)).await;
        assert!(abandoned.is_err());
        assert_eq!(manager.display_view().text, "Loading...");
        assert!(manager.is_fetching());

        provider.gate.as_ref().unwrap().add_permits(1);
        while manager.is_fetching() {
            tokio::task::yield_now().await;
        }

        let view = manager.display_view();
        assert_eq!(view.text, "C");
        assert_eq!(view.transition, 1);
        assert_eq!(manager.sidebar("").joke_count, 1);
    }

    #[tokio::test]
    async fn test_selected_category_is_used() {
        let provider = Arc::new(FakeProvider::new(vec![]));
        let manager = Arc::new(JokeManager::new(provider.clone()).with_category("Dark"));

        manager.request_joke(None).await;
        manager.select_category("  ");
        manager.request_joke(None).await;
        manager.request_joke(Some("")).await;

        assert_eq!(*provider.categories.lock(), vec!["Dark", "Any", "Any"]);
    }

    #[tokio::test]
    async fn test_show_and_favorite() {
        let provider = Arc::new(FakeProvider::new(vec![Ok(single(1, "A")), Ok(single(2, "B"))]));
        let manager = Arc::new(JokeManager::new(provider));
        manager.request_joke(None).await;
        manager.request_joke(None).await;

        let shown = manager.show(&JokeId::Remote(1)).unwrap();
        assert_eq!(shown.text, "A");
        assert_eq!(manager.display_view().text, "A");
        assert!(manager.show(&JokeId::Remote(99)).is_none());

        assert_eq!(manager.toggle_current_favorite(), Some(true));
        assert_eq!(manager.display_view().favorite_label, "Saved");
        assert_eq!(manager.toggle_favorite(&JokeId::Remote(2)), Some(true));
        assert_eq!(manager.favorites_view().count, 2);

        assert_eq!(manager.toggle_favorite(&JokeId::Remote(1)), Some(false));
        assert_eq!(manager.toggle_favorite(&JokeId::Remote(99)), None);
        assert_eq!(manager.display_view().favorite_label, "Save");
    }

    #[tokio::test]
    async fn test_toggle_current_without_joke() {
        let manager = JokeManager::new(Arc::new(FakeProvider::default()));
        assert_eq!(manager.toggle_current_favorite(), None);
    }

    #[tokio::test]
    async fn test_keys() {
        let provider = Arc::new(FakeProvider::new(vec![Ok(single(1, "A"))]));
        let manager = Arc::new(JokeManager::new(provider.clone()));

        assert!(manager.handle_key("Space", Focus::Input).await.is_none());
        assert!(manager.handle_key("KeyJ", Focus::Page).await.is_none());
        assert_eq!(provider.calls(), 0);

        let outcome = manager.handle_key("Space", Focus::Page).await;
        assert!(matches!(outcome, Some(FetchOutcome::Displayed(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_feedback() {
        let provider = Arc::new(FakeProvider::new(vec![Ok(single(1, "A"))]));
        let clipboard = Arc::new(MemoryClipboard::default());
        let manager = Arc::new(JokeManager::new(provider).with_clipboard(clipboard.clone()));
        manager.request_joke(None).await;

        manager.copy_current().await.unwrap();
        assert_eq!(*clipboard.contents.lock(), vec!["A"]);
        assert_eq!(manager.display_view().copy_label, "Copied");

        tokio::time::sleep(Duration::from_millis(1300)).await;
        assert_eq!(manager.display_view().copy_label, "Copy");
    }

    #[tokio::test]
    async fn test_copy_failure_changes_nothing() {
        let clipboard = Arc::new(MemoryClipboard {
            broken: true,
            ..Default::default()
        });
        let manager =
            Arc::new(JokeManager::new(Arc::new(FakeProvider::default())).with_clipboard(clipboard));

        assert!(manager.copy_current().await.is_err());
        assert_eq!(manager.display_view().copy_label, "Copy");
    }
}

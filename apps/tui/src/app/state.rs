use std::sync::Mutex;
use std::time::{Duration, Instant};

use ratatui::style::Color;
use tachyonfx::{fx, Effect, Interpolation};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiClient, ApiError};
use crate::app::requests::{ApiEvent, RequestKind, RequestTracker};
use crate::app::view::{NavigationError, ViewState};
use crate::charts::TopicCharts;
use crate::db::SessionCache;
use crate::domain::{Panel, SearchResult, TopicSet};
use crate::results::{self, DisplayFragment, Notice, ResultsView, ScoreLabel};

const TOPIC_FADE_MS: u32 = 450;

/// What the Topics panel is showing.
#[derive(Debug)]
pub enum TopicsView {
    Idle,
    Loading { doc_id: String },
    Loaded(LoadedTopics),
    Failed(Notice),
}

#[derive(Debug)]
pub struct LoadedTopics {
    pub set: TopicSet,
    pub charts: TopicCharts,
    /// Document fragments per topic, aligned with `set.topics`.
    pub docs: Vec<Vec<DisplayFragment>>,
}

impl LoadedTopics {
    fn new(set: TopicSet, animation: Duration, now: Instant) -> Self {
        let charts = TopicCharts::build(&set, animation, now);
        let docs = set
            .topics
            .iter()
            .map(|topic| results::render(&topic.docs, ScoreLabel::TopicCoverage))
            .collect();
        Self { set, charts, docs }
    }

    pub fn selected_docs(&self) -> &[DisplayFragment] {
        self.charts
            .selected_index()
            .and_then(|index| self.docs.get(index))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

pub struct App {
    pub running: bool,
    pub view: ViewState,
    pub query_input: String,
    /// Keystrokes go to the query box.
    pub query_focused: bool,
    pub results: ResultsView,
    pub selected_result_index: usize,
    pub topics: TopicsView,
    pub status_message: String,
    pub show_help: bool,
    pub animation: Duration,
    pub last_frame: Instant,
    pub last_tick: Duration,
    pub topic_fx: Mutex<Option<Effect>>,
    api: ApiClient,
    session: Option<SessionCache>,
    requests: RequestTracker,
    events: UnboundedSender<ApiEvent>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("running", &self.running)
            .field("view", &self.view)
            .field("query_input", &self.query_input)
            .field("results", &self.results)
            .field("topics", &self.topics)
            .field("status_message", &self.status_message)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(
        api: ApiClient,
        page_url: Option<&str>,
        animation: Duration,
    ) -> (Self, UnboundedReceiver<ApiEvent>) {
        let (events, receiver) = unbounded_channel();
        let app = Self {
            running: true,
            view: ViewState::new(page_url),
            query_input: String::new(),
            query_focused: true,
            results: ResultsView::Blank,
            selected_result_index: 0,
            topics: TopicsView::Idle,
            status_message: String::new(),
            show_help: false,
            animation,
            last_frame: Instant::now(),
            last_tick: Duration::ZERO,
            topic_fx: Mutex::new(None),
            api,
            session: None,
            requests: RequestTracker::default(),
            events,
        };
        (app, receiver)
    }

    pub fn attach_session(&mut self, cache: SessionCache) {
        self.session = Some(cache);
    }

    /// Loads the previous query and results without asking the backend.
    pub async fn restore_session(&mut self) {
        let Some(cache) = &self.session else {
            return;
        };
        match cache.restore().await {
            Ok(snapshot) => {
                if let Some(query) = snapshot.query {
                    self.query_input = query;
                }
                if let Some(cached) = snapshot.results.filter(|r| !r.is_empty()) {
                    tracing::info!(count = cached.len(), "restored cached results");
                    self.results = ResultsView::from_results(&cached, ScoreLabel::Score);
                    self.selected_result_index = 0;
                }
            }
            Err(error) => {
                tracing::warn!(%error, "could not restore session cache");
            }
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.last_tick = now.duration_since(self.last_frame);
        self.last_frame = now;
    }

    /// The Results region leaves its compact layout once it has fragments.
    pub const fn results_layout_large(&self) -> bool {
        self.results.is_large()
    }

    pub fn submit_search(&mut self) -> u64 {
        let seq = self.requests.issue(RequestKind::Search);
        let query = self.query_input.clone();
        let api = self.api.clone();
        let events = self.events.clone();
        self.status_message = format!("Searching for \"{query}\"...");

        tokio::spawn(async move {
            let outcome = api.search(&query).await;
            let _ = events.send(ApiEvent::Search {
                seq,
                query,
                outcome,
            });
        });
        seq
    }

    pub fn navigate(&mut self, target: Panel) -> Result<(), NavigationError> {
        let step = match self.view.navigate(target) {
            Ok(step) => step,
            Err(error) => {
                self.status_message = error.to_string();
                return Err(error);
            }
        };
        self.query_focused = step.to == Panel::Search;
        if step.fetch_topics {
            self.start_topics_fetch();
        } else if step.to == Panel::Topics {
            // Coming back replays the visible chart's entrance.
            self.change_topic(|charts, now| {
                charts
                    .selected_index()
                    .is_some_and(|index| charts.select_index(index, now))
            });
        }
        Ok(())
    }

    pub fn next_panel(&mut self) {
        let target = self.view.next_panel();
        let _ = self.navigate(target);
    }

    pub fn previous_panel(&mut self) {
        let target = self.view.previous_panel();
        let _ = self.navigate(target);
    }

    fn start_topics_fetch(&mut self) {
        let Some(doc_id) = self.view.current_doc_id.clone() else {
            return;
        };
        let seq = self.requests.issue(RequestKind::Topics);
        let api = self.api.clone();
        let events = self.events.clone();
        self.topics = TopicsView::Loading {
            doc_id: doc_id.clone(),
        };

        tokio::spawn(async move {
            let outcome = api.fetch_topics(&doc_id).await;
            let _ = events.send(ApiEvent::Topics {
                seq,
                doc_id,
                outcome,
            });
        });
    }

    /// Applies a completed request. Completions of superseded requests are dropped.
    pub async fn apply(&mut self, event: ApiEvent) {
        if !self.requests.is_current(&event) {
            tracing::debug!(
                kind = ?event.kind(),
                seq = event.seq(),
                latest = self.requests.latest(event.kind()),
                "discarding stale completion"
            );
            return;
        }

        match event {
            ApiEvent::Search { query, outcome, .. } => self.apply_search(&query, outcome).await,
            ApiEvent::Topics { outcome, .. } => self.apply_topics(outcome),
        }
    }

    async fn apply_search(&mut self, query: &str, outcome: Result<Vec<SearchResult>, ApiError>) {
        self.selected_result_index = 0;
        match outcome {
            Ok(found) => {
                self.results = ResultsView::from_results(&found, ScoreLabel::Score);
                self.status_message = format!("{} result(s) for \"{query}\"", found.len());
                if let Some(cache) = &self.session {
                    if let Err(error) = cache.remember(query, &found).await {
                        tracing::warn!(%error, "could not save session cache");
                    }
                }
            }
            Err(error) => {
                tracing::error!(%error, "API request failed");
                self.results = ResultsView::Notice(Notice::BackendUnavailable);
                self.status_message.clear();
            }
        }
    }

    fn apply_topics(&mut self, outcome: Result<TopicSet, ApiError>) {
        match outcome {
            Ok(set) => {
                let loaded = LoadedTopics::new(set, self.animation, Instant::now());
                self.view
                    .mark_topics_fetched(loaded.charts.selected_key());
                self.topics = TopicsView::Loaded(loaded);
                self.restart_topic_fx();
            }
            Err(ApiError::NoTopics(doc_id)) => {
                self.topics = TopicsView::Failed(Notice::NoTopics(doc_id));
            }
            Err(error) => {
                tracing::error!(%error, "API request failed");
                self.topics = TopicsView::Failed(Notice::BackendUnavailable);
            }
        }
    }

    pub fn loaded_topics(&self) -> Option<&LoadedTopics> {
        match &self.topics {
            TopicsView::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn select_topic_index(&mut self, index: usize) -> bool {
        self.change_topic(|charts, now| charts.select_index(index, now))
    }

    pub fn next_topic(&mut self) -> bool {
        self.change_topic(TopicCharts::select_next)
    }

    pub fn previous_topic(&mut self) -> bool {
        self.change_topic(TopicCharts::select_previous)
    }

    fn change_topic(&mut self, select: impl FnOnce(&mut TopicCharts, Instant) -> bool) -> bool {
        let TopicsView::Loaded(loaded) = &mut self.topics else {
            return false;
        };
        if !select(&mut loaded.charts, Instant::now()) {
            return false;
        }
        self.view.selected_topic_key = loaded.charts.selected_key().map(str::to_string);
        self.restart_topic_fx();
        true
    }

    fn restart_topic_fx(&self) {
        if let Ok(mut slot) = self.topic_fx.lock() {
            *slot = Some(fx::fade_from_fg(
                Color::Black,
                (TOPIC_FADE_MS, Interpolation::QuadOut),
            ));
        }
    }

    pub fn select_previous_result(&mut self, step: usize) {
        self.selected_result_index = self.selected_result_index.saturating_sub(step);
    }

    pub fn select_next_result(&mut self, step: usize) {
        let count = self.results.fragments().len();
        if count > 0 {
            self.selected_result_index = (self.selected_result_index + step).min(count - 1);
        }
    }

    pub fn select_last_result(&mut self) {
        self.selected_result_index = self.results.fragments().len().saturating_sub(1);
    }

    pub fn selected_fragment(&self) -> Option<&DisplayFragment> {
        self.results.fragments().get(self.selected_result_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeBackend;
    use crate::db::create_memory_pool;
    use std::sync::Arc;

    const RFC_PAGE: &str = "https://www.rfc-editor.org/rfc/rfc1234.html";
    const ONE_HIT: &str = r#"{"results": [{"doc-id": "RFC1234", "title": "X", "url": "u",
        "year": "1991", "authors": "A", "abstract": "", "score": 0.9123, "pages": 10,
        "status": "RFC", "area": "", "wg": "", "stream": ""}]}"#;
    const TWO_TOPICS: &str = r#"{"k": 2,
        "topics": {"t0": 0.6, "t1": 0.4},
        "words": {"t0": [{"word": "a", "p": 0.1}], "t1": [{"word": "b", "p": 0.2}]},
        "docs": {"t0": [{"doc-id": "RFC0001", "score": 0.5}], "t1": []}}"#;

    fn app_with(backend: Arc<FakeBackend>, page: Option<&str>) -> (App, UnboundedReceiver<ApiEvent>) {
        App::new(ApiClient::new(backend), page, Duration::from_millis(2000))
    }

    async fn complete(app: &mut App, events: &mut UnboundedReceiver<ApiEvent>) {
        if let Some(event) = events.recv().await {
            app.apply(event).await;
        }
    }

    #[tokio::test]
    async fn search_success_renders_and_caches() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        let (mut app, mut events) = app_with(Arc::new(FakeBackend::with_search(ONE_HIT)), None);
        app.attach_session(cache.clone());

        app.query_input = "quantum".to_string();
        app.submit_search();
        complete(&mut app, &mut events).await;

        assert!(app.results_layout_large());
        assert_eq!(app.results.fragments().len(), 1);
        let snapshot = cache.restore().await?;
        assert_eq!(snapshot.query.as_deref(), Some("quantum"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_search_shows_notice_and_keeps_cache() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        let backend = Arc::new(FakeBackend::with_search(ONE_HIT));
        let (mut app, mut events) = app_with(backend.clone(), None);
        app.attach_session(cache.clone());

        app.query_input = "quantum".to_string();
        app.submit_search();
        complete(&mut app, &mut events).await;
        let before = cache.restore().await?;

        backend.set_search(r#"{"results": []}"#);
        app.query_input = "qqqq".to_string();
        app.submit_search();
        complete(&mut app, &mut events).await;

        assert_eq!(app.results, ResultsView::Notice(Notice::NoResults));
        assert!(!app.results_layout_large());
        assert_eq!(cache.restore().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn backend_failure_is_a_notice() {
        let (mut app, mut events) = app_with(Arc::new(FakeBackend::default()), None);
        app.submit_search();
        complete(&mut app, &mut events).await;
        assert_eq!(app.results, ResultsView::Notice(Notice::BackendUnavailable));
        assert!(app.running);
    }

    #[tokio::test]
    async fn stale_search_completion_is_ignored() {
        let (mut app, _events) = app_with(Arc::new(FakeBackend::default()), None);
        let first = app.submit_search();
        let second = app.submit_search();

        app.apply(ApiEvent::Search {
            seq: second,
            query: "new".to_string(),
            outcome: Ok(Vec::new()),
        })
        .await;
        app.apply(ApiEvent::Search {
            seq: first,
            query: "old".to_string(),
            outcome: Err(ApiError::Unavailable("late".to_string())),
        })
        .await;

        assert_eq!(app.results, ResultsView::Notice(Notice::NoResults));
    }

    #[tokio::test]
    async fn topics_fetched_once_and_first_selected() -> Result<(), NavigationError> {
        let backend = Arc::new(FakeBackend::with_topics(TWO_TOPICS));
        let (mut app, mut events) = app_with(backend.clone(), Some(RFC_PAGE));

        app.navigate(Panel::Topics)?;
        assert!(matches!(app.topics, TopicsView::Loading { .. }));
        complete(&mut app, &mut events).await;

        assert!(app.view.topics_fetched);
        assert_eq!(app.view.selected_topic_key.as_deref(), Some("t0"));
        let docs = app.loaded_topics().map(|t| t.selected_docs().len());
        assert_eq!(docs, Some(1));

        app.navigate(Panel::Search)?;
        app.navigate(Panel::Topics)?;
        assert!(app.loaded_topics().is_some());
        assert_eq!(
            backend.topics_calls.load(std::sync::atomic::Ordering::SeqCst),
            1
        );
        Ok(())
    }

    #[tokio::test]
    async fn switching_topics_updates_view_state() -> Result<(), NavigationError> {
        let (mut app, mut events) =
            app_with(Arc::new(FakeBackend::with_topics(TWO_TOPICS)), Some(RFC_PAGE));
        app.navigate(Panel::Topics)?;
        complete(&mut app, &mut events).await;

        assert!(app.next_topic());
        assert_eq!(app.view.selected_topic_key.as_deref(), Some("t1"));
        assert_eq!(app.loaded_topics().map(|t| t.selected_docs().len()), Some(0));
        assert!(!app.select_topic_index(5));
        assert_eq!(app.loaded_topics().map(|t| t.charts.len()), Some(2));
        Ok(())
    }

    #[tokio::test]
    async fn empty_topic_set_shows_no_topics_notice() -> Result<(), NavigationError> {
        let (mut app, mut events) = app_with(
            Arc::new(FakeBackend::with_topics(
                r#"{"k": 20, "topics": {}, "words": {}, "docs": {}}"#,
            )),
            Some(RFC_PAGE),
        );
        app.navigate(Panel::Topics)?;
        complete(&mut app, &mut events).await;

        assert!(matches!(
            &app.topics,
            TopicsView::Failed(Notice::NoTopics(doc)) if doc == "RFC1234"
        ));
        assert!(!app.view.topics_fetched);
        Ok(())
    }

    #[tokio::test]
    async fn restore_populates_results_without_backend() -> Result<(), Box<dyn std::error::Error>> {
        let cache = SessionCache::new(create_memory_pool().await?);
        let hit: crate::api::wire::SearchResponse = serde_json::from_str(ONE_HIT)?;
        cache.save("quantum", &hit.results).await?;

        let backend = Arc::new(FakeBackend::default());
        let (mut app, _events) = app_with(backend.clone(), None);
        app.attach_session(cache);
        app.restore_session().await;

        assert_eq!(app.query_input, "quantum");
        assert!(app.results_layout_large());
        assert_eq!(
            backend.search_calls.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
        Ok(())
    }
}

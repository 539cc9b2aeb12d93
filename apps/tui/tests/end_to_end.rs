use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rfc_finder::api::wire::{SearchResponse, TopicsResponse};
use rfc_finder::api::{ApiClient, ApiError, CorpusBackend};
use rfc_finder::app::{App, TopicsView};
use rfc_finder::domain::Panel;
use rfc_finder::results::{Notice, ResultsView};

const RFC_PAGE: &str = "https://www.rfc-editor.org/rfc/rfc1234.html";
const ANIMATION: Duration = Duration::from_millis(2000);

/// Backend that answers every call with a fixed body.
struct ScriptedBackend {
    search: Option<&'static str>,
    topics: Option<&'static str>,
}

fn decode<T: serde::de::DeserializeOwned>(body: Option<&str>) -> Result<T, ApiError> {
    let body = body.ok_or_else(|| ApiError::Unavailable("connection refused".to_string()))?;
    serde_json::from_str(body).map_err(|e| ApiError::Unavailable(e.to_string()))
}

#[async_trait]
impl CorpusBackend for ScriptedBackend {
    async fn search(&self, _query: &str) -> Result<SearchResponse, ApiError> {
        decode(self.search)
    }

    async fn topics(&self, _doc_id: &str) -> Result<TopicsResponse, ApiError> {
        decode(self.topics)
    }
}

fn client(search: Option<&'static str>, topics: Option<&'static str>) -> ApiClient {
    ApiClient::new(Arc::new(ScriptedBackend { search, topics }))
}

#[tokio::test]
async fn quantum_search_renders_one_fragment() {
    let api = client(
        Some(
            r#"{"results": [{"doc-id": "RFC1234", "title": "X", "url": "https://www.rfc-editor.org/rfc/rfc1234.html",
            "year": "1991", "authors": "A. Author", "abstract": "", "score": 0.9123, "pages": 10,
            "status": "RFC", "area": "", "wg": "", "stream": ""}]}"#,
        ),
        None,
    );
    let (mut app, mut events) = App::new(api, None, ANIMATION);

    app.query_input = "quantum".to_string();
    app.submit_search();
    let event = events.recv().await.expect("search completion");
    app.apply(event).await;

    let fragments = app.results.fragments();
    assert_eq!(fragments.len(), 1);
    let fragment = &fragments[0];
    assert_eq!(fragment.heading, "[RFC1234] X");
    assert_eq!(fragment.byline, "1991    A. Author");
    assert_eq!(fragment.abstract_line, None);
    assert_eq!(fragment.meta_line(), "score: 0.9123    10 pp.    status: rfc");
    assert!(app.results_layout_large());
}

#[tokio::test]
async fn two_topics_animate_only_the_selected_chart() {
    let api = client(
        None,
        Some(
            r#"{"k": 2,
            "topics": {"t0": 0.6, "t1": 0.4},
            "words": {
                "t0": [{"word": "packet", "p": 0.05}, {"word": "route", "p": 0.2}],
                "t1": [{"word": "key", "p": 0.3}]
            },
            "docs": {"t0": [], "t1": []}}"#,
        ),
    );
    let (mut app, mut events) = App::new(api, Some(RFC_PAGE), ANIMATION);

    app.navigate(Panel::Topics).expect("topics enabled for RFC page");
    let event = events.recv().await.expect("topics completion");
    app.apply(event).await;

    let loaded = app.loaded_topics().expect("topics loaded");
    assert_eq!(loaded.charts.len(), 2);
    assert_eq!(loaded.charts.selected_key(), Some("t0"));
    assert_eq!(app.view.selected_topic_key.as_deref(), Some("t0"));

    let now = Instant::now();
    let t0 = loaded.charts.binding("t0").expect("t0 chart");
    assert!(t0.is_visible());
    assert!(t0.is_animating(now));
    for position in t0.marker_positions(now) {
        assert!(position < 0.2);
    }
    let settled = t0.marker_positions(now + ANIMATION + Duration::from_millis(1));
    assert_eq!(settled, vec![0.2, 0.05]);

    let t1 = loaded.charts.binding("t1").expect("t1 chart");
    assert!(!t1.is_visible());
    assert_eq!(t1.marker_positions(now + ANIMATION), vec![0.0]);
}

#[tokio::test]
async fn empty_topics_show_notice_without_toggles() {
    let api = client(None, Some(r#"{"k": 20, "topics": {}, "words": {}, "docs": {}}"#));
    let (mut app, mut events) = App::new(api, Some(RFC_PAGE), ANIMATION);

    app.navigate(Panel::Topics).expect("topics enabled for RFC page");
    let event = events.recv().await.expect("topics completion");
    app.apply(event).await;

    assert!(app.loaded_topics().is_none());
    match &app.topics {
        TopicsView::Failed(notice) => {
            assert_eq!(notice, &Notice::NoTopics("RFC1234".to_string()));
            assert!(notice.message().starts_with("No topics found for [RFC1234]"));
        }
        other => panic!("expected a notice, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_keeps_the_client_running() {
    let (mut app, mut events) = App::new(client(None, None), None, ANIMATION);

    app.submit_search();
    let event = events.recv().await.expect("search completion");
    app.apply(event).await;

    assert_eq!(app.results, ResultsView::Notice(Notice::BackendUnavailable));
    assert!(!app.results_layout_large());
    assert!(app.running);
}

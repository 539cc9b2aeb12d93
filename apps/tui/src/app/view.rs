use std::fmt;

use regex::Regex;

use crate::domain::Panel;

const RFC_PAGE_PATTERN: &str = r"^https://www\.rfc-editor\.org/rfc/(rfc\d{4})\.(txt|html)$";

/// Extracts the document id (e.g. `RFC2616`) from an RFC Editor page URL.
pub fn identify_document(page_url: &str) -> Option<String> {
    let pattern = Regex::new(RFC_PAGE_PATTERN).ok()?;
    pattern
        .captures(page_url.trim())
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_uppercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    TopicsDisabled,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopicsDisabled => {
                write!(f, "Topics are only available for RFC pages on rfc-editor.org")
            }
        }
    }
}

impl std::error::Error for NavigationError {}

/// Result of a successful panel switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub from: Panel,
    pub to: Panel,
    /// Entering Topics before any topic data was loaded.
    pub fetch_topics: bool,
}

/// Per-run view state: which panel is shown and what the Topics panel knows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub active_panel: Panel,
    pub topics_fetched: bool,
    pub current_doc_id: Option<String>,
    pub selected_topic_key: Option<String>,
}

impl ViewState {
    pub fn new(page_url: Option<&str>) -> Self {
        Self {
            active_panel: Panel::Search,
            topics_fetched: false,
            current_doc_id: page_url.and_then(identify_document),
            selected_topic_key: None,
        }
    }

    pub const fn topics_enabled(&self) -> bool {
        self.current_doc_id.is_some()
    }

    pub const fn is_enabled(&self, panel: Panel) -> bool {
        match panel {
            Panel::Topics => self.topics_enabled(),
            Panel::Search | Panel::Results => true,
        }
    }

    /// Hides the active panel and shows `target`.
    pub fn navigate(&mut self, target: Panel) -> Result<Navigation, NavigationError> {
        if !self.is_enabled(target) {
            return Err(NavigationError::TopicsDisabled);
        }

        let from = self.active_panel;
        self.active_panel = target;
        let fetch_topics = target == Panel::Topics && !self.topics_fetched;

        tracing::debug!(from = from.as_str(), to = target.as_str(), fetch_topics, "panel switch");
        Ok(Navigation {
            from,
            to: target,
            fetch_topics,
        })
    }

    /// Next enabled panel after the active one, wrapping around.
    pub fn next_panel(&self) -> Panel {
        self.cycle(1)
    }

    pub fn previous_panel(&self) -> Panel {
        self.cycle(Panel::ALL.len() - 1)
    }

    fn cycle(&self, step: usize) -> Panel {
        let len = Panel::ALL.len();
        let mut index = self.active_panel.index();
        for _ in 0..len {
            index = (index + step) % len;
            if let Some(panel) = Panel::from_index(index) {
                if self.is_enabled(panel) {
                    return panel;
                }
            }
        }
        self.active_panel
    }

    pub fn mark_topics_fetched(&mut self, first_key: Option<&str>) {
        self.topics_fetched = true;
        self.selected_topic_key = first_key.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RFC_PAGE: &str = "https://www.rfc-editor.org/rfc/rfc1234.html";

    #[test]
    fn rfc_pages_are_identified() {
        assert_eq!(identify_document(RFC_PAGE), Some("RFC1234".to_string()));
        assert_eq!(
            identify_document("https://www.rfc-editor.org/rfc/rfc0791.txt"),
            Some("RFC0791".to_string())
        );
    }

    #[test]
    fn other_pages_are_not() {
        for url in [
            "https://www.rfc-editor.org/rfc/rfc12345.html",
            "https://www.rfc-editor.org/rfc/rfc1234.pdf",
            "https://datatracker.ietf.org/doc/html/rfc1234",
            "https://www.rfc-editor.org/rfc/rfc1234.html#section-1",
        ] {
            assert_eq!(identify_document(url), None, "{url}");
        }
    }

    #[test]
    fn starts_on_search() {
        let state = ViewState::new(None);
        assert_eq!(state.active_panel, Panel::Search);
        assert!(!state.topics_enabled());
    }

    #[test]
    fn topics_disabled_without_document() {
        let mut state = ViewState::new(Some("https://example.org"));
        assert_eq!(
            state.navigate(Panel::Topics),
            Err(NavigationError::TopicsDisabled)
        );
        assert_eq!(state.active_panel, Panel::Search);
        assert_eq!(state.next_panel(), Panel::Results);
        state.active_panel = Panel::Results;
        assert_eq!(state.next_panel(), Panel::Search);
    }

    #[test]
    fn first_entry_into_topics_fetches_once() -> Result<(), NavigationError> {
        let mut state = ViewState::new(Some(RFC_PAGE));

        assert!(state.navigate(Panel::Topics)?.fetch_topics);
        state.mark_topics_fetched(Some("t01"));
        state.navigate(Panel::Search)?;
        let again = state.navigate(Panel::Topics)?;

        assert!(!again.fetch_topics);
        assert_eq!(again.from, Panel::Search);
        assert_eq!(state.selected_topic_key.as_deref(), Some("t01"));
        Ok(())
    }

    #[test]
    fn failed_fetch_allows_retry_on_reentry() -> Result<(), NavigationError> {
        let mut state = ViewState::new(Some(RFC_PAGE));
        assert!(state.navigate(Panel::Topics)?.fetch_topics);
        state.navigate(Panel::Results)?;
        assert!(state.navigate(Panel::Topics)?.fetch_topics);
        Ok(())
    }

    #[test]
    fn any_panel_can_be_left() -> Result<(), NavigationError> {
        let mut state = ViewState::new(Some(RFC_PAGE));
        for target in [Panel::Topics, Panel::Results, Panel::Search, Panel::Topics] {
            let step = state.navigate(target)?;
            assert_eq!(step.to, target);
            assert_eq!(state.active_panel, target);
        }
        assert_eq!(state.previous_panel(), Panel::Results);
        Ok(())
    }
}

//! Turns search hits into display fragments.
//!
//! One routine serves both the search results and the per-topic document
//! lists, so the two always look the same apart from the score label.

use crate::domain::{Area, SearchResult};

/// Abstracts at least this long are truncated.
pub const ABSTRACT_LIMIT: usize = 240;
/// Characters kept from a truncated abstract.
pub const ABSTRACT_KEEP: usize = 220;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLabel {
    Score,
    TopicCoverage,
}

impl ScoreLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::TopicCoverage => "topic coverage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaItem {
    pub text: String,
    pub tooltip: Option<&'static str>,
}

impl MetaItem {
    fn plain(text: String) -> Self {
        Self {
            text,
            tooltip: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFragment {
    /// `[doc-id] title`, linked to `url`.
    pub heading: String,
    pub url: String,
    /// Year and authors.
    pub byline: String,
    pub abstract_line: Option<String>,
    pub meta: Vec<MetaItem>,
}

impl DisplayFragment {
    pub fn meta_line(&self) -> String {
        self.meta
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join("    ")
    }

    /// Plain text rendition used by headless output.
    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{} <{}>", self.heading, self.url),
            self.byline.clone(),
        ];
        if let Some(text) = &self.abstract_line {
            lines.push(text.clone());
        }
        let meta = self
            .meta
            .iter()
            .map(|item| match item.tooltip {
                Some(tooltip) => format!("{} ({tooltip})", item.text),
                None => item.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("    ");
        lines.push(meta);
        lines
    }
}

pub fn truncate_abstract(text: &str) -> String {
    if text.chars().count() >= ABSTRACT_LIMIT {
        let mut kept: String = text.chars().take(ABSTRACT_KEEP).collect();
        kept.push_str(ELLIPSIS);
        kept
    } else {
        text.to_string()
    }
}

pub fn render_fragment(result: &SearchResult, label: ScoreLabel) -> DisplayFragment {
    let abstract_line =
        (!result.abstract_text.is_empty()).then(|| truncate_abstract(&result.abstract_text));

    let mut meta = vec![
        MetaItem::plain(format!("{}: {:.4}", label.as_str(), result.score)),
        MetaItem::plain(format!("{} pp.", result.pages)),
        MetaItem::plain(format!("status: {}", result.status.to_lowercase())),
    ];
    if !result.area.is_empty() {
        meta.push(MetaItem {
            text: format!("area: {}", result.area),
            tooltip: Area::parse(&result.area).map(Area::label),
        });
    }
    if !result.workgroup.is_empty() {
        meta.push(MetaItem::plain(format!(
            "wg: {}",
            result.workgroup.to_lowercase()
        )));
    }
    if !result.stream.is_empty() {
        meta.push(MetaItem::plain(format!("stream: {}", result.stream)));
    }

    DisplayFragment {
        heading: format!("[{}] {}", result.doc_id, result.title),
        url: result.url.clone(),
        byline: format!("{}    {}", result.year, result.authors),
        abstract_line,
        meta,
    }
}

pub fn render(results: &[SearchResult], label: ScoreLabel) -> Vec<DisplayFragment> {
    results
        .iter()
        .map(|result| render_fragment(result, label))
        .collect()
}

/// In-panel notices for the failure cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    BackendUnavailable,
    NoResults,
    NoTopics(String),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::BackendUnavailable => "Oops! It seems the backend is broken.".to_string(),
            Self::NoResults => "No results containing all your query terms were found. \
                 Try more general, fewer, or different keywords and make sure \
                 they are all spelled correctly."
                .to_string(),
            Self::NoTopics(doc_id) => format!(
                "No topics found for [{doc_id}]. Try updating the corpus and rediscover the topics."
            ),
        }
    }
}

/// What the Results region currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsView {
    /// Nothing searched or restored yet.
    #[default]
    Blank,
    Notice(Notice),
    Fragments(Vec<DisplayFragment>),
}

impl ResultsView {
    pub fn from_results(results: &[SearchResult], label: ScoreLabel) -> Self {
        if results.is_empty() {
            Self::Notice(Notice::NoResults)
        } else {
            Self::Fragments(render(results, label))
        }
    }

    /// Large-content layout is only used when there are fragments to show.
    pub const fn is_large(&self) -> bool {
        matches!(self, Self::Fragments(_))
    }

    pub fn fragments(&self) -> &[DisplayFragment] {
        match self {
            Self::Fragments(fragments) => fragments,
            Self::Blank | Self::Notice(_) => &[],
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::api::wire::{lenient_string, lenient_u32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Search,
    Results,
    Topics,
}

impl Panel {
    pub const ALL: [Self; 3] = [Self::Search, Self::Results, Self::Topics];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Results => "results",
            Self::Topics => "topics",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Search => 0,
            Self::Results => 1,
            Self::Topics => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Search),
            1 => Some(Self::Results),
            2 => Some(Self::Topics),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Results => "Results",
            Self::Topics => "Topics",
        }
    }
}

/// IETF area codes that can appear on a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Art,
    Gen,
    Int,
    Ops,
    Rai,
    Rtg,
    Sec,
    Tsv,
}

impl Area {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "art" => Some(Self::Art),
            "gen" => Some(Self::Gen),
            "int" => Some(Self::Int),
            "ops" => Some(Self::Ops),
            "rai" => Some(Self::Rai),
            "rtg" => Some(Self::Rtg),
            "sec" => Some(Self::Sec),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Art => "Applications and Real-Time Area",
            Self::Gen => "General Area",
            Self::Int => "Internet Area",
            Self::Ops => "Operations and Management Area",
            Self::Rai => "Real-Time Applications and Infrastructure Area (Concluded)",
            Self::Rtg => "Routing Area",
            Self::Sec => "Security Area",
            Self::Tsv => "Transport Area",
        }
    }
}

/// One ranked hit, as returned by `/search` and inside `/topics` document lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "doc-id")]
    pub doc_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: String,
    #[serde(default)]
    pub authors: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pages: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub area: String,
    #[serde(rename = "wg", default)]
    pub workgroup: String,
    #[serde(default)]
    pub stream: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    #[serde(rename = "word")]
    pub term: String,
    #[serde(rename = "p")]
    pub probability: f64,
}

/// A discovered topic with everything the Topics panel shows for it.
///
/// Weight, words and documents travel together so a topic key can never be
/// present in one of them and missing from another.
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub key: String,
    pub weight: f64,
    /// Terms in the order the backend sent them.
    pub words: Vec<Term>,
    pub docs: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicSet {
    pub doc_id: String,
    pub k: u32,
    pub topics: Vec<Topic>,
}

impl TopicSet {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|topic| topic.key.as_str())
    }

    pub fn topic(&self, key: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.key == key)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

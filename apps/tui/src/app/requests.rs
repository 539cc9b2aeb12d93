use crate::api::ApiError;
use crate::domain::{SearchResult, TopicSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Topics,
}

/// Completion of an API call, delivered back to the event loop.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    Search {
        seq: u64,
        query: String,
        outcome: Result<Vec<SearchResult>, ApiError>,
    },
    Topics {
        seq: u64,
        doc_id: String,
        outcome: Result<TopicSet, ApiError>,
    },
}

impl ApiEvent {
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Search { .. } => RequestKind::Search,
            Self::Topics { .. } => RequestKind::Topics,
        }
    }

    pub const fn seq(&self) -> u64 {
        match self {
            Self::Search { seq, .. } | Self::Topics { seq, .. } => *seq,
        }
    }
}

/// Hands out sequence numbers so only the newest request of a kind is applied.
#[derive(Debug, Default, Clone)]
pub struct RequestTracker {
    search: u64,
    topics: u64,
}

impl RequestTracker {
    pub fn issue(&mut self, kind: RequestKind) -> u64 {
        let counter = self.counter_mut(kind);
        *counter += 1;
        *counter
    }

    pub const fn latest(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Search => self.search,
            RequestKind::Topics => self.topics,
        }
    }

    pub const fn is_current(&self, event: &ApiEvent) -> bool {
        event.seq() == self.latest(event.kind())
    }

    fn counter_mut(&mut self, kind: RequestKind) -> &mut u64 {
        match kind {
            RequestKind::Search => &mut self.search,
            RequestKind::Topics => &mut self.topics,
        }
    }
}

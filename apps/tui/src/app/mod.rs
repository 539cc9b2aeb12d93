// Application state, panel navigation and request bookkeeping

pub mod input;
pub mod requests;
pub mod state;
pub mod view;

pub use input::handle_input;
pub use requests::{ApiEvent, RequestKind, RequestTracker};
pub use state::{App, LoadedTopics, TopicsView};
pub use view::{identify_document, NavigationError, ViewState};

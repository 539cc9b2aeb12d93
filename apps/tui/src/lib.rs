// Export our modules for use in the binary and integration tests
pub mod api;
pub mod app;
pub mod charts;
pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod event;
pub mod logging;
pub mod results;
pub mod terminal;
pub mod ui;

pub use domain::{Area, Panel, SearchResult, Term, Topic, TopicSet};

pub mod fragments;
pub mod popup;
pub mod term_chart;

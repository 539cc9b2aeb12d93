mod headless;
mod loop_handler;

pub use headless::{run_headless, HeadlessRequest};
pub use loop_handler::run;

use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use rfc_finder::api::http::HttpBackend;
use rfc_finder::api::ApiClient;
use rfc_finder::app::App;
use rfc_finder::cli::CliArgs;
use rfc_finder::config::init_app_config;
use rfc_finder::db::{create_database_pool, SessionCache};
use rfc_finder::event::{self, HeadlessRequest};
use rfc_finder::logging::{init_logging, LogTarget};
use rfc_finder::terminal;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Headless when asked to, or when stdout is not a terminal
    let headless = args.headless || !is_terminal();
    let log_target = if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone())
    };
    init_logging(&log_target, args.debug)?;
    tracing::info!(api_url = %config.api_url, headless, "starting rfc-finder");

    let backend = HttpBackend::new(config.api_url.clone(), config.api_timeout)?;
    let api = ApiClient::new(Arc::new(backend));
    let session = open_session(&config.database_url).await;

    if headless {
        let request = HeadlessRequest {
            query: args.query.clone(),
            topics: args.topics,
            json: args.json,
            page_url: config.page_url.clone(),
        };
        let mut stdout = std::io::stdout();
        return event::run_headless(&api, session.as_ref(), &request, &mut stdout).await;
    }

    let (mut app, mut events) = App::new(api, config.page_url.as_deref(), config.animation);
    if let Some(cache) = session {
        app.attach_session(cache);
        app.restore_session().await;
    } else {
        app.status_message = "Session cache unavailable; searches will not be remembered".to_string();
    }

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    terminal::cleanup_terminal_state(true, true);

    result
}

/// The cache is optional; without it the client still works, it just forgets.
async fn open_session(database_url: &str) -> Option<SessionCache> {
    match create_database_pool(database_url).await {
        Ok(pool) => Some(SessionCache::new(pool)),
        Err(e) => {
            tracing::warn!("session cache unavailable, continuing without it: {e}");
            None
        }
    }
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

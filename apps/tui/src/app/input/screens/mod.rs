use crate::app::state::App;
use crate::domain::Panel;
use crossterm::event::KeyCode;

mod help;
mod results;
mod search;
mod topics;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if handle_panel_keys(app, key) {
        return;
    }

    match app.view.active_panel {
        Panel::Search => search::handle_search_input(app, key),
        Panel::Results => results::handle_results_input(app, key),
        Panel::Topics => topics::handle_topics_input(app, key),
    }
}

/// Keys that work on every panel, even while typing a query.
fn handle_panel_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Tab => app.next_panel(),
        KeyCode::BackTab => app.previous_panel(),
        KeyCode::F(2) => {
            let _ = app.navigate(Panel::Search);
        }
        KeyCode::F(3) => {
            let _ = app.navigate(Panel::Results);
        }
        KeyCode::F(4) => {
            let _ = app.navigate(Panel::Topics);
        }
        _ => return false,
    }
    true
}

/// `q` and `Esc` quit once the query box does not hold focus.
fn handle_quit(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Esc | KeyCode::Char('q')) {
        app.running = false;
        return true;
    }
    false
}

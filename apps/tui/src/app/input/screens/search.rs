use crate::app::state::App;
use crossterm::event::KeyCode;

use super::handle_quit;

pub fn handle_search_input(app: &mut App, key: KeyCode) {
    if !app.query_focused {
        match key {
            KeyCode::Char('/') | KeyCode::Enter => app.query_focused = true,
            _ => {
                handle_quit(app, key);
            }
        }
        return;
    }

    match key {
        KeyCode::Esc => {
            app.query_focused = false;
        }
        KeyCode::Enter => {
            app.submit_search();
        }
        KeyCode::Backspace => {
            app.query_input.pop();
        }
        KeyCode::Char(ch) => {
            app.query_input.push(ch);
        }
        _ => {}
    }
}

use crate::app::input::helpers::PAGE_STEP;
use crate::app::state::App;
use crossterm::event::KeyCode;

use super::handle_quit;

pub fn handle_results_input(app: &mut App, key: KeyCode) {
    if handle_quit(app, key) {
        return;
    }

    match key {
        KeyCode::Up => app.select_previous_result(1),
        KeyCode::Down => app.select_next_result(1),
        KeyCode::PageUp => app.select_previous_result(PAGE_STEP),
        KeyCode::PageDown => app.select_next_result(PAGE_STEP),
        KeyCode::Home => app.selected_result_index = 0,
        KeyCode::End => app.select_last_result(),
        _ => {}
    }
}

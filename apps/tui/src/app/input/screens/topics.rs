use crate::app::input::helpers::digit_index;
use crate::app::state::App;
use crossterm::event::KeyCode;

use super::handle_quit;

pub fn handle_topics_input(app: &mut App, key: KeyCode) {
    if handle_quit(app, key) {
        return;
    }

    match key {
        KeyCode::Left | KeyCode::Up => {
            app.previous_topic();
        }
        KeyCode::Right | KeyCode::Down => {
            app.next_topic();
        }
        KeyCode::Char(ch) => {
            if let Some(index) = digit_index(ch) {
                app.select_topic_index(index);
            }
        }
        _ => {}
    }
}

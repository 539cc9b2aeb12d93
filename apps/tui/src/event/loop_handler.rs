use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{handle_input, ApiEvent, App};
use crate::terminal::Tui;
use crate::ui;

/// Configure event poll timeout (ms)
const EVENT_POLL_TIMEOUT: u64 = 50;

/// Run the main application event loop
pub async fn run(
    terminal: &mut Tui,
    app: &mut App,
    events: &mut UnboundedReceiver<ApiEvent>,
) -> Result<()> {
    while app.running {
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        tracing::debug!("redraw after resize failed");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("failed to read terminal event: {e}"),
            }
        }

        while let Ok(event) = events.try_recv() {
            app.apply(event).await;
        }
    }
    Ok(())
}

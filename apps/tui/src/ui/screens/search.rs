use crate::app::App;
use crate::results::ResultsView;
use crate::ui::screens::results::render_results_region;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Height of the Results region while it only holds a notice.
const COMPACT_HEIGHT: u16 = 5;

pub fn render_search(app: &App, f: &mut Frame<'_>, area: Rect) {
    let results_constraint = if app.results_layout_large() {
        Constraint::Min(5)
    } else {
        Constraint::Length(COMPACT_HEIGHT)
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), results_constraint, Constraint::Min(0)])
        .split(area);

    render_query_box(app, f, layout[0]);
    if app.results != ResultsView::Blank {
        render_results_region(app, f, layout[1]);
    }
}

fn render_query_box(app: &App, f: &mut Frame<'_>, area: Rect) {
    let color = if app.query_focused {
        Color::Green
    } else {
        Color::Gray
    };
    let block = Block::default()
        .title(" Query ")
        .title_style(Style::default().fg(color))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let cursor = if app.query_focused { "_" } else { "" };
    let line = TextLine::from(Span::styled(
        format!("> {}{cursor}", app.query_input),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));

    f.render_widget(Paragraph::new(line).block(block), area);
}

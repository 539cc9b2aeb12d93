use crate::app::App;
use crate::results::ResultsView;
use crate::ui::widgets::fragments::{fragment_items, tooltip_line};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, List, ListState, Paragraph, Wrap};
use ratatui::Frame;

fn results_block() -> Block<'static> {
    Block::default()
        .title(" Results ")
        .title_style(Style::default().fg(Color::Cyan))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

/// Results panel: the fragment list full-height plus the selected area tooltip.
pub fn render_results(app: &App, f: &mut Frame<'_>, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    render_results_region(app, f, layout[0]);

    if let Some(line) = app.selected_fragment().and_then(tooltip_line) {
        f.render_widget(Paragraph::new(line), layout[1]);
    }
}

pub fn render_results_region(app: &App, f: &mut Frame<'_>, area: Rect) {
    match &app.results {
        ResultsView::Blank => {
            let paragraph = Paragraph::new("Type a query on the Search panel and press Enter.")
                .style(Style::default().fg(Color::Gray))
                .block(results_block());
            f.render_widget(paragraph, area);
        }
        ResultsView::Notice(notice) => {
            let paragraph = Paragraph::new(notice.message())
                .style(Style::default().fg(Color::Yellow))
                .block(results_block())
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        ResultsView::Fragments(fragments) => {
            let list = List::new(fragment_items(fragments))
                .block(results_block())
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(app.selected_result_index));
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}

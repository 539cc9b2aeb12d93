// UI module for rfc-finder
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use crate::domain::Panel;
use crate::ui::widgets::popup::render_help_popup;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let area = f.area().inner(Margin::new(1, 0));

    if app.show_help {
        render_help_popup(f, area);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Panel tabs
            Constraint::Min(5),    // Active panel
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(area);

    render_tabs(app, f, layout[0]);
    match app.view.active_panel {
        Panel::Search => screens::search::render_search(app, f, layout[1]),
        Panel::Results => screens::results::render_results(app, f, layout[1]),
        Panel::Topics => screens::topics::render_topics(app, f, layout[1]),
    }
    render_status_section(app, f, layout[2]);
    render_shortcuts(f, layout[3]);
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = Panel::ALL
        .iter()
        .map(|panel| {
            let style = if app.view.is_enabled(*panel) {
                Style::default().fg(Color::Gray)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            TextLine::from(Span::styled(panel.label(), style))
        })
        .collect::<Vec<_>>();

    let title = app.view.current_doc_id.as_ref().map_or_else(
        || " RFC Finder ".to_string(),
        |doc_id| format!(" RFC Finder [{doc_id}] "),
    );

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(title)
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(app.view.active_panel.index())
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_status_section(app: &App, f: &mut Frame<'_>, area: Rect) {
    let status_block = Block::default()
        .title(" Status ")
        .title_style(Style::default().fg(Color::Yellow))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let status_paragraph = Paragraph::new(Span::styled(
        app.status_message.as_str(),
        Style::default().fg(Color::Green),
    ))
    .block(status_block)
    .wrap(Wrap { trim: true });
    f.render_widget(status_paragraph, area);
}

fn render_shortcuts(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(Color::Gray);

    let mut spans = Vec::new();
    for (index, (shortcut, action)) in [
        ("F1", "Help"),
        ("F2-F4", "Panels"),
        ("Tab", "Next panel"),
        ("Enter", "Search"),
        ("q", "Quit"),
    ]
    .into_iter()
    .enumerate()
    {
        if index > 0 {
            spans.push(Span::styled(" | ", text));
        }
        spans.push(Span::styled(shortcut, key));
        spans.push(Span::styled(format!(": {action}"), text));
    }

    f.render_widget(
        Paragraph::new(TextLine::from(spans)).alignment(Alignment::Center),
        area,
    );
}

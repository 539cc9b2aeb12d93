use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

pub fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup_area = centered_rect(80, 80, area);
    f.render_widget(ClearWidget, popup_area);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let help_paragraph = Paragraph::new(Text::from(build_help_lines()))
        .block(help_block)
        .wrap(Wrap { trim: true });
    f.render_widget(help_paragraph, popup_area);

    let hint = Paragraph::new(Span::styled(
        "Press F1 or Esc to close",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(2),
        width: popup_area.width,
        height: 1,
    };
    f.render_widget(hint, hint_area);
}

fn key_line(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {description}")),
    ])
}

fn build_help_lines() -> Vec<TextLine<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        TextLine::from(Span::styled(
            "RFC Finder",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from(
            "Search the RFC corpus and explore the topics discovered in the page you are reading.",
        ),
        TextLine::from(""),
        TextLine::from(Span::styled("Panels:", bold)),
        key_line("F2", "Search"),
        key_line("F3", "Results"),
        key_line("F4", "Topics (only for rfc-editor.org RFC pages)"),
        key_line("Tab / Shift-Tab", "Next / previous panel"),
        TextLine::from(""),
        TextLine::from(Span::styled("Search:", bold)),
        key_line("Enter", "Run the query"),
        key_line("Esc", "Leave the query box"),
        key_line("/", "Back to the query box"),
        TextLine::from(""),
        TextLine::from(Span::styled("Results:", bold)),
        key_line("Up / Down", "Move selection"),
        key_line("PgUp / PgDn", "Move by a page"),
        key_line("Home / End", "First / last result"),
        TextLine::from(""),
        TextLine::from(Span::styled("Topics:", bold)),
        key_line("Left / Right", "Previous / next topic"),
        key_line("1..9, 0", "Jump to a topic"),
        TextLine::from(""),
        key_line("F1", "Toggle this help popup"),
        key_line("q / Esc", "Quit (outside the query box)"),
        TextLine::from(""),
        TextLine::from(Span::styled("CLI Options:", bold)),
    ];

    let help_text = crate::cli::CliArgs::help_text();
    for line in help_text.lines() {
        if line.starts_with("Usage") || line.starts_with("Options") || line.trim().is_empty() {
            continue;
        }
        lines.push(TextLine::from(line.to_string()));
    }

    lines
}

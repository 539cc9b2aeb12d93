use std::time::Instant;

use crate::charts::ChartBinding;
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};
use ratatui::Frame;

/// Bars carry probabilities in units of 1e-4 so four decimals survive.
const SCALE: f64 = 10_000.0;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled(value: f64) -> u64 {
    (value.max(0.0) * SCALE).round() as u64
}

pub fn axis_title(x_max: f64) -> String {
    format!(" Term Probability (0 .. {x_max:.4}) ")
}

/// Horizontal bar chart of a topic's terms, grown to the current tween position.
pub fn render_term_chart(binding: &ChartBinding, now: Instant, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(axis_title(binding.x_max()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if binding.terms().is_empty() {
        let paragraph = Paragraph::new("No terms for this topic")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let positions = binding.marker_positions(now);
    let bars: Vec<Bar<'_>> = binding
        .terms()
        .iter()
        .zip(positions)
        .map(|(term, position)| {
            Bar::default()
                .value(scaled(position))
                .text_value(format!("{position:.4}"))
                .label(TextLine::from(term.term.clone()))
                .style(Style::default().fg(Color::Rgb(0, 0, 238)))
                .value_style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Rgb(0, 0, 238))
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(scaled(binding.x_max()).max(1))
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(chart, area);
}

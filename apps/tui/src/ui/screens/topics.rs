use std::time::Instant;

use crate::app::{App, LoadedTopics, TopicsView};
use crate::domain::{Topic, TopicSet};
use crate::ui::widgets::fragments::fragment_items;
use crate::ui::widgets::term_chart::render_term_chart;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use tachyonfx::EffectRenderer;

/// Toggle label: upper-cased key and weight as a percentage.
pub fn toggle_label(topic: &Topic) -> String {
    format!("{} ({:.4}%)", topic.key.to_uppercase(), topic.weight * 100.0)
}

pub fn summary_header(set: &TopicSet) -> String {
    format!(
        "Top {} topics discovered in [{}] using k = {}. Select each to see further insights!",
        set.len(),
        set.doc_id,
        set.k
    )
}

pub fn words_header(topic: &Topic) -> String {
    format!(
        "Top {} words in topic {}:",
        topic.words.len(),
        topic.key.to_uppercase()
    )
}

pub fn docs_header(topic: &Topic) -> String {
    format!(
        "Top {} documents having {} as the dominant topic:",
        topic.docs.len(),
        topic.key.to_uppercase()
    )
}

fn topics_block() -> Block<'static> {
    Block::default()
        .title(" Topics ")
        .title_style(Style::default().fg(Color::Magenta))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
}

fn render_message(f: &mut Frame<'_>, area: Rect, text: String, color: Color) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(topics_block())
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_topics(app: &App, f: &mut Frame<'_>, area: Rect) {
    match &app.topics {
        TopicsView::Idle => render_message(
            f,
            area,
            "Topics are discovered when this panel is opened.".to_string(),
            Color::Gray,
        ),
        TopicsView::Loading { doc_id } => render_message(
            f,
            area,
            format!("Fetching topics for [{doc_id}]..."),
            Color::Gray,
        ),
        TopicsView::Failed(notice) => render_message(f, area, notice.message(), Color::Yellow),
        TopicsView::Loaded(loaded) => render_loaded(app, loaded, f, area),
    }
}

fn render_loaded(app: &App, loaded: &LoadedTopics, f: &mut Frame<'_>, area: Rect) {
    let block = topics_block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),        // Summary
            Constraint::Length(1),        // Toggles
            Constraint::Length(1),        // Words header
            Constraint::Percentage(45),   // Chart
            Constraint::Length(1),        // Docs header
            Constraint::Min(3),           // Documents
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(summary_header(&loaded.set)).wrap(Wrap { trim: true }),
        layout[0],
    );

    let titles = loaded
        .set
        .topics
        .iter()
        .map(|topic| TextLine::from(toggle_label(topic)))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(loaded.charts.selected_index().unwrap_or(0))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, layout[1]);

    let Some(topic) = loaded
        .charts
        .selected_index()
        .and_then(|index| loaded.set.topics.get(index))
    else {
        return;
    };

    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Span::styled(words_header(topic), header_style)),
        layout[2],
    );

    if let Some(binding) = loaded.charts.selected() {
        render_term_chart(binding, Instant::now(), f, layout[3]);
    }

    if let Ok(mut effect) = app.topic_fx.lock() {
        if let Some(effect) = effect.as_mut() {
            let buffer = f.buffer_mut();
            buffer.render_effect(effect, layout[3], app.last_tick);
        }
    }

    f.render_widget(
        Paragraph::new(Span::styled(docs_header(topic), header_style)),
        layout[4],
    );
    f.render_widget(List::new(fragment_items(loaded.selected_docs())), layout[5]);
}

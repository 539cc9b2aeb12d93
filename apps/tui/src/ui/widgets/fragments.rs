use crate::results::DisplayFragment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::ListItem;

/// Styled lines for one fragment, followed by a blank separator.
pub fn fragment_text(fragment: &DisplayFragment) -> Text<'static> {
    let mut lines = vec![
        TextLine::from(vec![
            Span::styled(
                fragment.heading.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                fragment.url.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        TextLine::from(Span::styled(
            fragment.byline.clone(),
            Style::default().fg(Color::Gray),
        )),
    ];

    if let Some(text) = &fragment.abstract_line {
        lines.push(TextLine::from(text.clone()));
    }

    let mut meta = Vec::new();
    for (index, item) in fragment.meta.iter().enumerate() {
        if index > 0 {
            meta.push(Span::raw("    "));
        }
        let style = if item.tooltip.is_some() {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        meta.push(Span::styled(item.text.clone(), style));
    }
    lines.push(TextLine::from(meta));
    lines.push(TextLine::from(""));

    Text::from(lines)
}

pub fn fragment_items(fragments: &[DisplayFragment]) -> Vec<ListItem<'static>> {
    fragments
        .iter()
        .map(|fragment| ListItem::new(fragment_text(fragment)))
        .collect()
}

/// Expanded area name for the fragment's area chip, if it has a known one.
pub fn tooltip_line(fragment: &DisplayFragment) -> Option<TextLine<'static>> {
    let item = fragment.meta.iter().find(|item| item.tooltip.is_some())?;
    Some(TextLine::from(vec![
        Span::styled(
            item.text.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" = {}", item.tooltip.unwrap_or_default()),
            Style::default().fg(Color::Gray),
        ),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::MetaItem;

    fn fragment(meta: Vec<MetaItem>, abstract_line: Option<&str>) -> DisplayFragment {
        DisplayFragment {
            heading: "[RFC1234] X".to_string(),
            url: "u".to_string(),
            byline: "1991    A".to_string(),
            abstract_line: abstract_line.map(str::to_string),
            meta,
        }
    }

    #[test]
    fn abstract_line_is_optional() {
        let with = fragment_text(&fragment(Vec::new(), Some("text")));
        let without = fragment_text(&fragment(Vec::new(), None));
        assert_eq!(with.lines.len(), without.lines.len() + 1);
    }

    #[test]
    fn tooltip_comes_from_area_chip() {
        let meta = vec![
            MetaItem {
                text: "score: 0.9123".to_string(),
                tooltip: None,
            },
            MetaItem {
                text: "area: sec".to_string(),
                tooltip: Some("Security Area"),
            },
        ];
        let line = tooltip_line(&fragment(meta, None)).map(|line| line.to_string());
        assert_eq!(line.as_deref(), Some("area: sec = Security Area"));
        assert!(tooltip_line(&fragment(Vec::new(), None)).is_none());
    }
}

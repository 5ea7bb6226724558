//! Checkbox widget for toggle filters

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A labelled `[x]` box
pub struct Checkbox<'a> {
    label: &'a str,
    checked: bool,
    hotkey: Option<&'a str>,
}

impl<'a> Checkbox<'a> {
    pub fn new(label: &'a str, checked: bool) -> Self {
        Self {
            label,
            checked,
            hotkey: None,
        }
    }

    pub fn hotkey(mut self, key: &'a str) -> Self {
        self.hotkey = Some(key);
        self
    }

    pub fn line(&self) -> Line<'a> {
        let box_style = if self.checked {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let mut spans = Vec::with_capacity(3);
        if let Some(key) = self.hotkey {
            spans.push(Span::styled(
                format!("{} ", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(if self.checked { "[x] " } else { "[ ] " }, box_style));
        spans.push(Span::styled(self.label, Style::default().fg(Color::White)));
        Line::from(spans)
    }
}

impl Widget for Checkbox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_checkbox_marks() {
        assert_eq!(text(&Checkbox::new("Guide available", true).line()), "[x] Guide available");
        assert_eq!(text(&Checkbox::new("Guide available", false).line()), "[ ] Guide available");
        assert_eq!(
            text(&Checkbox::new("Guide available", true).hotkey("space").line()),
            "space [x] Guide available"
        );
    }
}

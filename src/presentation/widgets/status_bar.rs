//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Returns the spinner glyph for an animation tick.
#[must_use]
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// One-line bar with left, centered and right-aligned sections.
#[derive(Debug, Clone, Default)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    style: Style,
    accent: Style,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets left content, drawn with the accent style.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Sets center content.
    #[must_use]
    pub fn center(mut self, content: impl Into<String>) -> Self {
        self.center = content.into();
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets text style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets style of the left section.
    #[must_use]
    pub fn accent(mut self, style: Style) -> Self {
        self.accent = style.add_modifier(Modifier::BOLD);
        self
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = usize::from(area.width);

        let left_len = self.left.width();
        let center_len = self.center.width();
        let right_len = self.right.width();

        let center_start = width.saturating_sub(center_len) / 2;
        let right_start = width.saturating_sub(right_len);

        let mut spans = vec![Span::styled(self.left.as_str(), self.accent)];

        let left_padding = center_start.saturating_sub(left_len).max(1);
        spans.push(Span::raw(" ".repeat(left_padding)));

        if !self.center.is_empty() {
            spans.push(Span::styled(self.center.as_str(), self.style));
        }

        let current_len = left_len + left_padding + center_len;
        let right_padding = right_start.saturating_sub(current_len);
        if right_padding > 0 {
            spans.push(Span::raw(" ".repeat(right_padding)));
        }

        if !self.right.is_empty() {
            spans.push(Span::styled(self.right.as_str(), self.style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer) -> String {
        (0..buf.area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_sections_are_aligned() {
        let bar = StatusBar::new().left("L").center("mid").right("R");
        let area = Rect::new(0, 0, 11, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        assert_eq!(row(&buf), "L   mid   R");
    }

    #[test]
    fn test_wide_center_text() {
        let bar = StatusBar::new().left("L").center("日本").right("R");
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);

        (&bar).render(area, &mut buf);

        assert_eq!(buf[(3, 0)].symbol(), "日");
        assert_eq!(buf[(9, 0)].symbol(), "R");
    }

    #[test]
    fn test_spinner_cycles() {
        assert_eq!(spinner_frame(0), spinner_frame(SPINNER_FRAMES.len()));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }
}

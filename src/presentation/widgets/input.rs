//! Single-line text input widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Single-line text field. The cursor is a char index.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    cursor: usize,
    focused: bool,
    enabled: bool,
    placeholder: String,
    label: String,
    border_style: Style,
    focused_border_style: Style,
    placeholder_style: Style,
}

impl TextInput {
    /// Creates new input with label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            focused: false,
            enabled: true,
            placeholder: String::new(),
            label: label.into(),
            border_style: Style::default(),
            focused_border_style: Style::default(),
            placeholder_style: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Sets placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    /// Sets border styles for the unfocused and focused states.
    #[must_use]
    pub const fn border_styles(mut self, normal: Style, focused: Style) -> Self {
        self.border_style = normal;
        self.focused_border_style = focused;
        self
    }

    /// Sets placeholder style.
    #[must_use]
    pub const fn placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns focus state.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Enables or disables editing display.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Sets value and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.char_count();
    }

    /// Clears value.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts character at cursor.
    pub fn input_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes character before cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Deletes character at cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Moves cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Moves cursor to start.
    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    /// Moves cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Returns the visible slice and the cursor column inside it.
    fn visible(&self, width: usize) -> (&str, usize) {
        let before = &self.value[..self.byte_index(self.cursor)];
        let cursor_col = before.width();
        if cursor_col < width {
            return (&self.value, cursor_col);
        }

        let mut start = 0;
        let mut col = cursor_col;
        for (i, ch) in before.char_indices() {
            if col < width {
                break;
            }
            col -= unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            start = i + ch.len_utf8();
        }
        (&self.value[start..], col)
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.focused_border_style
        } else {
            self.border_style
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", self.label));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.value.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(self.placeholder_style)
                .render(inner, buf);
        }

        let (visible, cursor_col) = self.visible(usize::from(inner.width));
        if !self.value.is_empty() {
            Paragraph::new(visible).render(inner, buf);
        }

        if self.focused && self.enabled && inner.width > 0 && inner.height > 0 {
            let cursor_x = inner.x + u16::try_from(cursor_col).unwrap_or(u16::MAX);
            if cursor_x < inner.right() {
                buf[(cursor_x, inner.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_basic() {
        let mut input = TextInput::new("Test");
        assert!(input.value().is_empty());

        input.input_char('a');
        input.input_char('b');
        assert_eq!(input.value(), "ab");

        input.backspace();
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("Role");
        input.set_value("Développeur");
        input.move_start();
        input.move_right();
        input.move_right();
        input.backspace();
        assert_eq!(input.value(), "Dveloppeur");

        input.input_char('é');
        input.move_end();
        input.input_char('!');
        assert_eq!(input.value(), "Développeur!");
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut input = TextInput::new("Role");
        input.set_value("ab");
        input.delete();
        assert_eq!(input.value(), "ab");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_visible_scrolls_to_cursor() {
        let mut input = TextInput::new("Role");
        input.set_value("abcdefghij");

        let (visible, col) = input.visible(4);
        assert_eq!(col, 3);
        assert!(visible.ends_with("hij"));
        assert!(visible.starts_with('h'));
    }

    #[test]
    fn test_control_chars_ignored() {
        let mut input = TextInput::new("Role");
        input.input_char('\n');
        input.input_char('\t');
        assert!(input.value().is_empty());
    }
}

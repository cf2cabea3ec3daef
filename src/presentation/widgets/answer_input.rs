use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};
use tui_textarea::{CursorMove, TextArea};
use unicode_width::UnicodeWidthChar;

use crate::presentation::theme::Theme;

const PLACEHOLDER_TEXT: &str = "Type your answer...";

/// Styles of the answer editor.
#[allow(missing_docs)]
pub struct AnswerInputStyle {
    pub border_style: Style,
    pub border_style_focused: Style,
    pub title_style: Style,
    pub text_style: Style,
    pub placeholder_style: Style,
    pub cursor_style: Style,
}

impl AnswerInputStyle {
    /// Derives styles from `theme`.
    #[must_use]
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            border_style: theme.border_style,
            border_style_focused: theme.focused_border_style,
            title_style: theme.label_style,
            text_style: theme.base_style,
            placeholder_style: theme.dimmed_style,
            cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

impl Default for AnswerInputStyle {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

/// Multi-line answer editor.
///
/// `TextArea` is only the edit buffer; drawing is done here so the widget does
/// not depend on the ratatui version tui-textarea was built against.
pub struct AnswerInput<'a> {
    textarea: TextArea<'a>,
    focused: bool,
    scroll_offset: usize,
}

impl AnswerInput<'_> {
    /// Creates empty, focused editor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            focused: true,
            scroll_offset: 0,
        }
    }

    /// Focused editors show the cursor.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns text with lines joined by `\n`.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Returns whether no text was entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(String::is_empty)
    }

    /// Drops text and resets scrolling.
    pub fn clear(&mut self) {
        self.textarea = TextArea::default();
        self.scroll_offset = 0;
    }

    /// Applies an editing key. Returns `true` when the text changed.
    ///
    /// Ctrl is the word modifier. Alt+arrows are left to the keymap, where
    /// they scroll code blocks.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let word = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.textarea.insert_char(c);
                true
            }
            KeyCode::Char('w' | 'h') if key.modifiers == KeyModifiers::CONTROL => {
                self.textarea.delete_word()
            }
            KeyCode::Enter if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                self.textarea.insert_newline();
                true
            }
            KeyCode::Tab => {
                self.textarea.insert_str("    ");
                true
            }
            KeyCode::Backspace if word => self.textarea.delete_word(),
            KeyCode::Backspace => self.textarea.delete_char(),
            KeyCode::Delete => self.textarea.delete_next_char(),
            KeyCode::Left if word => self.moved(CursorMove::WordBack),
            KeyCode::Left => self.moved(CursorMove::Back),
            KeyCode::Right if word => self.moved(CursorMove::WordForward),
            KeyCode::Right => self.moved(CursorMove::Forward),
            KeyCode::Up => self.moved(CursorMove::Up),
            KeyCode::Down => self.moved(CursorMove::Down),
            KeyCode::Home => self.moved(CursorMove::Head),
            KeyCode::End => self.moved(CursorMove::End),
            _ => false,
        }
    }

    fn moved(&mut self, movement: CursorMove) -> bool {
        self.textarea.move_cursor(movement);
        false
    }

    /// Soft-wraps logical lines at `width` cells and locates the cursor.
    fn visual_lines(&self, width: usize) -> (Vec<String>, usize, usize) {
        let (cursor_row, cursor_col) = self.textarea.cursor();
        let mut visual = Vec::new();
        let mut v_row = 0;
        let mut v_col = 0;

        for (row, line) in self.textarea.lines().iter().enumerate() {
            let mut current = String::new();
            let mut current_width = 0;

            for (col, ch) in line.chars().enumerate() {
                let w = ch.width().unwrap_or(0);
                if current_width + w > width && current_width > 0 {
                    visual.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                if row == cursor_row && col == cursor_col {
                    v_row = visual.len();
                    v_col = current_width;
                }
                current.push(ch);
                current_width += w;
            }

            if row == cursor_row && cursor_col >= line.chars().count() {
                if current_width >= width {
                    visual.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                v_row = visual.len();
                v_col = current_width;
            }
            visual.push(current);
        }

        (visual, v_row, v_col)
    }

    /// Draws bordered editor titled `title`.
    pub fn render_with_style(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        title: &str,
        style: &AnswerInputStyle,
    ) {
        let border_style = if self.focused {
            style.border_style_focused
        } else {
            style.border_style
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {title} "))
            .title_style(style.title_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let width = usize::from(inner.width);
        let height = usize::from(inner.height);
        if width == 0 || height == 0 {
            return;
        }

        let (lines, v_row, v_col) = self.visual_lines(width);
        if v_row >= self.scroll_offset + height {
            self.scroll_offset = v_row + 1 - height;
        } else if v_row < self.scroll_offset {
            self.scroll_offset = v_row;
        }

        if self.is_empty() {
            buf.set_stringn(inner.x, inner.y, PLACEHOLDER_TEXT, width, style.placeholder_style);
        } else {
            for (i, line) in lines.iter().skip(self.scroll_offset).take(height).enumerate() {
                let y = inner.y + u16::try_from(i).unwrap_or(u16::MAX);
                buf.set_stringn(inner.x, y, line, width, style.text_style);
            }
        }

        if self.focused && v_row >= self.scroll_offset {
            let x = inner.x + u16::try_from(v_col).unwrap_or(u16::MAX);
            let y = inner.y + u16::try_from(v_row - self.scroll_offset).unwrap_or(u16::MAX);
            if x < inner.right()
                && y < inner.bottom()
                && let Some(cell) = buf.cell_mut((x, y))
            {
                cell.set_style(style.cursor_style);
            }
        }
    }
}

impl Default for AnswerInput<'_> {
    fn default() -> Self {
        Self::new()
    }
}

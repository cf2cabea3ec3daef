//! Conversation history panel.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::Qna;
use crate::presentation::services::{MarkdownRenderer, RenderedMarkdown};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::markdown_view;

const TITLE: &str = " Interview Progress ";

/// One exchange, rendered once and laid out on every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    question: RenderedMarkdown,
    answer: RenderedMarkdown,
    feedback: RenderedMarkdown,
}

impl HistoryEntry {
    /// Renders the `index`-th exchange (zero based).
    #[must_use]
    pub fn new(index: usize, qna: &Qna, renderer: &MarkdownRenderer, theme: &Theme) -> Self {
        let label = |text: String| Span::styled(text, theme.label_style);

        Self {
            question: renderer
                .render(qna.question())
                .labeled(label(format!("Q{}: ", index + 1))),
            answer: renderer.render(qna.answer()).labeled(label("A: ".to_string())),
            feedback: RenderedMarkdown::plain(qna.feedback(), theme.feedback_style)
                .labeled(label("Feedback: ".to_string())),
        }
    }

    /// Widest code block in the question or answer, in cells.
    #[must_use]
    pub fn max_code_width(&self) -> usize {
        self.question
            .max_code_width()
            .max(self.answer.max_code_width())
    }
}

/// Renders every exchange of a history slice.
#[must_use]
pub fn render_history(history: &[Qna], renderer: &MarkdownRenderer, theme: &Theme) -> Vec<HistoryEntry> {
    history
        .iter()
        .enumerate()
        .map(|(i, qna)| HistoryEntry::new(i, qna, renderer, theme))
        .collect()
}

/// Scroll position of the history panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryPaneState {
    /// First visible line.
    pub scroll: usize,
    /// Horizontal offset applied to code blocks.
    pub h_offset: usize,
}

impl HistoryPaneState {
    /// Scrolls up by `lines`.
    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scrolls down by `lines`; clamped on render.
    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    /// Moves code blocks right by `columns`.
    pub fn scroll_left(&mut self, columns: usize) {
        self.h_offset = self.h_offset.saturating_sub(columns);
    }

    /// Moves code blocks left, never past the `widest` block.
    pub fn scroll_right(&mut self, columns: usize, widest: usize) {
        self.h_offset = (self.h_offset + columns).min(widest);
    }

    /// Shows the newest entries on the next render.
    pub fn scroll_to_end(&mut self) {
        self.scroll = usize::MAX;
    }

    /// Returns to the top with no code offset.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Bordered, scrollable list of history entries.
pub struct HistoryPane<'a> {
    entries: &'a [HistoryEntry],
    border_style: Style,
    title_style: Style,
}

impl<'a> HistoryPane<'a> {
    /// Creates pane over pre-rendered `entries`.
    #[must_use]
    pub fn new(entries: &'a [HistoryEntry], theme: &Theme) -> Self {
        Self {
            entries,
            border_style: theme.border_style,
            title_style: theme.title_style,
        }
    }

    fn lines(&self, width: u16, h_offset: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(markdown_view::layout(&entry.question, width, h_offset));
            lines.extend(markdown_view::layout(&entry.answer, width, h_offset));
            lines.extend(markdown_view::layout(&entry.feedback, width, h_offset));
        }
        lines
    }
}

impl StatefulWidget for HistoryPane<'_> {
    type State = HistoryPaneState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style)
            .title(TITLE)
            .title_style(self.title_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines(inner.width, state.h_offset);
        let height = usize::from(inner.height);
        state.scroll = state.scroll.min(lines.len().saturating_sub(height));

        let visible: Vec<Line<'static>> = lines.into_iter().skip(state.scroll).take(height).collect();
        Paragraph::new(visible).render(inner, buf);
    }
}

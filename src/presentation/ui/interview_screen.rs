//! Active interview screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::application::{Controls, InterviewView, Prompt};
use crate::domain::entities::InterviewSession;
use crate::presentation::services::{MarkdownRenderer, RenderedMarkdown};
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    AnswerInput, AnswerInputStyle, HistoryEntry, HistoryPane, HistoryPaneState, MarkdownView,
    markdown_view, render_history,
};

const COMPLETE_NOTICE: &str = "Interview Complete!";
const SUBMIT_BUTTON: &str = "[ Submit Answer ]";
const RESET_BUTTON: &str = "[ Start New Interview ]";
const ANSWER_HEIGHT: u16 = 7;
const SCROLL_LINES: usize = 3;
const SCROLL_COLUMNS: usize = 4;

/// Outcome of a key on the interview screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum InterviewAction {
    None,
    /// Answer text changed.
    Edited,
    Reset,
}

/// Question, answer entry and history of one session.
pub struct InterviewScreen {
    answer_input: AnswerInput<'static>,
    answer_style: AnswerInputStyle,
    question: RenderedMarkdown,
    history: Vec<HistoryEntry>,
    history_state: HistoryPaneState,
}

impl InterviewScreen {
    /// Creates empty screen.
    #[must_use]
    pub fn new(theme: &Theme) -> Self {
        Self {
            answer_input: AnswerInput::new(),
            answer_style: AnswerInputStyle::from_theme(theme),
            question: RenderedMarkdown::default(),
            history: Vec::new(),
            history_state: HistoryPaneState::default(),
        }
    }

    /// Rebuilds rendered content from a new snapshot and clears the answer.
    pub fn load(&mut self, session: &InterviewSession, renderer: &MarkdownRenderer, theme: &Theme) {
        self.question = session
            .current_question()
            .map(|q| renderer.render(q))
            .unwrap_or_default();
        self.history = render_history(session.conversation(), renderer, theme);
        self.answer_input.clear();
        self.history_state.scroll_to_end();
        self.history_state.h_offset = 0;
    }

    /// Drops all session content.
    pub fn clear(&mut self) {
        self.question = RenderedMarkdown::default();
        self.history.clear();
        self.answer_input.clear();
        self.history_state.reset();
    }

    /// Returns answer text.
    #[must_use]
    pub fn answer(&self) -> String {
        self.answer_input.value()
    }

    /// Empties the answer entry.
    pub fn clear_answer(&mut self) {
        self.answer_input.clear();
    }

    /// Handles key event not claimed by a binding.
    pub fn handle_key(&mut self, key: KeyEvent, view: &InterviewView<'_>) -> InterviewAction {
        match view.controls {
            Controls::Reset if key.code == KeyCode::Enter => InterviewAction::Reset,
            Controls::Reset => InterviewAction::None,
            Controls::Answer { .. } if view.loading => InterviewAction::None,
            Controls::Answer { .. } => {
                if self.answer_input.handle_key(key) {
                    InterviewAction::Edited
                } else {
                    InterviewAction::None
                }
            }
        }
    }

    /// Scrolls history towards older entries.
    pub fn scroll_history_up(&mut self) {
        self.history_state.scroll_up(SCROLL_LINES);
    }

    /// Scrolls history towards newer entries.
    pub fn scroll_history_down(&mut self) {
        self.history_state.scroll_down(SCROLL_LINES);
    }

    /// Scrolls code blocks back to their start.
    pub fn scroll_code_left(&mut self) {
        self.history_state.scroll_left(SCROLL_COLUMNS);
    }

    /// Scrolls code blocks right, up to the widest one.
    pub fn scroll_code_right(&mut self) {
        let widest = self
            .history
            .iter()
            .map(HistoryEntry::max_code_width)
            .chain(std::iter::once(self.question.max_code_width()))
            .max()
            .unwrap_or(0);
        self.history_state.scroll_right(SCROLL_COLUMNS, widest);
    }

    /// Draws prompt, controls and history into `area`.
    pub fn render(&mut self, view: &InterviewView<'_>, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let question_height = self.question_height(view, area);
        let answer_height = match view.controls {
            Controls::Answer { .. } => ANSWER_HEIGHT,
            Controls::Reset => 0,
        };

        let [question_area, answer_area, button_area, _, history_area] = Layout::vertical([
            Constraint::Length(question_height),
            Constraint::Length(answer_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .areas(area);

        self.render_prompt(view, theme, question_area, buf);

        let (label, enabled) = match view.controls {
            Controls::Answer { submit_enabled } => {
                self.answer_input.set_focused(!view.loading);
                self.answer_input
                    .render_with_style(answer_area, buf, "Your Answer", &self.answer_style);
                (SUBMIT_BUTTON, submit_enabled)
            }
            Controls::Reset => (RESET_BUTTON, !view.loading),
        };
        let button_style = if enabled {
            theme.label_style
        } else {
            theme.disabled_style
        };
        Paragraph::new(Line::styled(label, button_style))
            .alignment(Alignment::Center)
            .render(button_area, buf);

        HistoryPane::new(&self.history, theme).render(history_area, buf, &mut self.history_state);
    }

    fn question_height(&self, view: &InterviewView<'_>, area: Rect) -> u16 {
        match view.prompt {
            Prompt::Finished => 3,
            Prompt::Question(_) => {
                let inner_width = area.width.saturating_sub(2);
                let lines = markdown_view::layout(&self.question, inner_width, 0).len();
                let lines = u16::try_from(lines).unwrap_or(u16::MAX).max(1);
                let cap = (area.height / 5).saturating_mul(2).max(3);
                lines.saturating_add(2).min(cap)
            }
        }
    }

    fn render_prompt(&self, view: &InterviewView<'_>, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style);

        match view.prompt {
            Prompt::Question(_) => {
                let block = block
                    .title(format!(" Question {} ", view.question_count))
                    .title_style(theme.title_style);
                let inner = block.inner(area);
                block.render(area, buf);
                MarkdownView::new(&self.question)
                    .h_offset(self.history_state.h_offset)
                    .style(theme.base_style)
                    .render(inner, buf);
            }
            Prompt::Finished => {
                let inner = block.inner(area);
                block.render(area, buf);
                Paragraph::new(Line::styled(COMPLETE_NOTICE, theme.title_style))
                    .alignment(Alignment::Center)
                    .render(inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Qna, SessionId};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn buffer_text(buf: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn history() -> Vec<Qna> {
        vec![Qna::new("What is `Send`?", "A marker trait.", "Correct.")]
    }

    fn in_progress() -> InterviewSession {
        InterviewSession::new(
            SessionId::new("s-1").unwrap(),
            "Rust Developer",
            history(),
            Some("Explain **borrowing**.".to_string()),
            2,
            false,
        )
    }

    fn finished() -> InterviewSession {
        InterviewSession::new(
            SessionId::new("s-1").unwrap(),
            "Rust Developer",
            history(),
            None,
            1,
            true,
        )
    }

    fn view_of(session: &InterviewSession, submit_enabled: bool, loading: bool) -> InterviewView<'_> {
        InterviewView {
            job_role: session.job_role(),
            question_count: session.question_count(),
            prompt: session
                .current_question()
                .map_or(Prompt::Finished, Prompt::Question),
            controls: if session.is_complete() {
                Controls::Reset
            } else {
                Controls::Answer { submit_enabled }
            },
            history: session.conversation(),
            loading,
        }
    }

    fn draw(screen: &mut InterviewScreen, view: &InterviewView<'_>) -> String {
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        screen.render(view, &Theme::default(), area, &mut buf);
        buffer_text(&buf)
    }

    fn loaded(session: &InterviewSession) -> InterviewScreen {
        let theme = Theme::default();
        let mut screen = InterviewScreen::new(&theme);
        screen.load(session, &MarkdownRenderer::new(theme), &theme);
        screen
    }

    #[test]
    fn test_in_progress_shows_question_answer_and_history() {
        let session = in_progress();
        let mut screen = loaded(&session);

        let text = draw(&mut screen, &view_of(&session, false, false));

        assert!(text.contains("Question 2"));
        assert!(text.contains("Explain borrowing."));
        assert!(text.contains("Your Answer"));
        assert!(text.contains(SUBMIT_BUTTON));
        assert!(text.contains("Interview Progress"));
        assert!(text.contains("Q1: What is  Send"));
        assert!(text.contains("A: A marker trait."));
        assert!(text.contains("Feedback: Correct."));
        assert!(!text.contains(COMPLETE_NOTICE));
    }

    #[test]
    fn test_finished_shows_notice_and_reset() {
        let session = finished();
        let mut screen = loaded(&session);

        let text = draw(&mut screen, &view_of(&session, false, false));

        assert!(text.contains(COMPLETE_NOTICE));
        assert!(text.contains(RESET_BUTTON));
        assert!(!text.contains("Your Answer"));
        assert!(!text.contains(SUBMIT_BUTTON));
        assert!(text.contains("Q1: What is  Send"));
    }

    #[test]
    fn test_missing_question_without_completion_keeps_answer_entry() {
        let session = InterviewSession::new(
            SessionId::new("s-2").unwrap(),
            "Rust Developer",
            Vec::new(),
            None,
            0,
            false,
        );
        let mut screen = loaded(&session);

        let text = draw(&mut screen, &view_of(&session, false, false));

        assert!(text.contains(COMPLETE_NOTICE));
        assert!(text.contains("Your Answer"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let session = in_progress();
        let mut screen = loaded(&session);
        let view = view_of(&session, true, false);

        let first = draw(&mut screen, &view);
        let second = draw(&mut screen, &view);
        assert_eq!(first, second);
    }

    #[test]
    fn test_typing_edits_answer_unless_loading() {
        let session = in_progress();
        let mut screen = loaded(&session);

        let idle = view_of(&session, false, false);
        assert_eq!(screen.handle_key(key(KeyCode::Char('x')), &idle), InterviewAction::Edited);
        assert_eq!(screen.answer(), "x");

        let busy = view_of(&session, false, true);
        assert_eq!(screen.handle_key(key(KeyCode::Char('y')), &busy), InterviewAction::None);
        assert_eq!(screen.answer(), "x");
    }

    #[test]
    fn test_enter_resets_finished_interview() {
        let session = finished();
        let mut screen = loaded(&session);
        let view = view_of(&session, false, false);

        assert_eq!(screen.handle_key(key(KeyCode::Enter), &view), InterviewAction::Reset);
        assert_eq!(screen.handle_key(key(KeyCode::Char('a')), &view), InterviewAction::None);
    }

    #[test]
    fn test_load_clears_answer() {
        let session = in_progress();
        let mut screen = loaded(&session);
        screen.handle_key(key(KeyCode::Char('x')), &view_of(&session, false, false));

        screen.load(&session, &MarkdownRenderer::new(Theme::default()), &Theme::default());
        assert_eq!(screen.answer(), "");
    }
}

//! Job-role entry screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::application::SetupView;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::TextInput;

const TITLE: &str = " AI Interview Bot ";
const PROMPT: &str = "Enter the job role you want to practice for";
const PLACEHOLDER: &str = "e.g. 'React Developer', 'Java Engineer'";
const START_BUTTON: &str = "[ Start Interview ]";

/// Outcome of a key on the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SetupAction {
    None,
    /// Job-role text changed.
    Edited,
    Start,
    Quit,
}

/// Job-role entry UI.
pub struct SetupScreen {
    role_input: TextInput,
}

impl SetupScreen {
    /// Creates screen pre-filled with `job_role`.
    #[must_use]
    pub fn new(job_role: &str, theme: &Theme) -> Self {
        let mut role_input = TextInput::new("Job Role")
            .placeholder(PLACEHOLDER)
            .placeholder_style(theme.dimmed_style)
            .border_styles(theme.border_style, theme.focused_border_style);
        role_input.set_value(job_role);
        role_input.set_focused(true);

        Self { role_input }
    }

    /// Returns entered job role.
    #[must_use]
    pub fn job_role(&self) -> &str {
        self.role_input.value()
    }

    /// Empties the job-role entry.
    pub fn clear(&mut self) {
        self.role_input.clear();
    }

    /// Handles key event. Editing is ignored while `loading`.
    pub fn handle_key(&mut self, key: KeyEvent, loading: bool) -> SetupAction {
        match key.code {
            KeyCode::Enter => return SetupAction::Start,
            KeyCode::Esc => return SetupAction::Quit,
            _ if loading => return SetupAction::None,
            _ => {}
        }

        let before = self.role_input.value().len();
        match key.code {
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.role_input.input_char(c);
            }
            KeyCode::Backspace => self.role_input.backspace(),
            KeyCode::Delete => self.role_input.delete(),
            KeyCode::Left => self.role_input.move_left(),
            KeyCode::Right => self.role_input.move_right(),
            KeyCode::Home => self.role_input.move_start(),
            KeyCode::End => self.role_input.move_end(),
            _ => return SetupAction::None,
        }

        if self.role_input.value().len() == before {
            SetupAction::None
        } else {
            SetupAction::Edited
        }
    }

    /// Draws the centered job-role box into `area`.
    pub fn render(&mut self, view: &SetupView<'_>, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(11),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Max(64),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.focused_border_style)
            .title(TITLE)
            .title_style(theme.title_style);
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [prompt_area, _, input_area, _, button_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(PROMPT).style(theme.base_style).render(prompt_area, buf);

        self.role_input.set_enabled(!view.loading);
        (&self.role_input).render(input_area, buf);

        let button_style = if view.start_enabled {
            theme.label_style
        } else {
            theme.disabled_style
        };
        Paragraph::new(Line::styled(START_BUTTON, button_style))
            .alignment(Alignment::Center)
            .render(button_area, buf);

        Paragraph::new("Enter to start · Esc to quit")
            .style(theme.dimmed_style)
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

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

    #[test]
    fn test_typing_reports_edits() {
        let mut screen = SetupScreen::new("", &Theme::default());

        assert_eq!(screen.handle_key(key(KeyCode::Char('Q')), false), SetupAction::Edited);
        assert_eq!(screen.handle_key(key(KeyCode::Char('A')), false), SetupAction::Edited);
        assert_eq!(screen.handle_key(key(KeyCode::Left), false), SetupAction::None);
        assert_eq!(screen.job_role(), "QA");
    }

    #[test]
    fn test_editing_disabled_while_loading() {
        let mut screen = SetupScreen::new("Go", &Theme::default());

        assert_eq!(screen.handle_key(key(KeyCode::Backspace), true), SetupAction::None);
        assert_eq!(screen.job_role(), "Go");
        assert_eq!(screen.handle_key(key(KeyCode::Enter), true), SetupAction::Start);
    }

    #[test_case(KeyCode::Enter, false, SetupAction::Start ; "enter_starts")]
    #[test_case(KeyCode::Enter, true, SetupAction::Start ; "enter_while_loading")]
    #[test_case(KeyCode::Esc, false, SetupAction::Quit ; "esc_quits")]
    #[test_case(KeyCode::Tab, false, SetupAction::None ; "tab_ignored")]
    fn test_control_keys(code: KeyCode, loading: bool, expected: SetupAction) {
        let mut screen = SetupScreen::new("Go", &Theme::default());
        assert_eq!(screen.handle_key(key(code), loading), expected);
        assert_eq!(screen.job_role(), "Go");
    }

    #[test]
    fn test_render_shows_placeholder_and_button() {
        let theme = Theme::default();
        let mut screen = SetupScreen::new("", &theme);
        let view = SetupView {
            job_role: "",
            start_enabled: false,
            loading: false,
        };
        let area = Rect::new(0, 0, 70, 15);
        let mut buf = Buffer::empty(area);

        screen.render(&view, &theme, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("AI Interview Bot"));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains(START_BUTTON));
    }

    #[test]
    fn test_start_button_style_follows_enabled() {
        let theme = Theme::default();
        let mut screen = SetupScreen::new("Rust Developer", &theme);
        let area = Rect::new(0, 0, 70, 15);

        let find_button = |buf: &Buffer| {
            (0..area.height)
                .flat_map(|y| (0..area.width).map(move |x| (x, y)))
                .find(|&(x, y)| {
                    x + 2 < area.width
                        && buf[(x, y)].symbol() == "["
                        && buf[(x + 2, y)].symbol() == "S"
                })
                .map(|pos| buf[pos].style())
        };

        let mut enabled = Buffer::empty(area);
        let view = SetupView {
            job_role: "Rust Developer",
            start_enabled: true,
            loading: false,
        };
        screen.render(&view, &theme, area, &mut enabled);
        assert_eq!(find_button(&enabled).and_then(|s| s.fg), theme.label_style.fg);

        let mut disabled = Buffer::empty(area);
        let view = SetupView {
            start_enabled: false,
            loading: true,
            ..view
        };
        screen.render(&view, &theme, area, &mut disabled);
        assert_eq!(find_button(&disabled).and_then(|s| s.fg), theme.disabled_style.fg);
    }
}

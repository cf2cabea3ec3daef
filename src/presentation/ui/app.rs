//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures_util::StreamExt;
use ratatui::layout::{Constraint, Layout};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::application::use_cases::{StartInterviewUseCase, SubmitAnswerUseCase};
use crate::application::{
    Completion, Controls, IssuedRequest, RequestTicket, SessionController, SessionView,
};
use crate::domain::entities::InterviewSession;
use crate::domain::errors::InterviewError;
use crate::domain::keybinding::{Action, Keybind, Keymap};
use crate::domain::ports::InterviewPort;
use crate::presentation::events::{EventResult, is_force_quit, key_press};
use crate::presentation::services::MarkdownRenderer;
use crate::presentation::theme::Theme;
use crate::presentation::ui::backend::{Backend, BackendCommand, BackendEvent};
use crate::presentation::ui::interview_screen::{InterviewAction, InterviewScreen};
use crate::presentation::ui::setup_screen::{SetupAction, SetupScreen};
use crate::presentation::widgets::{FooterBar, FooterBarStyle, StatusBar, spinner_frame};

const TITLE: &str = "AI Interview Bot";
const DEFAULT_SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Presentation settings resolved from configuration.
#[allow(missing_docs)]
pub struct AppSettings {
    pub theme: Theme,
    pub renderer: MarkdownRenderer,
    pub keymap: Keymap,
    pub job_role: Option<String>,
    pub spinner_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            theme,
            renderer: MarkdownRenderer::new(theme),
            keymap: Keymap::default(),
            job_role: None,
            spinner_interval: DEFAULT_SPINNER_INTERVAL,
        }
    }
}

/// Terminal application: event loop, screens and backend worker.
pub struct App {
    controller: SessionController,
    keymap: Keymap,
    theme: Theme,
    renderer: MarkdownRenderer,
    setup: SetupScreen,
    interview: InterviewScreen,
    backend: Option<Backend>,
    command_tx: mpsc::UnboundedSender<BackendCommand>,
    event_rx: mpsc::UnboundedReceiver<BackendEvent>,
    spinner_interval: Duration,
    spinner_tick: usize,
    version_label: String,
    exiting: bool,
}

impl App {
    /// Creates app talking to `interview_port`.
    #[must_use]
    pub fn new(interview_port: Arc<dyn InterviewPort>, settings: AppSettings) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let backend = Backend::new(
            StartInterviewUseCase::new(interview_port.clone()),
            SubmitAnswerUseCase::new(interview_port),
            command_rx,
            event_tx,
        );

        let job_role = settings.job_role.unwrap_or_default();

        Self {
            controller: SessionController::with_job_role(job_role.clone()),
            setup: SetupScreen::new(&job_role, &settings.theme),
            interview: InterviewScreen::new(&settings.theme),
            keymap: settings.keymap,
            theme: settings.theme,
            renderer: settings.renderer,
            backend: Some(backend),
            command_tx,
            event_rx,
            spinner_interval: settings.spinner_interval,
            spinner_tick: 0,
            version_label: format!("v{}", crate::VERSION),
            exiting: false,
        }
    }

    /// # Errors
    /// Returns error if terminal IO fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let worker: Option<JoinHandle<()>> = self.backend.take().map(|b| tokio::spawn(b.run()));

        let result = self.run_event_loop(terminal).await;

        if let Some(worker) = worker {
            worker.abort();
        }
        info!("Application exiting normally");
        result
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut spinner = interval(self.spinner_interval);
        spinner.set_missed_tick_behavior(MissedTickBehavior::Skip);

        terminal.draw(|frame| self.render(frame))?;

        while !self.exiting {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    self.handle_backend_event(event);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = spinner.tick() => {
                    if self.controller.is_loading() {
                        self.spinner_tick = self.spinner_tick.wrapping_add(1);
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                maybe_event = terminal_events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_terminal_event(&event) == EventResult::Exit {
                                self.exiting = true;
                            }
                            terminal.draw(|frame| self.render(frame))?;
                        }
                        Some(Err(e)) => return Err(e.into()),
                        None => self.exiting = true,
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: &Event) -> EventResult {
        match key_press(event) {
            Some(key) => self.handle_key(key),
            None => EventResult::Ignored,
        }
    }

    fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Completed { ticket, outcome } => self.apply(ticket, outcome),
        }
    }

    fn apply(&mut self, ticket: RequestTicket, outcome: Result<InterviewSession, InterviewError>) {
        if self.controller.apply(ticket, outcome) == Completion::Applied
            && let Some(session) = self.controller.session()
        {
            self.interview.load(session, &self.renderer, &self.theme);
        }
    }

    fn dispatch(&mut self, issued: IssuedRequest) {
        let ticket = issued.ticket;
        if self.command_tx.send(issued.into()).is_err() {
            error!(%ticket, "Backend worker is not running");
            self.apply(ticket, Err(InterviewError::unexpected("backend worker stopped")));
        }
    }

    fn start(&mut self) {
        if let Some(issued) = self.controller.begin_start() {
            self.dispatch(issued);
        }
    }

    fn submit(&mut self) {
        if let Some(issued) = self.controller.begin_submit() {
            self.dispatch(issued);
        }
    }

    fn reset(&mut self) {
        if self.controller.reset() {
            self.interview.clear();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if is_force_quit(&key) {
            return EventResult::Exit;
        }

        if let Some(action) = self.keymap.action_for(&key) {
            debug!(?action, "Key binding triggered");
            return self.handle_action(action);
        }

        let loading = self.controller.is_loading();
        match self.controller.view() {
            SessionView::Setup(_) => match self.setup.handle_key(key, loading) {
                SetupAction::Start => self.start(),
                SetupAction::Quit => return EventResult::Exit,
                SetupAction::Edited => self.controller.set_job_role(self.setup.job_role()),
                SetupAction::None => return EventResult::Ignored,
            },
            SessionView::Interview(view) => match self.interview.handle_key(key, &view) {
                InterviewAction::Edited => self.controller.set_answer(self.interview.answer()),
                InterviewAction::Reset => self.reset(),
                InterviewAction::None => return EventResult::Ignored,
            },
        }

        EventResult::Consumed
    }

    fn handle_action(&mut self, action: Action) -> EventResult {
        let in_interview = self.controller.session().is_some();
        match action {
            Action::Quit => return EventResult::Exit,
            Action::Submit if in_interview => self.submit(),
            Action::Submit => self.start(),
            Action::NewInterview => self.reset(),
            Action::ClearInput if self.controller.is_loading() => {}
            Action::ClearInput if in_interview => {
                self.interview.clear_answer();
                self.controller.set_answer("");
            }
            Action::ClearInput => {
                self.setup.clear();
                self.controller.set_job_role("");
            }
            Action::ScrollUp => self.interview.scroll_history_up(),
            Action::ScrollDown => self.interview.scroll_history_down(),
            Action::ScrollLeft => self.interview.scroll_code_left(),
            Action::ScrollRight => self.interview.scroll_code_right(),
        }
        EventResult::Consumed
    }

    fn hints(&self, view: &SessionView<'_>) -> Vec<Keybind> {
        let enter = |label: &'static str, action| {
            Keybind::new(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), action, label)
        };

        match view {
            SessionView::Setup(_) => {
                let mut hints = vec![enter("Start", Action::Submit)];
                hints.extend(self.keymap.hints(&[Action::ClearInput, Action::Quit]));
                hints
            }
            SessionView::Interview(v) if v.controls == Controls::Reset => {
                let mut hints = vec![enter("New Interview", Action::NewInterview)];
                hints.extend(self.keymap.hints(&[
                    Action::ScrollUp,
                    Action::ScrollLeft,
                    Action::Quit,
                ]));
                hints
            }
            SessionView::Interview(_) => self.keymap.hints(&[
                Action::Submit,
                Action::ClearInput,
                Action::ScrollUp,
                Action::ScrollLeft,
                Action::NewInterview,
                Action::Quit,
            ]),
        }
    }

    fn status_bar(&self, view: &SessionView<'_>) -> StatusBar {
        let busy = view
            .is_loading()
            .then(|| spinner_frame(self.spinner_tick));

        let mut bar = StatusBar::new()
            .left(format!(" {TITLE}"))
            .accent(self.theme.title_style)
            .style(self.theme.dimmed_style);

        match view {
            SessionView::Setup(_) => {
                if let Some(frame) = busy {
                    bar = bar.right(format!("{frame} Starting interview "));
                }
            }
            SessionView::Interview(v) => {
                bar = bar.center(v.job_role.to_string());
                let progress = format!("Question {} ", v.question_count);
                bar = bar.right(match busy {
                    Some(frame) => format!("{frame} Waiting for feedback · {progress}"),
                    None => progress,
                });
            }
        }
        bar
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let view = self.controller.view();
        let status = self.status_bar(&view);
        let hints = self.hints(&view);
        let buf = frame.buffer_mut();

        ratatui::widgets::Widget::render(&status, header, buf);

        match view {
            SessionView::Setup(setup_view) => {
                self.setup.render(&setup_view, &self.theme, body, buf);
            }
            SessionView::Interview(interview_view) => {
                self.interview.render(&interview_view, &self.theme, body, buf);
            }
        }

        let screen = match view {
            SessionView::Setup(_) => "SETUP",
            SessionView::Interview(_) => "INTERVIEW",
        };
        ratatui::widgets::Widget::render(
            FooterBar::new(&hints)
                .screen(screen)
                .right_info(Some(self.version_label.as_str()))
                .style(FooterBarStyle::from_theme(&self.theme)),
            footer,
            buf,
        );
    }
}

//! Interview session controller.
//!
//! Owns the client-side state of one session: the job-role and answer
//! drafts, the latest session snapshot, and the request currently in flight.
//! Requests are issued and applied in two synchronous halves so the event
//! loop never blocks; the busy flag is derived from the outstanding ticket.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::application::dto::{StartInterviewRequest, SubmitAnswerRequest};
use crate::domain::entities::{InterviewSession, Qna};
use crate::domain::errors::InterviewError;

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request the caller must execute against the interview service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRequest {
    /// Open a new session.
    Start(StartInterviewRequest),
    /// Answer the pending question.
    SubmitAnswer(SubmitAnswerRequest),
}

impl SessionRequest {
    const fn kind(&self) -> RequestKind {
        match self {
            Self::Start(_) => RequestKind::Start,
            Self::SubmitAnswer(_) => RequestKind::SubmitAnswer,
        }
    }
}

/// Request plus the ticket its outcome must be applied with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRequest {
    /// Ticket to pass back to [`SessionController::apply`].
    pub ticket: RequestTicket,
    /// Request to execute.
    pub request: SessionRequest,
}

/// Result of applying a request outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Snapshot replaced the local session.
    Applied,
    /// Request failed, session left untouched.
    Failed,
    /// Ticket did not match the outstanding request; outcome ignored.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    Start,
    SubmitAnswer,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::SubmitAnswer => f.write_str("submit_answer"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    ticket: RequestTicket,
    kind: RequestKind,
}

/// What the active area shows in place of the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'a> {
    /// Pending question, rendered as markdown.
    Question(&'a str),
    /// No further question.
    Finished,
}

/// Controls shown below the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// Answer entry with a submit action.
    Answer {
        /// Whether the submit action is enabled.
        submit_enabled: bool,
    },
    /// Start-new-interview action.
    Reset,
}

/// View of the job-role entry stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupView<'a> {
    /// Current job-role draft.
    pub job_role: &'a str,
    /// Whether the start action is enabled.
    pub start_enabled: bool,
    /// Whether a request is in flight.
    pub loading: bool,
}

/// View of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewView<'a> {
    /// Job role of the session.
    pub job_role: &'a str,
    /// Questions issued so far.
    pub question_count: u32,
    /// Active prompt.
    pub prompt: Prompt<'a>,
    /// Active controls.
    pub controls: Controls,
    /// Completed exchanges, oldest first.
    pub history: &'a [Qna],
    /// Whether a request is in flight.
    pub loading: bool,
}

/// Everything the screens need to render, derived from controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView<'a> {
    /// No session yet.
    Setup(SetupView<'a>),
    /// Session open or finished.
    Interview(InterviewView<'a>),
}

impl SessionView<'_> {
    /// Returns whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        match self {
            Self::Setup(view) => view.loading,
            Self::Interview(view) => view.loading,
        }
    }
}

/// State machine for one interview session.
#[derive(Debug, Default)]
pub struct SessionController {
    job_role: String,
    answer: String,
    session: Option<InterviewSession>,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl SessionController {
    /// Creates controller with empty drafts and no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates controller with a pre-filled job-role draft.
    #[must_use]
    pub fn with_job_role(job_role: impl Into<String>) -> Self {
        Self {
            job_role: job_role.into(),
            ..Self::default()
        }
    }

    /// Returns job-role draft.
    #[must_use]
    pub fn job_role(&self) -> &str {
        &self.job_role
    }

    /// Replaces job-role draft.
    pub fn set_job_role(&mut self, job_role: impl Into<String>) {
        self.job_role = job_role.into();
    }

    /// Returns answer draft.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Replaces answer draft.
    pub fn set_answer(&mut self, answer: impl Into<String>) {
        self.answer = answer.into();
    }

    /// Returns current session snapshot.
    #[must_use]
    pub const fn session(&self) -> Option<&InterviewSession> {
        self.session.as_ref()
    }

    /// Returns whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns whether a session may be started now.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.session.is_none() && !self.is_loading() && !self.job_role.trim().is_empty()
    }

    /// Returns whether the answer draft may be submitted now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(InterviewSession::accepts_answers)
            && !self.is_loading()
            && !self.answer.trim().is_empty()
    }

    /// Returns whether the session may be discarded now.
    #[must_use]
    pub const fn can_reset(&self) -> bool {
        self.session.is_some() && !self.is_loading()
    }

    /// Issues a session-creation request for the job-role draft.
    ///
    /// Returns `None` without side effects when starting is not allowed.
    pub fn begin_start(&mut self) -> Option<IssuedRequest> {
        if !self.can_start() {
            debug!(
                loading = self.is_loading(),
                has_session = self.session.is_some(),
                "Start ignored"
            );
            return None;
        }

        let request = SessionRequest::Start(StartInterviewRequest::new(self.job_role.clone()));
        Some(self.issue(request))
    }

    /// Issues an answer submission for the current session.
    ///
    /// Returns `None` without side effects when submitting is not allowed.
    pub fn begin_submit(&mut self) -> Option<IssuedRequest> {
        if !self.can_submit() {
            debug!(loading = self.is_loading(), "Submit ignored");
            return None;
        }
        let session_id = self.session.as_ref()?.id().clone();

        let request =
            SessionRequest::SubmitAnswer(SubmitAnswerRequest::new(session_id, self.answer.clone()));
        Some(self.issue(request))
    }

    fn issue(&mut self, request: SessionRequest) -> IssuedRequest {
        let ticket = RequestTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.pending = Some(Pending {
            ticket,
            kind: request.kind(),
        });

        debug!(%ticket, kind = %request.kind(), "Request issued");
        IssuedRequest { ticket, request }
    }

    /// Applies the outcome of an issued request.
    ///
    /// Success replaces the session wholesale and clears the answer draft.
    /// Failure is logged and leaves the session untouched. Either way the
    /// request stops being outstanding.
    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<InterviewSession, InterviewError>,
    ) -> Completion {
        let Some(pending) = self.pending.filter(|p| p.ticket == ticket) else {
            warn!(%ticket, "Ignoring outcome of a request that is not outstanding");
            return Completion::Stale;
        };
        self.pending = None;

        match outcome {
            Ok(session) => {
                info!(
                    %ticket,
                    kind = %pending.kind,
                    session_id = %session.id(),
                    complete = session.is_complete(),
                    "Session snapshot applied"
                );
                self.session = Some(session);
                self.answer.clear();
                Completion::Applied
            }
            Err(e) => {
                error!(%ticket, kind = %pending.kind, error = %e, "Interview request failed");
                Completion::Failed
            }
        }
    }

    /// Discards the current session.
    ///
    /// The answer draft is cleared; the job-role draft is kept so the same
    /// role can be started again. Returns `false` when nothing was reset.
    pub fn reset(&mut self) -> bool {
        if !self.can_reset() {
            return false;
        }
        if let Some(session) = self.session.take() {
            info!(session_id = %session.id(), "Session discarded");
        }
        self.answer.clear();
        true
    }

    /// Derives the view model for the current state.
    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        let loading = self.is_loading();

        match &self.session {
            None => SessionView::Setup(SetupView {
                job_role: &self.job_role,
                start_enabled: self.can_start(),
                loading,
            }),
            Some(session) => {
                let prompt = session
                    .current_question()
                    .map_or(Prompt::Finished, Prompt::Question);
                let controls = if session.is_complete() {
                    Controls::Reset
                } else {
                    Controls::Answer {
                        submit_enabled: self.can_submit(),
                    }
                };

                SessionView::Interview(InterviewView {
                    job_role: session.job_role(),
                    question_count: session.question_count(),
                    prompt,
                    controls,
                    history: session.conversation(),
                    loading,
                })
            }
        }
    }
}

//! Interview session entities.

use std::fmt;

/// Opaque session identifier assigned by the interview service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Creates session ID, rejecting blank values.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One completed question, answer and feedback exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Qna {
    question: String,
    answer: String,
    feedback: String,
}

impl Qna {
    /// Creates new exchange record.
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        feedback: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            feedback: feedback.into(),
        }
    }

    /// Returns question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns submitted answer text.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns interviewer feedback.
    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

/// Snapshot of an interview session as returned by the interview service.
///
/// The client never mutates a snapshot; every state-changing request yields
/// a new one that replaces the previous copy wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSession {
    id: SessionId,
    job_role: String,
    conversation: Vec<Qna>,
    current_question: Option<String>,
    question_count: u32,
    complete: bool,
}

impl InterviewSession {
    /// Creates new session snapshot.
    #[must_use]
    pub fn new(
        id: SessionId,
        job_role: impl Into<String>,
        conversation: Vec<Qna>,
        current_question: Option<String>,
        question_count: u32,
        complete: bool,
    ) -> Self {
        Self {
            id,
            job_role: job_role.into(),
            conversation,
            current_question,
            question_count,
            complete,
        }
    }

    /// Returns session ID.
    #[must_use]
    pub const fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns job role the interview was started for.
    #[must_use]
    pub fn job_role(&self) -> &str {
        &self.job_role
    }

    /// Returns completed exchanges in chronological order.
    #[must_use]
    pub fn conversation(&self) -> &[Qna] {
        &self.conversation
    }

    /// Returns pending question, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    /// Returns number of questions issued so far.
    #[must_use]
    pub const fn question_count(&self) -> u32 {
        self.question_count
    }

    /// Returns whether the interview has concluded.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns whether answers are still accepted.
    #[must_use]
    pub const fn accepts_answers(&self) -> bool {
        !self.complete
    }
}

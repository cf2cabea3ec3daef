//! Interview request DTOs.

use crate::domain::entities::SessionId;

/// Request to open a new interview session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartInterviewRequest {
    /// Job role the interview targets.
    pub job_role: String,
}

impl StartInterviewRequest {
    /// Creates new start request.
    #[must_use]
    pub fn new(job_role: impl Into<String>) -> Self {
        Self {
            job_role: job_role.into(),
        }
    }
}

/// Request to answer the pending question of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAnswerRequest {
    /// Session the answer belongs to.
    pub session_id: SessionId,
    /// Raw answer text, sent unchanged.
    pub answer: String,
}

impl SubmitAnswerRequest {
    /// Creates new answer request.
    #[must_use]
    pub fn new(session_id: SessionId, answer: impl Into<String>) -> Self {
        Self {
            session_id,
            answer: answer.into(),
        }
    }
}

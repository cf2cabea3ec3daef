//! Submit answer use case implementation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::SubmitAnswerRequest;
use crate::domain::entities::InterviewSession;
use crate::domain::errors::InterviewError;
use crate::domain::ports::InterviewPort;

/// Sends an answer and returns the graded session snapshot.
#[derive(Clone)]
pub struct SubmitAnswerUseCase {
    interview_port: Arc<dyn InterviewPort>,
}

impl SubmitAnswerUseCase {
    /// Creates new submit answer use case.
    #[must_use]
    pub const fn new(interview_port: Arc<dyn InterviewPort>) -> Self {
        Self { interview_port }
    }

    /// Executes submission with provided request.
    ///
    /// # Errors
    /// Returns error if the answer is blank, the interview service fails, or
    /// the returned snapshot belongs to another session.
    pub async fn execute(
        &self,
        request: SubmitAnswerRequest,
    ) -> Result<InterviewSession, InterviewError> {
        if request.answer.trim().is_empty() {
            return Err(InterviewError::invalid_input("answer is required"));
        }

        debug!(
            session_id = %request.session_id,
            answer_len = request.answer.len(),
            "Submitting answer"
        );

        let session = self
            .interview_port
            .submit_answer(&request.session_id, &request.answer)
            .await?;

        if session.id() != &request.session_id {
            return Err(InterviewError::SessionMismatch {
                expected: request.session_id.to_string(),
                actual: session.id().to_string(),
            });
        }

        info!(
            session_id = %session.id(),
            question_count = session.question_count(),
            complete = session.is_complete(),
            "Answer graded"
        );

        Ok(session)
    }
}

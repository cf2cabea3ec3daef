//! Interview service port definition.

use async_trait::async_trait;

use crate::domain::entities::{InterviewSession, SessionId};
use crate::domain::errors::InterviewError;

/// Port for the remote interview service.
///
/// Both operations return the full session snapshot after the change.
#[async_trait]
pub trait InterviewPort: Send + Sync {
    /// Creates a new session for the job role.
    async fn start_session(&self, job_role: &str) -> Result<InterviewSession, InterviewError>;

    /// Submits an answer to the pending question of a session.
    async fn submit_answer(
        &self,
        session_id: &SessionId,
        answer: &str,
    ) -> Result<InterviewSession, InterviewError>;
}

/// Test doubles for [`InterviewPort`].
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Request observed by the mock.
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[allow(missing_docs)]
    pub enum RecordedCall {
        Start { job_role: String },
        Answer { session_id: String, answer: String },
    }

    /// Scripted interview port for testing.
    #[derive(Default)]
    pub struct MockInterviewPort {
        responses: Mutex<VecDeque<Result<InterviewSession, InterviewError>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockInterviewPort {
        /// Creates mock with no scripted responses.
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues next response.
        pub fn push_response(&self, response: Result<InterviewSession, InterviewError>) {
            self.responses.lock().unwrap().push_back(response);
        }

        /// Returns calls observed so far.
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        fn next_response(&self) -> Result<InterviewSession, InterviewError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(InterviewError::unexpected("no scripted response")))
        }
    }

    #[async_trait]
    impl InterviewPort for MockInterviewPort {
        async fn start_session(&self, job_role: &str) -> Result<InterviewSession, InterviewError> {
            self.calls.lock().unwrap().push(RecordedCall::Start {
                job_role: job_role.to_string(),
            });
            self.next_response()
        }

        async fn submit_answer(
            &self,
            session_id: &SessionId,
            answer: &str,
        ) -> Result<InterviewSession, InterviewError> {
            self.calls.lock().unwrap().push(RecordedCall::Answer {
                session_id: session_id.to_string(),
                answer: answer.to_string(),
            });
            self.next_response()
        }
    }
}

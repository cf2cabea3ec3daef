//! Start interview use case implementation.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::dto::StartInterviewRequest;
use crate::domain::entities::InterviewSession;
use crate::domain::errors::InterviewError;
use crate::domain::ports::InterviewPort;

/// Opens a new interview session.
#[derive(Clone)]
pub struct StartInterviewUseCase {
    interview_port: Arc<dyn InterviewPort>,
}

impl StartInterviewUseCase {
    /// Creates new start interview use case.
    #[must_use]
    pub const fn new(interview_port: Arc<dyn InterviewPort>) -> Self {
        Self { interview_port }
    }

    /// Executes start with provided request.
    ///
    /// # Errors
    /// Returns error if the role is blank or the interview service fails.
    pub async fn execute(
        &self,
        request: StartInterviewRequest,
    ) -> Result<InterviewSession, InterviewError> {
        if request.job_role.trim().is_empty() {
            return Err(InterviewError::invalid_input("job role is required"));
        }

        debug!(job_role = %request.job_role, "Starting interview");

        let session = self
            .interview_port
            .start_session(&request.job_role)
            .await?;

        info!(
            session_id = %session.id(),
            job_role = %session.job_role(),
            question_count = session.question_count(),
            "Interview started"
        );

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::log_capture::CapturedLogs;
    use crate::domain::entities::SessionId;
    use crate::domain::ports::mocks::{MockInterviewPort, RecordedCall};

    fn snapshot() -> InterviewSession {
        InterviewSession::new(
            SessionId::new("s1").unwrap(),
            "Backend Engineer",
            Vec::new(),
            Some("What is a hash map?".to_string()),
            1,
            false,
        )
    }

    #[tokio::test]
    async fn test_successful_start() {
        let port = Arc::new(MockInterviewPort::new());
        port.push_response(Ok(snapshot()));

        let use_case = StartInterviewUseCase::new(port.clone());
        let session = use_case
            .execute(StartInterviewRequest::new("Backend Engineer"))
            .await
            .unwrap();

        assert_eq!(session, snapshot());
        assert_eq!(
            port.calls(),
            vec![RecordedCall::Start {
                job_role: "Backend Engineer".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_blank_role_never_reaches_service() {
        let port = Arc::new(MockInterviewPort::new());
        let use_case = StartInterviewUseCase::new(port.clone());

        let result = use_case.execute(StartInterviewRequest::new("  ")).await;

        assert!(matches!(result, Err(InterviewError::InvalidInput { .. })));
        assert!(port.calls().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let port = Arc::new(MockInterviewPort::new());
        port.push_response(Err(InterviewError::network("connection refused")));

        let use_case = StartInterviewUseCase::new(port);
        let result = use_case.execute(StartInterviewRequest::new("SRE")).await;

        assert!(matches!(result, Err(InterviewError::Network { .. })));
    }

    #[tokio::test]
    async fn test_failure_is_left_to_the_caller_to_report() {
        let (logs, _guard) = CapturedLogs::install();
        let port = Arc::new(MockInterviewPort::new());
        port.push_response(Err(InterviewError::network("connection refused")));
        let use_case = StartInterviewUseCase::new(port);

        assert!(use_case.execute(StartInterviewRequest::new("SRE")).await.is_err());
        assert!(use_case.execute(StartInterviewRequest::new("")).await.is_err());

        let output = logs.contents();
        assert!(output.contains("Starting interview"));
        assert!(!output.contains("WARN"));
        assert!(!output.contains("ERROR"));
    }
}

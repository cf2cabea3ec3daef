use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::dto::{StartInterviewRequest, SubmitAnswerRequest};
use crate::application::use_cases::{StartInterviewUseCase, SubmitAnswerUseCase};
use crate::application::{IssuedRequest, RequestTicket, SessionRequest};
use crate::domain::entities::InterviewSession;
use crate::domain::errors::InterviewError;

/// Result delivered back to the event loop.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum BackendEvent {
    Completed {
        ticket: RequestTicket,
        outcome: Result<InterviewSession, InterviewError>,
    },
}

/// Request for the backend worker.
#[derive(Debug)]
#[allow(missing_docs)]
pub enum BackendCommand {
    StartInterview {
        ticket: RequestTicket,
        request: StartInterviewRequest,
    },
    SubmitAnswer {
        ticket: RequestTicket,
        request: SubmitAnswerRequest,
    },
}

impl BackendCommand {
    /// Returns the ticket the outcome must carry.
    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        match self {
            Self::StartInterview { ticket, .. } | Self::SubmitAnswer { ticket, .. } => *ticket,
        }
    }
}

impl From<IssuedRequest> for BackendCommand {
    fn from(issued: IssuedRequest) -> Self {
        let ticket = issued.ticket;
        match issued.request {
            SessionRequest::Start(request) => Self::StartInterview { ticket, request },
            SessionRequest::SubmitAnswer(request) => Self::SubmitAnswer { ticket, request },
        }
    }
}

/// Executes interview requests off the event loop.
pub struct Backend {
    start: StartInterviewUseCase,
    submit: SubmitAnswerUseCase,
    command_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
}

impl Backend {
    /// Creates worker reading `command_rx` and replying on `event_tx`.
    pub const fn new(
        start: StartInterviewUseCase,
        submit: SubmitAnswerUseCase,
        command_rx: mpsc::UnboundedReceiver<BackendCommand>,
        event_tx: mpsc::UnboundedSender<BackendEvent>,
    ) -> Self {
        Self {
            start,
            submit,
            command_rx,
            event_tx,
        }
    }

    #[cfg(test)]
    pub(crate) fn try_recv_command(&mut self) -> Option<BackendCommand> {
        self.command_rx.try_recv().ok()
    }

    /// Processes commands until the sender is dropped.
    pub async fn run(mut self) {
        info!("Backend worker started");
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command).await;
        }
        info!("Backend worker stopped");
    }

    async fn handle_command(&self, command: BackendCommand) {
        let ticket = command.ticket();
        let outcome = match command {
            BackendCommand::StartInterview { request, .. } => {
                debug!(%ticket, job_role = %request.job_role, "Starting interview");
                self.start.execute(request).await
            }
            BackendCommand::SubmitAnswer { request, .. } => {
                debug!(%ticket, session_id = %request.session_id, "Submitting answer");
                self.submit.execute(request).await
            }
        };

        if self
            .event_tx
            .send(BackendEvent::Completed { ticket, outcome })
            .is_err()
        {
            warn!(%ticket, "Event loop gone, dropping request outcome");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SessionController;
    use crate::domain::entities::{Qna, SessionId};
    use crate::domain::ports::mocks::{MockInterviewPort, RecordedCall};
    use std::sync::Arc;

    fn session(id: &str, question: Option<&str>, history: Vec<Qna>) -> InterviewSession {
        let count = u32::try_from(history.len()).unwrap() + u32::from(question.is_some());
        InterviewSession::new(
            SessionId::new(id).unwrap(),
            "Rust Developer",
            history,
            question.map(ToString::to_string),
            count,
            question.is_none(),
        )
    }

    fn spawn_backend(
        port: Arc<MockInterviewPort>,
    ) -> (
        mpsc::UnboundedSender<BackendCommand>,
        mpsc::UnboundedReceiver<BackendEvent>,
    ) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let backend = Backend::new(
            StartInterviewUseCase::new(port.clone()),
            SubmitAnswerUseCase::new(port),
            command_rx,
            event_tx,
        );
        tokio::spawn(backend.run());
        (command_tx, event_rx)
    }

    #[tokio::test]
    async fn test_start_then_submit_round_trip() {
        let port = Arc::new(MockInterviewPort::new());
        port.push_response(Ok(session("s-1", Some("What is a trait?"), vec![])));
        port.push_response(Ok(session(
            "s-1",
            Some("What is a lifetime?"),
            vec![Qna::new("What is a trait?", "Shared behaviour.", "Correct.")],
        )));
        let (command_tx, mut event_rx) = spawn_backend(port.clone());

        let mut controller = SessionController::with_job_role("Rust Developer");
        let issued = controller.begin_start().unwrap();
        command_tx.send(issued.into()).unwrap();

        let BackendEvent::Completed { ticket, outcome } = event_rx.recv().await.unwrap();
        controller.apply(ticket, outcome);
        assert_eq!(
            controller.session().and_then(InterviewSession::current_question),
            Some("What is a trait?")
        );

        controller.set_answer("Shared behaviour.");
        let issued = controller.begin_submit().unwrap();
        command_tx.send(issued.into()).unwrap();

        let BackendEvent::Completed { ticket, outcome } = event_rx.recv().await.unwrap();
        controller.apply(ticket, outcome);

        let session = controller.session().unwrap();
        assert_eq!(session.conversation().len(), 1);
        assert_eq!(controller.answer(), "");
        assert_eq!(
            port.calls(),
            vec![
                RecordedCall::Start {
                    job_role: "Rust Developer".to_string()
                },
                RecordedCall::Answer {
                    session_id: "s-1".to_string(),
                    answer: "Shared behaviour.".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_is_delivered_with_ticket() {
        let port = Arc::new(MockInterviewPort::new());
        port.push_response(Err(InterviewError::network("connection refused")));
        let (command_tx, mut event_rx) = spawn_backend(port);

        let mut controller = SessionController::with_job_role("QA Engineer");
        let issued = controller.begin_start().unwrap();
        let expected = issued.ticket;
        command_tx.send(issued.into()).unwrap();

        let BackendEvent::Completed { ticket, outcome } = event_rx.recv().await.unwrap();
        assert_eq!(ticket, expected);
        assert!(outcome.unwrap_err().is_network_error());
    }

    #[tokio::test]
    async fn test_worker_stops_when_commands_close() {
        let port = Arc::new(MockInterviewPort::new());
        let (command_tx, mut event_rx) = spawn_backend(port);

        drop(command_tx);
        assert!(event_rx.recv().await.is_none());
    }
}

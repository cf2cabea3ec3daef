use serde::Deserialize;

use crate::domain::entities::{InterviewSession, Qna, SessionId};
use crate::domain::errors::InterviewError;

/// Session snapshot as returned by both interview endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SessionResponse {
    pub session_id: String,
    pub job_role: String,
    pub conversation: Vec<QnaResponse>,
    #[serde(default)]
    pub current_question: Option<String>,
    pub question_count: u32,
    #[serde(alias = "isComplete")]
    pub complete: bool,
}

/// One graded exchange.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct QnaResponse {
    pub question: String,
    pub answer: String,
    pub feedback: String,
}

/// Error body of the interview service. Every field is optional since
/// proxies and servlet containers answer with their own shapes.
#[derive(Debug, Default, Deserialize)]
#[allow(missing_docs)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Returns the most specific non-blank description.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
    }
}

impl From<QnaResponse> for Qna {
    fn from(value: QnaResponse) -> Self {
        Self::new(value.question, value.answer, value.feedback)
    }
}

impl TryFrom<SessionResponse> for InterviewSession {
    type Error = InterviewError;

    fn try_from(value: SessionResponse) -> Result<Self, Self::Error> {
        let id = SessionId::new(value.session_id)
            .ok_or_else(|| InterviewError::invalid_response("sessionId is blank"))?;

        Ok(Self::new(
            id,
            value.job_role,
            value.conversation.into_iter().map(Qna::from).collect(),
            value.current_question,
            value.question_count,
            value.complete,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<InterviewSession, InterviewError> {
        let response: SessionResponse = serde_json::from_str(json)
            .map_err(|e| InterviewError::invalid_response(e.to_string()))?;
        InterviewSession::try_from(response)
    }

    #[test]
    fn test_fresh_session() {
        let session = parse(
            r#"{
                "sessionId": "7f3c",
                "jobRole": "React Developer",
                "conversation": [],
                "currentQuestion": "What is a **hook**?",
                "questionCount": 1,
                "complete": false
            }"#,
        )
        .unwrap();

        assert_eq!(session.id().as_str(), "7f3c");
        assert_eq!(session.current_question(), Some("What is a **hook**?"));
        assert!(session.accepts_answers());
    }

    #[test]
    fn test_is_complete_alias_and_null_question() {
        let session = parse(
            r#"{
                "sessionId": "7f3c",
                "jobRole": "React Developer",
                "conversation": [
                    {"question": "Q", "answer": "A", "feedback": "F"}
                ],
                "currentQuestion": null,
                "questionCount": 5,
                "isComplete": true
            }"#,
        )
        .unwrap();

        assert!(session.is_complete());
        assert_eq!(session.current_question(), None);
        assert_eq!(session.conversation()[0].feedback(), "F");
    }

    #[test]
    fn test_missing_required_field() {
        let result = parse(
            r#"{"sessionId": "7f3c", "jobRole": "SRE", "currentQuestion": "Q", "questionCount": 1, "complete": false}"#,
        );
        assert!(matches!(result, Err(InterviewError::InvalidResponse { .. })));
    }

    #[test]
    fn test_wrongly_typed_field() {
        let result = parse(
            r#"{"sessionId": "7f3c", "jobRole": "SRE", "conversation": [], "questionCount": "one", "complete": false}"#,
        );
        assert!(matches!(result, Err(InterviewError::InvalidResponse { .. })));
    }

    #[test]
    fn test_blank_session_id() {
        let result = parse(
            r#"{"sessionId": " ", "jobRole": "SRE", "conversation": [], "questionCount": 1, "complete": false}"#,
        );
        assert!(matches!(result, Err(InterviewError::InvalidResponse { .. })));
    }

    #[test]
    fn test_error_summary_prefers_message() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"status": 404, "error": "Not Found", "message": "Session not found"}"#,
        )
        .unwrap();
        assert_eq!(body.summary(), Some("Session not found"));

        let body: ErrorResponse =
            serde_json::from_str(r#"{"error": "Internal Server Error", "message": ""}"#).unwrap();
        assert_eq!(body.summary(), Some("Internal Server Error"));
    }
}

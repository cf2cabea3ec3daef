//! Interview service HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use tracing::{debug, warn};

use super::dto::{ErrorResponse, SessionResponse};
use crate::domain::entities::{InterviewSession, SessionId};
use crate::domain::errors::InterviewError;
use crate::domain::ports::InterviewPort;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const ERROR_BODY_PREVIEW: usize = 200;

/// Interview service client speaking the `/api/interview` REST contract.
pub struct InterviewHttpClient {
    client: Client,
    base_url: Url,
}

impl InterviewHttpClient {
    /// Creates client for the given base URL.
    ///
    /// `timeout` of `None` leaves requests without a client deadline.
    ///
    /// # Errors
    /// Returns error if the URL is unusable or HTTP client creation fails.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, InterviewError> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            InterviewError::invalid_input(format!("invalid base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(InterviewError::invalid_input(format!(
                "base URL must be http(s): {base_url}"
            )));
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InterviewError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Returns base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, InterviewError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| InterviewError::invalid_input("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn map_send_error(&self, e: &reqwest::Error) -> InterviewError {
        warn!(error = %e, base_url = %self.base_url, "Failed to reach interview service");
        if e.is_timeout() {
            InterviewError::network("request timed out")
        } else if e.is_connect() {
            InterviewError::network(format!("failed to connect to {}", self.base_url))
        } else {
            InterviewError::network(e.to_string())
        }
    }

    async fn handle_error_response(
        status: StatusCode,
        response: reqwest::Response,
    ) -> InterviewError {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|error| error.summary().map(ToString::to_string))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.chars().take(ERROR_BODY_PREVIEW).collect())
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        InterviewError::rejected(status.as_u16(), message)
    }

    async fn read_session(
        &self,
        response: reqwest::Response,
    ) -> Result<InterviewSession, InterviewError> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response.text().await.map_err(|e| self.map_send_error(&e))?;
        let session_response: SessionResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse session response");
            InterviewError::invalid_response(e.to_string())
        })?;

        InterviewSession::try_from(session_response)
    }
}

#[async_trait]
impl InterviewPort for InterviewHttpClient {
    async fn start_session(&self, job_role: &str) -> Result<InterviewSession, InterviewError> {
        let url = self.endpoint(&["api", "interview", "start"])?;

        debug!(%url, job_role, "Requesting new interview session");

        let response = self
            .client
            .post(url)
            .query(&[("jobRole", job_role)])
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        self.read_session(response).await
    }

    async fn submit_answer(
        &self,
        session_id: &SessionId,
        answer: &str,
    ) -> Result<InterviewSession, InterviewError> {
        let url = self.endpoint(&["api", "interview", session_id.as_str(), "answer"])?;

        debug!(%url, answer_len = answer.len(), "Submitting answer");

        let response = self
            .client
            .post(url)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(answer.to_owned())
            .send()
            .await
            .map_err(|e| self.map_send_error(&e))?;

        self.read_session(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const SESSION_JSON: &str = r#"{
        "sessionId": "s1",
        "jobRole": "React Developer",
        "conversation": [],
        "currentQuestion": "What is a hook?",
        "questionCount": 1,
        "complete": false
    }"#;

    /// Serves a single canned response and hands back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut raw = Vec::new();
        let mut buf = [0_u8; 1024];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&raw);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if raw.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }

        String::from_utf8(raw).unwrap()
    }

    #[tokio::test]
    async fn test_start_encodes_job_role() {
        let (base, server) = serve_once("200 OK", SESSION_JSON).await;
        let client = InterviewHttpClient::new(&base, None).unwrap();

        let session = client.start_session("C++ & Rust").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(session.id().as_str(), "s1");
        assert!(
            request.starts_with("POST /api/interview/start?jobRole=C%2B%2B+%26+Rust HTTP/1.1"),
            "unexpected request line: {request}"
        );
    }

    #[tokio::test]
    async fn test_submit_sends_plain_text() {
        let (base, server) = serve_once("200 OK", SESSION_JSON).await;
        let client = InterviewHttpClient::new(&base, None).unwrap();
        let session_id = SessionId::new("s1").unwrap();

        client
            .submit_answer(&session_id, "Hooks let components\nkeep state.")
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /api/interview/s1/answer HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: text/plain"));
        assert!(request.ends_with("\r\n\r\nHooks let components\nkeep state."));
    }

    #[tokio::test]
    async fn test_base_url_path_prefix_kept() {
        let (base, server) = serve_once("200 OK", SESSION_JSON).await;
        let client = InterviewHttpClient::new(&format!("{base}/proxy/"), None).unwrap();

        client.start_session("SRE").await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /proxy/api/interview/start?jobRole=SRE "));
    }

    #[tokio::test]
    async fn test_spring_error_message_surfaces() {
        let (base, _server) = serve_once(
            "404 Not Found",
            r#"{"timestamp":"2024-01-01T00:00:00Z","status":404,"error":"Not Found","message":"Session not found","path":"/api/interview/x/answer"}"#,
        )
        .await;
        let client = InterviewHttpClient::new(&base, None).unwrap();
        let session_id = SessionId::new("x").unwrap();

        let err = client.submit_answer(&session_id, "hi").await.unwrap_err();

        assert!(matches!(
            err,
            InterviewError::Rejected { status: 404, ref message } if message == "Session not found"
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (base, _server) = serve_once("200 OK", r#"{"sessionId": "s1"}"#).await;
        let client = InterviewHttpClient::new(&base, None).unwrap();

        let err = client.start_session("SRE").await.unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = InterviewHttpClient::new(&format!("http://{addr}"), None).unwrap();
        let err = client.start_session("SRE").await.unwrap_err();

        assert!(err.is_network_error());
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(InterviewHttpClient::new("not a url", None).is_err());
        assert!(InterviewHttpClient::new("mailto:bot@example.com", None).is_err());
        assert!(InterviewHttpClient::new("ftp://example.com", None).is_err());
    }
}

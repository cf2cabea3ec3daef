//! Domain entities.

mod session;

pub use session::{InterviewSession, Qna, SessionId};

//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Keybinding definitions.
pub mod keybinding;
/// Port definitions.
pub mod ports;

pub use entities::{InterviewSession, Qna, SessionId};
pub use errors::InterviewError;
pub use ports::InterviewPort;

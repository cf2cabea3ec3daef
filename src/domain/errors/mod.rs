//! Domain error types.

mod interview_error;

pub use interview_error::InterviewError;

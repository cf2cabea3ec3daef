//! Data transfer objects.

mod interview_dto;

pub use interview_dto::{StartInterviewRequest, SubmitAnswerRequest};

//! Application layer with use cases, services and the session controller.

/// Session state machine.
pub mod controller;
/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use controller::{
    Completion, Controls, InterviewView, IssuedRequest, Prompt, RequestTicket,
    SessionController, SessionRequest, SessionView, SetupView,
};
pub use dto::{StartInterviewRequest, SubmitAnswerRequest};
pub use use_cases::{StartInterviewUseCase, SubmitAnswerUseCase};

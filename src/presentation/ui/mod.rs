//! UI screens.

mod app;
mod backend;
mod interview_screen;
mod setup_screen;

pub use app::{App, AppSettings};
pub use backend::{Backend, BackendCommand, BackendEvent};
pub use interview_screen::{InterviewAction, InterviewScreen};
pub use setup_screen::{SetupAction, SetupScreen};

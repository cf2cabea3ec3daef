mod answer_input;
mod footer_bar;
mod history_pane;
mod input;
pub mod markdown_view;
mod status_bar;

pub use answer_input::{AnswerInput, AnswerInputStyle};
pub use footer_bar::{FooterBar, FooterBarStyle};
pub use history_pane::{HistoryEntry, HistoryPane, HistoryPaneState, render_history};
pub use input::TextInput;
pub use markdown_view::MarkdownView;
pub use status_bar::{StatusBar, spinner_frame};

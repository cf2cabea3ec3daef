//! Interview service adapter.

mod client;
mod dto;

pub use client::InterviewHttpClient;

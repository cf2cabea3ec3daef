/// Colour conversions.
pub mod adapter;
mod service;

pub use service::{Brightness, Theme};

//! Rendering services.

/// Markdown to styled terminal lines.
pub mod markdown_renderer;
pub mod syntax_highlighting;

pub use markdown_renderer::{LineKind, MarkdownRenderer, RenderedLine, RenderedMarkdown};
pub use syntax_highlighting::{PlainHighlighter, SyntaxHighlighter, SyntectHighlighter};

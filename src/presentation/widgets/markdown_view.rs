//! Lays rendered markdown out for a given width.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::presentation::services::markdown_renderer::{LineKind, RenderedMarkdown};

/// Produces terminal lines: prose is word-wrapped, code is clipped at `h_offset`.
#[must_use]
pub fn layout(content: &RenderedMarkdown, width: u16, h_offset: usize) -> Vec<Line<'static>> {
    let width = usize::from(width);
    if width == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(content.lines().len());
    for rendered in content.lines() {
        match rendered.kind {
            LineKind::Prose => out.extend(wrap_spans(&rendered.line.spans, width)),
            LineKind::Rule => {
                let style = rendered.line.spans.first().map_or_else(Style::default, |s| s.style);
                out.push(Line::from(Span::styled("─".repeat(width), style)));
            }
            LineKind::Code { block_width, fill } => {
                out.push(code_line(&rendered.line.spans, block_width, fill, width, h_offset));
            }
        }
    }
    out
}

fn code_line(
    spans: &[Span<'static>],
    block_width: usize,
    fill: Style,
    width: usize,
    h_offset: usize,
) -> Line<'static> {
    let box_width = (block_width + 2).min(width);
    if box_width < 2 {
        let (clipped, _) = clip_spans(spans, h_offset, box_width);
        return Line::from(clipped);
    }

    let inner = box_width - 2;
    let offset = h_offset.min(block_width.saturating_sub(inner));
    let (clipped, used) = clip_spans(spans, offset, inner);

    let mut line = Vec::with_capacity(clipped.len() + 3);
    line.push(Span::styled(" ", fill));
    line.extend(clipped);
    if used < inner {
        line.push(Span::styled(" ".repeat(inner - used), fill));
    }
    line.push(Span::styled(" ", fill));
    Line::from(line)
}

/// Returns the part of `spans` between display columns `skip` and `skip + take`.
fn clip_spans(spans: &[Span<'static>], skip: usize, take: usize) -> (Vec<Span<'static>>, usize) {
    let mut out = Vec::new();
    let mut column = 0;
    let mut used = 0;

    for span in spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            let w = ch.width().unwrap_or(0);
            let start = column;
            column += w;

            if column <= skip {
                continue;
            }
            if start < skip {
                let visible = (column - skip).min(take - used);
                piece.push_str(&" ".repeat(visible));
                used += visible;
            } else if used + w <= take {
                piece.push(ch);
                used += w;
            } else {
                let room = take - used;
                piece.push_str(&" ".repeat(room));
                used += room;
            }

            if used >= take {
                break;
            }
        }
        if !piece.is_empty() {
            out.push(Span::styled(piece, span.style));
        }
        if used >= take {
            break;
        }
    }

    (out, used)
}

/// Greedy word wrap. Leading whitespace survives only on the first line.
fn wrap_spans(spans: &[Span<'static>], width: usize) -> Vec<Line<'static>> {
    let mut wrapper = Wrapper {
        width,
        lines: Vec::new(),
        current: Vec::new(),
        current_width: 0,
    };

    for span in spans {
        for token in tokens(&span.content) {
            wrapper.push_token(token, span.style);
        }
    }

    if !wrapper.current.is_empty() || wrapper.lines.is_empty() {
        wrapper.flush();
    }
    wrapper.lines
}

struct Wrapper {
    width: usize,
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    current_width: usize,
}

impl Wrapper {
    fn push_token(&mut self, token: &str, style: Style) {
        let w = token.width();

        if token.starts_with(char::is_whitespace) {
            let at_line_start = self.current_width == 0;
            if at_line_start && !self.lines.is_empty() {
                return;
            }
            if self.current_width + w > self.width {
                self.flush();
                return;
            }
            self.push(token.to_string(), w, style);
            return;
        }

        if self.current_width + w > self.width && self.current_width > 0 {
            self.flush();
        }

        if w <= self.width {
            self.push(token.to_string(), w, style);
            return;
        }

        let mut piece = String::new();
        let mut piece_width = 0;
        for ch in token.chars() {
            let cw = ch.width().unwrap_or(0);
            if self.current_width + piece_width + cw > self.width
                && self.current_width + piece_width > 0
            {
                self.push(std::mem::take(&mut piece), piece_width, style);
                piece_width = 0;
                self.flush();
            }
            piece.push(ch);
            piece_width += cw;
        }
        if !piece.is_empty() {
            self.push(piece, piece_width, style);
        }
    }

    fn push(&mut self, content: String, width: usize, style: Style) {
        if !content.is_empty() {
            self.current.push(Span::styled(content, style));
            self.current_width += width;
        }
    }

    fn flush(&mut self) {
        while self
            .current
            .last()
            .is_some_and(|span| span.content.chars().all(char::is_whitespace))
        {
            self.current.pop();
        }
        self.lines.push(Line::from(std::mem::take(&mut self.current)));
        self.current_width = 0;
    }
}

/// Splits text into alternating runs of whitespace and non-whitespace.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_whitespace() != space)
            .map_or(rest.len(), |(i, _)| i);
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

/// Scrollable view over rendered markdown.
pub struct MarkdownView<'a> {
    content: &'a RenderedMarkdown,
    h_offset: usize,
    scroll: usize,
    style: Style,
}

impl<'a> MarkdownView<'a> {
    /// Creates view over `content`.
    #[must_use]
    pub const fn new(content: &'a RenderedMarkdown) -> Self {
        Self {
            content,
            h_offset: 0,
            scroll: 0,
            style: Style::new(),
        }
    }

    /// Sets the horizontal code offset.
    #[must_use]
    pub const fn h_offset(mut self, h_offset: usize) -> Self {
        self.h_offset = h_offset;
        self
    }

    /// Sets the first visible line.
    #[must_use]
    pub const fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    /// Sets the base style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for MarkdownView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line<'static>> = layout(self.content, area.width, self.h_offset)
            .into_iter()
            .skip(self.scroll)
            .take(usize::from(area.height))
            .collect();
        Paragraph::new(lines).style(self.style).render(area, buf);
    }
}

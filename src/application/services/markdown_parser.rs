//! Markdown parsing into a small block/inline tree.
//!
//! The grammar is line oriented: every non-blank line outside a fence or
//! quote becomes its own block, so author line breaks survive rendering.

use std::iter::Peekable;
use std::str::{CharIndices, Lines};

/// Quote levels parsed as structure; deeper markers stay literal text.
pub const MAX_QUOTE_DEPTH: usize = 16;

/// Block-level markdown element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MdBlock {
    Header(u8, Vec<MdInline>),
    List {
        indent: u8,
        marker: ListMarker,
        content: Vec<MdInline>,
    },
    BlockQuote(Vec<MdBlock>),
    CodeBlock {
        lang: Option<String>,
        code: String,
    },
    Paragraph(Vec<MdInline>),
    Rule,
    Empty,
}

/// Marker of a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ListMarker {
    Bullet(char),
    Ordered(u32),
}

/// Inline markdown element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum MdInline {
    Text(String),
    Bold(Vec<MdInline>),
    Italic(Vec<MdInline>),
    Strike(Vec<MdInline>),
    Code(String),
    Link { text: Vec<MdInline>, url: String },
}

/// Parses the whole input eagerly.
#[must_use]
pub fn parse_markdown(content: &str) -> Vec<MdBlock> {
    MarkdownBlocks::new(content).collect()
}

/// Lazy block iterator over markdown input.
///
/// Cloning yields an independent iterator positioned at the same block.
#[derive(Debug, Clone)]
pub struct MarkdownBlocks<'a> {
    lines: Peekable<Lines<'a>>,
    depth: usize,
}

impl<'a> MarkdownBlocks<'a> {
    /// Starts iterating at the first line of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::nested(input, 0)
    }

    fn nested(input: &'a str, depth: usize) -> Self {
        Self {
            lines: input.lines().peekable(),
            depth,
        }
    }

    fn code_block(&mut self, fence: Fence, info: &str) -> MdBlock {
        let lang = Some(info.trim())
            .filter(|l| !l.is_empty())
            .map(ToString::to_string);
        let mut code = Vec::new();

        for line in self.lines.by_ref() {
            if Fence::closes(line, fence) {
                break;
            }
            code.push(line);
        }

        MdBlock::CodeBlock {
            lang,
            code: code.join("\n"),
        }
    }

    fn block_quote(&mut self, first: &str) -> MdBlock {
        let mut quoted = String::from(first);

        while let Some(inner) = self.lines.peek().and_then(|l| strip_quote(l)) {
            quoted.push('\n');
            quoted.push_str(inner);
            self.lines.next();
        }

        MdBlock::BlockQuote(MarkdownBlocks::nested(&quoted, self.depth + 1).collect())
    }
}

impl Iterator for MarkdownBlocks<'_> {
    type Item = MdBlock;

    fn next(&mut self) -> Option<MdBlock> {
        let line = self.lines.next()?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Some(MdBlock::Empty);
        }

        if let Some((fence, info)) = Fence::opens(line) {
            return Some(self.code_block(fence, info));
        }

        if let Some(block) = header(trimmed) {
            return Some(block);
        }

        if is_rule(trimmed) {
            return Some(MdBlock::Rule);
        }

        if self.depth < MAX_QUOTE_DEPTH
            && let Some(inner) = strip_quote(line)
        {
            return Some(self.block_quote(inner));
        }

        if let Some(block) = list_item(line) {
            return Some(block);
        }

        Some(MdBlock::Paragraph(parse_inline(trimmed)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    ch: char,
    len: usize,
}

impl Fence {
    fn opens(line: &str) -> Option<(Self, &str)> {
        let trimmed = line.trim_start();
        let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == ch).count();
        if len < 3 {
            return None;
        }
        let info = &trimmed[len..];
        if ch == '`' && info.contains('`') {
            return None;
        }
        Some((Self { ch, len }, info))
    }

    fn closes(line: &str, fence: Self) -> bool {
        let trimmed = line.trim();
        trimmed.chars().count() >= fence.len && trimmed.chars().all(|c| c == fence.ch)
    }
}

fn header(trimmed: &str) -> Option<MdBlock> {
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    let level = u8::try_from(level).ok()?;
    Some(MdBlock::Header(level, parse_inline(rest.trim())))
}

fn is_rule(trimmed: &str) -> bool {
    let mut marks = trimmed.chars().filter(|c| !c.is_whitespace());
    let Some(first) = marks.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && marks.clone().count() >= 2 && marks.all(|c| c == first)
}

fn strip_quote(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn list_item(line: &str) -> Option<MdBlock> {
    let trimmed = line.trim_start();
    let indent = u8::try_from((line.len() - trimmed.len()) / 2).unwrap_or(u8::MAX);

    for bullet in ['-', '*', '+'] {
        if let Some(content) = trimmed.strip_prefix(bullet).and_then(|r| r.strip_prefix(' ')) {
            return Some(MdBlock::List {
                indent,
                marker: ListMarker::Bullet(bullet),
                content: parse_inline(content.trim()),
            });
        }
    }

    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    let number = trimmed[..digits].parse().ok()?;
    let content = trimmed[digits..]
        .strip_prefix(". ")
        .or_else(|| trimmed[digits..].strip_prefix(") "))?;

    Some(MdBlock::List {
        indent,
        marker: ListMarker::Ordered(number),
        content: parse_inline(content.trim()),
    })
}

/// Parses inline markup of a single line.
#[must_use]
pub fn parse_inline(input: &str) -> Vec<MdInline> {
    let mut cursor = InlineCursor {
        input,
        chars: input.char_indices().peekable(),
        start: 0,
        inlines: Vec::new(),
    };

    while let Some((idx, ch)) = cursor.chars.next() {
        cursor.special_char(idx, ch);
    }

    if cursor.start < input.len() {
        cursor.inlines.push(MdInline::Text(input[cursor.start..].to_string()));
    }

    merge_text(cursor.inlines)
}

struct InlineCursor<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    start: usize,
    inlines: Vec<MdInline>,
}

impl InlineCursor<'_> {
    fn special_char(&mut self, idx: usize, ch: char) {
        let input = self.input;
        let remaining = &input[idx..];
        match ch {
            '*' => {
                if remaining.starts_with("***") {
                    self.container(idx, "***", |c| MdInline::Italic(vec![MdInline::Bold(c)]));
                } else if remaining.starts_with("**") {
                    self.container(idx, "**", MdInline::Bold);
                } else {
                    self.container(idx, "*", MdInline::Italic);
                }
            }
            '_' if !self.follows_word(idx) => {
                if remaining.starts_with("__") {
                    self.container(idx, "__", MdInline::Bold);
                } else {
                    self.container(idx, "_", MdInline::Italic);
                }
            }
            '~' if remaining.starts_with("~~") => {
                self.container(idx, "~~", MdInline::Strike);
            }
            '`' => self.code_span(idx),
            '[' => self.link(idx),
            '\\' => self.escape(idx),
            _ => {}
        }
    }

    fn follows_word(&self, idx: usize) -> bool {
        self.input[..idx]
            .chars()
            .next_back()
            .is_some_and(char::is_alphanumeric)
    }

    fn flush_text(&mut self, idx: usize) {
        if idx > self.start {
            self.inlines
                .push(MdInline::Text(self.input[self.start..idx].to_string()));
        }
    }

    fn skip_to(&mut self, end: usize) {
        while self.chars.next_if(|(curr, _)| *curr < end).is_some() {}
        self.start = end;
    }

    fn container<F>(&mut self, idx: usize, delimiter: &str, constructor: F)
    where
        F: Fn(Vec<MdInline>) -> MdInline,
    {
        let input = self.input;
        let inner_start = idx + delimiter.len();
        let after = &input[inner_start..];
        if after.starts_with(char::is_whitespace) {
            return;
        }
        let Some(end_offset) = after.find(delimiter).filter(|offset| *offset > 0) else {
            return;
        };

        self.flush_text(idx);
        let inner_end = inner_start + end_offset;
        let inner = parse_inline(&input[inner_start..inner_end]);
        self.inlines.push(constructor(inner));
        self.skip_to(inner_end + delimiter.len());
    }

    fn code_span(&mut self, idx: usize) {
        let input = self.input;
        let ticks = input[idx..].chars().take_while(|c| *c == '`').count();
        let delimiter = &input[idx..idx + ticks];
        let inner_start = idx + ticks;

        let Some(end_offset) = input[inner_start..].find(delimiter) else {
            let start = self.start;
            self.skip_to(inner_start);
            self.start = start;
            return;
        };

        self.flush_text(idx);
        let inner_end = inner_start + end_offset;
        let raw = &input[inner_start..inner_end];
        let code = raw
            .strip_prefix(' ')
            .and_then(|r| r.strip_suffix(' '))
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(raw);
        self.inlines.push(MdInline::Code(code.to_string()));
        self.skip_to(inner_end + ticks);
    }

    fn link(&mut self, idx: usize) {
        let input = self.input;
        let remaining = &input[idx..];
        let Some(text_end) = remaining.find("](") else {
            return;
        };
        let Some(url_len) = remaining[text_end + 2..].find(')') else {
            return;
        };

        self.flush_text(idx);
        let text = parse_inline(&remaining[1..text_end]);
        let url = remaining[text_end + 2..text_end + 2 + url_len].trim().to_string();
        self.inlines.push(MdInline::Link { text, url });
        self.skip_to(idx + text_end + 2 + url_len + 1);
    }

    fn escape(&mut self, idx: usize) {
        let Some(&(next_idx, next_ch)) = self.chars.peek() else {
            return;
        };
        if !next_ch.is_ascii_punctuation() {
            return;
        }

        self.flush_text(idx);
        self.inlines.push(MdInline::Text(next_ch.to_string()));
        self.skip_to(next_idx + next_ch.len_utf8());
    }
}

fn merge_text(inlines: Vec<MdInline>) -> Vec<MdInline> {
    let mut merged: Vec<MdInline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        if let (Some(MdInline::Text(prev)), MdInline::Text(next)) = (merged.last_mut(), &inline) {
            prev.push_str(next);
        } else {
            merged.push(inline);
        }
    }
    merged
}

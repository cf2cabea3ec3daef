use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

use super::syntax_highlighting::{PlainHighlighter, SyntaxHighlighter};
use crate::application::services::markdown_parser::{
    ListMarker, MarkdownBlocks, MdBlock, MdInline,
};
use crate::presentation::theme::Theme;

const TAB: &str = "    ";

/// How a rendered line may be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Wrapped to the available width.
    Prose,
    /// Full-width horizontal rule.
    Rule,
    /// Fenced code: never wrapped, scrolled horizontally, padded to the block width.
    Code {
        /// Widest line of the block, in cells.
        block_width: usize,
        /// Block background.
        fill: Style,
    },
}

/// One styled terminal line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RenderedLine {
    pub kind: LineKind,
    pub line: Line<'static>,
}

impl RenderedLine {
    fn prose(spans: Vec<Span<'static>>) -> Self {
        Self {
            kind: LineKind::Prose,
            line: Line::from(spans),
        }
    }
}

/// Styled lines of one markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedMarkdown {
    lines: Vec<RenderedLine>,
}

impl RenderedMarkdown {
    /// Unparsed text, one prose line per source line.
    #[must_use]
    pub fn plain(text: &str, style: Style) -> Self {
        let lines = text
            .lines()
            .map(|line| RenderedLine::prose(vec![Span::styled(line.to_string(), style)]))
            .collect();
        Self { lines }
    }

    /// Returns rendered lines in order.
    #[must_use]
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Returns whether nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Widest code block, in cells.
    #[must_use]
    pub fn max_code_width(&self) -> usize {
        self.lines
            .iter()
            .filter_map(|l| match l.kind {
                LineKind::Code { block_width, .. } => Some(block_width),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Puts `label` in front of the first line, or on a line of its own when
    /// the document opens with a code block.
    #[must_use]
    pub fn labeled(mut self, label: Span<'static>) -> Self {
        match self.lines.first_mut() {
            Some(first) if first.kind == LineKind::Prose => {
                first.line.spans.insert(0, label);
            }
            _ => self.lines.insert(0, RenderedLine::prose(vec![label])),
        }
        self
    }
}

/// Markdown → styled terminal lines.
#[derive(Clone)]
pub struct MarkdownRenderer {
    highlighter: Arc<dyn SyntaxHighlighter>,
    theme: Theme,
}

impl MarkdownRenderer {
    /// Creates renderer without syntax highlighting.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self::with_highlighter(theme, Arc::new(PlainHighlighter))
    }

    /// Creates renderer highlighting fenced code with `highlighter`.
    #[must_use]
    pub fn with_highlighter(theme: Theme, highlighter: Arc<dyn SyntaxHighlighter>) -> Self {
        Self { highlighter, theme }
    }

    /// Renders `content` into styled lines.
    #[must_use]
    pub fn render(&self, content: &str) -> RenderedMarkdown {
        let mut lines = Vec::new();
        for block in MarkdownBlocks::new(content) {
            self.render_block(block, &mut lines, Style::default());
        }

        while lines
            .last()
            .is_some_and(|l: &RenderedLine| l.kind == LineKind::Prose && l.line.width() == 0)
        {
            lines.pop();
        }

        RenderedMarkdown { lines }
    }

    fn render_block(&self, block: MdBlock, lines: &mut Vec<RenderedLine>, parent_style: Style) {
        match block {
            MdBlock::Empty => lines.push(RenderedLine::prose(Vec::new())),
            MdBlock::Paragraph(inlines) => {
                lines.push(RenderedLine::prose(self.render_inlines(inlines, parent_style)));
            }
            MdBlock::Header(level, inlines) => {
                let style = match level {
                    1 => self.theme.title_style.add_modifier(Modifier::UNDERLINED),
                    2 => self.theme.title_style,
                    _ => parent_style.add_modifier(Modifier::BOLD),
                };
                lines.push(RenderedLine::prose(self.render_inlines(inlines, style)));
            }
            MdBlock::List {
                indent,
                marker,
                content,
            } => {
                let marker = match marker {
                    ListMarker::Bullet(_) => "•".to_string(),
                    ListMarker::Ordered(n) => format!("{n}."),
                };
                let mut spans = vec![
                    Span::raw("  ".repeat(usize::from(indent))),
                    Span::styled(format!("{marker} "), self.theme.label_style),
                ];
                spans.extend(self.render_inlines(content, parent_style));
                lines.push(RenderedLine::prose(spans));
            }
            MdBlock::Rule => lines.push(RenderedLine {
                kind: LineKind::Rule,
                line: Line::from(Span::styled("─", self.theme.dimmed_style)),
            }),
            MdBlock::CodeBlock { lang, code } => {
                self.render_code_block(&code, lang.as_deref(), lines);
            }
            MdBlock::BlockQuote(inner_blocks) => {
                let mut inner_lines = Vec::new();
                let quote_style = parent_style.add_modifier(Modifier::ITALIC);
                for inner in inner_blocks {
                    self.render_block(inner, &mut inner_lines, quote_style);
                }

                for mut rendered in inner_lines {
                    if rendered.kind == LineKind::Prose {
                        rendered
                            .line
                            .spans
                            .insert(0, Span::styled("│ ", self.theme.quote_style));
                    }
                    lines.push(rendered);
                }
            }
        }
    }

    fn render_code_block(&self, code: &str, lang: Option<&str>, lines: &mut Vec<RenderedLine>) {
        let fill = self.theme.code_block_style;
        let code = code.replace('\t', TAB);
        let highlighted = self.highlighter.highlight(&code, lang);

        let block_width = highlighted
            .iter()
            .map(|spans| spans.iter().map(|s| s.content.width()).sum::<usize>())
            .max()
            .unwrap_or(0);
        let kind = LineKind::Code { block_width, fill };

        lines.push(RenderedLine {
            kind,
            line: Line::default(),
        });
        for spans in highlighted {
            let spans = spans
                .into_iter()
                .map(|span| {
                    let style = fill.patch(span.style);
                    Span::styled(span.content, style)
                })
                .collect::<Vec<_>>();
            lines.push(RenderedLine {
                kind,
                line: Line::from(spans),
            });
        }
        lines.push(RenderedLine {
            kind,
            line: Line::default(),
        });
    }

    fn render_inlines(&self, inlines: Vec<MdInline>, style: Style) -> Vec<Span<'static>> {
        let mut spans = Vec::new();

        for inline in inlines {
            match inline {
                MdInline::Text(t) => spans.push(Span::styled(t, style)),
                MdInline::Bold(children) => {
                    spans.extend(self.render_inlines(children, style.add_modifier(Modifier::BOLD)));
                }
                MdInline::Italic(children) => {
                    spans.extend(
                        self.render_inlines(children, style.add_modifier(Modifier::ITALIC)),
                    );
                }
                MdInline::Strike(children) => {
                    spans.extend(
                        self.render_inlines(children, style.add_modifier(Modifier::CROSSED_OUT)),
                    );
                }
                MdInline::Code(code) => {
                    let code_style = style.patch(self.theme.inline_code_style);
                    spans.push(Span::styled(format!(" {code} "), code_style));
                }
                MdInline::Link { text, url } => {
                    let plain: String = collect_text(&text);
                    spans.extend(self.render_inlines(text, style.patch(self.theme.link_style)));
                    if plain != url {
                        spans.push(Span::styled(format!(" ({url})"), self.theme.dimmed_style));
                    }
                }
            }
        }
        spans
    }
}

fn collect_text(inlines: &[MdInline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            MdInline::Text(t) | MdInline::Code(t) => t.clone(),
            MdInline::Bold(c) | MdInline::Italic(c) | MdInline::Strike(c) => collect_text(c),
            MdInline::Link { text, .. } => collect_text(text),
        })
        .collect()
}

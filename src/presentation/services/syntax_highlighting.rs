//! Fenced code highlighting.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme as SyntectTheme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::warn;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Styled lines of a code block, one `Vec` per source line.
pub type HighlightedLines = Vec<Vec<Span<'static>>>;

/// Turns code into styled lines. Implementations must be deterministic.
pub trait SyntaxHighlighter: Send + Sync {
    /// Highlights `code`, using `lang` when it names a known syntax.
    fn highlight(&self, code: &str, lang: Option<&str>) -> HighlightedLines;
}

/// Emits code unstyled.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl SyntaxHighlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _lang: Option<&str>) -> HighlightedLines {
        plain_lines(code)
    }
}

/// Highlights with syntect's bundled grammars and themes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: SyntectTheme,
}

impl SyntectHighlighter {
    /// Loads bundled grammars and the named theme, falling back to the default theme.
    #[must_use]
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                warn!(theme = theme_name, "Unknown code theme, using {DEFAULT_THEME}");
                themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };

        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl SyntaxHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: Option<&str>) -> HighlightedLines {
        let Some(syntax) = lang.and_then(|l| self.syntaxes.find_syntax_by_token(l)) else {
            return plain_lines(code);
        };

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();

        for source_line in LinesWithEndings::from(code) {
            let spans = match highlighter.highlight_line(source_line, &self.syntaxes) {
                Ok(ranges) => ranges
                    .into_iter()
                    .filter_map(|(style, text)| {
                        let text = text.trim_end_matches(['\n', '\r']);
                        (!text.is_empty()).then(|| Span::styled(text.to_string(), convert(style)))
                    })
                    .collect(),
                Err(e) => {
                    warn!(error = %e, "Highlighting failed, emitting plain line");
                    vec![Span::raw(source_line.trim_end_matches(['\n', '\r']).to_string())]
                }
            };
            lines.push(spans);
        }

        if code.is_empty() || code.ends_with('\n') {
            lines.push(Vec::new());
        }

        lines
    }
}

fn plain_lines(code: &str) -> HighlightedLines {
    code.split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                Vec::new()
            } else {
                vec![Span::raw(line.to_string())]
            }
        })
        .collect()
}

fn convert(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut converted = Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b));

    if style.font_style.contains(FontStyle::BOLD) {
        converted = converted.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        converted = converted.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        converted = converted.add_modifier(Modifier::UNDERLINED);
    }

    converted
}

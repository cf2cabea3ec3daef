use super::adapter::ColorConverter;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

const FALLBACK_ACCENT: Color = Color::Cyan;

/// Terminal background the palette is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Brightness {
    #[default]
    Dark,
    Light,
}

/// Styles derived from one accent colour.
#[derive(Debug, Clone, Copy)]
#[allow(missing_docs)]
pub struct Theme {
    pub accent: Color,
    pub brightness: Brightness,
    pub base_style: Style,
    pub dimmed_style: Style,
    pub title_style: Style,
    pub label_style: Style,
    pub feedback_style: Style,
    pub disabled_style: Style,
    pub code_block_style: Style,
    pub inline_code_style: Style,
    pub link_style: Style,
    pub quote_style: Style,
    pub border_style: Style,
    pub focused_border_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new("Cyan", Brightness::Dark)
    }
}

impl Theme {
    /// Creates theme from a colour name or hex code, falling back to cyan.
    pub fn new(accent_color_str: &str, brightness: Brightness) -> Self {
        Self::from_color(parse_color(accent_color_str), brightness)
    }

    /// Creates theme from a parsed accent colour.
    #[must_use]
    pub fn from_color(accent: Color, brightness: Brightness) -> Self {
        let (text, muted, block_l, inline_l) = match brightness {
            Brightness::Dark => (Color::White, Color::DarkGray, 0.12, 0.22),
            Brightness::Light => (Color::Black, Color::Gray, 0.93, 0.85),
        };

        let code_block_bg = ColorConverter::tint(accent, 0.15, block_l);
        let inline_code_bg = ColorConverter::tint(accent, 0.2, inline_l);

        Self {
            accent,
            brightness,
            base_style: Style::default().fg(Color::Reset),
            dimmed_style: Style::default().fg(muted),
            title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            label_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            feedback_style: Style::default().fg(muted).add_modifier(Modifier::ITALIC),
            disabled_style: Style::default().fg(muted),
            code_block_style: Style::default().bg(code_block_bg).fg(text),
            inline_code_style: Style::default().bg(inline_code_bg).fg(text),
            link_style: Style::default()
                .fg(accent)
                .add_modifier(Modifier::UNDERLINED),
            quote_style: Style::default().fg(muted),
            border_style: Style::default().fg(muted),
            focused_border_style: Style::default().fg(accent),
        }
    }
}

fn parse_color(s: &str) -> Color {
    let s = s.trim();

    if s.starts_with('#')
        && let Some((r, g, b)) = parse_hex_color(s)
    {
        return Color::Rgb(r, g, b);
    }

    if let Ok(c) = Color::from_str(s) {
        return c;
    }

    match s.to_lowercase().as_str() {
        "orange" => Color::Indexed(208),
        "purple" => Color::Indexed(93),
        _ => FALLBACK_ACCENT,
    }
}

fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let digits = s.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }

    let channel = |hex: &str| u8::from_str_radix(hex, 16).ok();
    match digits.len() {
        6 => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
            Some((short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Red"), Color::Red);
        assert_eq!(parse_color("blue"), Color::Blue);
        assert_eq!(parse_color("#FF0000"), Color::Rgb(255, 0, 0));
        assert_eq!(parse_color("#0f0"), Color::Rgb(0, 255, 0));
        assert_eq!(parse_color("Orange"), Color::Indexed(208));
        assert_eq!(parse_color("#12345"), FALLBACK_ACCENT);
        assert_eq!(parse_color("Invalid"), FALLBACK_ACCENT);
    }

    #[test]
    fn test_code_backgrounds_follow_brightness() {
        let dark = Theme::new("#3366ff", Brightness::Dark);
        let light = Theme::new("#3366ff", Brightness::Light);

        let lightness = |style: Style| match style.bg {
            Some(color) => ColorConverter::to_hsl(color).l,
            None => panic!("Expected background"),
        };

        assert!(lightness(dark.code_block_style) < 0.3);
        assert!(lightness(light.code_block_style) > 0.7);
        assert_ne!(dark.code_block_style.bg, dark.inline_code_style.bg);
    }
}

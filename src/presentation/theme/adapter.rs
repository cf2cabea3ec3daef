use coolor::{Hsl, Rgb};
use ratatui::style::Color;

/// xterm rendering of the 16 base ANSI colours.
const BASE_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (170, 0, 0),
    (0, 170, 0),
    (170, 85, 0),
    (0, 0, 170),
    (170, 0, 170),
    (0, 170, 170),
    (170, 170, 170),
    (85, 85, 85),
    (255, 85, 85),
    (85, 255, 85),
    (255, 255, 85),
    (85, 85, 255),
    (255, 85, 255),
    (85, 255, 255),
    (255, 255, 255),
];

/// Bridges ratatui colours and `coolor` HSL arithmetic.
pub struct ColorConverter;

impl ColorConverter {
    /// Converts a ratatui colour to HSL.
    #[must_use]
    pub fn to_hsl(color: Color) -> Hsl {
        let (r, g, b) = to_rgb_triplet(color);
        Rgb::new(r, g, b).to_hsl()
    }

    /// Converts HSL back to an RGB ratatui colour.
    #[must_use]
    pub fn to_ratatui(hsl: Hsl) -> Color {
        let rgb: Rgb = hsl.to_rgb();
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Keeps the hue of `color`, replacing saturation and lightness.
    #[must_use]
    pub fn tint(color: Color, saturation: f32, lightness: f32) -> Color {
        let mut hsl = Self::to_hsl(color);
        hsl.s = saturation;
        hsl.l = lightness;
        Self::to_ratatui(hsl)
    }
}

fn to_rgb_triplet(color: Color) -> (u8, u8, u8) {
    let base = |i: usize| BASE_PALETTE[i];
    match color {
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => base(0),
        Color::Red => base(1),
        Color::Green => base(2),
        Color::Yellow => base(3),
        Color::Blue => base(4),
        Color::Magenta => base(5),
        Color::Cyan => base(6),
        Color::Gray => base(7),
        Color::DarkGray => base(8),
        Color::LightRed => base(9),
        Color::LightGreen => base(10),
        Color::LightYellow => base(11),
        Color::LightBlue => base(12),
        Color::LightMagenta => base(13),
        Color::LightCyan => base(14),
        Color::White => base(15),
        Color::Indexed(i) => indexed_to_rgb(i),
        Color::Reset => base(15),
    }
}

fn indexed_to_rgb(i: u8) -> (u8, u8, u8) {
    match i {
        0..=15 => BASE_PALETTE[usize::from(i)],
        16..=231 => {
            let cube = i - 16;
            let level = |c: u8| if c == 0 { 0 } else { c * 40 + 55 };
            (level(cube / 36), level((cube / 6) % 6), level(cube % 6))
        }
        _ => {
            let v = (i - 232) * 10 + 8;
            (v, v, v)
        }
    }
}

// File: crates/chart-core/src/theme.rs
// Summary: Colors, categorical palettes, and theme presets passed into chart renderers.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        let nibble = |i: usize| u8::from_str_radix(hex.get(i..i + 1)?, 16).ok();
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
            _ => None,
        }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Lighten by `k` steps, each step scaling channels by 1/0.7 (clamped).
    pub fn brighter(self, k: f64) -> Self {
        let f = (1.0 / 0.7f64).powf(k);
        let ch = |c: u8| (c as f64 * f).round().clamp(0.0, 255.0) as u8;
        Self { r: ch(self.r), g: ch(self.g), b: ch(self.b), a: self.a }
    }

    /// Alpha as a 0..=1 fraction.
    pub fn alpha_f(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// `#rrggbb`, ignoring alpha (SVG carries opacity separately).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or(ChartError::InvalidColor(value))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        if c.a == 255 {
            c.to_hex()
        } else {
            format!("{}{:02x}", c.to_hex(), c.a)
        }
    }
}

/// Ten-color categorical scheme (blue, orange, green, red, purple, ...).
pub const CATEGORY10: [Color; 10] = [
    Color::rgb(0x1f, 0x77, 0xb4),
    Color::rgb(0xff, 0x7f, 0x0e),
    Color::rgb(0x2c, 0xa0, 0x2c),
    Color::rgb(0xd6, 0x27, 0x28),
    Color::rgb(0x94, 0x67, 0xbd),
    Color::rgb(0x8c, 0x56, 0x4b),
    Color::rgb(0xe3, 0x77, 0xc2),
    Color::rgb(0x7f, 0x7f, 0x7f),
    Color::rgb(0xbc, 0xbd, 0x22),
    Color::rgb(0x17, 0xbe, 0xcf),
];

/// Saturated UI palette used by the product charts.
pub const VIVID: [Color; 10] = [
    Color::rgb(0x3b, 0x82, 0xf6), // blue
    Color::rgb(0x10, 0xb9, 0x81), // green
    Color::rgb(0xf5, 0x9e, 0x0b), // amber
    Color::rgb(0xef, 0x44, 0x44), // red
    Color::rgb(0x8b, 0x5c, 0xf6), // purple
    Color::rgb(0xec, 0x48, 0x99), // pink
    Color::rgb(0x06, 0xb6, 0xd4), // cyan
    Color::rgb(0xf9, 0x73, 0x16), // orange
    Color::rgb(0x14, 0xb8, 0xa6), // teal
    Color::rgb(0x63, 0x66, 0xf1), // indigo
];

/// Pick the color for the `index`-th distinct category (first-seen order).
///
/// Indices past the palette wrap around, so categories beyond its length
/// share colors.
pub fn categorical(palette: &[Color], index: usize) -> Color {
    if palette.is_empty() {
        return Color::BLACK;
    }
    palette[index % palette.len()]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub text: Color,
    pub muted_text: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub line_stroke: Color,
    pub accent: Color,
    pub header_text: Color,
    pub separator: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_text: Color,
    pub palette: &'static [Color],
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::rgb(255, 255, 255),
            text: Color::rgb(0x33, 0x33, 0x33),
            muted_text: Color::rgb(0x55, 0x55, 0x55),
            grid: Color::rgb(0xdd, 0xdd, 0xdd),
            axis_line: Color::rgb(0, 0, 0),
            line_stroke: Color::rgb(0x7f, 0x00, 0xff),
            accent: Color::rgb(0x18, 0x18, 0x1b),
            header_text: Color::WHITE,
            separator: Color::WHITE,
            tooltip_background: Color::WHITE,
            tooltip_border: Color::rgb(0xdd, 0xdd, 0xdd),
            tooltip_text: Color::BLACK,
            palette: &VIVID,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            text: Color::rgb(235, 235, 245),
            muted_text: Color::rgb(150, 150, 160),
            grid: Color::rgb(40, 40, 45),
            axis_line: Color::rgb(180, 180, 190),
            line_stroke: Color::rgb(0xa8, 0x55, 0xf7),
            accent: Color::rgb(0xfa, 0xfa, 0xfa),
            header_text: Color::WHITE,
            separator: Color::rgb(18, 18, 20),
            tooltip_background: Color::rgb(32, 32, 36),
            tooltip_border: Color::rgb(64, 64, 70),
            tooltip_text: Color::rgb(235, 235, 245),
            palette: &VIVID,
        }
    }

    /// Light theme with the classic ten-color categorical scheme.
    pub fn category10() -> Self {
        Self { name: "category10", palette: &CATEGORY10, ..Self::light() }
    }

    pub fn color_for(&self, index: usize) -> Color {
        categorical(self.palette, index)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::category10()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}

//! Colors of the map layers.

use serde::{Deserialize, Serialize};

use crate::error::TileviewError;

/// RGBA color used for layer swatches, legend accents and style paint values.
///
/// Serialized as a CSS hex string: `#rrggbb` for opaque colors and `#rrggbbaa` otherwise.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl TryFrom<String> for Color {
    type Error = TileviewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or(TileviewError::InvalidColor(value))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Color {
    /// White color: `#ffffff`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Swatch color of features whose layer is not in the catalog: `#cccccc`
    pub const NEUTRAL: Color = Color::rgba(204, 204, 204, 255);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into CSS hex notation: `#rrggbb`, or `#rrggbbaa` if the color is not
    /// fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parses a color from the hex string. Accepted forms are `#rgb`, `#rrggbb` and `#rrggbbaa`.
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        let digits = hex_string.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }

        match digits.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (channel, c) in channels.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *channel = v * 16 + v;
                }
                Some(Self::rgba(channels[0], channels[1], channels[2], 255))
            }
            6 | 8 => {
                let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                let a = if digits.len() == 8 { byte(6)? } else { 255 };
                Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
            }
            _ => None,
        }
    }

    /// Parses a color from a `#rrggbb` or `#rrggbbaa` literal at compile time.
    ///
    /// # Panics
    ///
    /// Panics if the parsing fails.
    pub const fn from_hex(hex_string: &'static str) -> Self {
        let bytes = hex_string.as_bytes();
        if bytes.len() != 7 && bytes.len() != 9 || bytes[0] != b'#' {
            panic!("Invalid color hex string");
        }

        let r = decode_byte(&[bytes[1], bytes[2]]);
        let g = decode_byte(&[bytes[3], bytes[4]]);
        let b = decode_byte(&[bytes[5], bytes[6]]);
        let a = if bytes.len() == 9 {
            decode_byte(&[bytes[7], bytes[8]])
        } else {
            255
        };

        Self { r, g, b, a }
    }
}

/// Layer colors. A layer at catalog position `i` is drawn with `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [Color; 40] = [
    Color::from_hex("#f4b8e4"),
    Color::from_hex("#babbf1"),
    Color::from_hex("#a6d189"),
    Color::from_hex("#85c1dc"),
    Color::from_hex("#81c8be"),
    Color::from_hex("#a6e3a1"),
    Color::from_hex("#cfc9c2"),
    Color::from_hex("#f38ba8"),
    Color::from_hex("#bb9af7"),
    Color::from_hex("#f2d5cf"),
    Color::from_hex("#9ece6a"),
    Color::from_hex("#f9e2af"),
    Color::from_hex("#89dceb"),
    Color::from_hex("#b4befe"),
    Color::from_hex("#f7768e"),
    Color::from_hex("#8caaee"),
    Color::from_hex("#89b4fa"),
    Color::from_hex("#73daca"),
    Color::from_hex("#fab387"),
    Color::from_hex("#7aa2f7"),
    Color::from_hex("#f2cdcd"),
    Color::from_hex("#eebebe"),
    Color::from_hex("#2ac3de"),
    Color::from_hex("#ef9f76"),
    Color::from_hex("#74c7ec"),
    Color::from_hex("#c0caf5"),
    Color::from_hex("#e5c890"),
    Color::from_hex("#99d1db"),
    Color::from_hex("#cba6f7"),
    Color::from_hex("#94e2d5"),
    Color::from_hex("#e78284"),
    Color::from_hex("#ca9ee6"),
    Color::from_hex("#f5c2e7"),
    Color::from_hex("#ff9e64"),
    Color::from_hex("#b4f9f8"),
    Color::from_hex("#f5e0dc"),
    Color::from_hex("#7dcfff"),
    Color::from_hex("#eba0ac"),
    Color::from_hex("#ea999c"),
    Color::from_hex("#e0af68"),
];

/// Palette color for the layer at catalog position `index`.
pub fn color_for_index(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

const fn decode_byte(chars: &[u8]) -> u8 {
    debug_assert!(chars.len() == 2);
    let first = decode_char(chars[0]);
    let second = decode_char(chars[1]);

    first * 16 + second
}

const fn decode_char(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => panic!("Invalid hex character"),
    }
}

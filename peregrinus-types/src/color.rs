//! Display colors of features.

use serde::{Deserialize, Serialize};

/// Color representation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self::try_from_hex(&value).unwrap_or_else(|| {
            log::warn!("invalid color hex string {value:?}, falling back to black");
            Color::rgba(0, 0, 0, 255)
        })
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Color {
    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Converts the color into u8 array (RGBA).
    pub fn to_u8_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || !hex_string.starts_with('#') {
            return None;
        }

        let r = u8::from_str_radix(hex_string.get(1..3)?, 16).ok()?;
        let g = u8::from_str_radix(hex_string.get(3..5)?, 16).ok()?;
        let b = u8::from_str_radix(hex_string.get(5..7)?, 16).ok()?;
        let a = if hex_string.len() == 9 {
            u8::from_str_radix(hex_string.get(7..9)?, 16).ok()?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Returns true if the color is fully transparent (`a == 0`).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Red component of the color in RGBA space.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component of the color in RGBA space.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component of the color in RGBA space.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity component of the color.
    pub fn a(&self) -> u8 {
        self.a
    }
}

/// Named display colors a track, route or waypoint can be drawn with.
///
/// This is the palette GPS devices understand in GPX display extensions, so a feature keeps its color when it is
/// exported and loaded into a device.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum DisplayColor {
    Black,
    DarkRed,
    DarkGreen,
    DarkYellow,
    DarkBlue,
    DarkMagenta,
    DarkCyan,
    LightGray,
    DarkGray,
    Red,
    Green,
    Yellow,
    Blue,
    #[default]
    Magenta,
    Cyan,
    White,
    Transparent,
}

impl DisplayColor {
    /// RGBA value of the named color.
    pub const fn color(self) -> Color {
        match self {
            DisplayColor::Black => Color::rgba(0, 0, 0, 255),
            DisplayColor::DarkRed => Color::rgba(139, 0, 0, 255),
            DisplayColor::DarkGreen => Color::rgba(0, 100, 0, 255),
            DisplayColor::DarkYellow => Color::rgba(128, 128, 0, 255),
            DisplayColor::DarkBlue => Color::rgba(0, 0, 139, 255),
            DisplayColor::DarkMagenta => Color::rgba(139, 0, 139, 255),
            DisplayColor::DarkCyan => Color::rgba(0, 139, 139, 255),
            DisplayColor::LightGray => Color::rgba(211, 211, 211, 255),
            DisplayColor::DarkGray => Color::rgba(169, 169, 169, 255),
            DisplayColor::Red => Color::rgba(255, 0, 0, 255),
            DisplayColor::Green => Color::rgba(0, 255, 0, 255),
            DisplayColor::Yellow => Color::rgba(255, 255, 0, 255),
            DisplayColor::Blue => Color::rgba(0, 0, 255, 255),
            DisplayColor::Magenta => Color::rgba(255, 0, 255, 255),
            DisplayColor::Cyan => Color::rgba(0, 255, 255, 255),
            DisplayColor::White => Color::rgba(255, 255, 255, 255),
            DisplayColor::Transparent => Color::rgba(0, 0, 0, 0),
        }
    }
}

impl From<DisplayColor> for Color {
    fn from(value: DisplayColor) -> Self {
        value.color()
    }
}

mod names;
pub mod panel;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use panel::{ColourControl, ColourPanel, ColourSwatch, PANEL_LAYOUT};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColourParseError {
    #[error("empty colour value")]
    Empty,
    #[error("invalid hex colour: {0}")]
    InvalidHex(String),
    #[error("unknown colour name: {0}")]
    UnknownName(String),
}

/// Semantic colour slot shared by every theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColourRole {
    #[serde(rename = "BORDER")]
    Border,
    #[serde(rename = "HOVER")]
    Hover,
    #[serde(rename = "CLOSE")]
    Close,
    #[serde(rename = "FOREGROUND")]
    Foreground,
    #[serde(rename = "BACKGROUND")]
    Background,
    #[serde(rename = "EDITOR-BACKGROUND")]
    EditorBackground,
    #[serde(rename = "EDITOR-FOREGROUND")]
    EditorForeground,
    #[serde(rename = "CONTROL")]
    Control,
    #[serde(rename = "TAB-CURRENT")]
    TabCurrent,
    #[serde(rename = "FOCUS")]
    Focus,
}

impl ColourRole {
    pub const COUNT: usize = 10;

    pub const ALL: [ColourRole; Self::COUNT] = [
        ColourRole::Border,
        ColourRole::Hover,
        ColourRole::Close,
        ColourRole::Foreground,
        ColourRole::Background,
        ColourRole::EditorBackground,
        ColourRole::EditorForeground,
        ColourRole::Control,
        ColourRole::TabCurrent,
        ColourRole::Focus,
    ];

    /// Name used in preference files and stylesheet placeholders.
    pub const fn as_str(self) -> &'static str {
        match self {
            ColourRole::Border => "BORDER",
            ColourRole::Hover => "HOVER",
            ColourRole::Close => "CLOSE",
            ColourRole::Foreground => "FOREGROUND",
            ColourRole::Background => "BACKGROUND",
            ColourRole::EditorBackground => "EDITOR-BACKGROUND",
            ColourRole::EditorForeground => "EDITOR-FOREGROUND",
            ColourRole::Control => "CONTROL",
            ColourRole::TabCurrent => "TAB-CURRENT",
            ColourRole::Focus => "FOCUS",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl fmt::Display for ColourRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An RGBA colour. Its canonical text form is lowercase `#rrggbb`, with an
/// alpha byte appended only when the colour is not fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColourValue {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl ColourValue {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub const fn red(self) -> u8 {
        self.r
    }

    pub const fn green(self) -> u8 {
        self.g
    }

    pub const fn blue(self) -> u8 {
        self.b
    }

    pub const fn alpha(self) -> u8 {
        self.a
    }

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` or a CSS colour name. Eight
    /// digits carry alpha last, not Qt's `#aarrggbb` order.
    pub fn parse(input: &str) -> Result<Self, ColourParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ColourParseError::Empty);
        }
        if let Some(digits) = trimmed.strip_prefix('#') {
            return parse_hex_digits(digits)
                .ok_or_else(|| ColourParseError::InvalidHex(trimmed.to_string()));
        }
        names::lookup(trimmed).ok_or_else(|| ColourParseError::UnknownName(trimmed.to_string()))
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColourValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for ColourValue {
    type Err = ColourParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ColourValue {
    type Error = ColourParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColourValue> for String {
    fn from(value: ColourValue) -> Self {
        value.to_hex()
    }
}

fn parse_hex_digits(digits: &str) -> Option<ColourValue> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 => Some(ColourValue::rgb(
            nibble(0)? * 0x11,
            nibble(1)? * 0x11,
            nibble(2)? * 0x11,
        )),
        6 => Some(ColourValue::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(ColourValue::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

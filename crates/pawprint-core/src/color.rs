//! Hex colors and the page theme derived from them

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fraction blended toward white for the second gradient stop
pub const LIGHTEN_AMOUNT: f64 = 0.12;

/// Used when the background hex is missing or malformed
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(233, 246, 255);

/// Color parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`; the leading `#` is optional
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        })
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blend each channel toward white by `amount` (0..1)
    pub fn lighten(self, amount: f64) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let blend = |c: u8| -> u8 {
            let c = c as f64;
            (c + (255.0 - c) * amount).round().clamp(0.0, 255.0) as u8
        };
        Self::new(blend(self.r), blend(self.g), blend(self.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Lighten a hex color, falling back to [`DEFAULT_BACKGROUND`] when the
/// input does not parse
pub fn lighten_hex(hex: &str, amount: f64) -> String {
    Rgb::from_hex(hex)
        .unwrap_or(DEFAULT_BACKGROUND)
        .lighten(amount)
        .to_hex()
}

/// Accent/background pair taken from the profile record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    pub accent: Option<String>,
    pub background: Option<String>,
}

/// Resolved style variables for a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeVars {
    /// `--accent`
    pub accent: Option<String>,
    /// `--bg-1`
    pub bg_1: String,
    /// `--bg-2`
    pub bg_2: String,
}

impl ThemeVars {
    /// Body background gradient
    pub fn gradient(&self) -> String {
        format!("linear-gradient(180deg, {}, {})", self.bg_1, self.bg_2)
    }

    /// `name: value` pairs in declaration order
    pub fn css_properties(&self) -> Vec<(&'static str, String)> {
        let mut props = Vec::with_capacity(3);
        if let Some(accent) = &self.accent {
            props.push(("--accent", accent.clone()));
        }
        props.push(("--bg-1", self.bg_1.clone()));
        props.push(("--bg-2", self.bg_2.clone()));
        props
    }
}

impl Theme {
    pub fn new(accent: Option<String>, background: Option<String>) -> Self {
        Self { accent, background }
    }

    /// Resolve the theme. Returns `None` when neither color is set, in which
    /// case the page keeps its stylesheet defaults.
    pub fn resolve(&self) -> Option<ThemeVars> {
        let accent = self.accent.clone().filter(|a| !a.is_empty());
        let background = self.background.as_deref().filter(|b| !b.is_empty());

        match background {
            Some(bg) => Some(ThemeVars {
                accent,
                bg_1: bg.to_string(),
                bg_2: lighten_hex(bg, LIGHTEN_AMOUNT),
            }),
            None if accent.is_some() => {
                let base = DEFAULT_BACKGROUND.to_hex();
                Some(ThemeVars {
                    accent,
                    bg_2: lighten_hex(&base, LIGHTEN_AMOUNT),
                    bg_1: base,
                })
            }
            None => None,
        }
    }
}

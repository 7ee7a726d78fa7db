#![warn(missing_docs)]
//! Display colors of sources and ray paths
use crate::error::{LbError, LbResult};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// An 8 bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    /// red channel
    pub r: u8,
    /// green channel
    pub g: u8,
    /// blue channel
    pub b: u8,
    /// alpha channel
    pub a: u8,
}
impl Default for Rgba {
    /// Opaque red, the classic laser pointer.
    fn default() -> Self {
        Self::new(255, 0, 0, 255)
    }
}
impl Rgba {
    /// Creates a new [`Rgba`] color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
    /// Returns a copy of this color with the given alpha value.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}
impl FromStr for Rgba {
    type Err = LbError;

    /// Parse a color given as `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    fn from_str(s: &str) -> LbResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(LbError::Source(format!("invalid color string '{s}'")));
        }
        let channel = |idx: usize| {
            u8::from_str_radix(&hex[idx..idx + 2], 16)
                .map_err(|_| LbError::Source(format!("invalid color string '{s}'")))
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}
impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.r, self.g, self.b, self.a
        )
    }
}

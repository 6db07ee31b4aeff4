//! Hex color helpers
//!
//! Colors are stored as free-form hex strings. Comparisons always go through
//! [`normalize_hex`]; rendering goes through [`Rgb::parse_or_default`], which
//! substitutes the theme default instead of propagating a parse failure.

use crate::ColorGroup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalize a hex string to uppercase with a single leading `#`.
///
/// No validation happens here; `"#ff0000"`, `"FF0000"` and `" ff0000 "` all
/// normalize to `"#FF0000"`.
pub fn normalize_hex(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('#');
    format!("#{}", trimmed.to_ascii_uppercase())
}

/// Whether two hex strings name the same color after normalization.
pub fn same_hex(a: &str, b: &str) -> bool {
    normalize_hex(a) == normalize_hex(b)
}

/// Display label for a color: `"<GroupLabel> (<HEX>)"`, or the bare hex when
/// the group has no label.
pub fn color_label(group: ColorGroup, hex: &str) -> String {
    let hex = normalize_hex(hex);
    match group.label() {
        Some(label) => format!("{} ({})", label, hex),
        None => hex,
    }
}

/// An sRGB color decoded from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Neutral gray used when a stored color cannot be parsed.
    pub const THEME_DEFAULT: Rgb = Rgb {
        r: 0x9E,
        g: 0x9E,
        b: 0x9E,
    };

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `#AARRGGBB` (alpha dropped).
    pub fn parse(raw: &str) -> Option<Rgb> {
        let normalized = normalize_hex(raw);
        let digits = &normalized[1..];
        if !digits.is_ascii() {
            return None;
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            8 => digits[2..].to_string(),
            _ => return None,
        };
        let bytes = hex::decode(expanded).ok()?;
        match bytes.as_slice() {
            [r, g, b] => Some(Rgb {
                r: *r,
                g: *g,
                b: *b,
            }),
            _ => None,
        }
    }

    /// Parse, falling back to [`Rgb::THEME_DEFAULT`] for malformed input.
    pub fn parse_or_default(raw: &str) -> Rgb {
        Self::parse(raw).unwrap_or(Self::THEME_DEFAULT)
    }

    /// Canonical `#RRGGBB` form.
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

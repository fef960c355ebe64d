// Copyright 2025 the Alexandria Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Color strings.
//!
//! Parsing accepts CSS color syntax (`#RRGGBB`, `#RRGGBBAA`, named colors,
//! `rgb(...)`, and so on) through [`peniko::color::parse_color`]. Formatting
//! always writes hex.

use peniko::Color;
use peniko::color::{ParseError, Srgb, parse_color};

/// Error returned when a color string is not valid CSS color syntax.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid color `{text}`: {source}")]
pub struct ColorError {
    /// The rejected input.
    pub text: String,
    /// Why the parser rejected it.
    #[source]
    pub source: ParseError,
}

/// Parses a CSS color string into an sRGB color.
pub fn parse_css(text: &str) -> Result<Color, ColorError> {
    parse_color(text)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|source| ColorError {
            text: text.into(),
            source,
        })
}

/// Formats a color as `#RRGGBB`, or `#RRGGBBAA` when it is not opaque.
pub fn format_hex(color: Color) -> String {
    let c = color.to_rgba8();
    if c.a == 255 {
        format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        let c = parse_css("#8B0000").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0x8B, 0, 0, 255));

        let c = parse_css("#A9A9A980").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0xA9, 0xA9, 0xA9, 0x80));

        let c = parse_css(" darkred ").unwrap().to_rgba8();
        assert_eq!((c.r, c.g, c.b, c.a), (0x8B, 0, 0, 255));
    }

    #[test]
    fn rejects_malformed() {
        assert!(parse_css("#+1+1+1").is_err());
        assert!(parse_css("#GG0000").is_err());
        assert!(parse_css("#12345").is_err());
        assert!(parse_css("").is_err());
        assert!(parse_css("#ééé").is_err());
        assert!(parse_css("not-a-color").is_err());

        let err = parse_css("#+1+1+1").unwrap_err();
        assert_eq!(err.text, "#+1+1+1");
    }

    #[test]
    fn format_omits_opaque_alpha() {
        assert_eq!(format_hex(Color::from_rgba8(0xA9, 0xA9, 0xA9, 255)), "#A9A9A9");
        assert_eq!(format_hex(Color::from_rgba8(1, 2, 3, 4)), "#01020304");
    }
}

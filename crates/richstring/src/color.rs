//! Color values for colorize directive keys.
//!
//! Supports two formats:
//!
//! - Named colors: `red`, `green`, `blue`, `orange`, `grey`, ...
//! - RGB hex: `"#ff6b35"` or `"#fff"` (3 or 6 digit)
//!
//! A color is written into markup as its name or as an uppercase `#RRGGBB`
//! code, and into terminal output as the closest `console` color.
//!
//! # Example
//!
//! ```rust
//! use richstring::ColorDef;
//!
//! let red = ColorDef::parse("red").unwrap();
//! assert_eq!(red.markup_id(), "red");
//!
//! let hex = ColorDef::parse("#ff6b35").unwrap();
//! assert_eq!(hex.markup_id(), "#FF6B35");
//! ```

use console::Color;

/// Parsed color for a colorize key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorDef {
    /// Named color, kept with its terminal equivalent.
    Named(String, Color),
    /// True color RGB.
    Rgb(u8, u8, u8),
}

impl ColorDef {
    /// Parses a color name or hex code.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        Self::parse_named(s)
    }

    /// Parses a hex color code (without the # prefix).
    fn parse_hex(hex: &str) -> Result<Self, String> {
        let component = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(|| format!("Invalid hex: {}", hex))
        };

        match hex.len() {
            // 3-digit hex: #rgb -> #rrggbb
            3 => Ok(ColorDef::Rgb(
                component(0..1)? * 17,
                component(1..2)? * 17,
                component(2..3)? * 17,
            )),
            6 => Ok(ColorDef::Rgb(
                component(0..2)?,
                component(2..4)?,
                component(4..6)?,
            )),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3 or 6 digits)",
                hex
            )),
        }
    }

    fn parse_named(name: &str) -> Result<Self, String> {
        let name_lower = name.to_lowercase();

        let color = match name_lower.as_str() {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "gray" | "grey" => Color::Color256(8),
            "orange" => Color::Color256(208),
            "purple" => Color::Color256(93),
            _ => return Err(format!("Unknown color name: {}", name)),
        };

        Ok(ColorDef::Named(name_lower, color))
    }

    /// The identifier written into `<color=...>` markup.
    pub fn markup_id(&self) -> String {
        match self {
            ColorDef::Named(name, _) => name.clone(),
            ColorDef::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
        }
    }

    /// Converts this color to a `console::Color`.
    pub fn to_console_color(&self) -> Color {
        match self {
            ColorDef::Named(_, color) => *color,
            ColorDef::Rgb(r, g, b) => Color::Color256(rgb_to_ansi256((*r, *g, *b))),
        }
    }
}

/// Maps an RGB triplet onto the xterm 256-color palette.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

//! Style tags in description cells
//!
//! A description starting with `[calc]`, `[calculation]` or `[calculated]`
//! marks a derived value; `[fixed]`, `[const]` or `[constant]` marks a constant.
//! Tags are case-insensitive and may follow a single leading `'` (the host's
//! text-literal marker).

use std::fmt;

use paramsheet_core::Rgba;

/// Visual family selected by a description tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    /// Value derived from other parameters
    Calculated,
    /// Value that must not be edited
    Fixed,
}

impl StyleFamily {
    /// Background applied to tagged value cells
    pub const fn background(self) -> Rgba {
        match self {
            StyleFamily::Calculated => Rgba::opaque(0.85, 0.92, 1.0),
            StyleFamily::Fixed => Rgba::opaque(0.9, 0.9, 0.9),
        }
    }

    /// Foreground applied to tagged value cells
    pub const fn foreground(self) -> Rgba {
        match self {
            StyleFamily::Calculated => Rgba::opaque(0.0, 0.2, 0.6),
            StyleFamily::Fixed => Rgba::opaque(0.3, 0.3, 0.3),
        }
    }

    /// Map a tag body (text between the brackets) to its family
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "calc" | "calculation" | "calculated" => Some(StyleFamily::Calculated),
            "fixed" | "const" | "constant" => Some(StyleFamily::Fixed),
            _ => None,
        }
    }
}

impl fmt::Display for StyleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleFamily::Calculated => write!(f, "calculated"),
            StyleFamily::Fixed => write!(f, "fixed"),
        }
    }
}

/// Style family of a description, if it starts with a recognised tag
///
/// ```
/// use paramsheet_annotate::tag::{parse_tag, StyleFamily};
///
/// assert_eq!(parse_tag("[calc] derived value"), Some(StyleFamily::Calculated));
/// assert_eq!(parse_tag("'[CONST] do not touch"), Some(StyleFamily::Fixed));
/// assert_eq!(parse_tag("see [calc]"), None);
/// ```
pub fn parse_tag(description: &str) -> Option<StyleFamily> {
    let text = description.trim_start();
    let text = text.strip_prefix('\'').unwrap_or(text);
    let body = text.strip_prefix('[')?;
    let end = body.find(']')?;
    StyleFamily::from_tag(&body[..end])
}

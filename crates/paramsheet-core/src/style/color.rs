//! Color representation

use std::fmt;

/// Default tolerance used when comparing colors channel by channel
pub const COLOR_TOLERANCE: f64 = 0.0001;

/// RGBA color with every channel in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Opacity (1.0 = opaque)
    pub a: f64,
}

impl Rgba {
    /// Create a color, clamping each channel into `[0.0, 1.0]`
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
            a: clamp_channel(a),
        }
    }

    /// Create an opaque color
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Channels as an array (r, g, b, a)
    pub fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from an array (r, g, b, a)
    pub fn from_array(channels: [f64; 4]) -> Self {
        Self::new(channels[0], channels[1], channels[2], channels[3])
    }

    /// Check whether every channel differs by at most `tolerance`
    pub fn approx_eq(&self, other: &Rgba, tolerance: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Convert to an 8-digit RGBA hex string (without # prefix)
    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c * 255.0).round() as u8;
        format!(
            "{:02X}{:02X}{:02X}{:02X}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }

    pub const BLACK: Rgba = Rgba::opaque(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::opaque(1.0, 1.0, 1.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::WHITE
    }
}

fn clamp_channel(c: f64) -> f64 {
    if c.is_nan() {
        0.0
    } else {
        c.clamp(0.0, 1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

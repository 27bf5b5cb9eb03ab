//! Cell styling types
//!
//! Only the background/foreground color channels are modelled; see [`Rgba`].

mod color;

pub use color::{Rgba, COLOR_TOLERANCE};

/// Background reported for a cell that was never colored
pub const DEFAULT_BACKGROUND: Rgba = Rgba::WHITE;

/// Foreground reported for a cell that was never colored
pub const DEFAULT_FOREGROUND: Rgba = Rgba::BLACK;

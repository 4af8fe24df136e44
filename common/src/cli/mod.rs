//! CLI-related shared utilities.
//!
//! This module centralizes CLI policy so binaries don't duplicate behavior.

mod color;
mod palette;

pub use color::{ColorWhen, ParseColorWhenError};
pub use palette::{Color, Palette};

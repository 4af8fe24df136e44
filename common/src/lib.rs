//! Utilities shared by every binary in the workspace.
//!
//! This crate owns the terminal color policy, the `Palette` handed to
//! command handlers, and the tracing bootstrap.

pub mod cli;
pub mod observability;

pub use cli::{Color, ColorWhen, Palette};
pub use observability::init_tracing;

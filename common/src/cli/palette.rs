//! Color-formatting capability handed to command handlers.
//!
//! A `Palette` is decided once per process (from `ColorWhen`) and then
//! passed around by value. Handlers never check the terminal themselves.

use owo_colors::{OwoColorize, Style};

/// Text attributes a `Palette` knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Bold,
    Underline,
    Reverse,

    FgBlack,
    FgRed,
    FgGreen,
    FgYellow,
    FgBlue,
    FgMagenta,
    FgCyan,
    FgWhite,

    FgBrightBlack,
    FgBrightRed,
    FgBrightGreen,
    FgBrightYellow,
    FgBrightBlue,
    FgBrightMagenta,
    FgBrightCyan,
    FgBrightWhite,
}

impl Color {
    // ---
    /// Every foreground color, standard colors first.
    pub const FOREGROUND: [Color; 16] = [
        Color::FgBlack,
        Color::FgRed,
        Color::FgGreen,
        Color::FgYellow,
        Color::FgBlue,
        Color::FgMagenta,
        Color::FgCyan,
        Color::FgWhite,
        Color::FgBrightBlack,
        Color::FgBrightRed,
        Color::FgBrightGreen,
        Color::FgBrightYellow,
        Color::FgBrightBlue,
        Color::FgBrightMagenta,
        Color::FgBrightCyan,
        Color::FgBrightWhite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Bold => "Bold",
            Color::Underline => "Underline",
            Color::Reverse => "Reverse",
            Color::FgBlack => "FgBlack",
            Color::FgRed => "FgRed",
            Color::FgGreen => "FgGreen",
            Color::FgYellow => "FgYellow",
            Color::FgBlue => "FgBlue",
            Color::FgMagenta => "FgMagenta",
            Color::FgCyan => "FgCyan",
            Color::FgWhite => "FgWhite",
            Color::FgBrightBlack => "FgBrightBlack",
            Color::FgBrightRed => "FgBrightRed",
            Color::FgBrightGreen => "FgBrightGreen",
            Color::FgBrightYellow => "FgBrightYellow",
            Color::FgBrightBlue => "FgBrightBlue",
            Color::FgBrightMagenta => "FgBrightMagenta",
            Color::FgBrightCyan => "FgBrightCyan",
            Color::FgBrightWhite => "FgBrightWhite",
        }
    }

    /// Layers this attribute on top of `style`. A foreground color
    /// replaces any earlier one.
    fn apply(self, style: Style) -> Style {
        match self {
            Color::Bold => style.bold(),
            Color::Underline => style.underline(),
            Color::Reverse => style.reversed(),
            Color::FgBlack => style.black(),
            Color::FgRed => style.red(),
            Color::FgGreen => style.green(),
            Color::FgYellow => style.yellow(),
            Color::FgBlue => style.blue(),
            Color::FgMagenta => style.magenta(),
            Color::FgCyan => style.cyan(),
            Color::FgWhite => style.white(),
            Color::FgBrightBlack => style.bright_black(),
            Color::FgBrightRed => style.bright_red(),
            Color::FgBrightGreen => style.bright_green(),
            Color::FgBrightYellow => style.bright_yellow(),
            Color::FgBrightBlue => style.bright_blue(),
            Color::FgBrightMagenta => style.bright_magenta(),
            Color::FgBrightCyan => style.bright_cyan(),
            Color::FgBrightWhite => style.bright_white(),
        }
    }
}

/// Wraps text in ANSI styles, or leaves it untouched when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    // ---
    pub fn new(enabled: bool) -> Self {
        // ---
        Self { enabled }
    }

    /// A palette that never emits escape codes.
    pub fn plain() -> Self {
        // ---
        Self::new(false)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `text` styled with `color` when enabled.
    pub fn paint(&self, color: Color, text: &str) -> String {
        // ---
        if self.enabled {
            text.style(color.apply(Style::new())).to_string()
        } else {
            text.to_string()
        }
    }

    /// Applies several attributes at once (e.g. bold + red).
    pub fn paint_all(&self, colors: &[Color], text: &str) -> String {
        // ---
        if !self.enabled || colors.is_empty() {
            return text.to_string();
        }

        let style = colors
            .iter()
            .fold(Style::new(), |acc, color| color.apply(acc));
        text.style(style).to_string()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn disabled_palette_returns_text_unchanged() {
        // ---
        let palette = Palette::plain();
        assert_eq!(palette.paint(Color::FgRed, "FgRed"), "FgRed");
        assert_eq!(
            palette.paint_all(&[Color::Bold, Color::FgGreen], "ok"),
            "ok"
        );
    }

    #[test]
    fn enabled_palette_wraps_in_escape_codes() {
        // ---
        let painted = Palette::new(true).paint(Color::FgRed, "FgRed");
        assert!(painted.contains("\x1b[31m"), "got {painted:?}");
        assert!(painted.contains("FgRed"));
        assert!(painted.ends_with("\x1b[0m"));
    }

    #[test]
    fn bold_uses_intensity_code() {
        // ---
        let painted = Palette::new(true).paint(Color::Bold, "x");
        assert!(painted.contains("\x1b[1m"), "got {painted:?}");
    }

    #[test]
    fn paint_all_combines_attributes() {
        // ---
        let painted = Palette::new(true).paint_all(&[Color::Bold, Color::FgRed], "x");
        assert!(painted.starts_with("\x1b["));
        assert!(painted.contains('1'));
        assert!(painted.contains("31"));
        assert!(painted.ends_with("\x1b[0m"));
    }

    #[test]
    fn every_foreground_has_a_distinct_name() {
        // ---
        let mut names: Vec<_> = Color::FOREGROUND.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Color::FOREGROUND.len());
    }
}

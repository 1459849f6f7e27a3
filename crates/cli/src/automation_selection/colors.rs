use crossterm::style::Color;

use autorun_core::view::OutputStyle;

/// Trait for converting output styles to terminal colors
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Color;
}

impl AsTermColor for OutputStyle {
    fn as_crossterm_color(&self) -> Color {
        match self {
            OutputStyle::Success => Color::DarkGreen,
            OutputStyle::Error => Color::Red,
        }
    }
}

/// Color for secondary text such as hints and the loading indicator
pub const HINT_COLOR: Color = Color::DarkGrey;

/// Color for the selected automation's heading
pub const HEADING_COLOR: Color = Color::DarkBlue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_style_colors() {
        assert_eq!(OutputStyle::Success.as_crossterm_color(), Color::DarkGreen);
        assert_eq!(OutputStyle::Error.as_crossterm_color(), Color::Red);
    }
}

//! Color constants and shared styles for the TUI.

use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const MODULE_COLOR: Color = Color::Cyan;
pub const ROW_ALT_BG: Color = Color::Indexed(235);
pub const STATUS_BAR_BG: Color = Color::Indexed(236);
pub const STATUS_KEY_COLOR: Color = Color::Cyan;
pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;
pub const FIELD_SELECTED: Color = Color::Yellow;
pub const FIELD_NA: Color = Color::DarkGray;

pub fn header_style() -> Style {
    Style::new().bold()
}

pub fn row_selected() -> Style {
    Style::new().reversed()
}

/// Color an average the way a transcript reads: passing (>= 10) is green,
/// resit territory (>= 8) yellow, failing red.
pub fn average_color(average: f64) -> Color {
    if average >= 10.0 {
        Color::Green
    } else if average >= 8.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_color_thresholds() {
        assert_eq!(average_color(12.0), Color::Green);
        assert_eq!(average_color(10.0), Color::Green);
        assert_eq!(average_color(9.0), Color::Yellow);
        assert_eq!(average_color(7.99), Color::Red);
        assert_eq!(average_color(0.0), Color::Red);
    }
}

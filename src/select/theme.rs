//! Theme for the picker list.
//!
//! Supports light and dark variants with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Colors and styles used when rendering the picker.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for the highlighted row.
    pub highlight: Style,
    /// Color of the ✔ mark on toggled rows.
    pub marked: Color,
    /// Style for the list title.
    pub title: Style,
    /// Color for the surrounding border.
    pub border: Color,
    /// Border shape.
    pub border_type: BorderType,
}

impl Theme {
    /// Dark theme for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            marked: Color::Green,
            title: Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            border: Color::Gray,
            border_type: BorderType::Rounded,
        }
    }

    /// Light theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            marked: Color::Green,
            title: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border: Color::DarkGray,
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background luminance.
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }
}

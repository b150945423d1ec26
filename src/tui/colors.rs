//! Color constants for the terminal user interface.

use ratatui::style::Color;

// Section accent colors for the header and status bar.

/// Used for the dashboard and analytics sections.
pub const STEEL_BLUE: Color = Color::Rgb(70, 110, 180);
/// Used for projects.
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for tasks.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for team.
pub const DARK_PURPLE: Color = Color::Rgb(86, 60, 92);
/// Used for workflows.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

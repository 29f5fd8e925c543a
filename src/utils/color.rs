use std::str::FromStr;

use ratatui::style::Color;

/// Parse a theme color: `#rrggbb`, `#rgb`, a named terminal color or an ANSI index
#[must_use]
pub fn parse_color(color: &str) -> Option<Color> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#').filter(|h| h.len() == 3) {
        let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
        return Color::from_str(&format!("#{}", expanded)).ok();
    }
    Color::from_str(color).ok()
}

/// Color for a habit or daily based on its task value, red for neglected through blue for strong
#[must_use]
pub fn task_value_color(value: f64) -> Color {
    match value {
        v if v < -20.0 => Color::Rgb(128, 24, 24), // Dark red
        v if v < -10.0 => Color::Rgb(246, 70, 70), // Red
        v if v < -1.0 => Color::Rgb(250, 143, 60), // Orange
        v if v < 1.0 => Color::Rgb(255, 190, 93),  // Yellow
        v if v < 5.0 => Color::Rgb(36, 204, 143),  // Green
        v if v < 10.0 => Color::Rgb(80, 181, 233), // Light blue
        _ => Color::Rgb(41, 149, 205),             // Blue
    }
}

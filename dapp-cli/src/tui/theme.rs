use ratatui::style::{Color, Style};

use crate::tui::input::InputMode;

/// BNB-yellow color palette
pub struct BscTheme {
    pub primary: Color,
    pub surface: Color,
    pub text_primary: Color,
    pub text_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub mode_normal: Color,
    pub mode_insert: Color,
}

impl Default for BscTheme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(240, 185, 11), // #F0B90B
            surface: Color::Rgb(30, 32, 38),   // #1E2026
            text_primary: Color::Rgb(234, 236, 239),
            text_dim: Color::Rgb(132, 142, 156),
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Cyan,
            mode_normal: Color::Cyan,
            mode_insert: Color::Green,
        }
    }
}

impl BscTheme {
    /// Titles and focused elements
    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn surface_style(&self) -> Style {
        Style::default().bg(self.surface)
    }

    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn status_style(&self, is_error: bool) -> Style {
        Style::default().fg(if is_error { self.error } else { self.success })
    }

    pub fn mode_style(&self, mode: InputMode) -> Style {
        let color = match mode {
            InputMode::Normal => self.mode_normal,
            InputMode::Insert => self.mode_insert,
        };
        Style::default().fg(color)
    }
}

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::BscTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupType {
    Error,
    Info,
}

/// Modal message dismissed by any key.
#[derive(Debug, Clone)]
pub struct Popup {
    pub popup_type: PopupType,
    pub title: String,
    pub content: String,
}

impl Popup {
    pub fn new(
        popup_type: PopupType,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            popup_type,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn error(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(PopupType::Error, title, content)
    }

    pub fn render(&self, frame: &mut Frame, theme: &BscTheme, area: Rect) {
        let border_color = match self.popup_type {
            PopupType::Error => theme.error,
            PopupType::Info => theme.primary,
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.content.as_str(), theme.text_primary_style())),
            Line::from(""),
            Line::from(Span::styled("Press any key to dismiss", theme.text_dim_style())),
        ];

        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(Span::styled(
                        self.title.as_str(),
                        Style::default().fg(border_color).bold(),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color)),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(widget, area);
    }
}

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::BscTheme;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown while any page action is in flight.
#[derive(Debug, Default)]
pub struct Spinner {
    pub message: String,
    pub frame: usize,
    pub spinning: bool,
}

impl Spinner {
    pub fn start(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.spinning = true;
    }

    pub fn stop(&mut self) {
        self.spinning = false;
        self.frame = 0;
    }

    pub fn tick(&mut self) {
        if self.spinning {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    pub fn glyph(&self) -> &'static str {
        FRAMES[self.frame % FRAMES.len()]
    }

    pub fn render(&self, frame: &mut Frame, theme: &BscTheme, area: Rect) {
        if !self.spinning {
            return;
        }

        let text = format!("{} {}", self.glyph(), self.message);
        let widget = Paragraph::new(text)
            .style(theme.text_primary_style())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.info)),
            );

        frame.render_widget(Clear, area);
        frame.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_spinning() {
        let mut spinner = Spinner::default();
        spinner.tick();
        assert_eq!(spinner.frame, 0);

        spinner.start("Transfer...");
        for _ in 0..12 {
            spinner.tick();
        }
        assert_eq!(spinner.frame, 2);

        spinner.stop();
        assert!(!spinner.spinning);
        assert_eq!(spinner.frame, 0);
    }
}

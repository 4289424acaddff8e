use bscdapp::page::PageView;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::status::button_line;
use crate::tui::theme::BscTheme;

pub fn render(frame: &mut Frame, theme: &BscTheme, view: &PageView, area: Rect) {
    let Some(sign) = &view.sign else {
        return;
    };

    let signature = if sign.signature.is_empty() {
        Span::styled("(not signed)", theme.text_dim_style())
    } else {
        Span::styled(sign.signature.as_str(), Style::default().fg(theme.success))
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("message:   ", theme.text_dim_style()),
            Span::styled(sign.message.as_str(), theme.text_primary_style()),
        ]),
        Line::from(vec![Span::styled("signature: ", theme.text_dim_style()), signature]),
    ];
    if let Some(action) = &sign.action {
        lines.push(button_line(theme, action, "s"));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(Span::styled(" Sign ", theme.primary_style()))
            .borders(Borders::ALL)
            .border_style(theme.text_dim_style()),
    );
    frame.render_widget(panel, area);
}

use bscdapp::page::view::{Control, NetworkPanel};
use bscdapp::page::PageView;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::BscTheme;

pub fn render(frame: &mut Frame, theme: &BscTheme, view: &PageView, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        view.status.as_str(),
        theme.text_primary_style().bold(),
    ))];

    if let Some(button) = &view.enable_button {
        lines.push(Line::from(""));
        lines.push(button_line(theme, button, "e"));
    }

    if let Some(account) = &view.account {
        lines.push(Line::from(vec![
            Span::styled("Current account: ", theme.text_dim_style()),
            Span::styled(account.address.as_str(), theme.text_primary_style()),
        ]));
        lines.push(button_line(theme, &account.balance_action, "b"));
    }

    match &view.network {
        Some(network @ NetworkPanel::Recognized { .. }) => {
            let style = Style::default().fg(theme.success);
            lines.push(Line::from(Span::styled(network.text(), style)));
        }
        Some(NetworkPanel::Mismatch { message, help_url }) => {
            let style = Style::default().fg(theme.warning);
            lines.push(Line::from(Span::styled(message.as_str(), style)));
            lines.push(Line::from(vec![
                Span::styled("Use BSC with Metamask: ", theme.text_dim_style()),
                Span::styled(help_url.as_str(), Style::default().fg(theme.info).underlined()),
            ]));
        }
        None => {}
    }

    if let Some(error) = &view.error {
        lines.push(Line::from(Span::styled(error.as_str(), Style::default().fg(theme.error))));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(Span::styled(" Extension ", theme.primary_style()))
            .borders(Borders::ALL)
            .border_style(theme.primary_style()),
    );
    frame.render_widget(panel, area);
}

/// `[Label]  key` with pending controls dimmed.
pub fn button_line<'a>(theme: &BscTheme, control: &'a Control, key: &'a str) -> Line<'a> {
    if control.pending {
        Line::from(Span::styled(format!("[{} ...]", control.label), theme.text_dim_style()))
    } else {
        Line::from(vec![
            Span::styled(format!("[{}]", control.label), theme.primary_style().bold()),
            Span::styled(format!("  {}", key), theme.text_dim_style()),
        ])
    }
}

use bscdapp::page::PageView;
use ratatui::prelude::*;

use super::status::button_line;
use crate::tui::app::{App, FormFocus};
use crate::tui::input::InputMode;
use crate::tui::theme::BscTheme;
use crate::tui::widgets::Form;

pub fn render(frame: &mut Frame, theme: &BscTheme, app: &App, view: &PageView, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let editing = app.input_mode == InputMode::Insert;
    let focus_of = |form: FormFocus| (app.focus == form).then_some(app.selected_field);

    if let Some(transfer) = &view.transfer {
        Form::new("Transfer BNB")
            .field("To", &transfer.to)
            .field("Amount", &transfer.amount)
            .focus(focus_of(FormFocus::Transfer), editing)
            .footer(button_line(theme, &transfer.action, "t"))
            .footer(hash_line(theme, transfer.tx_hash.as_deref()))
            .render(frame, theme, columns[0]);
    }

    if let Some(contract) = &view.contract {
        Form::new("Contract call")
            .field("Contract", &contract.address)
            .field("Receiver", &contract.receiver)
            .field("Amount", &contract.amount)
            .focus(focus_of(FormFocus::Contract), editing)
            .footer(button_line(theme, &contract.action, "x"))
            .footer(hash_line(theme, contract.tx_hash.as_deref()))
            .render(frame, theme, columns[1]);
    }
}

fn hash_line<'a>(theme: &BscTheme, tx_hash: Option<&'a str>) -> Line<'a> {
    match tx_hash {
        Some(hash) => Line::from(vec![
            Span::styled("tx: ", theme.text_dim_style()),
            Span::styled(hash, Style::default().fg(theme.success)),
        ]),
        None => Line::from(""),
    }
}


use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::theme::BscTheme;

pub struct FormField<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

/// Render-only form over values owned by the page state.
pub struct Form<'a> {
    title: &'a str,
    fields: Vec<FormField<'a>>,
    /// Selected field when the form has focus
    active_index: Option<usize>,
    editing: bool,
    footer: Vec<Line<'a>>,
}

impl<'a> Form<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            fields: Vec::new(),
            active_index: None,
            editing: false,
            footer: Vec::new(),
        }
    }

    pub fn field(mut self, label: &'a str, value: &'a str) -> Self {
        self.fields.push(FormField { label, value });
        self
    }

    pub fn focus(mut self, active_index: Option<usize>, editing: bool) -> Self {
        self.active_index = active_index;
        self.editing = editing;
        self
    }

    pub fn footer(mut self, line: Line<'a>) -> Self {
        self.footer.push(line);
        self
    }

    pub fn render(self, frame: &mut Frame, theme: &BscTheme, area: Rect) {
        let border_style = if self.active_index.is_some() {
            theme.primary_style()
        } else {
            theme.text_dim_style()
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), theme.primary_style()))
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let field_height = 2u16; // label + input line
        let constraints: Vec<Constraint> = self
            .fields
            .iter()
            .map(|_| Constraint::Length(field_height))
            .chain(std::iter::once(Constraint::Min(0)))
            .collect();

        let areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in self.fields.iter().enumerate() {
            let is_active = self.active_index == Some(i);

            let value_style = if is_active && self.editing {
                Style::default().fg(theme.mode_insert)
            } else if is_active {
                theme.primary_style()
            } else {
                theme.text_primary_style()
            };
            let label_style = if is_active {
                theme.primary_style().bold()
            } else {
                theme.text_dim_style()
            };

            let value = match (is_active, self.editing) {
                (true, true) => format!("▸ {}_", field.value),
                (true, false) => format!("▸ {}", field.value),
                _ => format!("  {}", field.value),
            };

            let text = vec![
                Line::from(Span::styled(field.label, label_style)),
                Line::from(Span::styled(value, value_style)),
            ];
            frame.render_widget(Paragraph::new(text), areas[i]);
        }

        if let Some(rest) = areas.last() {
            frame.render_widget(Paragraph::new(self.footer).wrap(Wrap { trim: false }), *rest);
        }
    }
}

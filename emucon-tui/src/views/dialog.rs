//! Dialog rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::dialog::{DeleteTarget, Dialog};
use crate::forms::{FieldKind, Form, FormKind};
use crate::state::App;
use crate::views::centered_rect;

const HELP: &[(&str, &str)] = &[
    ("Tab / Shift-Tab, h / l", "next / previous service"),
    ("1-9, 0, -", "jump to service"),
    ("j / k, arrows", "move selection"),
    ("Enter", "open the selected resource"),
    ("Esc", "back / close dialog"),
    ("n", "create"),
    ("d", "delete selected"),
    ("ctrl-r", "refresh"),
    ("q, ctrl-c", "quit"),
];

pub fn render(f: &mut Frame<'_>, app: &App, dialog: &Dialog) {
    match dialog {
        Dialog::Help => render_help(f, app),
        Dialog::ConfirmDelete(target) => render_confirm(f, app, target),
        Dialog::ChooseForm { kinds, selected } => render_chooser(f, app, kinds, *selected),
        Dialog::Create(form) => render_form(f, app, form),
    }
}

fn popup(f: &mut Frame<'_>, app: &App, title: &str, percent_x: u16, percent_y: u16) -> Rect {
    let area = centered_rect(percent_x, percent_y, f.size());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_focus));
    let inner = block.inner(area);
    f.render_widget(block, area);
    inner
}

fn render_help(f: &mut Frame<'_>, app: &App) {
    let inner = popup(f, app, "Keybindings", 60, 50);
    let lines: Vec<Line> = HELP
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("{keys:<24}"), Style::default().fg(app.theme.primary)),
                Span::raw(*what),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm(f: &mut Frame<'_>, app: &App, target: &DeleteTarget) {
    let inner = popup(f, app, "Confirm delete", 50, 20);
    let text = Paragraph::new(target.prompt())
        .style(Style::default().fg(app.theme.warning))
        .wrap(Wrap { trim: true });
    f.render_widget(text, inner);
}

fn render_chooser(f: &mut Frame<'_>, app: &App, kinds: &[FormKind], selected: usize) {
    let inner = popup(f, app, "Create", 40, 30);
    let items: Vec<ListItem> = kinds.iter().map(|k| ListItem::new(k.title())).collect();
    let list = List::new(items).highlight_style(
        Style::default()
            .fg(app.theme.primary)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, inner, &mut state);
}

fn render_form(f: &mut Frame<'_>, app: &App, form: &Form) {
    let inner = popup(f, app, form.kind.title(), 60, 70);

    let mut constraints: Vec<Constraint> = form.fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in form.fields.iter().enumerate() {
        let focused = index == form.focus;
        let label = match field.spec.kind {
            FieldKind::Required | FieldKind::Json => format!("{} *", field.spec.label),
            FieldKind::Optional | FieldKind::Number => field.spec.label.to_string(),
        };
        let border = if focused {
            app.theme.border_focus
        } else {
            app.theme.border
        };
        let block = Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let area = block.inner(rows[index]);
        f.render_widget(block, rows[index]);
        f.render_widget(&field.input, area);
    }

    let status = if form.pending {
        Line::styled("Saving...", Style::default().fg(app.theme.text_dim))
    } else if let Some(err) = &form.error {
        Line::styled(err.to_string(), Style::default().fg(app.theme.error))
    } else {
        Line::styled(
            "Enter submit • Tab next field • Esc cancel",
            Style::default().fg(app.theme.text_dim),
        )
    };
    let last = rows[rows.len() - 1];
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), last);
}

//! View rendering dispatch.

pub mod dialog;
pub mod helpers;

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::nav::View;
use crate::state::App;
use crate::theme::{notification_color, notification_label};

pub use helpers::centered_rect;

/// How long a toast stays in the footer.
const TOAST_SECONDS: i64 = 5;

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    render_body(f, app, layout[1]);
    render_footer(f, app, layout[2]);

    if let Some(dialog) = &app.dialog {
        dialog::render(f, app, dialog);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (index, view) in View::all().into_iter().enumerate() {
        let style = if view == app.active_view {
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(app.theme.text_dim)
        };
        spans.push(Span::styled(format!(" {} {} ", shortcut(index), view.title()), style));
    }
    let title = format!("EMUCON | {}", app.hooks.client().base_url());
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border))
            .title(Span::styled(title, Style::default().fg(app.theme.primary))),
    );
    f.render_widget(header, area);
}

fn shortcut(index: usize) -> char {
    match index {
        0..=8 => char::from(b'1' + index as u8),
        9 => '0',
        _ => '-',
    }
}

fn render_body(f: &mut Frame<'_>, app: &App, area: Rect) {
    let screen = &app.screen;
    match &screen.sub {
        Some(sub) if !sub.kind.is_modal() => sub.pane.render(f, area, &app.theme),
        Some(sub) => {
            screen.list.render(f, area, &app.theme);
            let popup = centered_rect(80, 60, area);
            f.render_widget(Clear, popup);
            sub.pane.render(f, popup, &app.theme);
        }
        None => screen.list.render(f, area, &app.theme),
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let help = if app.screen.sub.is_some() {
        "j/k move • d delete • ctrl-r refresh • Esc back • ? help • q quit"
    } else {
        "Tab/1-0 switch view • j/k move • Enter open • n new • d delete • ctrl-r refresh • q quit"
    };
    let recent = app
        .notifications
        .last()
        .filter(|note| (Utc::now() - note.created_at).num_seconds() < TOAST_SECONDS);
    let (text, style) = match recent {
        Some(note) => (
            format!("{}: {}", notification_label(note.level), note.message),
            Style::default().fg(notification_color(note.level, &app.theme)),
        ),
        None => (help.to_string(), Style::default().fg(app.theme.text_dim)),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcuts_follow_key_map() {
        assert_eq!(shortcut(0), '1');
        assert_eq!(shortcut(8), '9');
        assert_eq!(shortcut(9), '0');
        assert_eq!(shortcut(10), '-');
    }
}

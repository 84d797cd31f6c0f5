//! A mounted resource table.
//!
//! A [`ResourcePane`] owns the [`QueryHandle`] behind it, so dropping the
//! pane unsubscribes from the store.

use emucon_query::QueryHandle;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    Frame,
};

use crate::resource::{Collection, Resource};
use crate::theme::{resource_status_color, SynthBruteTheme};
use crate::widgets::{DetailPanel, ResourceTable, StatusIndicator};

pub const RETRY_HINT: &str = "ctrl-r to retry";

/// What a pane shows, derived from its query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneState {
    /// Query disabled and nothing cached.
    Idle,
    Loading,
    Error(String),
    /// Cached rows are shown. A failed refetch keeps them on screen and
    /// carries the error alongside.
    Data { refresh_error: Option<String> },
}

impl PaneState {
    pub fn resolve(has_data: bool, is_loading: bool, error: Option<String>) -> Self {
        if has_data {
            PaneState::Data {
                refresh_error: error,
            }
        } else if is_loading {
            PaneState::Loading
        } else if let Some(message) = error {
            PaneState::Error(message)
        } else {
            PaneState::Idle
        }
    }
}

pub trait Pane {
    fn title(&self) -> &str;
    fn state(&self) -> PaneState;
    fn len(&self) -> usize;
    fn selected(&self) -> Option<usize>;
    fn select_next(&mut self);
    fn select_previous(&mut self);
    fn selected_id(&self) -> Option<String>;
    fn refetch(&self);
    fn render(&self, f: &mut Frame<'_>, area: Rect, theme: &SynthBruteTheme);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ResourcePane<C: Collection> {
    title: String,
    handle: QueryHandle<C>,
    selected: usize,
}

impl<C: Collection> ResourcePane<C> {
    pub fn new(title: impl Into<String>, handle: QueryHandle<C>) -> Self {
        Self {
            title: title.into(),
            handle,
            selected: 0,
        }
    }

    pub fn boxed(title: impl Into<String>, handle: QueryHandle<C>) -> Box<dyn Pane> {
        Box::new(Self::new(title, handle))
    }

    fn clamp(&self, index: usize) -> usize {
        index.min(self.len().saturating_sub(1))
    }

    fn render_rows(&self, f: &mut Frame<'_>, area: Rect, theme: &SynthBruteTheme, note: Option<&str>) {
        let Some(data) = self.handle.data() else {
            return;
        };
        let items = data.items();
        let selected = if items.is_empty() {
            None
        } else {
            Some(self.clamp(self.selected))
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut title = format!("{} ({})", self.title, items.len());
        if self.handle.is_fetching() {
            title.push_str(" refreshing");
        }
        if let Some(note) = note {
            title.push_str(&format!(" | refresh failed: {note}"));
        }

        let rows = items
            .iter()
            .map(|item| {
                let color = item
                    .status()
                    .map(|s| resource_status_color(s, theme))
                    .unwrap_or(theme.text);
                (item.cells(), Style::default().fg(color))
            })
            .collect();

        ResourceTable {
            title,
            headers: <C::Item as Resource>::HEADERS,
            rows,
            selected,
            header_style: Style::default().fg(theme.primary),
            highlight_style: Style::default()
                .bg(theme.bg_highlight)
                .add_modifier(Modifier::BOLD),
        }
        .render(f, chunks[0]);

        let fields = selected
            .and_then(|i| items.get(i))
            .map(|item| item.detail())
            .unwrap_or_default();
        DetailPanel {
            title: "Details",
            fields,
            label_style: Style::default().fg(theme.secondary),
            muted_style: Style::default().fg(theme.text_dim),
        }
        .render(f, chunks[1]);
    }
}

impl<C: Collection> Pane for ResourcePane<C> {
    fn title(&self) -> &str {
        &self.title
    }

    fn state(&self) -> PaneState {
        PaneState::resolve(
            self.handle.data().is_some(),
            self.handle.is_loading(),
            self.handle.error().map(|e| e.message().to_string()),
        )
    }

    fn len(&self) -> usize {
        self.handle.data().map(|d| d.items().len()).unwrap_or(0)
    }

    fn selected(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.clamp(self.selected))
        }
    }

    fn select_next(&mut self) {
        self.selected = self.clamp(self.selected.saturating_add(1));
    }

    fn select_previous(&mut self) {
        self.selected = self.clamp(self.selected).saturating_sub(1);
    }

    fn selected_id(&self) -> Option<String> {
        let index = self.selected()?;
        let data = self.handle.data()?;
        let id = data.items().get(index).map(|item| item.id());
        id
    }

    fn refetch(&self) {
        self.handle.refetch();
    }

    fn render(&self, f: &mut Frame<'_>, area: Rect, theme: &SynthBruteTheme) {
        match self.state() {
            PaneState::Data { refresh_error } => {
                self.render_rows(f, area, theme, refresh_error.as_deref())
            }
            PaneState::Error(message) => StatusIndicator {
                title: self.title.clone(),
                status: format!("{message}\n\n{RETRY_HINT}"),
                style: Style::default().fg(theme.error),
            }
            .render(f, area),
            PaneState::Loading => StatusIndicator {
                title: self.title.clone(),
                status: "Loading...".to_string(),
                style: Style::default().fg(theme.text_dim),
            }
            .render(f, area),
            PaneState::Idle => StatusIndicator {
                title: self.title.clone(),
                status: "Nothing to show".to_string(),
                style: Style::default().fg(theme.text_dim),
            }
            .render(f, area),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_without_data_shows_error_state() {
        assert_eq!(
            PaneState::resolve(false, false, Some("X not found".to_string())),
            PaneState::Error("X not found".to_string())
        );
    }

    #[test]
    fn test_failed_refetch_keeps_rows() {
        assert_eq!(
            PaneState::resolve(true, false, Some("boom".to_string())),
            PaneState::Data {
                refresh_error: Some("boom".to_string())
            }
        );
    }

    #[test]
    fn test_retry_after_error_shows_loading() {
        assert_eq!(
            PaneState::resolve(false, true, Some("X not found".to_string())),
            PaneState::Loading
        );
    }

    #[test]
    fn test_loading_and_idle() {
        assert_eq!(PaneState::resolve(false, true, None), PaneState::Loading);
        assert_eq!(PaneState::resolve(false, false, None), PaneState::Idle);
    }
}

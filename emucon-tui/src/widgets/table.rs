//! Resource table widget.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Row, Table, TableState},
    Frame,
};

pub struct ResourceTable<'a> {
    pub title: String,
    pub headers: &'a [&'a str],
    /// Cells of each row with the row's foreground style.
    pub rows: Vec<(Vec<String>, Style)>,
    pub selected: Option<usize>,
    pub header_style: Style,
    pub highlight_style: Style,
}

impl<'a> ResourceTable<'a> {
    pub fn render(self, f: &mut Frame<'_>, area: Rect) {
        let columns = self.headers.len().max(1);
        let widths: Vec<Constraint> = (0..columns)
            .map(|_| Constraint::Ratio(1, columns as u32))
            .collect();

        let header = Row::new(self.headers.iter().copied())
            .style(self.header_style.add_modifier(Modifier::BOLD));
        let rows = self
            .rows
            .into_iter()
            .map(|(cells, style)| Row::new(cells).style(style));

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .highlight_style(self.highlight_style)
            .highlight_symbol("> ");

        let mut state = TableState::default();
        state.select(self.selected);
        f.render_stateful_widget(table, area, &mut state);
    }
}

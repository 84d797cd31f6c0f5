//! Field/value panel beside a resource table.
//!
//! Labels are padded to a common width. Multi-line values (policy
//! documents, item JSON, secret strings) continue on indented lines.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'static str, String)>,
    pub label_style: Style,
    /// Used for "-" placeholders and the empty-selection hint.
    pub muted_style: Style,
}

impl DetailPanel<'_> {
    pub fn lines(&self) -> Vec<Line<'static>> {
        if self.fields.is_empty() {
            return vec![Line::styled("No row selected", self.muted_style)];
        }
        let width = self.fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let mut lines = Vec::new();
        for (label, value) in &self.fields {
            let value_style = if value == "-" {
                self.muted_style
            } else {
                Style::default()
            };
            let mut parts = value.lines();
            let first = parts.next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![
                Span::styled(format!("{label:<width$}  "), self.label_style),
                Span::styled(first, value_style),
            ]));
            for rest in parts {
                lines.push(Line::from(format!("{:width$}  {rest}", "")));
            }
        }
        lines
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let widget = Paragraph::new(self.lines())
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(fields: Vec<(&'static str, String)>) -> DetailPanel<'static> {
        DetailPanel {
            title: "Details",
            fields,
            label_style: Style::default(),
            muted_style: Style::default(),
        }
    }

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_multiline_value_continues_indented() {
        let lines = panel(vec![("Doc", "{\n  \"a\": 1\n}".to_string())]).lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[1]), "       \"a\": 1");
    }

    #[test]
    fn test_empty_selection_hint() {
        let lines = panel(Vec::new()).lines();
        assert_eq!(plain(&lines[0]), "No row selected");
    }
}

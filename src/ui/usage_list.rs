//! The usage list widget.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::models::{format_usage, UsageList, UsageRow};

use super::theme::{COLOR_ACCENT, COLOR_BORDER};

/// Title of the list block.
pub const LIST_TITLE: &str = " Usages ";

/// One list item per row, text `"<name>: <value>"`.
pub fn usage_items(list: &UsageList) -> Vec<ListItem<'static>> {
    list.rows().iter().map(usage_item).collect()
}

fn usage_item(row: &UsageRow) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(format!("{}: ", row.name), Style::default().fg(COLOR_ACCENT)),
        Span::raw(format_usage(row.value)),
    ]))
}

/// Render the list into `area`. An empty list renders an empty block.
pub fn render_usage_list(frame: &mut Frame, area: Rect, list: &UsageList) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(LIST_TITLE);

    frame.render_widget(List::new(usage_items(list)).block(block), area);
}

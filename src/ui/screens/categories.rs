use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, cat)| {
            let count = app
                .transactions
                .iter()
                .filter(|t| t.category == cat.name)
                .count();
            let budget = match app.budgets.limit(&cat.name) {
                Some(limit) => format!("budget {}", format_amount(limit)),
                None => "no budget".to_string(),
            };

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", truncate(&cat.name, 21)), style),
                Span::styled(format!("{count:>4} txns  "), theme::dim_style()),
                Span::styled(budget, theme::dim_style()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Categories ({}) ", app.categories.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

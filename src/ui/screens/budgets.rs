use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::report;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

/// Every category gets a row; one without a budget shows 0.00 as its limit
/// but is never flagged as over budget.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, cat)| {
            let spent = app
                .spent_by_category
                .iter()
                .find(|(name, _)| *name == cat.name)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);
            let limit = app.budgets.limit(&cat.name);
            let exceeded = report::over_budget(spent, limit);

            let ratio = match limit {
                Some(l) if l > Decimal::ZERO => {
                    (spent / l).to_f64().unwrap_or(0.0).min(1.0)
                }
                _ => 0.0,
            };
            let color = if exceeded {
                theme::RED
            } else if ratio > 0.7 {
                theme::YELLOW
            } else {
                theme::GREEN
            };

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let mut spans = vec![
                Span::styled(format!("{:<18}", truncate(&cat.name, 17)), style),
                Span::styled(
                    format!(
                        "{} / {} USD ",
                        format_amount(spent),
                        format_amount(limit.unwrap_or(Decimal::ZERO)),
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
            ];
            if exceeded {
                spans.push(Span::styled(
                    " OVER",
                    Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Budgets [{}] ", app.filter_label()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.transactions.is_empty() {
        let msg = if app.filter.is_active() {
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No transactions in this filter",
                    theme::dim_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "Use :filter all, :from or :to to widen it",
                    theme::dim_style(),
                )),
            ]
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("No transactions yet", theme::dim_style())),
                Line::from(""),
                Line::from(Span::styled(
                    "Add one with :add <description> <amount> [category]",
                    theme::dim_style(),
                )),
            ]
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Transactions (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "" };
            let amount_str = format!("{sign}{}", format_amount(txn.amount));

            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.to_string()),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 18)),
                Cell::from(Span::styled(amount_str, amount_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Transactions ({}) [{}] ",
                    app.transactions.len(),
                    app.filter_label()
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

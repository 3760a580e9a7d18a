use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Category chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.iter().filter(|t| t.is_expense()).count();

    let money = |amount: Decimal| format!("{} USD", format_amount(amount));

    render_card(
        f,
        cards[0],
        "Income",
        money(app.totals.income),
        theme::GREEN,
        Some(format!("{income_count} txns")),
    );
    render_card(
        f,
        cards[1],
        "Expenses",
        money(app.totals.expenses),
        theme::RED,
        Some(format!("{expense_count} txns")),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        money(app.totals.balance),
        if app.totals.balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
    render_card(
        f,
        cards[3],
        "Shown",
        app.transactions.len().to_string(),
        theme::ACCENT,
        Some(format!("of {} total", app.txn_total)),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Category Chart ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.category_series.iter().all(|(_, w)| w.is_zero()) {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions in this filter. Add one with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Every category gets a bar, zero-weight ones included, so the chart
    // always shows the full category set.
    let bars: Vec<Bar> = app
        .category_series
        .iter()
        .enumerate()
        .map(|(i, (name, weight))| {
            let color = theme::CHART_COLORS[i % theme::CHART_COLORS.len()];
            Bar::default()
                .value(weight.to_u64().unwrap_or(0))
                .label(Line::from(truncate(name, 12)))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1);

    f.render_widget(chart, area);
}

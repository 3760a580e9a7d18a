use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::report;
use crate::store::Store;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{
    format_amount, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up,
};

pub(crate) fn as_tui(store: &mut Store) -> Result<()> {
    let mut app = App::new();
    app.refresh(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Rows available for list content: tab, status, command bars
            // plus table borders and header.
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Categories),
        KeyCode::Char('4') => switch_screen(app, store, Screen::Budgets),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, store, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('D') if app.screen == Screen::Transactions => {
            commands::handle_command("delete-txn", app, store)?;
        }
        KeyCode::Char('D') if app.screen == Screen::Categories => {
            commands::handle_command("delete-category", app, store)?;
        }
        KeyCode::Char('e') if app.screen == Screen::Transactions => {
            // Prefill the edit command with the selected transaction.
            if let Some(txn) = app.selected_transaction() {
                let prefill = format!("edit {} {} {}", txn.description, txn.amount, txn.category);
                app.command_input = prefill;
                app.input_mode = InputMode::Command;
            }
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &mut Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut Store) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                match action {
                    PendingAction::DeleteTransaction { id, description } => {
                        store.delete_transaction(id);
                        app.refresh(store);
                        app.set_status(format!("Deleted: {description}"));
                    }
                    PendingAction::DeleteCategory { name } => {
                        match store.delete_category(&name) {
                            Ok(()) => {
                                // An active filter on the deleted category
                                // falls back to All.
                                if app.filter.category.as_deref() == Some(name.as_str()) {
                                    app.set_category_filter(None);
                                }
                                app.refresh(store);
                                app.set_status(format!("Deleted category: {name}"));
                            }
                            Err(e) => app.set_status(e.to_string()),
                        }
                    }
                    PendingAction::ClearTransactions => {
                        store.clear_transactions();
                        app.refresh(store);
                        app.set_status("All transactions deleted");
                    }
                }
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &mut Store, screen: Screen) {
    app.screen = screen;
    app.refresh(store);
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_down(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Categories => scroll_down(
            &mut app.category_index,
            &mut app.category_scroll,
            app.categories.len(),
            page,
        ),
        Screen::Budgets => scroll_down(
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.categories.len(),
            page,
        ),
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_up(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Categories => scroll_up(&mut app.category_index, &mut app.category_scroll),
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll),
        Screen::Categories => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
        Screen::Budgets => scroll_to_top(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => scroll_to_bottom(
            &mut app.transaction_index,
            &mut app.transaction_scroll,
            app.transactions.len(),
            page,
        ),
        Screen::Categories => scroll_to_bottom(
            &mut app.category_index,
            &mut app.category_scroll,
            app.categories.len(),
            page,
        ),
        Screen::Budgets => scroll_to_bottom(
            &mut app.budget_index,
            &mut app.budget_scroll,
            app.categories.len(),
            page,
        ),
        Screen::Dashboard => {}
    }
}

// ── CLI mode ─────────────────────────────────────────────────

pub(crate) fn as_cli(args: &[String], store: &mut Store) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(store),
        "add" => cli_add(&args[2..], store),
        "list" | "ls" => cli_list(store),
        "categories" => cli_categories(store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budgetwow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("BudgetWOW — single-user personal budget tracker");
    println!();
    println!("Usage: budgetwow [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  add <desc> <amount> [category]  Record a transaction (negative = expense)");
    println!("  list                            Print all transactions, newest first");
    println!("  summary                         Print totals and per-category spending");
    println!("  categories                      List categories and budgets");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
}

fn cli_add(args: &[String], store: &mut Store) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: budgetwow add <desc> <amount> [category]");
    }

    let description = &args[0];
    let amount = args[1]
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", args[1]))?;
    let category = if args.len() > 2 {
        args[2..].join(" ")
    } else {
        store
            .categories()
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default()
    };

    let id = store.add_transaction(description, amount, &category)?;
    let txn = store
        .transaction(id)
        .ok_or_else(|| anyhow::anyhow!("Transaction vanished after insert"))?;
    println!(
        "Added {}: {} {} USD ({})",
        txn.date,
        txn.description,
        format_amount(txn.amount),
        txn.category
    );
    Ok(())
}

fn cli_list(store: &mut Store) -> Result<()> {
    if store.transactions().is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!("{:<12} {:<32} {:<18} {:>12}", "Date", "Description", "Category", "Amount");
    println!("{}", "─".repeat(78));
    for txn in store.transactions() {
        println!(
            "{:<12} {:<32} {:<18} {:>12}",
            txn.date.to_string(),
            txn.description,
            txn.category,
            format_amount(txn.amount),
        );
    }
    Ok(())
}

fn cli_summary(store: &mut Store) -> Result<()> {
    let totals = report::totals(store.transactions());
    let spent = report::spent_per_category(store.categories(), store.transactions());

    println!("BudgetWOW — all time");
    println!("{}", "─".repeat(40));
    println!("  Income:       {} USD", format_amount(totals.income));
    println!("  Expenses:     {} USD", format_amount(totals.expenses));
    println!("  Balance:      {} USD", format_amount(totals.balance));
    println!("  Transactions: {}", store.transactions().len());

    if !store.transactions().is_empty() {
        println!();
        println!("Spent by category:");
        for (name, amount) in &spent {
            let budget = store.budgets().limit(name);
            let flag = if report::over_budget(*amount, budget) {
                "  OVER"
            } else {
                ""
            };
            println!(
                "  {name:<24} {} / {} USD{flag}",
                format_amount(*amount),
                format_amount(budget.unwrap_or_default()),
            );
        }
    }
    Ok(())
}

fn cli_categories(store: &mut Store) -> Result<()> {
    println!("{:<24} Budget", "Name");
    println!("{}", "─".repeat(40));
    for cat in store.categories() {
        let budget = store
            .budgets()
            .limit(&cat.name)
            .map(format_amount)
            .unwrap_or_else(|| "—".into());
        println!("{:<24} {budget}", cat.name);
    }
    Ok(())
}

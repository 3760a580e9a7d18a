use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add Lunch -15.50 Food)",
        cmd_add,
        r
    );
    register_command!("a", "Add transaction (e.g. :a Lunch -15.50 Food)", cmd_add, r);
    register_command!(
        "edit",
        "Edit selected transaction (e.g. :edit Lunch -18.50 Food)",
        cmd_edit,
        r
    );
    register_command!(
        "delete-txn",
        "Delete selected transaction",
        cmd_delete_txn,
        r
    );
    register_command!("clear", "Delete all transactions", cmd_clear, r);
    register_command!(
        "category",
        "Create category (e.g. :category Rent)",
        cmd_category,
        r
    );
    register_command!(
        "rename-category",
        "Rename selected category (e.g. :rename-category Dining)",
        cmd_rename_category,
        r
    );
    register_command!(
        "delete-category",
        "Delete selected category and its transactions",
        cmd_delete_category,
        r
    );
    register_command!(
        "budget",
        "Set budget (e.g. :budget Food 500)",
        cmd_budget,
        r
    );
    register_command!(
        "filter",
        "Filter by category (e.g. :filter Food, :filter all)",
        cmd_filter,
        r
    );
    register_command!("f", "Filter by category", cmd_filter, r);
    register_command!(
        "from",
        "Start date bound (e.g. :from 2024-02-01, no arg clears)",
        cmd_from,
        r
    );
    register_command!(
        "to",
        "End date bound (e.g. :to 2024-02-28, no arg clears)",
        cmd_to,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Splits `<description> <amount> [category]` around the rightmost token
/// that parses as a number, so both the description and the category may
/// contain spaces.
fn split_on_amount(args: &str) -> Option<(String, Decimal, Option<String>)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let idx = tokens
        .iter()
        .rposition(|t| Decimal::from_str(t).is_ok())?;
    if idx == 0 {
        return None; // no description before the amount
    }
    let amount = Decimal::from_str(tokens[idx]).ok()?;
    let description = tokens[..idx].join(" ");
    let category = if idx + 1 < tokens.len() {
        Some(tokens[idx + 1..].join(" "))
    } else {
        None
    };
    Some((description, amount, category))
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(store);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(store);
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh(store);
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh(store);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    let Some((description, amount, category)) = split_on_amount(args) else {
        app.set_status("Usage: :add <description> <amount> [category]");
        return Ok(());
    };
    // The category defaults to the first one, like the entry form's
    // preselected dropdown.
    let category = category
        .or_else(|| store.categories().first().map(|c| c.name.clone()))
        .unwrap_or_default();

    match store.add_transaction(&description, amount, &category) {
        Ok(_) => {
            app.refresh(store);
            app.set_status(format!("Added: {description} ({category})"));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }
    let Some(txn) = app.selected_transaction() else {
        return Ok(());
    };
    let id = txn.id;

    let Some((description, amount, category)) = split_on_amount(args) else {
        app.set_status("Usage: :edit <description> <amount> [category]");
        return Ok(());
    };
    let category = category.unwrap_or_else(|| {
        app.selected_transaction()
            .map(|t| t.category.clone())
            .unwrap_or_default()
    });

    match store.update_transaction(id, &description, amount, &category, None) {
        Ok(()) => {
            app.refresh(store);
            app.set_status(format!("Updated: {description}"));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_delete_txn(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if app.screen != Screen::Transactions || app.transactions.is_empty() {
        app.set_status("Navigate to Transactions and select one first");
        return Ok(());
    }

    if let Some(txn) = app.selected_transaction() {
        let (id, description) = (txn.id, txn.description.clone());
        app.confirm_message = format!("Delete '{description}'?");
        app.pending_action = Some(PendingAction::DeleteTransaction { id, description });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if app.txn_total == 0 {
        app.set_status("No transactions to delete");
        return Ok(());
    }
    app.confirm_message = format!("Delete all {} transactions?", app.txn_total);
    app.pending_action = Some(PendingAction::ClearTransactions);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name>");
        return Ok(());
    }

    match store.add_category(args) {
        Ok(()) => {
            app.refresh(store);
            app.set_status(format!("Created category: {}", args.trim()));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_rename_category(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if app.screen != Screen::Categories || app.categories.is_empty() {
        app.set_status("Navigate to Categories and select one first");
        return Ok(());
    }
    if args.is_empty() {
        app.set_status("Usage: :rename-category <new name>");
        return Ok(());
    }
    let Some(old) = app.selected_category().map(|c| c.name.clone()) else {
        return Ok(());
    };

    match store.rename_category(&old, args) {
        Ok(()) => {
            // Keep an active filter pointed at the renamed category.
            if app.filter.category.as_deref() == Some(old.as_str()) {
                app.set_category_filter(Some(args.trim().to_string()));
            }
            app.refresh(store);
            app.set_status(format!("Renamed '{old}' to '{}'", args.trim()));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_delete_category(_args: &str, app: &mut App, _store: &mut Store) -> anyhow::Result<()> {
    if app.screen != Screen::Categories || app.categories.is_empty() {
        app.set_status("Navigate to Categories and select one first");
        return Ok(());
    }

    if let Some(cat) = app.selected_category() {
        let name = cat.name.clone();
        let affected = app
            .transactions
            .iter()
            .filter(|t| t.category == name)
            .count();
        app.confirm_message = format!("Delete category '{name}' and its {affected} transactions?");
        app.pending_action = Some(PendingAction::DeleteCategory { name });
        app.input_mode = InputMode::Confirm;
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :budget <category> <amount>. Example: :budget Food 500");
        return Ok(());
    }

    // Last token is the amount, everything before is the category name.
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    }
    let (amount_str, category) = (parts[0], parts[1]);

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    match store.set_budget(category, amount) {
        Ok(()) => {
            app.screen = Screen::Budgets;
            app.refresh(store);
            app.set_status(format!("Budget set: {category} = {amount:.2}"));
        }
        Err(e) => app.set_status(e.to_string()),
    }
    Ok(())
}

fn cmd_filter(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    if args.is_empty() || args.eq_ignore_ascii_case("all") {
        app.set_category_filter(None);
        app.screen = Screen::Transactions;
        app.refresh(store);
        app.set_status("Category filter cleared - showing all categories");
        return Ok(());
    }

    if store.categories().iter().any(|c| c.name == args) {
        app.set_category_filter(Some(args.to_string()));
        app.screen = Screen::Transactions;
        app.refresh(store);
        app.set_status(format!("Filtering by category: {args}"));
    } else {
        let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
        app.set_status(format!("Category not found. Available: {}", names.join(", ")));
    }
    Ok(())
}

fn cmd_from(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    set_date_bound(args, app, store, true)
}

fn cmd_to(args: &str, app: &mut App, store: &mut Store) -> anyhow::Result<()> {
    set_date_bound(args, app, store, false)
}

fn set_date_bound(args: &str, app: &mut App, store: &mut Store, is_start: bool) -> anyhow::Result<()> {
    let label = if is_start { "Start" } else { "End" };

    if args.is_empty() {
        if is_start {
            app.set_date_filter(None, app.filter.end);
        } else {
            app.set_date_filter(app.filter.start, None);
        }
        app.refresh(store);
        app.set_status(format!("{label} date cleared"));
        return Ok(());
    }

    match NaiveDate::parse_from_str(args, "%Y-%m-%d") {
        Ok(date) => {
            if is_start {
                app.set_date_filter(Some(date), app.filter.end);
            } else {
                app.set_date_filter(app.filter.start, Some(date));
            }
            app.refresh(store);
            app.set_status(format!("{label} date: {date}"));
        }
        Err(_) => app.set_status("Invalid date. Use YYYY-MM-DD (e.g. 2024-02-01)"),
    }
    Ok(())
}

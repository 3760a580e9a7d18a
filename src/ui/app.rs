use chrono::NaiveDate;

use crate::models::{Budgets, Category, Transaction};
use crate::report::{self, Totals, TxnFilter};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Categories,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Categories,
            Self::Budgets,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Categories => write!(f, "Categories"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Destructive action parked behind the y/N confirmation bar.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, description: String },
    DeleteCategory { name: String },
    ClearTransactions,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // Active filter; the derived state below always reflects it.
    pub(crate) filter: TxnFilter,

    // Derived state, recomputed from the store on every change.
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) txn_total: usize,
    pub(crate) categories: Vec<Category>,
    pub(crate) budgets: Budgets,
    pub(crate) totals: Totals,
    pub(crate) category_series: Vec<(String, rust_decimal::Decimal)>,
    pub(crate) spent_by_category: Vec<(String, rust_decimal::Decimal)>,

    // Cursors
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            filter: TxnFilter::default(),

            transactions: Vec::new(),
            txn_total: 0,
            categories: Vec::new(),
            budgets: Budgets::default(),
            totals: Totals::default(),
            category_series: Vec::new(),
            spent_by_category: Vec::new(),

            transaction_index: 0,
            transaction_scroll: 0,
            category_index: 0,
            category_scroll: 0,
            budget_index: 0,
            budget_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Recomputes every derived view from the store snapshot. Called after
    /// each mutation and each filter change; there is no incremental path.
    pub(crate) fn refresh(&mut self, store: &Store) {
        self.transactions = report::filter(store.transactions(), &self.filter);
        self.txn_total = store.transactions().len();
        self.categories = store.categories().to_vec();
        self.budgets = store.budgets().clone();
        self.totals = report::totals(&self.transactions);
        self.category_series = report::category_series(&self.categories, &self.transactions);
        self.spent_by_category = report::spent_per_category(&self.categories, &self.transactions);

        self.transaction_index = clamp_cursor(self.transaction_index, self.transactions.len());
        self.category_index = clamp_cursor(self.category_index, self.categories.len());
        self.budget_index = clamp_cursor(self.budget_index, self.categories.len());
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_category(&self) -> Option<&Category> {
        self.categories.get(self.category_index)
    }

    /// Sets the category filter; `None` is the "All" wildcard.
    pub(crate) fn set_category_filter(&mut self, category: Option<String>) {
        self.filter.category = category;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    pub(crate) fn set_date_filter(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.filter.start = start;
        self.filter.end = end;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    /// Human-readable summary of the active filter for the status bar and
    /// screen titles.
    pub(crate) fn filter_label(&self) -> String {
        let mut label = self.filter.category.clone().unwrap_or_else(|| "All".into());
        match (self.filter.start, self.filter.end) {
            (Some(s), Some(e)) => label.push_str(&format!(" {s}..{e}")),
            (Some(s), None) => label.push_str(&format!(" from {s}")),
            (None, Some(e)) => label.push_str(&format!(" to {e}")),
            (None, None) => {}
        }
        label
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

fn clamp_cursor(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

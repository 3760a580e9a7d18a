//! Pure aggregate and filter computations over the current transaction
//! collection. Nothing here caches: callers recompute after every store
//! change, which at this scale is cheaper than being clever.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Category, Transaction};

/// Category/date-range predicate. `category: None` is the "All" wildcard;
/// each date bound is independently optional and inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TxnFilter {
    pub(crate) category: Option<String>,
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
}

impl TxnFilter {
    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        let match_cat = self
            .category
            .as_ref()
            .is_none_or(|cat| txn.category == *cat);
        let match_start = self.start.is_none_or(|start| txn.date >= start);
        let match_end = self.end.is_none_or(|end| txn.date <= end);
        match_cat && match_start && match_end
    }

    pub(crate) fn is_active(&self) -> bool {
        self.category.is_some() || self.start.is_some() || self.end.is_some()
    }
}

/// Filtered view of the collection, preserving its newest-first order.
pub(crate) fn filter(transactions: &[Transaction], f: &TxnFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| f.matches(t))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Totals {
    pub(crate) income: Decimal,
    /// Sum of negative amounts; stays negative.
    pub(crate) expenses: Decimal,
    pub(crate) balance: Decimal,
}

pub(crate) fn totals(transactions: &[Transaction]) -> Totals {
    let income: Decimal = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expenses: Decimal = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    Totals {
        income,
        expenses,
        balance: income + expenses,
    }
}

/// Chart weights: per category, the sum of absolute amounts in both
/// directions. Every category is emitted, weight 0 included, so the chart
/// always shows the full category set.
pub(crate) fn category_series(
    categories: &[Category],
    transactions: &[Transaction],
) -> Vec<(String, Decimal)> {
    categories
        .iter()
        .map(|cat| {
            let weight = transactions
                .iter()
                .filter(|t| t.category == cat.name)
                .map(Transaction::abs_amount)
                .sum();
            (cat.name.clone(), weight)
        })
        .collect()
}

/// Per category, the sum of absolute values of expenses only. Unlike
/// `category_series` this ignores income, so it is the number budgets are
/// compared against.
pub(crate) fn spent_per_category(
    categories: &[Category],
    transactions: &[Transaction],
) -> Vec<(String, Decimal)> {
    categories
        .iter()
        .map(|cat| {
            let spent = transactions
                .iter()
                .filter(|t| t.category == cat.name && t.is_expense())
                .map(Transaction::abs_amount)
                .sum();
            (cat.name.clone(), spent)
        })
        .collect()
}

/// An absent limit is never exceeded; a limit of zero is exceeded by any
/// spending at all.
pub(crate) fn over_budget(spent: Decimal, limit: Option<Decimal>) -> bool {
    limit.is_some_and(|l| spent > l)
}

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Budgets, Category, Transaction};
use crate::persist;

/// Validation failures. Every operation either fully applies or returns one
/// of these before touching any state; nothing is retried or queued.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum StoreError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Amount cannot be zero")]
    ZeroAmount,
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),
    #[error("Category '{0}' not found")]
    UnknownCategory(String),
    #[error("No transaction with id {0}")]
    UnknownTransaction(i64),
    #[error("Budget must be a non-negative amount")]
    InvalidBudget,
}

/// The authoritative in-memory state: transactions newest first, the
/// category list, and per-category budgets. Mutation methods are the only
/// write surface; after each successful mutation the whole snapshot is
/// written back to disk, fire-and-forget.
pub(crate) struct Store {
    path: Option<PathBuf>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    budgets: Budgets,
    last_id: i64,
}

impl Store {
    /// Hydrates the store from the snapshot at `path`, seeding the default
    /// categories when the snapshot carries none (fresh start, or a legacy
    /// transactions-only file).
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let snapshot = persist::load(path);
        Ok(Self::from_snapshot(snapshot, Some(path.to_path_buf())))
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Self {
        Self::from_snapshot(persist::Snapshot::default(), None)
    }

    fn from_snapshot(snapshot: persist::Snapshot, path: Option<PathBuf>) -> Self {
        let categories = if snapshot.categories.is_empty() {
            Category::defaults()
        } else {
            snapshot.categories
        };
        let last_id = snapshot.transactions.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            path,
            transactions: snapshot.transactions,
            categories,
            budgets: snapshot.budgets,
            last_id,
        }
    }

    // ── Read surface ──────────────────────────────────────────

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub(crate) fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    pub(crate) fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    // ── Transactions ──────────────────────────────────────────

    /// Validates and prepends a new transaction dated today. Returns its id.
    pub(crate) fn add_transaction(
        &mut self,
        description: &str,
        amount: Decimal,
        category: &str,
    ) -> Result<i64, StoreError> {
        let description = Self::valid_description(description)?;
        Self::valid_amount(amount)?;
        self.known_category(category)?;

        let id = self.next_id();
        self.transactions.insert(
            0,
            Transaction {
                id,
                description,
                amount,
                category: category.to_string(),
                date: Local::now().date_naive(),
            },
        );
        self.save();
        Ok(id)
    }

    /// Replaces the mutable fields of the matching transaction. The id is
    /// immutable and the date is preserved unless a new one is given.
    pub(crate) fn update_transaction(
        &mut self,
        id: i64,
        description: &str,
        amount: Decimal,
        category: &str,
        date: Option<NaiveDate>,
    ) -> Result<(), StoreError> {
        let description = Self::valid_description(description)?;
        Self::valid_amount(amount)?;
        self.known_category(category)?;

        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::UnknownTransaction(id))?;
        txn.description = description;
        txn.amount = amount;
        txn.category = category.to_string();
        if let Some(date) = date {
            txn.date = date;
        }
        self.save();
        Ok(())
    }

    /// Removes the matching transaction. A miss is a no-op returning false.
    pub(crate) fn delete_transaction(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.save();
        }
        removed
    }

    pub(crate) fn clear_transactions(&mut self) {
        self.transactions.clear();
        self.save();
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn add_category(&mut self, name: &str) -> Result<(), StoreError> {
        let name = Self::valid_category_name(name)?;
        if Category::find_by_name(&self.categories, &name).is_some() {
            return Err(StoreError::DuplicateCategory(name));
        }
        self.categories.push(Category::new(name));
        self.save();
        Ok(())
    }

    /// Renames a category, carrying every transaction under the old name
    /// and its budget entry over to the new one.
    pub(crate) fn rename_category(&mut self, old: &str, new: &str) -> Result<(), StoreError> {
        let new = Self::valid_category_name(new)?;
        if new != old && Category::find_by_name(&self.categories, &new).is_some() {
            return Err(StoreError::DuplicateCategory(new));
        }
        let cat = self
            .categories
            .iter_mut()
            .find(|c| c.name == old)
            .ok_or_else(|| StoreError::UnknownCategory(old.to_string()))?;
        cat.name = new.clone();

        for txn in self.transactions.iter_mut().filter(|t| t.category == old) {
            txn.category = new.clone();
        }
        self.budgets.rename(old, &new);
        self.save();
        Ok(())
    }

    /// Deletes a category and cascades: every transaction referencing it
    /// and its budget entry go with it.
    pub(crate) fn delete_category(&mut self, name: &str) -> Result<(), StoreError> {
        if Category::find_by_name(&self.categories, name).is_none() {
            return Err(StoreError::UnknownCategory(name.to_string()));
        }
        self.categories.retain(|c| c.name != name);
        self.transactions.retain(|t| t.category != name);
        self.budgets.remove(name);
        self.save();
        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    pub(crate) fn set_budget(&mut self, category: &str, limit: Decimal) -> Result<(), StoreError> {
        if limit < Decimal::ZERO {
            return Err(StoreError::InvalidBudget);
        }
        self.known_category(category)?;
        self.budgets.set(category, limit);
        self.save();
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────

    /// Ids are creation timestamps in milliseconds, bumped past the last
    /// issued id so two creations in the same millisecond stay distinct
    /// and ordering stays monotonic.
    fn next_id(&mut self) -> i64 {
        self.last_id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id
    }

    fn valid_description(description: &str) -> Result<String, StoreError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyDescription);
        }
        Ok(trimmed.to_string())
    }

    fn valid_amount(amount: Decimal) -> Result<(), StoreError> {
        if amount.is_zero() {
            return Err(StoreError::ZeroAmount);
        }
        Ok(())
    }

    fn valid_category_name(name: &str) -> Result<String, StoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyCategoryName);
        }
        Ok(trimmed.to_string())
    }

    fn known_category(&self, name: &str) -> Result<(), StoreError> {
        if Category::find_by_name(&self.categories, name).is_none() {
            return Err(StoreError::UnknownCategory(name.to_string()));
        }
        Ok(())
    }

    /// Fire-and-forget snapshot write. Callers never observe the outcome;
    /// a failed write is logged and the in-memory state stays the truth.
    fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let snapshot = persist::Snapshot {
            transactions: self.transactions.clone(),
            categories: self.categories.clone(),
            budgets: self.budgets.clone(),
        };
        if let Err(e) = persist::save(path, &snapshot) {
            tracing::warn!(error = %e, "snapshot write failed");
        }
    }
}

#[cfg(test)]
mod tests;

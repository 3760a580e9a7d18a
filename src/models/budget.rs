use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-category spending limits, keyed by category name. A missing entry
/// means "no budget set", which is distinct from a limit of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budgets(BTreeMap<String, Decimal>);

impl Budgets {
    pub fn limit(&self, category: &str) -> Option<Decimal> {
        self.0.get(category).copied()
    }

    pub fn set(&mut self, category: impl Into<String>, limit: Decimal) {
        self.0.insert(category.into(), limit);
    }

    pub fn remove(&mut self, category: &str) -> Option<Decimal> {
        self.0.remove(category)
    }

    /// Moves the limit under `old` (if any) to the `new` key.
    pub fn rename(&mut self, old: &str, new: &str) {
        if let Some(limit) = self.0.remove(old) {
            self.0.insert(new.to_string(), limit);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

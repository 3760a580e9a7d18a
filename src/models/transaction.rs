use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single signed monetary record. Positive amounts are income,
/// negative amounts are expenses; the sign is the only direction flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Serialized as `desc`, the field name the snapshot format has
    /// always used.
    #[serde(rename = "desc")]
    pub description: String,
    pub amount: Decimal,
    /// Category *name*, not an id. Categories are their own identifiers.
    pub category: String,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }
}

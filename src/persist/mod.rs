//! One-way sync of the in-memory state to a single JSON snapshot file.
//! Hydration happens once at startup; every store mutation overwrites the
//! whole file. A snapshot that cannot be read or parsed is logged and
//! replaced with an empty one, never treated as fatal.

use anyhow::{Context, Result};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Budgets, Category, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub(crate) transactions: Vec<Transaction>,
    #[serde(default)]
    pub(crate) categories: Vec<Category>,
    #[serde(default)]
    pub(crate) budgets: Budgets,
}

/// Reads the snapshot at `path`. A missing file yields an empty snapshot;
/// so does unparsable content, after a WARN. The historical format was a
/// bare JSON array of transactions; that shape still loads, with categories
/// and budgets left empty for the caller to seed.
pub(crate) fn load(path: &Path) -> Snapshot {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Snapshot::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read snapshot, starting empty");
            return Snapshot::default();
        }
    };

    if let Ok(snapshot) = serde_json::from_str::<Snapshot>(&raw) {
        return snapshot;
    }
    // Legacy shape: a flat array of transactions.
    if let Ok(transactions) = serde_json::from_str::<Vec<Transaction>>(&raw) {
        return Snapshot {
            transactions,
            ..Default::default()
        };
    }

    tracing::warn!(path = %path.display(), "snapshot is not valid JSON, starting empty");
    Snapshot::default()
}

/// Full-snapshot overwrite of the file at `path`.
pub(crate) fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("Failed to serialize snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    Ok(())
}

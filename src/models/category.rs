use serde::{Deserialize, Serialize};

/// A user-defined label partitioning transactions. The name is the
/// identifier; matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The five categories seeded into a fresh store.
    pub fn defaults() -> Vec<Category> {
        ["Salary", "Food", "Transport", "Entertainment", "Others"]
            .into_iter()
            .map(Category::new)
            .collect()
    }

    pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.name == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

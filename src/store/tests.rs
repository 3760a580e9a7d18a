#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Defaults ──────────────────────────────────────────────────

#[test]
fn test_default_categories_seeded() {
    let store = Store::open_in_memory();
    let names: Vec<&str> = store.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Salary", "Food", "Transport", "Entertainment", "Others"]
    );
    assert!(store.transactions().is_empty());
    assert!(store.budgets().is_empty());
}

// ── add_transaction ───────────────────────────────────────────

#[test]
fn test_add_transaction() {
    let mut store = Store::open_in_memory();
    let id = store.add_transaction("Paycheck", dec!(1000), "Salary").unwrap();

    assert_eq!(store.transactions().len(), 1);
    let txn = store.transaction(id).unwrap();
    assert_eq!(txn.description, "Paycheck");
    assert_eq!(txn.amount, dec!(1000));
    assert_eq!(txn.category, "Salary");
    assert_eq!(txn.date, chrono::Local::now().date_naive());
}

#[test]
fn test_add_assigns_unique_increasing_ids() {
    let mut store = Store::open_in_memory();
    let mut ids = Vec::new();
    for i in 0..10 {
        let len_before = store.transactions().len();
        let id = store
            .add_transaction(&format!("Txn {i}"), dec!(-1), "Food")
            .unwrap();
        assert_eq!(store.transactions().len(), len_before + 1);
        ids.push(id);
    }
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 10);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_newest_first_order() {
    let mut store = Store::open_in_memory();
    store.add_transaction("First", dec!(1), "Salary").unwrap();
    store.add_transaction("Second", dec!(2), "Salary").unwrap();
    assert_eq!(store.transactions()[0].description, "Second");
    assert_eq!(store.transactions()[1].description, "First");
}

#[test]
fn test_add_trims_description() {
    let mut store = Store::open_in_memory();
    let id = store.add_transaction("  Coffee  ", dec!(-4.5), "Food").unwrap();
    assert_eq!(store.transaction(id).unwrap().description, "Coffee");
}

#[test]
fn test_add_rejects_blank_description() {
    let mut store = Store::open_in_memory();
    let err = store.add_transaction("   ", dec!(10), "Food").unwrap_err();
    assert_eq!(err, StoreError::EmptyDescription);
    assert!(store.transactions().is_empty());
}

#[test]
fn test_add_rejects_zero_amount() {
    let mut store = Store::open_in_memory();
    let err = store
        .add_transaction("Nothing", Decimal::ZERO, "Food")
        .unwrap_err();
    assert_eq!(err, StoreError::ZeroAmount);
}

#[test]
fn test_add_rejects_unknown_category() {
    let mut store = Store::open_in_memory();
    let err = store.add_transaction("Rent", dec!(-900), "Housing").unwrap_err();
    assert_eq!(err, StoreError::UnknownCategory("Housing".into()));
    assert!(store.transactions().is_empty());
}

// ── update_transaction ────────────────────────────────────────

#[test]
fn test_update_replaces_fields_keeps_id_and_date() {
    let mut store = Store::open_in_memory();
    let id = store.add_transaction("Lunch", dec!(-12), "Food").unwrap();
    let original_date = store.transaction(id).unwrap().date;

    store
        .update_transaction(id, "Team lunch", dec!(-18.50), "Others", None)
        .unwrap();

    assert_eq!(store.transactions().len(), 1);
    let txn = store.transaction(id).unwrap();
    assert_eq!(txn.id, id);
    assert_eq!(txn.description, "Team lunch");
    assert_eq!(txn.amount, dec!(-18.50));
    assert_eq!(txn.category, "Others");
    assert_eq!(txn.date, original_date);
}

#[test]
fn test_update_can_override_date() {
    let mut store = Store::open_in_memory();
    let id = store.add_transaction("Lunch", dec!(-12), "Food").unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
    store
        .update_transaction(id, "Lunch", dec!(-12), "Food", Some(date))
        .unwrap();
    assert_eq!(store.transaction(id).unwrap().date, date);
}

#[test]
fn test_update_unknown_id() {
    let mut store = Store::open_in_memory();
    let err = store
        .update_transaction(42, "Ghost", dec!(1), "Food", None)
        .unwrap_err();
    assert_eq!(err, StoreError::UnknownTransaction(42));
}

#[test]
fn test_update_validates_before_mutating() {
    let mut store = Store::open_in_memory();
    let id = store.add_transaction("Lunch", dec!(-12), "Food").unwrap();
    let err = store
        .update_transaction(id, "Lunch", dec!(-12), "Nope", None)
        .unwrap_err();
    assert_eq!(err, StoreError::UnknownCategory("Nope".into()));
    // Rejected update leaves the record untouched.
    assert_eq!(store.transaction(id).unwrap().category, "Food");
}

// ── delete / clear ────────────────────────────────────────────

#[test]
fn test_delete_transaction() {
    let mut store = Store::open_in_memory();
    let id = store.add_transaction("Lunch", dec!(-12), "Food").unwrap();
    assert!(store.delete_transaction(id));
    assert!(store.transaction(id).is_none());
    assert!(store.transactions().is_empty());
}

#[test]
fn test_delete_missing_id_is_noop() {
    let mut store = Store::open_in_memory();
    store.add_transaction("Lunch", dec!(-12), "Food").unwrap();
    assert!(!store.delete_transaction(99));
    assert_eq!(store.transactions().len(), 1);
}

#[test]
fn test_clear_transactions() {
    let mut store = Store::open_in_memory();
    store.add_transaction("A", dec!(1), "Salary").unwrap();
    store.add_transaction("B", dec!(-2), "Food").unwrap();
    store.clear_transactions();
    assert!(store.transactions().is_empty());
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_add_category() {
    let mut store = Store::open_in_memory();
    store.add_category("Rent").unwrap();
    assert!(Category::find_by_name(store.categories(), "Rent").is_some());
}

#[test]
fn test_add_category_trims() {
    let mut store = Store::open_in_memory();
    store.add_category("  Rent  ").unwrap();
    assert!(Category::find_by_name(store.categories(), "Rent").is_some());
}

#[test]
fn test_add_duplicate_category() {
    let mut store = Store::open_in_memory();
    let err = store.add_category("Food").unwrap_err();
    assert_eq!(err, StoreError::DuplicateCategory("Food".into()));
    // Trimming happens before the collision check.
    let err = store.add_category(" Food ").unwrap_err();
    assert_eq!(err, StoreError::DuplicateCategory("Food".into()));
}

#[test]
fn test_add_blank_category() {
    let mut store = Store::open_in_memory();
    let err = store.add_category("   ").unwrap_err();
    assert_eq!(err, StoreError::EmptyCategoryName);
}

#[test]
fn test_rename_category_cascades() {
    let mut store = Store::open_in_memory();
    let a = store.add_transaction("Groceries", dec!(-40), "Food").unwrap();
    let b = store.add_transaction("Bus", dec!(-2.5), "Transport").unwrap();
    store.set_budget("Food", dec!(100)).unwrap();

    store.rename_category("Food", "Groceries & Food").unwrap();

    assert!(Category::find_by_name(store.categories(), "Food").is_none());
    assert_eq!(store.transaction(a).unwrap().category, "Groceries & Food");
    assert_eq!(store.transaction(b).unwrap().category, "Transport");
    assert_eq!(store.budgets().limit("Food"), None);
    assert_eq!(store.budgets().limit("Groceries & Food"), Some(dec!(100)));
}

#[test]
fn test_rename_to_existing_name() {
    let mut store = Store::open_in_memory();
    let err = store.rename_category("Food", "Transport").unwrap_err();
    assert_eq!(err, StoreError::DuplicateCategory("Transport".into()));
}

#[test]
fn test_rename_to_same_name_is_allowed() {
    let mut store = Store::open_in_memory();
    store.rename_category("Food", "Food").unwrap();
    assert!(Category::find_by_name(store.categories(), "Food").is_some());
}

#[test]
fn test_rename_unknown_category() {
    let mut store = Store::open_in_memory();
    let err = store.rename_category("Housing", "Rent").unwrap_err();
    assert_eq!(err, StoreError::UnknownCategory("Housing".into()));
}

#[test]
fn test_delete_category_cascades() {
    let mut store = Store::open_in_memory();
    store.add_transaction("Groceries", dec!(-40), "Food").unwrap();
    store.add_transaction("Dinner", dec!(-70), "Food").unwrap();
    let kept = store.add_transaction("Paycheck", dec!(1000), "Salary").unwrap();
    store.set_budget("Food", dec!(100)).unwrap();

    store.delete_category("Food").unwrap();

    assert!(Category::find_by_name(store.categories(), "Food").is_none());
    assert!(store.transactions().iter().all(|t| t.category != "Food"));
    assert_eq!(store.transactions().len(), 1);
    assert!(store.transaction(kept).is_some());
    assert_eq!(store.budgets().limit("Food"), None);
}

#[test]
fn test_delete_unknown_category() {
    let mut store = Store::open_in_memory();
    let err = store.delete_category("Housing").unwrap_err();
    assert_eq!(err, StoreError::UnknownCategory("Housing".into()));
}

// ── Budgets ───────────────────────────────────────────────────

#[test]
fn test_set_budget() {
    let mut store = Store::open_in_memory();
    store.set_budget("Food", dec!(100)).unwrap();
    assert_eq!(store.budgets().limit("Food"), Some(dec!(100)));
}

#[test]
fn test_set_budget_zero_is_valid() {
    let mut store = Store::open_in_memory();
    store.set_budget("Food", Decimal::ZERO).unwrap();
    assert_eq!(store.budgets().limit("Food"), Some(Decimal::ZERO));
}

#[test]
fn test_set_negative_budget() {
    let mut store = Store::open_in_memory();
    let err = store.set_budget("Food", dec!(-5)).unwrap_err();
    assert_eq!(err, StoreError::InvalidBudget);
    assert_eq!(store.budgets().limit("Food"), None);
}

#[test]
fn test_set_budget_unknown_category() {
    let mut store = Store::open_in_memory();
    let err = store.set_budget("Housing", dec!(100)).unwrap_err();
    assert_eq!(err, StoreError::UnknownCategory("Housing".into()));
}

// ── Persistence through the store ─────────────────────────────

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.json");

    let id = {
        let mut store = Store::open(&path).unwrap();
        store.add_category("Rent").unwrap();
        store.set_budget("Rent", dec!(1200)).unwrap();
        store.add_transaction("Paycheck", dec!(1000), "Salary").unwrap();
        store.add_transaction("Lunch", dec!(-15.50), "Food").unwrap()
    };

    let store = Store::open(&path).unwrap();
    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.transactions()[0].id, id);
    assert_eq!(store.transactions()[0].amount, dec!(-15.50));
    assert!(Category::find_by_name(store.categories(), "Rent").is_some());
    assert_eq!(store.budgets().limit("Rent"), Some(dec!(1200)));
}

#[test]
fn test_ids_stay_unique_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.json");

    let first = {
        let mut store = Store::open(&path).unwrap();
        store.add_transaction("A", dec!(1), "Salary").unwrap()
    };
    let second = {
        let mut store = Store::open(&path).unwrap();
        store.add_transaction("B", dec!(2), "Salary").unwrap()
    };
    assert!(second > first);
}

#[test]
fn test_corrupt_snapshot_starts_empty_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.json");
    std::fs::write(&path, "definitely not json").unwrap();

    let store = Store::open(&path).unwrap();
    assert!(store.transactions().is_empty());
    assert_eq!(store.categories().len(), 5);
}

#[test]
fn test_legacy_snapshot_gets_default_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("transactions.json");
    std::fs::write(
        &path,
        r#"[{"id":1,"desc":"Coffee","amount":-4.5,"category":"Food","date":"2024-04-05"}]"#,
    )
    .unwrap();

    let store = Store::open(&path).unwrap();
    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.categories().len(), 5);
}

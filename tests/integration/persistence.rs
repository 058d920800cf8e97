//! Save/load of the form document through the storage layer.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use debtsim::form::FormState;
use debtsim::storage::{delete_document, load_document, save_document};
use debtsim::{Debt, DebtSimError};

fn temp_path() -> String {
    let mut p = std::env::temp_dir();
    p.push(format!("debtsim_it_doc_{}.json", uuid::Uuid::new_v4()));
    p.to_string_lossy().to_string()
}

#[test]
fn saved_form_restores_identically() {
    let path = temp_path();
    let mut form = FormState::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    form.initial_balance = "1000".into();
    form.annual_interest_rate = "36.5".into();
    form.pay_immediately = false;
    form.debts.add(Debt::new("Rent", dec!(200), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()));
    form.debts.add(Debt::new("Card", dec!(45.5), NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()));

    save_document(&form.to_document(), Some(&path)).unwrap();

    let mut restored = FormState::default();
    restored.apply_document(load_document(Some(&path)).unwrap());

    assert_eq!(restored.debts.debts(), form.debts.debts());
    assert_eq!(restored.simulate().unwrap(), form.simulate().unwrap());

    delete_document(Some(&path)).unwrap();
}

#[test]
fn document_written_by_hand_loads() {
    let path = temp_path();
    std::fs::write(
        &path,
        r#"{
            "debts": [{"name": "Loan", "amount": 200, "due_date": "2024-01-10"}],
            "settings": {
                "initial_balance": "1000",
                "annual_interest_rate": "0",
                "start_date": "2024-01-01",
                "pay_immediately": true
            }
        }"#,
    )
    .unwrap();

    let mut form = FormState::default();
    form.apply_document(load_document(Some(&path)).unwrap());
    let series = form.simulate().unwrap();
    assert!(series.iter().all(|p| p.balance == dec!(800)));

    delete_document(Some(&path)).unwrap();
}

#[test]
fn failed_load_leaves_form_untouched() {
    let path = temp_path();
    std::fs::write(&path, "[1, 2,").unwrap();

    let mut form = FormState::default();
    form.initial_balance = "42".into();
    match load_document(Some(&path)) {
        Ok(doc) => form.apply_document(doc),
        Err(e) => assert!(matches!(e, DebtSimError::MalformedPersistedState { .. })),
    }
    assert_eq!(form.initial_balance, "42");

    delete_document(Some(&path)).unwrap();
}

#[test]
fn stored_row_with_impossible_date_names_the_field() {
    let path = temp_path();
    std::fs::write(
        &path,
        r#"{"debts": [{"name": "Loan", "amount": 200, "due_date": "2024-13-45"}]}"#,
    )
    .unwrap();

    let mut form = FormState::default();
    form.initial_balance = "42".into();
    let err = load_document(Some(&path)).unwrap_err();
    assert!(matches!(err, DebtSimError::InvalidInput { field: "due_date", .. }));
    assert_eq!(form.initial_balance, "42");
    assert!(form.debts.is_empty());

    delete_document(Some(&path)).unwrap();
}

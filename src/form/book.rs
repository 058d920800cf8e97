//! Debt book — ordered debt list keyed by stable ids.

use serde::Serialize;
use tracing::debug;

use crate::error::{DebtSimError, Result};
use crate::types::{Debt, DebtId};

/// One row of the debt book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebtEntry {
    pub id: DebtId,
    #[serde(flatten)]
    pub debt: Debt,
}

/// Debts in insertion order. Updates keep a row's position and id.
#[derive(Debug, Clone, Default)]
pub struct DebtBook {
    entries: Vec<DebtEntry>,
}

impl DebtBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a debt and return its new id.
    pub fn add(&mut self, debt: Debt) -> DebtId {
        let id = DebtId::new();
        debug!(%id, name = %debt.name, amount = %debt.amount, "Debt added");
        self.entries.push(DebtEntry { id, debt });
        id
    }

    pub fn update(&mut self, id: DebtId, debt: Debt) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(DebtSimError::DebtNotFound(id))?;
        debug!(%id, name = %debt.name, amount = %debt.amount, "Debt updated");
        entry.debt = debt;
        Ok(())
    }

    /// Add when nothing is selected, otherwise update the selected row.
    pub fn submit(&mut self, selected: Option<DebtId>, debt: Debt) -> Result<DebtId> {
        match selected {
            Some(id) => self.update(id, debt).map(|()| id),
            None => Ok(self.add(debt)),
        }
    }

    pub fn remove(&mut self, id: DebtId) -> Result<Debt> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(DebtSimError::DebtNotFound(id))?;
        debug!(%id, "Debt removed");
        Ok(self.entries.remove(idx).debt)
    }

    pub fn get(&self, id: DebtId) -> Option<&Debt> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.debt)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every row and insert `debts` in order with fresh ids.
    pub fn replace_all(&mut self, debts: Vec<Debt>) {
        self.entries = debts
            .into_iter()
            .map(|debt| DebtEntry { id: DebtId::new(), debt })
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DebtEntry> {
        self.entries.iter()
    }

    /// Owned copy of the debts, in book order.
    pub fn debts(&self) -> Vec<Debt> {
        self.entries.iter().map(|e| e.debt.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn debt(name: &str) -> Debt {
        Debt::new(name, dec!(10), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    }

    #[test]
    fn test_add_preserves_order() {
        let mut book = DebtBook::new();
        book.add(debt("a"));
        book.add(debt("b"));
        book.add(debt("c"));
        let names: Vec<_> = book.iter().map(|e| e.debt.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_update_keeps_id_and_position() {
        let mut book = DebtBook::new();
        book.add(debt("a"));
        let id = book.add(debt("b"));
        book.add(debt("c"));

        book.update(id, debt("B")).unwrap();
        assert_eq!(book.iter().nth(1).unwrap().id, id);
        assert_eq!(book.get(id).unwrap().name, "B");
    }

    #[test]
    fn test_submit_adds_or_updates() {
        let mut book = DebtBook::new();
        let id = book.submit(None, debt("a")).unwrap();
        assert_eq!(book.len(), 1);

        let same = book.submit(Some(id), debt("z")).unwrap();
        assert_eq!(same, id);
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(id).unwrap().name, "z");
    }

    #[test]
    fn test_unknown_id_errors() {
        let mut book = DebtBook::new();
        let stranger = DebtId::new();
        assert!(matches!(book.update(stranger, debt("x")), Err(DebtSimError::DebtNotFound(_))));
        assert!(matches!(book.remove(stranger), Err(DebtSimError::DebtNotFound(_))));
        assert!(book.submit(Some(stranger), debt("x")).is_err());
        assert!(book.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut book = DebtBook::new();
        let a = book.add(debt("a"));
        book.add(debt("b"));
        let removed = book.remove(a).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(book.len(), 1);
        assert!(book.get(a).is_none());
    }

    #[test]
    fn test_replace_all() {
        let mut book = DebtBook::new();
        let old = book.add(debt("old"));
        book.replace_all(vec![debt("x"), debt("y")]);
        assert_eq!(book.len(), 2);
        assert!(book.get(old).is_none());
        assert_eq!(book.debts()[1].name, "y");
    }

    #[test]
    fn test_entry_serializes_flat() {
        let mut book = DebtBook::new();
        book.add(debt("a"));
        let json = serde_json::to_value(book.iter().next().unwrap()).unwrap();
        assert!(json["id"].is_string());
        assert_eq!(json["name"], "a");
        assert_eq!(json["due_date"], "2024-01-05");
    }
}

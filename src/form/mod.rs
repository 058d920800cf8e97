//! Form — the user-editable state behind the dashboard.
//!
//! Holds the raw text fields and the debt book. Nothing here is shared
//! with the simulator: [`FormState::to_input`] snapshots the current
//! fields into an immutable [`SimulationInput`] at the moment a run is
//! requested.

pub mod book;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

use crate::engine::simulator;
use crate::error::{DebtSimError, Result};
use crate::storage::{Document, Settings};
use crate::types::{BalanceSeries, Debt, SimulationInput, DATE_FORMAT};

pub use book::{DebtBook, DebtEntry};

// ---------------------------------------------------------------------------
// Field parsing
// ---------------------------------------------------------------------------

/// Parse a decimal text field. Surrounding whitespace is ignored.
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DebtSimError::invalid(field, raw, "value is required"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| {
            let reason = if trimmed.parse::<f64>().map_or(false, f64::is_finite) {
                "out of range"
            } else {
                "not a number"
            };
            DebtSimError::invalid(field, raw, reason)
        })
}

/// Parse a `YYYY-MM-DD` date field.
pub fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DebtSimError::invalid(field, raw, "date is required"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DebtSimError::invalid(field, raw, "expected a YYYY-MM-DD date"))
}

// ---------------------------------------------------------------------------
// Debt draft
// ---------------------------------------------------------------------------

/// Unparsed debt row as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub due_date: String,
}

impl DebtDraft {
    pub fn parse(&self) -> Result<Debt> {
        let amount = parse_decimal("amount", &self.amount)?;
        if amount < Decimal::ZERO {
            return Err(DebtSimError::invalid("amount", &self.amount, "must not be negative"));
        }
        let due_date = parse_date("due_date", &self.due_date)?;
        Ok(Debt::new(self.name.trim(), amount, due_date))
    }
}

impl From<&Debt> for DebtDraft {
    fn from(debt: &Debt) -> Self {
        Self {
            name: debt.name.clone(),
            amount: debt.amount.to_string(),
            due_date: debt.due_date.format(DATE_FORMAT).to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

/// Current contents of the form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub initial_balance: String,
    pub annual_interest_rate: String,
    pub start_date: String,
    pub pay_immediately: bool,
    pub debts: DebtBook,
}

impl FormState {
    /// Empty form with the start date set to `today`, as a date picker would.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            start_date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    /// Simulation is offered only once balance and rate have been entered.
    pub fn can_simulate(&self) -> bool {
        !self.initial_balance.trim().is_empty() && !self.annual_interest_rate.trim().is_empty()
    }

    /// Snapshot the form into an immutable simulation input.
    pub fn to_input(&self) -> Result<SimulationInput> {
        Ok(SimulationInput {
            initial_balance: parse_decimal("initial_balance", &self.initial_balance)?,
            annual_interest_rate: parse_decimal("annual_interest_rate", &self.annual_interest_rate)?,
            start_date: parse_date("start_date", &self.start_date)?,
            debts: self.debts.debts(),
            pay_immediately: self.pay_immediately,
        })
    }

    /// Validate, snapshot and run.
    pub fn simulate(&self) -> Result<BalanceSeries> {
        let input = self.to_input()?;
        let series = simulator::simulate(&input)?;
        info!(
            debts = input.debts.len(),
            policy = %input.policy(),
            final_balance = %crate::chart::format_balance(series.final_balance()),
            "Simulated 30-day balance"
        );
        Ok(series)
    }

    /// Persisted representation of the current form.
    pub fn to_document(&self) -> Document {
        Document {
            debts: self.debts.debts(),
            settings: Settings {
                initial_balance: self.initial_balance.clone(),
                annual_interest_rate: self.annual_interest_rate.clone(),
                start_date: self.start_date.clone(),
                pay_immediately: self.pay_immediately,
            },
        }
    }

    /// Replace every field and the whole debt book with a loaded document.
    pub fn apply_document(&mut self, document: Document) {
        let Document { debts, settings } = document;
        debug!(debts = debts.len(), "Applying loaded document to form");
        self.debts.replace_all(debts);
        self.initial_balance = settings.initial_balance;
        self.annual_interest_rate = settings.annual_interest_rate;
        self.start_date = settings.start_date;
        self.pay_immediately = settings.pay_immediately;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared types for DEBTSIM.
//!
//! These types form the data model used across the simulator, the form,
//! persistence and the dashboard. The simulator only ever sees
//! [`SimulationInput`]; everything else is presentation-side state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of every simulated horizon, in calendar days.
pub const SIMULATION_DAYS: usize = 30;

/// Calendar date format used for every date field (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Debt
// ---------------------------------------------------------------------------

/// A single debt to be repaid out of the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    /// Amount owed. Serialised as a JSON number.
    pub amount: Decimal,
    /// Day on which the debt is paid under the due-date policy.
    pub due_date: NaiveDate,
}

impl Debt {
    pub fn new(name: impl Into<String>, amount: Decimal, due_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            amount,
            due_date,
        }
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ${} due {}",
            self.name,
            crate::chart::format_balance(self.amount),
            self.due_date.format(DATE_FORMAT)
        )
    }
}

/// Stable identifier for a row in the debt book.
///
/// Assigned when a debt is added and kept across updates. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebtId(Uuid);

impl DebtId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DebtId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DebtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DebtId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ---------------------------------------------------------------------------
// Payment policy
// ---------------------------------------------------------------------------

/// When debts leave the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPolicy {
    /// Every debt is paid on day 0, before any interest accrues.
    Immediate,
    /// Each debt is paid on the simulated day matching its due date.
    OnDueDate,
}

impl From<bool> for PaymentPolicy {
    fn from(pay_immediately: bool) -> Self {
        if pay_immediately {
            PaymentPolicy::Immediate
        } else {
            PaymentPolicy::OnDueDate
        }
    }
}

impl fmt::Display for PaymentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentPolicy::Immediate => write!(f, "immediate"),
            PaymentPolicy::OnDueDate => write!(f, "on-due-date"),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulation input / output
// ---------------------------------------------------------------------------

/// Everything one simulation run needs, captured by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub initial_balance: Decimal,
    /// Annual rate as a percentage (5.0 = 5%).
    pub annual_interest_rate: Decimal,
    pub start_date: NaiveDate,
    pub debts: Vec<Debt>,
    pub pay_immediately: bool,
}

impl SimulationInput {
    pub fn policy(&self) -> PaymentPolicy {
        PaymentPolicy::from(self.pay_immediately)
    }

    /// Sum of every debt amount, regardless of due date.
    pub fn total_debt(&self) -> Decimal {
        self.debts.iter().map(|d| d.amount).sum()
    }
}

/// Post-interest balance at the end of one simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// The daily balances of one run: always [`SIMULATION_DAYS`] consecutive days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BalanceSeries {
    points: Vec<BalancePoint>,
}

impl BalanceSeries {
    /// Only the simulator builds series; it guarantees the length.
    pub(crate) fn from_points(points: Vec<BalancePoint>) -> Self {
        debug_assert_eq!(points.len(), SIMULATION_DAYS);
        Self { points }
    }

    pub fn points(&self) -> &[BalancePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&BalancePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&BalancePoint> {
        self.points.last()
    }

    /// Balance on the last simulated day.
    pub fn final_balance(&self) -> Decimal {
        self.points.last().map(|p| p.balance).unwrap_or(Decimal::ZERO)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BalancePoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a BalanceSeries {
    type Item = &'a BalancePoint;
    type IntoIter = std::slice::Iter<'a, BalancePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

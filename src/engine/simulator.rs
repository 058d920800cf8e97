//! Simulator — 30-day daily-compounding balance projection.
//!
//! Pure computation: takes a [`SimulationInput`] by reference and returns
//! a fresh [`BalanceSeries`]. No hidden state, no I/O beyond a debug
//! trace event.
//!
//! Day 0 holds the initial balance (minus every debt under the immediate
//! policy) and accrues no interest. Each later day starts from the
//! previous day's post-interest balance, deducts debts due that exact day
//! (due-date policy only), then compounds one day of interest.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{DebtSimError, Result};
use crate::types::{BalancePoint, BalanceSeries, Debt, SimulationInput, SIMULATION_DAYS};

const DAYS_PER_YEAR: Decimal = dec!(365);
const PERCENT: Decimal = dec!(100);

/// Convert an annual percentage rate into the per-day fraction.
pub fn daily_rate(annual_interest_rate: Decimal) -> Decimal {
    annual_interest_rate / DAYS_PER_YEAR / PERCENT
}

/// The calendar dates covered by a run starting at `start_date`.
///
/// Fails only when the horizon would run past the end of the calendar.
pub fn horizon(start_date: NaiveDate) -> Result<Vec<NaiveDate>> {
    let last_offset = (SIMULATION_DAYS - 1) as u64;
    if start_date.checked_add_days(Days::new(last_offset)).is_none() {
        return Err(DebtSimError::invalid(
            "start_date",
            &start_date.to_string(),
            format!("no room for {SIMULATION_DAYS} days after this date"),
        ));
    }
    Ok(start_date.iter_days().take(SIMULATION_DAYS).collect())
}

/// Run the simulation.
///
/// Either the full series is produced or an error is returned before any
/// day is computed; the only failure modes are a start date at the end of
/// the calendar and a balance too large for decimal arithmetic.
pub fn simulate(input: &SimulationInput) -> Result<BalanceSeries> {
    let dates = horizon(input.start_date)?;
    let growth = Decimal::ONE + daily_rate(input.annual_interest_rate);

    let mut balance = input.initial_balance;
    if input.pay_immediately {
        balance = checked(balance.checked_sub(input.total_debt()), input)?;
    }

    let due = if input.pay_immediately {
        BTreeMap::new()
    } else {
        dues_by_date(&input.debts)
    };

    let mut points = Vec::with_capacity(SIMULATION_DAYS);
    points.push(BalancePoint {
        date: dates[0],
        balance,
    });

    for &date in &dates[1..] {
        if let Some(amount) = due.get(&date) {
            balance = checked(balance.checked_sub(*amount), input)?;
        }
        balance = checked(balance.checked_mul(growth), input)?;
        points.push(BalancePoint { date, balance });
    }

    let series = BalanceSeries::from_points(points);

    debug!(
        start = %input.start_date,
        days = series.len(),
        debts = input.debts.len(),
        policy = %input.policy(),
        final_balance = %series.final_balance(),
        "Simulation complete"
    );

    Ok(series)
}

/// Five-argument form of [`simulate`], for callers that hold loose values.
pub fn simulate_with(
    initial_balance: Decimal,
    annual_interest_rate: Decimal,
    start_date: NaiveDate,
    debts: &[Debt],
    pay_immediately: bool,
) -> Result<BalanceSeries> {
    simulate(&SimulationInput {
        initial_balance,
        annual_interest_rate,
        start_date,
        debts: debts.to_vec(),
        pay_immediately,
    })
}

/// Total amount due on each date. Debts sharing a date are summed.
fn dues_by_date(debts: &[Debt]) -> BTreeMap<NaiveDate, Decimal> {
    let mut due = BTreeMap::new();
    for debt in debts {
        *due.entry(debt.due_date).or_insert(Decimal::ZERO) += debt.amount;
    }
    due
}

fn checked(value: Option<Decimal>, input: &SimulationInput) -> Result<Decimal> {
    value.ok_or_else(|| {
        DebtSimError::invalid(
            "initial_balance",
            &input.initial_balance.to_string(),
            "balance exceeds decimal range during simulation",
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

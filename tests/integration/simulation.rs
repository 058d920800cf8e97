//! End-to-end checks of the 30-day simulation through the public API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use debtsim::form::{DebtDraft, FormState};
use debtsim::{simulate, simulate_with, Debt, SimulationInput, SIMULATION_DAYS};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn debt(amount: Decimal, due: &str) -> Debt {
    Debt::new("debt", amount, date(due))
}

#[test]
fn flat_series_without_debts_or_interest() {
    let series = simulate_with(dec!(1000), dec!(0), date("2024-01-01"), &[], false).unwrap();
    assert_eq!(series.len(), SIMULATION_DAYS);
    assert!(series.iter().all(|p| p.balance == dec!(1000)));
}

#[test]
fn pure_interest_compounds_daily() {
    let series = simulate_with(dec!(1000), dec!(36.5), date("2024-01-01"), &[], false).unwrap();
    assert_eq!(series.points()[1].balance, dec!(1001.0));
    assert_eq!(series.points()[2].balance, dec!(1002.001));
}

#[test]
fn immediate_payment_is_flat_at_reduced_balance() {
    let debts = [debt(dec!(200), "2024-01-10")];
    let series = simulate_with(dec!(1000), dec!(0), date("2024-01-01"), &debts, true).unwrap();
    assert!(series.iter().all(|p| p.balance == dec!(800)));
}

#[test]
fn due_date_payment_lands_on_its_day() {
    let debts = [debt(dec!(200), "2024-01-03")];
    let series = simulate_with(dec!(1000), dec!(0), date("2024-01-01"), &debts, false).unwrap();
    let balances: Vec<_> = series.iter().map(|p| p.balance).collect();
    assert_eq!(balances[0], dec!(1000));
    assert_eq!(balances[1], dec!(1000));
    assert_eq!(balances[2], dec!(800));
}

#[test]
fn debt_sixty_days_out_is_ignored() {
    let debts = [debt(dec!(200), "2024-03-01")];
    let with = simulate_with(dec!(1000), dec!(5), date("2024-01-01"), &debts, false).unwrap();
    let without = simulate_with(dec!(1000), dec!(5), date("2024-01-01"), &[], false).unwrap();
    assert_eq!(with, without);
}

#[test]
fn dates_are_consecutive_across_month_end() {
    let series = simulate_with(dec!(1), dec!(0), date("2024-02-15"), &[], false).unwrap();
    let dates: Vec<_> = series.iter().map(|p| p.date).collect();
    assert_eq!(dates[0], date("2024-02-15"));
    assert_eq!(dates[14], date("2024-02-29"));
    assert_eq!(dates[15], date("2024-03-01"));
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn repeated_runs_are_identical() {
    let input = SimulationInput {
        initial_balance: dec!(2500.75),
        annual_interest_rate: dec!(3.9),
        start_date: date("2024-06-10"),
        debts: vec![debt(dec!(120), "2024-06-20"), debt(dec!(80), "2024-07-01")],
        pay_immediately: false,
    };
    assert_eq!(simulate(&input).unwrap(), simulate(&input).unwrap());
}

#[test]
fn form_to_series() {
    let mut form = FormState::new(date("2024-01-01"));
    form.initial_balance = "1000".into();
    form.annual_interest_rate = "0".into();
    let draft = DebtDraft {
        name: "Rent".into(),
        amount: "200".into(),
        due_date: "2024-01-03".into(),
    };
    form.debts.submit(None, draft.parse().unwrap()).unwrap();

    let series = form.simulate().unwrap();
    assert_eq!(series.final_balance(), dec!(800));
}

#[test]
fn form_with_bad_balance_never_simulates() {
    let mut form = FormState::new(date("2024-01-01"));
    form.initial_balance = "12,000".into();
    form.annual_interest_rate = "5".into();
    assert!(form.can_simulate());
    assert!(form.simulate().is_err());
}

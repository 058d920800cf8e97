//! DEBTSIM — 30-day debt repayment simulator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod error;
pub mod engine;
pub mod form;
pub mod storage;
pub mod chart;
pub mod dashboard;

pub use engine::simulator::{simulate, simulate_with};
pub use error::{DebtSimError, Result};
pub use types::{BalancePoint, BalanceSeries, Debt, DebtId, SimulationInput, SIMULATION_DAYS};

//! Core engine — the 30-day balance simulation.

pub mod simulator;

pub use simulator::{daily_rate, simulate, simulate_with};

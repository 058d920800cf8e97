//! Integration tests for DEBTSIM.

mod persistence;
mod simulation;

//! `em-bright` library crate.
//!
//! Estimates how likely a compact binary merger is to be electromagnetically
//! bright from gravitational-wave samples. The binary (`embright`) is a thin
//! wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the estimator can be driven from in-memory samples by other tools

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod estimate;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

//! Reporting utilities: terminal and JSON summaries of a run.
//!
//! Formatting lives here so estimation code never prints.

pub mod format;

pub use format::*;

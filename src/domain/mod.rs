//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the sample representation (`BinarySample`, `SampleBatch`)
//! - remnant evaluation results (`RemnantOutcome`, `RemnantMasses`, `NsEstimate`)
//! - run configuration (`EstimateConfig`, `InputSource`, `PosteriorOptions`)

pub mod types;

pub use types::*;

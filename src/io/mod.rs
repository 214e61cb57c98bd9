//! Input helpers.
//!
//! - whitespace table parsing (`table`)
//! - sample adapters producing `SampleBatch`es (`ingest`)
//! - EOS sequence loading (`eos`)

pub mod eos;
pub mod ingest;
pub mod table;

pub use eos::*;
pub use ingest::*;

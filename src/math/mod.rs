//! Mathematical utilities: mass-parameter transforms and table interpolation.

pub mod interp;
pub mod transform;

pub use interp::*;
pub use transform::*;

//! Remnant-mass models and the EOS sequences they evaluate against.
//!
//! The estimator only talks to the `RemnantModel` trait so that tests can
//! plug in deterministic stubs. `Foucart2012` is the default fit.

pub mod eos;
pub mod foucart;

pub use eos::*;
pub use foucart::*;

use thiserror::Error;

/// Failure reported by a remnant-mass model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Parameters outside the model's fitted range. Recoverable per sample.
    #[error("outside model domain: {0}")]
    Domain(String),

    /// The model cannot handle this kind of query at all.
    #[error("unsupported query: {0}")]
    Unsupported(String),

    /// The EOS sequence lacks data the model requires.
    #[error("EOS sequence error: {0}")]
    Eos(String),
}

/// Physical parameters of one remnant-mass query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemnantQuery {
    /// Symmetric mass ratio.
    pub eta: f64,
    /// Gravitational mass of the (candidate) neutron star, solar masses.
    pub ns_mass: f64,
    /// Black-hole spin along the orbital angular momentum.
    pub chi: f64,
    /// Orbital inclination relative to the BH spin (radians).
    pub inclination: f64,
    /// Mass subtracted from the fitted remnant (solar masses).
    pub shift: f64,
}

/// Capability: evaluate the mass left outside the remnant black hole.
pub trait RemnantModel: Sync {
    /// Remnant mass (solar masses) for `query`; may be negative when the
    /// fit predicts total disruption failure.
    fn remnant_mass(&self, query: &RemnantQuery, eos: &EosSequence) -> Result<f64, ModelError>;
}

impl<M: RemnantModel + ?Sized> RemnantModel for &M {
    fn remnant_mass(&self, query: &RemnantQuery, eos: &EosSequence) -> Result<f64, ModelError> {
        (**self).remnant_mass(query, eos)
    }
}

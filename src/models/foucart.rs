//! Foucart (2012) remnant-mass fit for black hole–neutron star mergers.
//!
//! ```text
//! M_rem / M_b = α (3Q)^(1/3) (1 - 2C) - β Q C r_isco(χ)
//! ```
//!
//! with `Q = M_BH / M_NS >= 1`, `C` the NS compactness, `M_b` its baryonic mass
//! and `r_isco` the equatorial Kerr ISCO radius in units of the BH mass. The
//! returned value has `shift` subtracted, so a positive result means the
//! remnant exceeds the shift.

use super::{EosSequence, ModelError, RemnantModel, RemnantQuery};

const ALPHA: f64 = 0.288;
const BETA: f64 = 0.148;

/// Equatorial-orbit Foucart (2012) fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Foucart2012;

impl RemnantModel for Foucart2012 {
    fn remnant_mass(&self, query: &RemnantQuery, eos: &EosSequence) -> Result<f64, ModelError> {
        let RemnantQuery {
            eta,
            ns_mass,
            chi,
            inclination,
            shift,
        } = *query;

        if !(eta.is_finite() && eta > 0.0 && eta <= 0.25) {
            return Err(ModelError::Domain(format!(
                "symmetric mass ratio {eta} outside (0, 0.25]"
            )));
        }
        if !(chi.is_finite() && chi.abs() <= 1.0) {
            return Err(ModelError::Domain(format!("BH spin {chi} outside [-1, 1]")));
        }
        if inclination != 0.0 {
            return Err(ModelError::Domain(format!(
                "inclination {inclination} rad: only equatorial orbits are fitted"
            )));
        }

        let compactness = eos.compactness(ns_mass).ok_or_else(|| {
            ModelError::Domain(format!(
                "NS mass {ns_mass} outside EOS '{}' range [{}, {}]",
                eos.label(),
                eos.min_ns_mass(),
                eos.max_ns_mass()
            ))
        })?;
        let baryonic_mass = eos.baryonic_mass(ns_mass).ok_or_else(|| {
            ModelError::Eos(format!("no baryonic mass for NS mass {ns_mass}"))
        })?;

        let q = mass_ratio_from_eta(eta);
        let r_isco = kerr_isco_radius(chi);

        let fraction = ALPHA * (3.0 * q).cbrt() * (1.0 - 2.0 * compactness)
            - BETA * q * compactness * r_isco;
        Ok(baryonic_mass * fraction - shift)
    }
}

/// Mass ratio `Q = m1 / m2 >= 1` from the symmetric mass ratio.
pub fn mass_ratio_from_eta(eta: f64) -> f64 {
    let root = (1.0 - 4.0 * eta).max(0.0).sqrt();
    (1.0 + root - 2.0 * eta) / (2.0 * eta)
}

/// Equatorial ISCO radius of a Kerr black hole in units of its mass.
///
/// Positive `chi` is prograde, negative retrograde.
pub fn kerr_isco_radius(chi: f64) -> f64 {
    let z1 = 1.0 + (1.0 - chi * chi).cbrt() * ((1.0 + chi).cbrt() + (1.0 - chi).cbrt());
    let z2 = (3.0 * chi * chi + z1 * z1).sqrt();
    let sign = if chi < 0.0 { -1.0 } else { 1.0 };
    3.0 + z2 - sign * ((3.0 - z1) * (3.0 + z1 + 2.0 * z2)).max(0.0).sqrt()
}

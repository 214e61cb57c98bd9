//! Closed-form mass-parameter conversions.
//!
//! Two parametrizations reach this module:
//!
//! ```text
//! posterior tables:    (mc, q)   with q = m2 / m1
//! ambiguity ellipsoid: (mc, eta) with eta = m1 m2 / (m1 + m2)^2
//! ```
//!
//! Both are mapped to component masses with `m1 >= m2`. The chirp mass
//! `mc = (m1 m2)^(3/5) / (m1 + m2)^(1/5)` is preserved by construction.

use crate::error::AppError;

/// Largest physical symmetric mass ratio (equal masses).
pub const ETA_MAX: f64 = 0.25;

/// Symmetric mass ratio from the mass ratio `q`.
pub fn eta_from_q(q: f64) -> f64 {
    q / ((1.0 + q) * (1.0 + q))
}

/// Component masses `(m1, m2)` from chirp mass and mass ratio.
///
/// `q > 1` is read as the inverse convention (`m1 / m2`) and inverted so the
/// primary stays the heavier body.
pub fn masses_from_mc_q(mc: f64, q: f64) -> Result<(f64, f64), AppError> {
    check_chirp_mass(mc)?;
    if !q.is_finite() || q <= 0.0 {
        return Err(AppError::domain(format!(
            "Mass ratio must be finite and > 0, got {q}."
        )));
    }
    let q = if q > 1.0 { 1.0 / q } else { q };

    let scale = mc * (1.0 + q).powf(0.2);
    Ok((q.powf(-0.6) * scale, q.powf(0.4) * scale))
}

/// Component masses `(m1, m2)` from chirp mass and symmetric mass ratio.
///
/// Fails with a domain error for `eta` outside `(0, 0.25]`, where the square
/// root would go complex or the masses would diverge.
pub fn masses_from_mc_eta(mc: f64, eta: f64) -> Result<(f64, f64), AppError> {
    check_chirp_mass(mc)?;
    check_eta(eta)?;

    let root = (1.0 - 4.0 * eta).max(0.0).sqrt();
    let m_primary = 0.5 * mc * eta.powf(-0.6) * (1.0 + root);
    // m2 / m1 = (1 - root) / (1 + root) = 4 eta / (1 + root)^2, free of
    // cancellation as eta -> 0 and exactly 1 at eta = 0.25.
    let m_secondary = m_primary * (4.0 * eta / ((1.0 + root) * (1.0 + root)));
    Ok((m_primary, m_secondary))
}

/// Chirp mass of two component masses.
pub fn chirp_mass(m1: f64, m2: f64) -> f64 {
    (m1 * m2).powf(0.6) / (m1 + m2).powf(0.2)
}

/// Validate a symmetric mass ratio.
pub fn check_eta(eta: f64) -> Result<(), AppError> {
    if !eta.is_finite() || eta <= 0.0 || eta > ETA_MAX {
        return Err(AppError::domain(format!(
            "Symmetric mass ratio must lie in (0, 0.25], got {eta}."
        )));
    }
    Ok(())
}

fn check_chirp_mass(mc: f64) -> Result<(), AppError> {
    if !mc.is_finite() || mc <= 0.0 {
        return Err(AppError::domain(format!(
            "Chirp mass must be finite and > 0, got {mc}."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn eta_transform_preserves_chirp_mass_and_ordering() {
        for &eta in &[1e-17, 1e-12, 1e-9, 0.01, 0.05, 0.1, 0.15, 0.2, 0.22, 0.249, 0.25] {
            let (m1, m2) = masses_from_mc_eta(1.8, eta).unwrap();
            assert!(m1 >= m2, "eta={eta}: m1={m1} m2={m2}");
            assert!(m2 > 0.0, "eta={eta}: m2={m2}");
            assert!((chirp_mass(m1, m2) / 1.8 - 1.0).abs() < 1e-10, "eta={eta}");
            assert!((m1 * m2 / ((m1 + m2) * (m1 + m2)) / eta - 1.0).abs() < 1e-9, "eta={eta}");
        }
    }

    #[test]
    fn equal_mass_boundary_gives_identical_components() {
        let mc = 1.2;
        let (m1, m2) = masses_from_mc_eta(mc, 0.25).unwrap();
        assert_eq!(m1, m2);
        assert!((m1 - mc * 2f64.powf(0.2)).abs() < 1e-12);
    }

    #[test]
    fn eta_above_quarter_is_a_domain_error() {
        let err = masses_from_mc_eta(1.2, 0.2500001).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert!(masses_from_mc_eta(1.2, 0.0).is_err());
        assert!(masses_from_mc_eta(1.2, f64::NAN).is_err());
    }

    #[test]
    fn q_transform_matches_eta_transform() {
        let (mc, q) = (2.3, 0.4);
        let (a1, a2) = masses_from_mc_q(mc, q).unwrap();
        let (b1, b2) = masses_from_mc_eta(mc, eta_from_q(q)).unwrap();
        assert!((a1 - b1).abs() < 1e-9);
        assert!((a2 - b2).abs() < 1e-9);
        assert!((a2 / a1 - q).abs() < 1e-12);
    }

    #[test]
    fn inverse_mass_ratio_convention_is_normalized() {
        let (m1, m2) = masses_from_mc_q(1.5, 2.5).unwrap();
        let (n1, n2) = masses_from_mc_q(1.5, 0.4).unwrap();
        assert!((m1 - n1).abs() < 1e-12 && (m2 - n2).abs() < 1e-12);
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(masses_from_mc_q(1.2, 0.0).is_err());
        assert!(masses_from_mc_q(-1.0, 0.5).is_err());
        assert!(masses_from_mc_eta(0.0, 0.2).is_err());
    }
}

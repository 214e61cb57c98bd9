//! Neutron-star equation-of-state sequences.
//!
//! A sequence tabulates equilibrium NS configurations along the stable branch:
//! gravitational mass, baryonic (rest) mass and compactness `C = GM/(Rc^2)`.
//! The remnant-mass model looks up baryonic mass and compactness by
//! gravitational mass; the estimator only needs the maximum mass.

use crate::error::AppError;
use crate::math::interp_linear;

/// One tabulated equilibrium configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EosPoint {
    pub gravitational_mass: f64,
    pub baryonic_mass: f64,
    pub compactness: f64,
}

/// Stable-branch NS sequence for one equation of state.
#[derive(Debug, Clone, PartialEq)]
pub struct EosSequence {
    label: String,
    g_mass: Vec<f64>,
    b_mass: Vec<f64>,
    compactness: Vec<f64>,
}

impl EosSequence {
    /// Build a sequence, keeping rows up to the maximum gravitational mass.
    ///
    /// Rows past the maximum belong to the unstable branch and are dropped.
    /// The remaining gravitational masses must be strictly increasing.
    pub fn new(label: impl Into<String>, points: &[EosPoint]) -> Result<Self, AppError> {
        let label = label.into();
        if points.len() < 2 {
            return Err(AppError::eos(format!(
                "EOS sequence '{label}' needs at least two points, got {}.",
                points.len()
            )));
        }

        let mut argmax = 0;
        for (i, p) in points.iter().enumerate() {
            if !(p.gravitational_mass.is_finite()
                && p.baryonic_mass.is_finite()
                && p.compactness.is_finite()
                && p.gravitational_mass > 0.0
                && p.baryonic_mass > 0.0
                && p.compactness > 0.0
                && p.compactness < 0.5)
            {
                return Err(AppError::eos(format!(
                    "EOS sequence '{label}' has an unphysical point at row {}.",
                    i + 1
                )));
            }
            if p.gravitational_mass > points[argmax].gravitational_mass {
                argmax = i;
            }
        }

        let stable = &points[..=argmax];
        if stable
            .windows(2)
            .any(|w| w[1].gravitational_mass <= w[0].gravitational_mass)
        {
            return Err(AppError::eos(format!(
                "EOS sequence '{label}' is not ordered by increasing gravitational mass."
            )));
        }
        if stable.len() < 2 {
            return Err(AppError::eos(format!(
                "EOS sequence '{label}' has no stable branch (maximum mass on the first row)."
            )));
        }

        Ok(Self {
            label,
            g_mass: stable.iter().map(|p| p.gravitational_mass).collect(),
            b_mass: stable.iter().map(|p| p.baryonic_mass).collect(),
            compactness: stable.iter().map(|p| p.compactness).collect(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.g_mass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.g_mass.is_empty()
    }

    /// Maximum NS gravitational mass (solar masses).
    pub fn max_ns_mass(&self) -> f64 {
        self.g_mass[self.g_mass.len() - 1]
    }

    /// Minimum tabulated NS gravitational mass (solar masses).
    pub fn min_ns_mass(&self) -> f64 {
        self.g_mass[0]
    }

    /// Baryonic mass of a NS with gravitational mass `m`, if tabulated.
    pub fn baryonic_mass(&self, m: f64) -> Option<f64> {
        interp_linear(&self.g_mass, &self.b_mass, m)
    }

    /// Compactness of a NS with gravitational mass `m`, if tabulated.
    pub fn compactness(&self, m: f64) -> Option<f64> {
        interp_linear(&self.g_mass, &self.compactness, m)
    }
}

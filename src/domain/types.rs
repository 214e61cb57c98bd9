//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - passed between the input adapters and the estimator by value
//! - printed as JSON summaries
//! - constructed directly in tests without any I/O

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of preamble lines before the column-name row of a posterior table.
pub const DEFAULT_SKIP_HEADER: usize = 12;

/// Default spin column of a posterior table.
pub const DEFAULT_SPIN_COLUMN: &str = "a1";

/// Default remnant-mass threshold (solar masses) separating negligible disks
/// from EM-relevant ones.
pub const DEFAULT_THRESHOLD: f64 = 0.03;

/// Default EOS label.
pub const DEFAULT_EOS_LABEL: &str = "2H";

/// One binary described by its symmetric mass ratio, effective spin and
/// component masses (solar masses, `m_primary >= m_secondary`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BinarySample {
    pub eta: f64,
    pub chi: f64,
    pub m_primary: f64,
    pub m_secondary: f64,
}

/// An ordered batch of independent samples.
///
/// Produced fresh by every input adapter and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleBatch {
    samples: Vec<BinarySample>,
}

impl SampleBatch {
    pub fn new(samples: Vec<BinarySample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[BinarySample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BinarySample> {
        self.samples.iter()
    }

    pub fn etas(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.eta).collect()
    }

    pub fn spins(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.chi).collect()
    }

}

impl FromIterator<BinarySample> for SampleBatch {
    fn from_iter<I: IntoIterator<Item = BinarySample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SampleBatch {
    type Item = &'a BinarySample;
    type IntoIter = std::slice::Iter<'a, BinarySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Per-sample result of the remnant-mass evaluation.
///
/// The numeric view (`mass()`) collapses the last two variants to zero, but
/// keeping them apart lets callers tell "no disk" from "model not applicable".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "mass")]
pub enum RemnantOutcome {
    /// Strictly positive remnant mass (solar masses).
    Mass(f64),
    /// The model evaluated but left no matter outside the black hole.
    NoRemnant,
    /// The model rejected the sample's parameters.
    Inapplicable,
}

impl RemnantOutcome {
    /// Classify a raw model value, flooring non-positive results.
    pub fn from_raw(value: f64) -> Self {
        if !value.is_finite() {
            RemnantOutcome::Inapplicable
        } else if value > 0.0 {
            RemnantOutcome::Mass(value)
        } else {
            RemnantOutcome::NoRemnant
        }
    }

    pub fn mass(self) -> f64 {
        match self {
            RemnantOutcome::Mass(m) => m,
            RemnantOutcome::NoRemnant | RemnantOutcome::Inapplicable => 0.0,
        }
    }
}

/// Remnant outcomes, index-aligned with the batch they were computed from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemnantMasses {
    outcomes: Vec<RemnantOutcome>,
}

impl RemnantMasses {
    pub fn new(outcomes: Vec<RemnantOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[RemnantOutcome] {
        &self.outcomes
    }

    /// Floored numeric remnant masses (never negative).
    pub fn masses(&self) -> Vec<f64> {
        self.outcomes.iter().map(|o| o.mass()).collect()
    }

    pub fn count_positive(&self) -> usize {
        self.count(|o| matches!(o, RemnantOutcome::Mass(_)))
    }

    pub fn count_no_remnant(&self) -> usize {
        self.count(|o| matches!(o, RemnantOutcome::NoRemnant))
    }

    pub fn count_inapplicable(&self) -> usize {
        self.count(|o| matches!(o, RemnantOutcome::Inapplicable))
    }

    fn count(&self, pred: impl Fn(&RemnantOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

/// NS probabilities for both components plus the remnant array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NsEstimate {
    /// Percentage of samples whose primary is below the maximum NS mass.
    pub ns_prob_primary: f64,
    /// Percentage of samples whose secondary is below the maximum NS mass.
    pub ns_prob_secondary: f64,
    pub remnants: RemnantMasses,
}

/// Options for reading a posterior-sample table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosteriorOptions {
    /// Number of initial data rows to discard (chain burn-in).
    pub burn: usize,
    /// Number of preamble lines preceding the column-name row.
    pub skip_header: usize,
    /// Column holding the spin used as effective spin.
    pub spin_column: String,
}

impl Default for PosteriorOptions {
    fn default() -> Self {
        Self {
            burn: 0,
            skip_header: DEFAULT_SKIP_HEADER,
            spin_column: DEFAULT_SPIN_COLUMN.to_string(),
        }
    }
}

/// Where a run reads its samples from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Posterior-sample table with named columns.
    Posterior { path: PathBuf, options: PosteriorOptions },
    /// Ambiguity-ellipsoid matrix (index, mc, eta, chi) without header.
    Ellipsoid { path: PathBuf },
}

impl InputSource {
    pub fn path(&self) -> &std::path::Path {
        match self {
            InputSource::Posterior { path, .. } | InputSource::Ellipsoid { path } => path,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InputSource::Posterior { .. } => "posterior samples",
            InputSource::Ellipsoid { .. } => "ambiguity ellipsoid",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    pub input: InputSource,
    /// Reserved output destination; accepted but nothing is written to it.
    pub output: Option<PathBuf>,
    pub threshold: f64,
    pub eos_label: String,
    pub eos_dir: PathBuf,
    pub json: bool,
    pub print_remnants: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remnant_outcome_floors_non_positive_values() {
        assert_eq!(RemnantOutcome::from_raw(0.12), RemnantOutcome::Mass(0.12));
        assert_eq!(RemnantOutcome::from_raw(0.0), RemnantOutcome::NoRemnant);
        assert_eq!(RemnantOutcome::from_raw(-0.4), RemnantOutcome::NoRemnant);
        assert_eq!(RemnantOutcome::from_raw(f64::NAN), RemnantOutcome::Inapplicable);
    }

    #[test]
    fn remnant_masses_counts_each_outcome() {
        let remnants = RemnantMasses::new(vec![
            RemnantOutcome::Mass(0.2),
            RemnantOutcome::NoRemnant,
            RemnantOutcome::Inapplicable,
            RemnantOutcome::Mass(0.05),
        ]);
        assert_eq!(remnants.masses(), vec![0.2, 0.0, 0.0, 0.05]);
        assert_eq!(remnants.count_positive(), 2);
        assert_eq!(remnants.count_no_remnant(), 1);
        assert_eq!(remnants.count_inapplicable(), 1);
    }

    #[test]
    fn batch_accessors_stay_index_aligned() {
        let batch: SampleBatch = [(0.2, 0.1, 3.0, 1.4), (0.25, -0.3, 1.2, 1.2)]
            .into_iter()
            .map(|(eta, chi, m1, m2)| BinarySample {
                eta,
                chi,
                m_primary: m1,
                m_secondary: m2,
            })
            .collect();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.etas(), vec![0.2, 0.25]);
        assert_eq!(batch.spins(), vec![0.1, -0.3]);
        assert_eq!(batch.samples()[0].m_primary, 3.0);
        assert_eq!(batch.samples()[1].m_secondary, 1.2);
    }
}

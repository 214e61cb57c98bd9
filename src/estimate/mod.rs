//! EM-bright estimation over a sample batch.
//!
//! The estimator owns the read-only inputs shared by every sample (EOS
//! sequence, threshold, remnant model) and exposes the three aggregations:
//!
//! - NS probabilities for primary and secondary
//! - per-sample remnant masses
//! - the EM-bright probability
//!
//! Batches are passed in by reference, so one estimator can serve any number
//! of batches (and threads).

use log::{debug, warn};
use rayon::prelude::*;

use crate::domain::{NsEstimate, RemnantMasses, RemnantOutcome, SampleBatch};
use crate::error::AppError;
use crate::io::EosLoader;
use crate::models::{EosSequence, ModelError, RemnantModel, RemnantQuery};

/// Inclination handed to the remnant model; samples describe aligned spins.
const ALIGNED_INCLINATION: f64 = 0.0;

pub struct Estimator<M> {
    eos: EosSequence,
    threshold: f64,
    model: M,
}

impl<M: RemnantModel> Estimator<M> {
    pub fn new(eos: EosSequence, threshold: f64, model: M) -> Result<Self, AppError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AppError::config(format!(
                "Threshold must be finite and >= 0, got {threshold}."
            )));
        }
        Ok(Self {
            eos,
            threshold,
            model,
        })
    }

    /// Build an estimator from an EOS label resolved by `loader`.
    pub fn load(loader: &impl EosLoader, label: &str, threshold: f64, model: M) -> Result<Self, AppError> {
        let eos = loader.load(label)?;
        Self::new(eos, threshold, model)
    }

    pub fn eos(&self) -> &EosSequence {
        &self.eos
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Maximum NS gravitational mass of the loaded sequence.
    pub fn max_ns_mass(&self) -> f64 {
        self.eos.max_ns_mass()
    }

    /// Percentages of samples whose primary / secondary mass lies strictly
    /// below the maximum NS mass.
    pub fn ns_probabilities(&self, batch: &SampleBatch) -> Result<(f64, f64), AppError> {
        if batch.is_empty() {
            return Err(AppError::empty_batch("NS probabilities"));
        }
        let max = self.max_ns_mass();
        let primary = batch.iter().filter(|s| s.m_primary < max).count();
        let secondary = batch.iter().filter(|s| s.m_secondary < max).count();
        Ok((percent(primary, batch.len()), percent(secondary, batch.len())))
    }

    /// Evaluate the remnant model for every sample, preserving batch order.
    ///
    /// Model domain errors become `Inapplicable`; any other model error
    /// aborts the whole call.
    pub fn remnant_masses(&self, batch: &SampleBatch) -> Result<RemnantMasses, AppError> {
        let outcomes = batch
            .samples()
            .par_iter()
            .map(|s| {
                let query = RemnantQuery {
                    eta: s.eta,
                    ns_mass: s.m_secondary,
                    chi: s.chi,
                    inclination: ALIGNED_INCLINATION,
                    shift: self.threshold,
                };
                match self.model.remnant_mass(&query, &self.eos) {
                    Ok(value) => Ok(RemnantOutcome::from_raw(value)),
                    Err(ModelError::Domain(_)) => Ok(RemnantOutcome::Inapplicable),
                    Err(e) => Err(AppError::from(e)),
                }
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let remnants = RemnantMasses::new(outcomes);
        let inapplicable = remnants.count_inapplicable();
        if inapplicable > 0 {
            warn!(
                "remnant model not applicable to {inapplicable} of {} samples; counted as zero remnant",
                remnants.len()
            );
        }
        debug!(
            "remnant masses: {} positive, {} without remnant, {inapplicable} inapplicable",
            remnants.count_positive(),
            remnants.count_no_remnant()
        );
        Ok(remnants)
    }

    /// NS probabilities plus the remnant array for one batch.
    pub fn estimate(&self, batch: &SampleBatch) -> Result<NsEstimate, AppError> {
        let (ns_prob_primary, ns_prob_secondary) = self.ns_probabilities(batch)?;
        let remnants = self.remnant_masses(batch)?;
        Ok(NsEstimate {
            ns_prob_primary,
            ns_prob_secondary,
            remnants,
        })
    }

    /// Percentage of EM-bright samples.
    pub fn em_bright_probability(&self, batch: &SampleBatch) -> Result<f64, AppError> {
        if batch.is_empty() {
            return Err(AppError::empty_batch("EM-bright probability"));
        }
        let remnants = self.remnant_masses(batch)?;
        self.em_bright_from(batch, &remnants)
    }

    /// EM-bright percentage from an already computed remnant array.
    ///
    /// A sample is bright when both components are below the maximum NS mass,
    /// or when its remnant mass exceeds the threshold.
    pub fn em_bright_from(&self, batch: &SampleBatch, remnants: &RemnantMasses) -> Result<f64, AppError> {
        if batch.is_empty() {
            return Err(AppError::empty_batch("EM-bright probability"));
        }
        if remnants.len() != batch.len() {
            return Err(AppError::config(format!(
                "Remnant array has {} entries for a batch of {} samples.",
                remnants.len(),
                batch.len()
            )));
        }

        let max = self.max_ns_mass();
        let bright = batch
            .iter()
            .zip(remnants.outcomes())
            .filter(|(s, r)| {
                let double_ns = s.m_primary < max && s.m_secondary < max;
                double_ns || r.mass() > self.threshold
            })
            .count();
        Ok(percent(bright, batch.len()))
    }
}

fn percent(count: usize, total: usize) -> f64 {
    100.0 * count as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BinarySample;
    use crate::error::ErrorKind;
    use crate::models::eos::tests::toy_sequence;

    /// Returns the secondary mass scaled by `factor`, or a domain error for
    /// negative spins.
    struct StubModel {
        factor: f64,
    }

    impl RemnantModel for StubModel {
        fn remnant_mass(&self, query: &RemnantQuery, _eos: &EosSequence) -> Result<f64, ModelError> {
            if query.chi < 0.0 {
                return Err(ModelError::Domain("negative spin".to_string()));
            }
            Ok(query.ns_mass * self.factor - query.shift)
        }
    }

    /// Echoes the spin so ordering can be checked.
    struct SpinEcho;

    impl RemnantModel for SpinEcho {
        fn remnant_mass(&self, query: &RemnantQuery, _eos: &EosSequence) -> Result<f64, ModelError> {
            Ok(query.chi)
        }
    }

    struct Broken;

    impl RemnantModel for Broken {
        fn remnant_mass(&self, _query: &RemnantQuery, _eos: &EosSequence) -> Result<f64, ModelError> {
            Err(ModelError::Unsupported("always".to_string()))
        }
    }

    fn sample(m1: f64, m2: f64, chi: f64) -> BinarySample {
        BinarySample {
            eta: m1 * m2 / ((m1 + m2) * (m1 + m2)),
            chi,
            m_primary: m1,
            m_secondary: m2,
        }
    }

    fn estimator<M: RemnantModel>(model: M) -> Estimator<M> {
        Estimator::new(toy_sequence(), 0.03, model).unwrap()
    }

    #[test]
    fn ns_probabilities_all_or_nothing() {
        let est = estimator(StubModel { factor: 0.0 });

        let light = SampleBatch::new(vec![sample(1.4, 1.3, 0.0); 10]);
        assert_eq!(est.ns_probabilities(&light).unwrap(), (100.0, 100.0));

        let heavy = SampleBatch::new(vec![sample(10.0, 5.0, 0.0); 10]);
        assert_eq!(est.ns_probabilities(&heavy).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn ns_probability_uses_strict_inequality() {
        let est = estimator(StubModel { factor: 0.0 });
        let max = est.max_ns_mass();
        let batch = SampleBatch::new(vec![sample(max, 1.4, 0.0), sample(8.0, max, 0.0)]);
        let (p1, p2) = est.ns_probabilities(&batch).unwrap();
        assert_eq!(p1, 0.0);
        assert_eq!(p2, 50.0);
    }

    #[test]
    fn empty_batches_fail_explicitly() {
        let est = estimator(StubModel { factor: 0.1 });
        let empty = SampleBatch::default();
        assert_eq!(est.ns_probabilities(&empty).unwrap_err().kind(), ErrorKind::EmptyBatch);
        assert_eq!(est.em_bright_probability(&empty).unwrap_err().kind(), ErrorKind::EmptyBatch);
        assert!(est.remnant_masses(&empty).unwrap().is_empty());
    }

    #[test]
    fn remnant_masses_are_floored_and_tri_state() {
        let est = estimator(StubModel { factor: 0.1 });
        let batch = SampleBatch::new(vec![
            sample(5.0, 1.4, 0.5),  // 0.14 - 0.03
            sample(5.0, 0.2, 0.5),  // 0.02 - 0.03 < 0
            sample(5.0, 1.4, -0.5), // domain error
        ]);
        let remnants = est.remnant_masses(&batch).unwrap();
        let masses = remnants.masses();

        assert_eq!(masses.len(), 3);
        assert!((masses[0] - 0.11).abs() < 1e-12);
        assert_eq!(masses[1], 0.0);
        assert_eq!(masses[2], 0.0);
        assert!(masses.iter().all(|&m| m >= 0.0));
        assert_eq!(remnants.outcomes()[1], RemnantOutcome::NoRemnant);
        assert_eq!(remnants.outcomes()[2], RemnantOutcome::Inapplicable);
    }

    #[test]
    fn remnant_masses_preserve_input_order() {
        let est = estimator(SpinEcho);
        let spins: Vec<f64> = (1..=500).map(|i| i as f64 / 1000.0).collect();
        let batch: SampleBatch = spins.iter().map(|&chi| sample(6.0, 1.4, chi)).collect();

        let masses = est.remnant_masses(&batch).unwrap().masses();
        assert_eq!(masses, spins);
    }

    #[test]
    fn fatal_model_errors_abort_the_batch() {
        let est = estimator(Broken);
        let batch = SampleBatch::new(vec![sample(6.0, 1.4, 0.0)]);
        assert_eq!(est.remnant_masses(&batch).unwrap_err().kind(), ErrorKind::Model);
    }

    #[test]
    fn double_ns_batches_are_always_bright() {
        // Remnant never exceeds the threshold with factor 0.
        let est = estimator(StubModel { factor: 0.0 });
        let batch = SampleBatch::new(vec![sample(1.6, 1.2, 0.0), sample(2.0, 1.9, -0.3)]);
        assert_eq!(est.em_bright_probability(&batch).unwrap(), 100.0);
    }

    #[test]
    fn double_ns_with_disk_is_counted_once() {
        // 1.2 * 0.1 - 0.03 = 0.09 > 0.03: both criteria hold for the first two.
        let est = estimator(StubModel { factor: 0.1 });
        let bright = SampleBatch::new(vec![sample(1.6, 1.2, 0.0), sample(2.0, 1.9, 0.3)]);
        let remnants = est.remnant_masses(&bright).unwrap();
        assert!(remnants.masses().iter().all(|&m| m > est.threshold()));
        assert_eq!(est.em_bright_probability(&bright).unwrap(), 100.0);

        let mixed = SampleBatch::new(vec![sample(1.6, 1.2, 0.0), sample(8.0, 5.0, -0.1)]);
        assert_eq!(est.em_bright_probability(&mixed).unwrap(), 50.0);
    }

    #[test]
    fn black_holes_without_disks_are_dark() {
        let est = estimator(StubModel { factor: 0.0 });
        let batch = SampleBatch::new(vec![sample(8.0, 1.4, 0.2), sample(3.0, 1.3, 0.0)]);
        assert_eq!(est.em_bright_probability(&batch).unwrap(), 0.0);
    }

    #[test]
    fn disk_above_threshold_makes_bhns_bright() {
        let est = estimator(StubModel { factor: 0.1 });
        // 0.14 - 0.03 = 0.11 > 0.03 -> bright; BH-BH with domain error -> dark.
        let batch = SampleBatch::new(vec![sample(8.0, 1.4, 0.2), sample(8.0, 5.0, -0.1)]);
        assert_eq!(est.em_bright_probability(&batch).unwrap(), 50.0);
    }

    #[test]
    fn em_bright_from_checks_alignment() {
        let est = estimator(StubModel { factor: 0.1 });
        let batch = SampleBatch::new(vec![sample(8.0, 1.4, 0.2)]);
        let wrong = RemnantMasses::new(vec![]);
        assert!(est.em_bright_from(&batch, &wrong).is_err());
    }

    #[test]
    fn rejects_invalid_threshold() {
        assert!(Estimator::new(toy_sequence(), -0.1, SpinEcho).is_err());
        assert!(Estimator::new(toy_sequence(), f64::NAN, SpinEcho).is_err());
    }
}

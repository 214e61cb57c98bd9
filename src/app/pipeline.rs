//! Shared estimation pipeline.
//!
//! Keeps the core workflow in one place:
//! EOS load -> sample ingest -> NS probabilities + remnant masses -> EM-bright probability
//!
//! The binary only decides how to print the outputs.

use log::{info, warn};

use crate::domain::{EstimateConfig, NsEstimate};
use crate::error::AppError;
use crate::estimate::Estimator;
use crate::io::{EosLoader, load_batch};
use crate::models::RemnantModel;

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub n_samples: usize,
    pub eos_label: String,
    pub max_ns_mass: f64,
    pub estimate: NsEstimate,
    pub em_bright_prob: f64,
}

/// Execute the full pipeline with the given collaborators.
pub fn run_estimate<M: RemnantModel>(
    config: &EstimateConfig,
    loader: &impl EosLoader,
    model: M,
) -> Result<RunOutput, AppError> {
    // 1) EOS sequence and estimator.
    let estimator = Estimator::load(loader, &config.eos_label, config.threshold, model)?;
    info!(
        "EOS '{}' loaded, maximum NS mass {:.4} Msun",
        config.eos_label,
        estimator.max_ns_mass()
    );

    if let Some(path) = &config.output {
        warn!(
            "output destination '{}' is reserved; nothing will be written to it",
            path.display()
        );
    }

    // 2) Samples.
    let batch = load_batch(&config.input)?;
    info!(
        "{} {} read from {}",
        batch.len(),
        config.input.display_name(),
        config.input.path().display()
    );

    // 3) Aggregations; the remnant array is shared by both outputs.
    let estimate = estimator.estimate(&batch)?;
    let em_bright_prob = estimator.em_bright_from(&batch, &estimate.remnants)?;
    info!(
        "P(NS1)={:.2}% P(NS2)={:.2}% P(EM-bright)={:.2}%",
        estimate.ns_prob_primary, estimate.ns_prob_secondary, em_bright_prob
    );

    Ok(RunOutput {
        n_samples: batch.len(),
        eos_label: config.eos_label.clone(),
        max_ns_mass: estimator.max_ns_mass(),
        estimate,
        em_bright_prob,
    })
}

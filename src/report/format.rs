//! Formatted run output.

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::EstimateConfig;
use crate::error::AppError;

/// JSON view of a run.
#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    tool: &'static str,
    input: &'a str,
    source: &'static str,
    eos: &'a str,
    max_ns_mass: f64,
    threshold: f64,
    n_samples: usize,
    ns_prob_primary: f64,
    ns_prob_secondary: f64,
    em_bright_prob: f64,
    remnant_positive: usize,
    remnant_none: usize,
    remnant_inapplicable: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    remnant_masses: Option<Vec<f64>>,
}

/// Format the terminal summary.
pub fn format_run_summary(run: &RunOutput, config: &EstimateConfig) -> String {
    let remnants = &run.estimate.remnants;
    let mut out = String::new();

    out.push_str("=== embright - EM-bright estimate ===\n");
    out.push_str(&format!(
        "Input: {} ({})\n",
        config.input.path().display(),
        config.input.display_name()
    ));
    out.push_str(&format!(
        "EOS: {} | M_max={:.4} Msun | threshold={:.4} Msun\n",
        run.eos_label, run.max_ns_mass, config.threshold
    ));
    out.push_str(&format!("Samples: n={}\n", run.n_samples));
    out.push('\n');

    out.push_str(&format!("P(primary is NS)   = {:6.2} %\n", run.estimate.ns_prob_primary));
    out.push_str(&format!("P(secondary is NS) = {:6.2} %\n", run.estimate.ns_prob_secondary));
    out.push_str(&format!("P(EM-bright)       = {:6.2} %\n", run.em_bright_prob));
    out.push('\n');

    out.push_str(&format!(
        "Remnant: {} positive | {} none | {} outside model range\n",
        remnants.count_positive(),
        remnants.count_no_remnant(),
        remnants.count_inapplicable()
    ));

    if config.print_remnants {
        out.push_str("\nRemnant masses (Msun):\n");
        for (i, m) in remnants.masses().iter().enumerate() {
            out.push_str(&format!("{i:>8} {m:.6}\n"));
        }
    }

    out
}

/// Format the run as pretty-printed JSON.
pub fn format_run_json(run: &RunOutput, config: &EstimateConfig) -> Result<String, AppError> {
    let remnants = &run.estimate.remnants;
    let input = config.input.path().to_string_lossy();
    let summary = RunSummary {
        tool: "embright",
        input: &input,
        source: config.input.display_name(),
        eos: &run.eos_label,
        max_ns_mass: run.max_ns_mass,
        threshold: config.threshold,
        n_samples: run.n_samples,
        ns_prob_primary: run.estimate.ns_prob_primary,
        ns_prob_secondary: run.estimate.ns_prob_secondary,
        em_bright_prob: run.em_bright_prob,
        remnant_positive: remnants.count_positive(),
        remnant_none: remnants.count_no_remnant(),
        remnant_inapplicable: remnants.count_inapplicable(),
        remnant_masses: config.print_remnants.then(|| remnants.masses()),
    };
    serde_json::to_string_pretty(&summary)
        .map_err(|e| AppError::io(format!("Failed to serialize summary: {e}")))
}

//! Sample ingest and normalization.
//!
//! This module turns the three supported sample representations into a
//! `SampleBatch`:
//!
//! - posterior-sample tables with named columns (`mc`, `q`, spin)
//! - ambiguity-ellipsoid files (`index mc eta chi`, no header)
//! - in-memory ambiguity-ellipsoid matrices (`mc eta chi`)
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors, exit code 2)
//! - **Fail fast** on non-physical rows instead of producing NaN masses
//! - **No estimation logic here**: adapters only produce batches

use std::path::Path;

use log::debug;
use nalgebra::DMatrix;

use crate::domain::{BinarySample, InputSource, PosteriorOptions, SampleBatch};
use crate::error::AppError;
use crate::io::table::{NamedTable, field_f64, parse_numeric_rows, read_text};
use crate::math::{eta_from_q, masses_from_mc_eta, masses_from_mc_q};

const COL_CHIRP_MASS: &str = "mc";
const COL_MASS_RATIO: &str = "q";

/// Load the batch described by an `InputSource`.
pub fn load_batch(source: &InputSource) -> Result<SampleBatch, AppError> {
    match source {
        InputSource::Posterior { path, options } => from_posterior_file(path, options),
        InputSource::Ellipsoid { path } => from_ellipsoid_file(path),
    }
}

/// Read a posterior-sample table.
///
/// The first `options.burn` data rows are dropped; a burn longer than the
/// chain yields an empty batch.
pub fn from_posterior_file(path: &Path, options: &PosteriorOptions) -> Result<SampleBatch, AppError> {
    let text = read_text(path, "posterior samples")?;
    from_posterior_text(&text, options)
}

/// Parse posterior samples already held in memory.
pub fn from_posterior_text(text: &str, options: &PosteriorOptions) -> Result<SampleBatch, AppError> {
    let table = NamedTable::parse(text, options.skip_header)?;

    let mc_idx = table.column(COL_CHIRP_MASS)?;
    let q_idx = table.column(COL_MASS_RATIO)?;
    let chi_idx = table.column(&options.spin_column)?;

    let rows_read = table.records.len();
    let batch = table
        .records
        .iter()
        .skip(options.burn)
        .map(|record| -> Result<BinarySample, AppError> {
            let mc = field_f64(record, mc_idx, COL_CHIRP_MASS)?;
            let q = field_f64(record, q_idx, COL_MASS_RATIO)?;
            let chi = field_f64(record, chi_idx, &options.spin_column)?;

            let (m_primary, m_secondary) = masses_from_mc_q(mc, q)
                .map_err(|e| AppError::domain(format!("Line {}: {e}", record.line)))?;

            Ok(BinarySample {
                eta: eta_from_q(q),
                chi,
                m_primary,
                m_secondary,
            })
        })
        .collect::<Result<SampleBatch, AppError>>()?;

    debug!(
        "posterior table: {rows_read} rows read, burn={}, {} samples kept",
        options.burn,
        batch.len()
    );
    Ok(batch)
}

/// Read ambiguity-ellipsoid samples written as `index mc eta chi` rows.
pub fn from_ellipsoid_file(path: &Path) -> Result<SampleBatch, AppError> {
    let text = read_text(path, "ellipsoid samples")?;
    let rows = parse_numeric_rows(&text, 4)?;

    let batch = rows
        .iter()
        .enumerate()
        .map(|(i, row)| ellipsoid_sample(row[1], row[2], row[3], i))
        .collect::<Result<SampleBatch, AppError>>()?;

    debug!("ellipsoid file: {} samples", batch.len());
    Ok(batch)
}

/// Convert an in-memory ellipsoid matrix with columns `mc eta chi`.
///
/// Extra columns beyond the third are ignored.
pub fn from_ellipsoid_matrix(data: &DMatrix<f64>) -> Result<SampleBatch, AppError> {
    if data.ncols() < 3 {
        return Err(AppError::parse(format!(
            "Ellipsoid matrix needs columns (mc, eta, chi); got {} column(s).",
            data.ncols()
        )));
    }

    (0..data.nrows())
        .map(|i| ellipsoid_sample(data[(i, 0)], data[(i, 1)], data[(i, 2)], i))
        .collect()
}

fn ellipsoid_sample(mc: f64, eta: f64, chi: f64, index: usize) -> Result<BinarySample, AppError> {
    let (m_primary, m_secondary) = masses_from_mc_eta(mc, eta)
        .map_err(|e| AppError::domain(format!("Sample {index}: {e}")))?;
    Ok(BinarySample {
        eta,
        chi,
        m_primary,
        m_secondary,
    })
}

//! EOS sequence loading.
//!
//! Sequences are plain numeric tables named `equil_<label>.dat` whose first
//! three columns are gravitational mass, baryonic mass and compactness.
//! Further columns are ignored.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::AppError;
use crate::io::table::{parse_numeric_rows, read_text};
use crate::models::{EosPoint, EosSequence};

/// Environment variable naming the directory of EOS sequence files.
pub const EOS_DIR_ENV: &str = "EMBRIGHT_EOS_DIR";

/// Capability: resolve an EOS label to its sequence.
pub trait EosLoader {
    fn load(&self, label: &str) -> Result<EosSequence, AppError>;
}

/// Loads `equil_<label>.dat` from a directory.
#[derive(Debug, Clone)]
pub struct FileEosLoader {
    dir: PathBuf,
}

impl FileEosLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the sequence file for `label`.
    pub fn path_for(&self, label: &str) -> Result<PathBuf, AppError> {
        validate_label(label)?;
        Ok(self.dir.join(format!("equil_{label}.dat")))
    }
}

impl EosLoader for FileEosLoader {
    fn load(&self, label: &str) -> Result<EosSequence, AppError> {
        let path = self.path_for(label)?;
        let text = read_text(&path, "EOS sequence")?;
        let sequence = parse_sequence(label, &text)?;
        debug!(
            "loaded EOS '{label}' from {}: {} stable points, M_max={:.4}",
            path.display(),
            sequence.len(),
            sequence.max_ns_mass()
        );
        Ok(sequence)
    }
}

/// Parse sequence text (gravitational mass, baryonic mass, compactness, ...).
pub fn parse_sequence(label: &str, text: &str) -> Result<EosSequence, AppError> {
    let rows = parse_numeric_rows(text, 3)
        .map_err(|e| AppError::eos(format!("EOS sequence '{label}': {e}")))?;
    let points: Vec<EosPoint> = rows
        .iter()
        .map(|row| EosPoint {
            gravitational_mass: row[0],
            baryonic_mass: row[1],
            compactness: row[2],
        })
        .collect();
    EosSequence::new(label, &points)
}

fn validate_label(label: &str) -> Result<(), AppError> {
    let ok = !label.is_empty()
        && !label.starts_with('.')
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if ok {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "Invalid EOS label '{label}': use letters, digits, '_', '-' or '.'."
        )))
    }
}

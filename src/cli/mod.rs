//! Command-line parsing for the EM-bright estimator.
//!
//! Argument parsing and command dispatch stay separate from the estimation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_EOS_LABEL, DEFAULT_SKIP_HEADER, DEFAULT_SPIN_COLUMN, DEFAULT_THRESHOLD};
use crate::io::EOS_DIR_ENV;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "embright", version, about = "EM-bright probability of compact binary mergers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands, one per input representation.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate from a posterior-sample table with named columns.
    Posterior(PosteriorArgs),
    /// Estimate from ambiguity-ellipsoid samples (`index mc eta chi` rows).
    Ellipsoid(EllipsoidArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct PosteriorArgs {
    /// Posterior-sample table (whitespace delimited).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Number of initial samples to discard as burn-in.
    #[arg(long, default_value_t = 0)]
    pub burn: usize,

    /// Preamble lines preceding the column-name row.
    #[arg(long, default_value_t = DEFAULT_SKIP_HEADER)]
    pub skip_header: usize,

    /// Column used as effective spin.
    #[arg(long, default_value = DEFAULT_SPIN_COLUMN)]
    pub spin_column: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct EllipsoidArgs {
    /// Ellipsoid sample matrix (whitespace delimited, no header).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Remnant mass (Msun) above which a disk counts as EM-relevant.
    #[arg(short = 't', long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// EOS label; loads `equil_<LABEL>.dat`.
    #[arg(long, default_value = DEFAULT_EOS_LABEL)]
    pub eos: String,

    /// Directory holding EOS sequence files.
    #[arg(long, env = EOS_DIR_ENV)]
    pub eos_dir: Option<PathBuf>,

    /// Reserved output destination (currently not written).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,

    /// Include the per-sample remnant masses in the output.
    #[arg(long)]
    pub remnants: bool,
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves configuration (flags, `.env`, defaults)
//! - runs the estimation pipeline
//! - prints the summary

use clap::Parser;

use crate::cli::{Command, CommonArgs};
use crate::domain::{EstimateConfig, InputSource, PosteriorOptions};
use crate::error::AppError;
use crate::io::{EOS_DIR_ENV, FileEosLoader};
use crate::models::Foucart2012;

pub mod pipeline;

/// Entry point for the `embright` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` must be loaded before clap reads `EMBRIGHT_EOS_DIR`.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    let config = config_from_command(cli.command)?;
    handle_estimate(&config)
}

fn handle_estimate(config: &EstimateConfig) -> Result<(), AppError> {
    let loader = FileEosLoader::new(&config.eos_dir);
    let run = pipeline::run_estimate(config, &loader, Foucart2012)?;

    if config.json {
        println!("{}", crate::report::format_run_json(&run, config)?);
    } else {
        println!("{}", crate::report::format_run_summary(&run, config));
    }
    Ok(())
}

pub fn config_from_command(command: Command) -> Result<EstimateConfig, AppError> {
    let (input, common) = match command {
        Command::Posterior(args) => (
            InputSource::Posterior {
                path: args.input,
                options: PosteriorOptions {
                    burn: args.burn,
                    skip_header: args.skip_header,
                    spin_column: args.spin_column,
                },
            },
            args.common,
        ),
        Command::Ellipsoid(args) => (InputSource::Ellipsoid { path: args.input }, args.common),
    };
    config_from_args(input, common)
}

fn config_from_args(input: InputSource, common: CommonArgs) -> Result<EstimateConfig, AppError> {
    if !common.threshold.is_finite() || common.threshold < 0.0 {
        return Err(AppError::config(format!(
            "--threshold must be finite and >= 0, got {}.",
            common.threshold
        )));
    }

    let eos_dir = match common.eos_dir {
        Some(dir) => dir,
        None => {
            return Err(AppError::config(format!(
                "No EOS directory given: pass --eos-dir or set {EOS_DIR_ENV} (.env)."
            )));
        }
    };

    Ok(EstimateConfig {
        input,
        output: common.output,
        threshold: common.threshold,
        eos_label: common.eos,
        eos_dir,
        json: common.json,
        print_remnants: common.remnants,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::Cli;
    use crate::error::ErrorKind;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).unwrap().command
    }

    #[test]
    fn posterior_defaults_follow_sampler_conventions() {
        let config = config_from_command(parse(&[
            "embright",
            "posterior",
            "samples.dat",
            "--eos-dir",
            "/eos",
        ]))
        .unwrap();

        let InputSource::Posterior { path, options } = &config.input else {
            panic!("expected posterior input");
        };
        assert_eq!(path, &PathBuf::from("samples.dat"));
        assert_eq!(options, &PosteriorOptions::default());
        assert_eq!(config.threshold, 0.03);
        assert_eq!(config.eos_label, "2H");
        assert_eq!(config.eos_dir, PathBuf::from("/eos"));
        assert!(config.output.is_none());
    }

    #[test]
    fn ellipsoid_flags_are_mapped() {
        let config = config_from_command(parse(&[
            "embright",
            "ellipsoid",
            "ell.dat",
            "--eos-dir",
            "/eos",
            "--eos",
            "SLy",
            "-t",
            "0.1",
            "-o",
            "out.txt",
            "--json",
            "--remnants",
        ]))
        .unwrap();

        assert_eq!(config.input, InputSource::Ellipsoid { path: PathBuf::from("ell.dat") });
        assert_eq!(config.eos_label, "SLy");
        assert_eq!(config.threshold, 0.1);
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert!(config.json && config.print_remnants);
    }

    #[test]
    fn missing_eos_dir_is_a_config_error() {
        if std::env::var_os(EOS_DIR_ENV).is_some() {
            return;
        }
        let err = config_from_command(parse(&["embright", "ellipsoid", "ell.dat"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains(EOS_DIR_ENV));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = config_from_command(parse(&[
            "embright",
            "ellipsoid",
            "ell.dat",
            "--eos-dir",
            "/eos",
            "--threshold=-1",
        ]))
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}

//! pwlctl - PWL Codec Control CLI
//!
//! Reduces and expands raw sample streams with a configured piecewise-linear
//! table, verifies the codec's round-trip error bounds and inspects
//! fixed-point gain tables.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod config;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pwl_codec::InterpolationMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{StreamArgs, VerifyArgs};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "pwlctl")]
#[command(about = "PWL Codec Control CLI - Reduce, expand and verify sensor sample streams")]
#[command(version)]
#[command(long_about = "
pwlctl drives the piecewise-linear bit-width codec from the command line.
Streams are headerless little-endian files: 4 bytes per wide sample,
2 bytes per narrow sample. Codec tables are read from YAML or JSON.

Use --json flag for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce wide samples (u32 LE) to narrow samples (u16 LE)
    Reduce {
        #[command(flatten)]
        stream: StreamArgs,

        /// Override the interpolation mode from the config file
        #[arg(short, long)]
        mode: Option<InterpolationMode>,
    },

    /// Expand narrow samples (u16 LE) back to wide samples (u32 LE)
    Expand {
        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Run the round-trip validation scenarios
    Verify(VerifyArgs),

    /// Show the fixed-point gain of every segment
    Gains {
        /// Codec configuration (.yaml, .yml or .json)
        #[arg(short, long, env = "PWLCTL_CONFIG")]
        config: PathBuf,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("pwlctl={0},pwl_codec={0}", log_level).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            let exit_code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            std::process::exit(exit_code);
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Reduce { stream, mode } => commands::stream::reduce(stream, *mode, cli.json),
        Commands::Expand { stream } => commands::stream::expand(stream, cli.json),
        Commands::Verify(args) => commands::verify::execute(args, cli.json),
        Commands::Gains { config } => commands::gains::execute(config, cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_global_flags_anywhere() -> TestResult {
        let cli = Cli::try_parse_from(["pwlctl", "--json", "verify"])?;
        assert!(cli.json);
        let cli = Cli::try_parse_from(["pwlctl", "verify", "--json", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    #[test]
    fn parse_reduce_with_mode_override() -> TestResult {
        let cli = Cli::try_parse_from([
            "pwlctl", "reduce", "-c", "pwl.yaml", "-i", "in.raw", "-o", "out.raw", "--mode",
            "exact", "-w", "4",
        ])?;
        match &cli.command {
            Commands::Reduce { stream, mode } => {
                assert_eq!(stream.config, PathBuf::from("pwl.yaml"));
                assert_eq!(stream.input, PathBuf::from("in.raw"));
                assert_eq!(stream.output, PathBuf::from("out.raw"));
                assert_eq!(stream.workers.map(|w| w.get()), Some(4));
                assert_eq!(*mode, Some(InterpolationMode::Exact));
            }
            _ => return Err("expected Reduce command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_mode_and_zero_workers() {
        assert!(
            Cli::try_parse_from([
                "pwlctl", "reduce", "-c", "a.yaml", "-i", "a", "-o", "b", "--mode", "float",
            ])
            .is_err()
        );
        assert!(
            Cli::try_parse_from(["pwlctl", "expand", "-c", "a.yaml", "-i", "a", "-o", "b", "-w", "0"])
                .is_err()
        );
    }

    #[test]
    fn parse_verify_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["pwlctl", "verify"])?;
        match &cli.command {
            Commands::Verify(args) => {
                assert!(args.mode.is_none());
                assert_eq!(args.max_in, 16);
                assert_eq!(args.window_start, 2000);
                assert_eq!(args.window_bits, 12);
            }
            _ => return Err("expected Verify command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_verify_rejects_out_of_range_depth() {
        assert!(Cli::try_parse_from(["pwlctl", "verify", "--max-in", "8"]).is_err());
        assert!(Cli::try_parse_from(["pwlctl", "verify", "--max-in", "17"]).is_err());
    }
}

//! Command implementations for pwlctl CLI

pub mod gains;
pub mod stream;
pub mod verify;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Args;
use pwl_codec::InterpolationMode;

/// Arguments shared by `reduce` and `expand`.
#[derive(Args, Debug)]
pub struct StreamArgs {
    /// Codec configuration (.yaml, .yml or .json)
    #[arg(short, long, env = "PWLCTL_CONFIG")]
    pub config: PathBuf,

    /// Raw little-endian sample file to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// Raw little-endian sample file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Worker threads (defaults to available parallelism, capped at four per core)
    #[arg(short, long)]
    pub workers: Option<NonZeroUsize>,
}

/// Arguments for `verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Only verify this interpolation mode (default: both)
    #[arg(long)]
    pub mode: Option<InterpolationMode>,

    /// Widest input bit depth in the linear sweep
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u8).range(9..=16))]
    pub max_in: u8,

    /// First input value of the windowed scenario
    #[arg(long, default_value_t = 2000)]
    pub window_start: u32,

    /// Output bit depth of the windowed scenario
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub window_bits: u8,
}

/// Requested workers are capped at this many per available core.
const WORKERS_PER_CORE: usize = 4;

/// Pick the worker count for a batch.
pub(crate) fn worker_count(requested: Option<NonZeroUsize>) -> NonZeroUsize {
    let cores = std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN);
    clamp_workers(requested, cores)
}

fn clamp_workers(requested: Option<NonZeroUsize>, cores: NonZeroUsize) -> NonZeroUsize {
    let per_core = NonZeroUsize::new(WORKERS_PER_CORE).unwrap_or(NonZeroUsize::MIN);
    let cap = cores.saturating_mul(per_core);
    requested.map_or(cores, |w| w.min(cap))
}

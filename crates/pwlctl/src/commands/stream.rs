//! Raw stream reduce and expand commands

use std::fs;

use anyhow::Result;
use pwl_codec::{InterpolationMode, stream};
use serde_json::json;
use tracing::info;

use super::{StreamArgs, worker_count};
use crate::error::CliError;
use crate::{config, output};

/// Reduce a wide-sample file to a narrow-sample file.
pub fn reduce(args: &StreamArgs, mode: Option<InterpolationMode>, json: bool) -> Result<()> {
    let codec = config::load(&args.config, mode)?.build().map_err(CliError::from)?;

    let bytes = fs::read(&args.input).map_err(CliError::from)?;
    let wide = stream::decode_wide(&bytes).map_err(CliError::from)?;

    let workers = worker_count(args.workers);
    let mut narrow = vec![0u16; wide.len()];
    codec
        .reduce_parallel(&wide, &mut narrow, workers)
        .map_err(CliError::from)?;
    fs::write(&args.output, stream::encode_narrow(&narrow)).map_err(CliError::from)?;

    info!(
        samples = wide.len(),
        mode = %codec.mode(),
        workers = workers.get(),
        "reduced stream"
    );

    let message = format!(
        "Reduced {} samples ({}) into {}",
        wide.len(),
        codec.mode(),
        args.output.display()
    );
    let summary = json!({
        "samples": wide.len(),
        "mode": codec.mode(),
        "input": args.input.display().to_string(),
        "output": args.output.display().to_string(),
    });
    output::print_success(&message, "reduce", &summary, json);
    Ok(())
}

/// Expand a narrow-sample file back to a wide-sample file.
pub fn expand(args: &StreamArgs, json: bool) -> Result<()> {
    // decode is always exact, so the exact codec skips the gain limits
    let codec = config::load(&args.config, Some(InterpolationMode::Exact))?
        .build()
        .map_err(CliError::from)?;

    let bytes = fs::read(&args.input).map_err(CliError::from)?;
    let narrow = stream::decode_narrow(&bytes).map_err(CliError::from)?;

    let workers = worker_count(args.workers);
    let mut wide = vec![0u32; narrow.len()];
    codec
        .expand_parallel(&narrow, &mut wide, workers)
        .map_err(CliError::from)?;
    fs::write(&args.output, stream::encode_wide(&wide)).map_err(CliError::from)?;

    info!(samples = narrow.len(), workers = workers.get(), "expanded stream");

    let message = format!(
        "Expanded {} samples into {}",
        narrow.len(),
        args.output.display()
    );
    let summary = json!({
        "samples": narrow.len(),
        "input": args.input.display().to_string(),
        "output": args.output.display().to_string(),
    });
    output::print_success(&message, "expand", &summary, json);
    Ok(())
}

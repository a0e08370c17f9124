//! Gain table inspection command

use std::path::Path;

use anyhow::Result;
use pwl_codec::{GAIN_FBITS, GainTable};
use serde::Serialize;

use crate::error::CliError;
use crate::{config, output};

/// One segment of the table with its fixed-point gain.
#[derive(Debug, Serialize)]
struct SegmentGain {
    segment: usize,
    x_lo: u32,
    x_hi: u32,
    y_lo: u16,
    y_hi: u16,
    gain: u32,
    slope: f64,
}

/// Print the fixed-point gain of every segment in the configured table.
pub fn execute(config_path: &Path, json: bool) -> Result<()> {
    let config = config::load(config_path, None)?;
    let gains = GainTable::new(&config.control_points).map_err(CliError::from)?;
    let rows = segment_gains(&config.control_points, &gains);

    if json {
        output::print_json("segments", &rows);
        return Ok(());
    }

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.segment.to_string(),
                format!("[{}, {}]", row.x_lo, row.x_hi),
                format!("[{}, {}]", row.y_lo, row.y_hi),
                row.gain.to_string(),
                format!("{:.6}", row.slope),
            ]
        })
        .collect();
    output::print_table(&["segment", "x", "y", "gain", "slope"], &table);
    Ok(())
}

fn segment_gains(points: &pwl_codec::ControlPoints, gains: &GainTable) -> Vec<SegmentGain> {
    points
        .segments()
        .enumerate()
        .map(|(segment, seg)| {
            let gain = gains.gain(segment);
            SegmentGain {
                segment,
                x_lo: seg.x_lo,
                x_hi: seg.x_hi,
                y_lo: seg.y_lo,
                y_hi: seg.y_hi,
                gain,
                slope: f64::from(gain) / f64::from(1u32 << GAIN_FBITS),
            }
        })
        .collect()
}

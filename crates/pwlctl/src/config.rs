//! Codec configuration file loading

use std::fs;
use std::path::Path;

use pwl_codec::{CodecConfig, InterpolationMode};
use tracing::debug;

use crate::error::CliError;

/// Load a codec configuration, choosing the format from the file extension.
///
/// `mode` overrides the mode stored in the file.
pub fn load(path: &Path, mode: Option<InterpolationMode>) -> Result<CodecConfig, CliError> {
    let content = fs::read_to_string(path)
        .map_err(|_| CliError::ConfigNotFound(path.display().to_string()))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let mut config: CodecConfig = match extension.as_str() {
        "json" => serde_json::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        _ => return Err(CliError::UnsupportedFormat(path.display().to_string())),
    };

    if let Some(mode) = mode {
        config.mode = mode;
    }

    debug!(
        path = %path.display(),
        points = config.control_points.len(),
        mode = %config.mode,
        "loaded codec configuration"
    );
    Ok(config)
}

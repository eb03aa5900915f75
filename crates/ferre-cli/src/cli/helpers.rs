use super::CliError;
use anyhow::Context;
use ferre_core::domain::{ParamInput, RunConfiguration};
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub(super) fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when commands run in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parses `4500` as a scalar and `4500,4600` as a sequence.
pub(super) fn parse_param_input(raw: &str) -> Result<ParamInput, String> {
    let values = raw
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", token))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let [value] = values.as_slice() {
        return Ok(ParamInput::Scalar(*value));
    }
    Ok(ParamInput::Sequence(values))
}

pub(super) fn load_run_configuration(path: Option<&Path>) -> Result<RunConfiguration, CliError> {
    match path {
        Some(path) => Ok(RunConfiguration::from_json_file(path)?),
        None => Ok(RunConfiguration::default()),
    }
}

pub(super) fn ensure_working_dir(dir: &Path) -> Result<(), CliError> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create working directory '{}'", dir.display()))?;
    Ok(())
}

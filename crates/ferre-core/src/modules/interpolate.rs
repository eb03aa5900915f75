use super::ipf::write_interpolate_ipf;
use super::nml::write_input_nml;
use super::runner::OutputMode;
use super::traits::ProgramRunner;
use crate::common::config::GridHeaderResolver;
use crate::domain::{FerreResult, INPUT_IPF, ParameterInputs, RunConfiguration};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Files involved in one interpolation run. The output file is where FERRE
/// was told to write; it is not read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpolationRun {
    pub working_dir: PathBuf,
    pub nml_path: PathBuf,
    pub ipf_path: PathBuf,
    pub output_path: PathBuf,
}

/// Writes both control files into `dir` and runs FERRE there.
///
/// The parameter file is always `input.ipf`, whatever `config.pfile` says.
pub fn interpolate(
    dir: &Path,
    inputs: ParameterInputs,
    config: &RunConfiguration,
    resolver: &dyn GridHeaderResolver,
    runner: &dyn ProgramRunner,
    mode: OutputMode,
) -> FerreResult<InterpolationRun> {
    let config = RunConfiguration {
        pfile: INPUT_IPF.to_string(),
        ..config.clone()
    };

    let nml_path = write_input_nml(dir, &config, resolver)?;
    let ipf_path = write_interpolate_ipf(dir, inputs)?;
    runner.run(dir, mode)?;

    Ok(InterpolationRun {
        working_dir: dir.to_path_buf(),
        nml_path,
        ipf_path,
        output_path: dir.join(&config.offile),
    })
}

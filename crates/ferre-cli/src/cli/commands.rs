use super::CliError;
use super::helpers::{ensure_working_dir, load_run_configuration, parse_param_input};
use anyhow::Context;
use ferre_core::common::config::EnvGridHeaderResolver;
use ferre_core::domain::{FileAccess, FileFormat, ParamInput, ParameterInputs, RunConfiguration};
use ferre_core::modules::{
    FerreRunner, OutputMode, ProgramRunner, interpolate, write_input_nml, write_interpolate_ipf,
};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct WriteNmlArgs {
    /// Working directory that receives input.nml
    #[arg(long)]
    dir: PathBuf,

    /// JSON run configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: NmlOverrides,
}

#[derive(clap::Args, Default)]
pub(super) struct NmlOverrides {
    /// Name of the input parameter file
    #[arg(long)]
    pfile: Option<String>,

    /// Name of the output model file
    #[arg(long)]
    offile: Option<String>,

    /// Number of dimensions of the model grid
    #[arg(long)]
    ndim: Option<usize>,

    /// Number of parameters to search (0 = interpolation only)
    #[arg(long)]
    nov: Option<usize>,

    /// Model grid header (default: FERRE_SYNTHFILE or FERRE_LIBRARY_DIR)
    #[arg(long)]
    synthfile: Option<PathBuf>,

    /// Interpolation order
    #[arg(long)]
    inter: Option<u32>,

    /// Grid file format (0 = ascii, 1 = unformatted)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    f_format: Option<u8>,

    /// Grid access mode (0 = load whole grid, 1 = direct access)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    f_access: Option<u8>,
}

impl NmlOverrides {
    fn apply(self, mut config: RunConfiguration) -> RunConfiguration {
        if let Some(pfile) = self.pfile {
            config.pfile = pfile;
        }
        if let Some(offile) = self.offile {
            config.offile = offile;
        }
        if let Some(ndim) = self.ndim {
            config.ndim = ndim;
        }
        if let Some(nov) = self.nov {
            config.nov = nov;
        }
        if self.synthfile.is_some() {
            config.synthfile = self.synthfile;
        }
        if let Some(inter) = self.inter {
            config.inter = inter;
        }
        if let Some(format) = self.f_format.and_then(FileFormat::from_code) {
            config.f_format = format;
        }
        if let Some(access) = self.f_access.and_then(FileAccess::from_code) {
            config.f_access = access;
        }
        config
    }
}

#[derive(clap::Args)]
pub(super) struct ParameterArgs {
    /// Effective temperature (K); comma-separated for several records
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    teff: ParamInput,

    /// log10 surface gravity
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    logg: ParamInput,

    /// Overall metallicity [M/H]
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    metals: ParamInput,

    /// Alpha enhancement [alpha/M]
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    am: ParamInput,

    /// Nitrogen enhancement [N/M]
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    nm: ParamInput,

    /// Carbon enhancement [C/M]
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    cm: ParamInput,

    /// Microturbulence (km/s), for 7D grids
    #[arg(long, allow_hyphen_values = true, value_parser = parse_param_input)]
    vm: Option<ParamInput>,
}

impl ParameterArgs {
    fn into_inputs(self) -> ParameterInputs {
        let inputs =
            ParameterInputs::new(self.teff, self.logg, self.metals, self.am, self.nm, self.cm);
        match self.vm {
            Some(vm) => inputs.with_vm(vm),
            None => inputs,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct WriteIpfArgs {
    /// Working directory that receives input.ipf
    #[arg(long)]
    dir: PathBuf,

    #[command(flatten)]
    params: ParameterArgs,
}

#[derive(clap::Args)]
pub(super) struct ProgramArgs {
    /// FERRE executable name or path
    #[arg(long, env = "FERRE_BIN", default_value = "ferre")]
    ferre_bin: String,

    /// Pass FERRE's own output through to this terminal
    #[arg(long)]
    show_output: bool,
}

impl ProgramArgs {
    fn runner(&self) -> FerreRunner {
        FerreRunner::with_program(self.ferre_bin.clone())
    }

    fn output_mode(&self) -> OutputMode {
        OutputMode::from_verbose(self.show_output)
    }
}

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Working directory containing input.nml
    #[arg(long)]
    dir: PathBuf,

    #[command(flatten)]
    program: ProgramArgs,
}

#[derive(clap::Args)]
pub(super) struct InterpolateArgs {
    /// Working directory for this run
    #[arg(long)]
    dir: PathBuf,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    params: ParameterArgs,

    #[command(flatten)]
    program: ProgramArgs,
}

pub(super) fn run_write_nml_command(args: WriteNmlArgs) -> Result<i32, CliError> {
    let config = args
        .overrides
        .apply(load_run_configuration(args.config.as_deref())?);
    ensure_working_dir(&args.dir)?;

    let path = write_input_nml(&args.dir, &config, &EnvGridHeaderResolver::from_env())?;
    println!("{}", path.display());
    Ok(0)
}

pub(super) fn run_write_ipf_command(args: WriteIpfArgs) -> Result<i32, CliError> {
    ensure_working_dir(&args.dir)?;
    let path = write_interpolate_ipf(&args.dir, args.params.into_inputs())?;
    println!("{}", path.display());
    Ok(0)
}

pub(super) fn run_run_command(args: RunArgs) -> Result<i32, CliError> {
    args.program
        .runner()
        .run(&args.dir, args.program.output_mode())?;
    Ok(0)
}

pub(super) fn run_interpolate_command(args: InterpolateArgs) -> Result<i32, CliError> {
    let config = load_run_configuration(args.config.as_deref())?;
    ensure_working_dir(&args.dir)?;

    let run = interpolate(
        &args.dir,
        args.params.into_inputs(),
        &config,
        &EnvGridHeaderResolver::from_env(),
        &args.program.runner(),
        args.program.output_mode(),
    )?;

    tracing::info!(output = %run.output_path.display(), "interpolation finished");
    let summary =
        serde_json::to_string_pretty(&run).context("failed to render interpolation summary")?;
    println!("{}", summary);
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::NmlOverrides;
    use ferre_core::domain::{FileAccess, FileFormat, RunConfiguration};
    use std::path::PathBuf;

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = NmlOverrides {
            ndim: Some(7),
            synthfile: Some(PathBuf::from("/grids/a.hdr")),
            f_format: Some(0),
            ..NmlOverrides::default()
        };

        let config = overrides.apply(RunConfiguration::default());
        assert_eq!(config.ndim, 7);
        assert_eq!(config.nov, 0);
        assert_eq!(config.synthfile, Some(PathBuf::from("/grids/a.hdr")));
        assert_eq!(config.f_format, FileFormat::Ascii);
        assert_eq!(config.f_access, FileAccess::Direct);
        assert_eq!(config.pfile, "input.ipf");
    }
}

mod commands;
mod helpers;

use clap::Parser;
use ferre_core::domain::{ErrorCategory, FerreError};

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().collect();
    match parse_and_dispatch(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            error.exit_code()
        }
    }
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(name = "ferre-rs", version, about = "Prepare and run FERRE interpolation jobs")]
struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Write input.nml into a working directory
    WriteNml(commands::WriteNmlArgs),
    /// Write input.ipf into a working directory
    WriteIpf(commands::WriteIpfArgs),
    /// Run FERRE in a prepared working directory
    Run(commands::RunArgs),
    /// Write both control files and run FERRE
    Interpolate(commands::InterpolateArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::WriteNml(args) => commands::run_write_nml_command(args),
        CliCommand::WriteIpf(args) => commands::run_write_ipf_command(args),
        CliCommand::Run(args) => commands::run_run_command(args),
        CliCommand::Interpolate(args) => commands::run_interpolate_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Ferre(#[from] FerreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage(_) => ErrorCategory::InputValidationError,
            Self::Ferre(error) => error.category(),
            Self::Internal(_) => ErrorCategory::InternalError,
        }
    }

    fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    fn diagnostic_line(&self) -> String {
        match self {
            Self::Usage(message) => format!("ERROR: [INPUT.CLI_USAGE] {}", message.trim_end()),
            Self::Ferre(error) => error.diagnostic_line(),
            Self::Internal(error) => format!("ERROR: [SYS.CLI] {error:#}"),
        }
    }
}

use super::traits::ProgramRunner;
use crate::domain::{CapturedOutput, FerreError, FerreResult};
use std::path::Path;
use std::process::Command;

pub const DEFAULT_PROGRAM: &str = "ferre";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Program output goes to the caller's terminal.
    Inherit,
    #[default]
    Capture,
}

impl OutputMode {
    pub const fn from_verbose(verbose: bool) -> Self {
        if verbose { Self::Inherit } else { Self::Capture }
    }
}

/// Runs the FERRE executable with a working directory as its cwd. No
/// arguments are passed; the program reads `input.nml` from that directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FerreRunner {
    program: String,
}

impl Default for FerreRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FerreRunner {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ProgramRunner for FerreRunner {
    fn run(&self, dir: &Path, mode: OutputMode) -> FerreResult<()> {
        tracing::info!(program = %self.program, dir = %dir.display(), ?mode, "starting FERRE");

        let mut command = Command::new(&self.program);
        command.current_dir(dir);

        let launch_error = |source| FerreError::Launch {
            program: self.program.clone(),
            source,
        };

        let (status, captured) = match mode {
            OutputMode::Inherit => {
                let status = command.status().map_err(launch_error)?;
                (status, None)
            }
            OutputMode::Capture => {
                let output = command.output().map_err(launch_error)?;
                let captured = CapturedOutput {
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                };
                (output.status, Some(captured))
            }
        };

        if status.success() {
            tracing::info!(dir = %dir.display(), "FERRE finished");
            return Ok(());
        }

        if let Some(captured) = &captured {
            tracing::debug!(
                dir = %dir.display(),
                stdout = %captured.stdout,
                stderr = %captured.stderr,
                "captured FERRE output"
            );
        }
        Err(FerreError::Execution {
            dir: dir.to_path_buf(),
            exit_code: status.code(),
            captured,
        })
    }
}

/// Runs `ferre` in `dir`, showing its output only when `verbose` is set.
pub fn run_ferre(dir: &Path, verbose: bool) -> FerreResult<()> {
    FerreRunner::new().run(dir, OutputMode::from_verbose(verbose))
}

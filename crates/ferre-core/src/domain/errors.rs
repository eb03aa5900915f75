use std::path::{Path, PathBuf};

pub type FerreResult<T> = Result<T, FerreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl ErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }
}

/// Output collected from a quiet run of the external program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FerreError {
    /// The program started but exited unsuccessfully. The message only names
    /// the directory; captured output stays on the error.
    #[error("running FERRE instance in directory {} failed", .dir.display())]
    Execution {
        dir: PathBuf,
        exit_code: Option<i32>,
        captured: Option<CapturedOutput>,
    },

    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    InputValidation {
        placeholder: &'static str,
        message: String,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Config {
        placeholder: &'static str,
        message: String,
    },
}

impl FerreError {
    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::InputValidation {
            placeholder,
            message: message.into(),
        }
    }

    pub fn config(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            placeholder,
            message: message.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Execution { .. } => ErrorCategory::ComputationError,
            Self::Launch { .. } | Self::Io { .. } => ErrorCategory::IoSystemError,
            Self::InputValidation { .. } | Self::Config { .. } => {
                ErrorCategory::InputValidationError
            }
        }
    }

    pub const fn placeholder(&self) -> &'static str {
        match self {
            Self::Execution { .. } => "RUN.FERRE_EXIT",
            Self::Launch { .. } => "IO.FERRE_LAUNCH",
            Self::Io { .. } => "IO.CONTROL_FILE",
            Self::InputValidation { placeholder, .. } | Self::Config { placeholder, .. } => {
                *placeholder
            }
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Exit status of the external program, when it ran and reported one.
    pub fn program_exit_code(&self) -> Option<i32> {
        match self {
            Self::Execution { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    pub fn captured_output(&self) -> Option<&CapturedOutput> {
        match self {
            Self::Execution { captured, .. } => captured.as_ref(),
            _ => None,
        }
    }

    pub fn diagnostic_line(&self) -> String {
        format!("ERROR: [{}] {}", self.placeholder(), self)
    }
}

use std::process::ExitCode;

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    /// The pipeline ran and returned an error.
    RetrievalError = 1,
    /// Configuration, input files, or the store could not be loaded.
    StartupError = 2,
}

impl CliExitCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code.as_u8())
    }
}

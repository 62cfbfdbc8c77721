use thiserror::Error;

use crate::surface::SurfaceError;

/// Exit status for an invalid command-surface schema (sysexits `EX_SOFTWARE`).
pub const EXIT_SOFTWARE: i32 = 70;
pub const EXIT_ENGINE_FAILURE: i32 = 1;

#[derive(Error, Debug)]
pub enum GenApiError {
    /// Rejected on the command line, before any configuration was built.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("invalid command surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("API surface generation failed: {0:#}")]
    Engine(anyhow::Error),
}

impl GenApiError {
    pub fn exit_code(&self) -> i32 {
        match self {
            // 0 for --help/--version, 2 for real usage errors
            GenApiError::Usage(e) => e.exit_code(),
            GenApiError::Surface(_) => EXIT_SOFTWARE,
            GenApiError::Engine(_) => EXIT_ENGINE_FAILURE,
        }
    }

    /// Writes the error the way the user should see it. Usage errors go
    /// through clap so help and version output keep their formatting.
    pub fn report(&self) {
        match self {
            GenApiError::Usage(e) => {
                let _ = e.print();
            }
            other => eprintln!("Error: {other}"),
        }
    }
}

use std::ffi::OsString;

use clap::FromArgMatches;
use tracing::{debug, info};

use crate::cli::{build_config, Args, GenApiConfig};
use crate::error::GenApiError;
use crate::surface::Surface;

/// The API-surface generator behind this command line. It receives a
/// finished configuration and either succeeds or reports why it failed.
pub trait SurfaceEngine {
    fn generate(&self, config: GenApiConfig) -> anyhow::Result<()>;
}

impl<F> SurfaceEngine for F
where
    F: Fn(GenApiConfig) -> anyhow::Result<()>,
{
    fn generate(&self, config: GenApiConfig) -> anyhow::Result<()> {
        self(config)
    }
}

/// Hands `config` to the engine exactly once. Engine failures are passed
/// through untouched.
pub fn dispatch(engine: &dyn SurfaceEngine, config: GenApiConfig) -> Result<(), GenApiError> {
    let assemblies = config.assemblies.len();
    match engine.generate(config) {
        Ok(()) => {
            info!(assemblies, "API surface generation finished");
            Ok(())
        }
        Err(e) => Err(GenApiError::Engine(e)),
    }
}

/// Parses `tokens` (program name first), builds the configuration and runs
/// the engine. Any usage problem returns before the engine is touched.
pub fn run<I, T>(tokens: I, engine: &dyn SurfaceEngine) -> Result<(), GenApiError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let surface = Surface::new()?;
    let matches = surface.parse(tokens)?;
    let args = Args::from_arg_matches(&matches)?;
    debug!(?args, "parsed command line");

    let config = build_config(&args);
    dispatch(engine, config)
}

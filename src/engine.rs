use std::ffi::OsString;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::cli::GenApiConfig;
use crate::dispatch::SurfaceEngine;

pub const ENGINE_ENV: &str = "GENAPI_ENGINE";
pub const DEFAULT_ENGINE: &str = "genapi-engine";

/// Runs the generator as a child process. The configuration is written to
/// its stdin as JSON; stdout and stderr are inherited so whatever the
/// generator emits reaches the user unchanged.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    program: OsString,
    args: Vec<OsString>,
}

impl ProcessEngine {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Uses `$GENAPI_ENGINE`, falling back to `genapi-engine` on `PATH`.
    pub fn from_env() -> Self {
        let program = std::env::var_os(ENGINE_ENV)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_ENGINE.into());
        Self::new(program)
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl SurfaceEngine for ProcessEngine {
    fn generate(&self, config: GenApiConfig) -> Result<()> {
        let payload = serde_json::to_vec(&config).context("Failed to serialize configuration")?;
        let program = self.program.to_string_lossy();
        debug!(program = %program, args = ?self.args, "launching engine");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to launch engine `{program}`"))?;

        // Take stdin so it is closed before waiting; the engine reads to EOF.
        // An engine that exits without reading is judged by its exit status.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&payload) {
                Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                    return Err(e).with_context(|| {
                        format!("Failed to send configuration to engine `{program}`")
                    });
                }
                _ => {}
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for engine `{program}`"))?;
        if !status.success() {
            bail!("engine `{program}` exited with {status}");
        }
        Ok(())
    }
}

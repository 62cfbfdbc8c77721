//
// lib.rs
// genapi
//
// Library entry that re-exports the command surface, the configuration builder and the dispatcher so the binary and the tests share one pipeline.
//
// Public crate interface: re-export modules used by the binary and tests.
pub mod cli;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod paths;
pub mod surface;

pub use cli::{build_config, Args, GenApiConfig};
pub use dispatch::{dispatch, run, SurfaceEngine};
pub use engine::ProcessEngine;
pub use error::GenApiError;
pub use surface::{Arity, OptionDecl, Surface, SurfaceError, ValueKind};

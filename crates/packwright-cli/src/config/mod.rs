//! Layered declaration loading.
//!
//! Priority: CLI flags > `PACKWRIGHT_*` environment > config file > defaults.
//! Nested keys in environment variables are separated by `__`, so
//! `PACKWRIGHT_DEV_SERVER__PORT=4000` sets `dev_server.port`.

mod loading;

use std::path::PathBuf;

use packwright_config::{Declarations, Mode, PipelineConfig};

use crate::error::Result;

pub use loading::{load, locate_config, resolve_mode};

pub const ENV_PREFIX: &str = "PACKWRIGHT_";

/// Declarations after layering, plus the invocation context they belong to.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub mode: Mode,
    pub cwd: PathBuf,
    /// File the declarations came from
    pub source: PathBuf,
    pub declarations: Declarations,
}

impl LoadedConfig {
    pub fn assemble(&self) -> Result<PipelineConfig> {
        Ok(packwright_config::assemble(
            self.mode,
            &self.declarations,
            &self.cwd,
        )?)
    }
}

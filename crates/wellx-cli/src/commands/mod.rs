//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use wellx_core::WellxConfig;

/// Load the configuration from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&str>) -> anyhow::Result<WellxConfig> {
    match path {
        Some(path) => Ok(WellxConfig::from_file(Path::new(path))?),
        None => Ok(WellxConfig::default()),
    }
}

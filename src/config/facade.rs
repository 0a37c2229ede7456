//! ConfigLoader: the single entry point for loading configuration.

use super::merge::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::LoomwrightConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`LoomwrightConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global file, then workspace files under
    /// `workspace_root/config/`, then `LOOMWRIGHT__SECTION__KEY` variables.
    pub fn load(workspace_root: &Path) -> Result<LoomwrightConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(
            Environment::with_prefix("LOOMWRIGHT")
                .separator("__")
                .try_parsing(true),
        );

        let config: LoomwrightConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            min_frames = config.loom.min_frames,
            min_treadles = config.loom.min_treadles,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Defaults overlaid with a single explicit file; no other sources.
    pub fn load_from_file(path: &Path) -> Result<LoomwrightConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Where the global config file lives, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Built-in defaults only.
    pub fn defaults() -> LoomwrightConfig {
        LoomwrightConfig::default()
    }
}

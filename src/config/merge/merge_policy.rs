//! Built-in defaults every layered load starts from.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("loom.min_frames", 8)?
        .set_default("loom.min_treadles", 10)?
        .set_default("loom.compact", true)
}

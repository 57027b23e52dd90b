use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalysisSettings, CliOverrides, Config, DataSources, LoggingSettings, OutputSettings,
};

/// The file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "spreadlab.toml";

/// Prefix of the environment variables that override file values,
/// e.g. `SPREADLAB__ANALYSIS__START_DATE=2022-01-03`.
pub const ENV_PREFIX: &str = "SPREADLAB";

/// Loads the application configuration.
///
/// Sources are layered: built-in defaults, then the TOML file (optional when
/// `path` is `None`, required otherwise), then `SPREADLAB__*` environment
/// variables. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Missing sections and keys fall back to `Default` through `#[serde(default)]`.
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

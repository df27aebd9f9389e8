use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsConfig, Config, EmotionCategories, MAX_WEIGHT, ScoringWeights};

/// Prefix for environment overrides, e.g. `MINDSET_ANALYTICS__LEANING_THRESHOLD=20`.
pub const ENV_PREFIX: &str = "MINDSET";

/// Loads the application configuration from an optional `config.toml` in the
/// working directory, layered under `MINDSET_*` environment variables.
///
/// Every setting has a default, so running without any file is valid.
pub fn load_config() -> Result<Config, ConfigError> {
    let source = config::File::with_name("config").required(false);
    build(source)
}

/// Same as [`load_config`], but reads the given file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let source = config::File::from(path).required(true);
    build(source)
}

fn build<T>(file: T) -> Result<Config, ConfigError>
where
    T: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        leaning_threshold = %config.analytics.leaning_threshold,
        full_mark_factor = %config.analytics.full_mark_factor,
        "Configuration loaded."
    );

    Ok(config)
}

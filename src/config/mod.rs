//! Output configuration: config files, `STREST_RW_*` environment overrides,
//! and the validated [`OutputConfig`].
mod env;
mod loader;
mod parse;
mod settings;
pub mod types;

#[cfg(test)]
mod tests;

pub use env::{ENV_PREFIX, env_overrides, overrides_from_env};
pub use loader::{load_config, load_config_file};
pub use settings::{
    DEFAULT_METRIC_PREFIX, DEFAULT_PUSH_INTERVAL, DEFAULT_TIMEOUT, DEFAULT_TREND_STATS,
    DEFAULT_URL, OutputConfig, RemoteAuth,
};
pub use types::{ConfigFile, DurationValue};

pub(crate) use parse::{parse_bool, parse_duration_value, parse_list};

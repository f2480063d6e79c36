//! Command line arguments for `strest-rw`.
mod parsers;


use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigFile, DurationValue};

use parsers::{parse_bool_env, parse_header};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Streams load-test samples (JSON lines) to a Prometheus remote write endpoint."
)]
pub struct RemoteWriteArgs {
    /// Config file (.toml or .json); defaults to strest-rw.toml/strest-rw.json when present
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Remote write endpoint
    #[arg(long, short = 'u')]
    pub url: Option<String>,

    /// Flush interval (e.g. 500ms, 5s, 1m)
    #[arg(long = "push-interval")]
    pub push_interval: Option<String>,

    /// Request timeout (e.g. 5s)
    #[arg(long)]
    pub timeout: Option<String>,

    /// Extra request header as 'Name: value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Trend stats to export, comma separated (e.g. "p(95),p(99),avg")
    #[arg(long = "trend-stats", value_delimiter = ',')]
    pub trend_stats: Option<Vec<String>>,

    /// Send trends as native histograms instead of per-stat series
    #[arg(long = "native-histogram")]
    pub native_histogram: bool,

    /// Prefix for exported metric names
    #[arg(long = "metric-prefix")]
    pub metric_prefix: Option<String>,

    /// Read samples from this file instead of stdin
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Enable verbose logging (sets log level to debug unless overridden by STREST_RW_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "debug")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl RemoteWriteArgs {
    /// Flags given on the command line, as the topmost config layer.
    #[must_use]
    pub fn overrides(&self) -> ConfigFile {
        ConfigFile {
            url: self.url.clone(),
            push_interval: self.push_interval.clone().map(DurationValue::Text),
            timeout: self.timeout.clone().map(DurationValue::Text),
            headers: (!self.headers.is_empty()).then(|| self.headers.iter().cloned().collect()),
            trend_as_native_histogram: self.native_histogram.then_some(true),
            trend_stats: self.trend_stats.clone(),
            metric_prefix: self.metric_prefix.clone(),
            ..ConfigFile::default()
        }
    }
}

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::sinks::{DEFAULT_MAX_BUCKETS, SinkFactory, TrendStatsResolver};

use super::types::{ConfigFile, DurationValue};

pub const DEFAULT_URL: &str = "http://localhost:9090/api/v1/write";
pub const DEFAULT_PUSH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_TREND_STATS: &[&str] = &["p(99)"];
pub const DEFAULT_METRIC_PREFIX: &str = "strest_";

/// Credentials attached to every write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAuth {
    Basic {
        username: String,
        password: Option<String>,
    },
    Bearer {
        token: String,
    },
}

/// Validated remote write output settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub url: Url,
    pub push_interval: Duration,
    pub timeout: Duration,
    pub headers: BTreeMap<String, String>,
    pub auth: Option<RemoteAuth>,
    pub insecure_skip_tls_verify: bool,
    pub trend_as_native_histogram: bool,
    pub trend_stats: TrendStatsResolver,
    pub metric_prefix: String,
    pub histogram_max_buckets: usize,
}

impl OutputConfig {
    /// Resolves defaults and validates the layered settings.
    ///
    /// # Errors
    ///
    /// Returns an error for an unparsable or non-http(s) URL, zero or
    /// malformed durations, conflicting credentials, unknown trend stats, an
    /// empty stat list with classic trends, or a zero bucket limit.
    pub fn from_file(file: ConfigFile) -> Result<Self, ConfigError> {
        let url = parse_url(file.url.as_deref().unwrap_or(DEFAULT_URL))?;
        let push_interval = resolve_duration(file.push_interval.as_ref(), DEFAULT_PUSH_INTERVAL)?;
        let timeout = resolve_duration(file.timeout.as_ref(), DEFAULT_TIMEOUT)?;

        let auth = match (file.username, file.password, file.bearer_token) {
            (Some(_), _, Some(_)) => {
                return Err(ConfigError::Conflict {
                    left: "username",
                    right: "bearer_token",
                });
            }
            (None, Some(_), _) => {
                return Err(ConfigError::PasswordWithoutUsername);
            }
            (Some(username), password, None) => Some(RemoteAuth::Basic { username, password }),
            (None, None, Some(token)) => Some(RemoteAuth::Bearer { token }),
            (None, None, None) => None,
        };

        let trend_as_native_histogram = file.trend_as_native_histogram.unwrap_or(false);
        let trend_stats = file.trend_stats.as_deref().map_or_else(
            || TrendStatsResolver::new(DEFAULT_TREND_STATS),
            TrendStatsResolver::new,
        )?;
        if trend_stats.is_empty() && !trend_as_native_histogram {
            return Err(ConfigError::TrendStatsEmpty);
        }

        let histogram_max_buckets = file.histogram_max_buckets.unwrap_or(DEFAULT_MAX_BUCKETS);
        if histogram_max_buckets == 0 {
            return Err(ConfigError::HistogramMaxBucketsZero);
        }

        Ok(Self {
            url,
            push_interval,
            timeout,
            headers: file.headers.unwrap_or_default(),
            auth,
            insecure_skip_tls_verify: file.insecure_skip_tls_verify.unwrap_or(false),
            trend_as_native_histogram,
            trend_stats,
            metric_prefix: file
                .metric_prefix
                .unwrap_or_else(|| DEFAULT_METRIC_PREFIX.to_owned()),
            histogram_max_buckets,
        })
    }

    /// Sink factory matching the configured trend encoding.
    #[must_use]
    pub fn sink_factory(&self) -> SinkFactory {
        if self.trend_as_native_histogram {
            SinkFactory::native_histogram(self.histogram_max_buckets)
        } else {
            SinkFactory::classic(self.trend_stats.clone())
        }
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::UnsupportedScheme {
            scheme: scheme.to_owned(),
        }),
    }
}

fn resolve_duration(
    value: Option<&DurationValue>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    value.map_or(Ok(default), DurationValue::to_duration)
}

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Raw output settings as read from a config file, the environment or the
/// command line. Unset fields fall back to the layer below.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(alias = "server_url")]
    pub url: Option<String>,
    pub push_interval: Option<DurationValue>,
    pub timeout: Option<DurationValue>,
    pub headers: Option<BTreeMap<String, String>>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
    pub insecure_skip_tls_verify: Option<bool>,
    pub trend_as_native_histogram: Option<bool>,
    pub trend_stats: Option<Vec<String>>,
    pub metric_prefix: Option<String>,
    pub histogram_max_buckets: Option<usize>,
}

impl ConfigFile {
    /// Layers `overrides` on top of `self`. Headers are merged by name, every
    /// other field is replaced when set in `overrides`.
    #[must_use]
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        let headers = match (self.headers, overrides.headers) {
            (Some(mut base), Some(extra)) => {
                base.extend(extra);
                Some(base)
            }
            (base, None) => base,
            (None, extra) => extra,
        };
        ConfigFile {
            url: overrides.url.or(self.url),
            push_interval: overrides.push_interval.or(self.push_interval),
            timeout: overrides.timeout.or(self.timeout),
            headers,
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            bearer_token: overrides.bearer_token.or(self.bearer_token),
            insecure_skip_tls_verify: overrides
                .insecure_skip_tls_verify
                .or(self.insecure_skip_tls_verify),
            trend_as_native_histogram: overrides
                .trend_as_native_histogram
                .or(self.trend_as_native_histogram),
            trend_stats: overrides.trend_stats.or(self.trend_stats),
            metric_prefix: overrides.metric_prefix.or(self.metric_prefix),
            histogram_max_buckets: overrides
                .histogram_max_buckets
                .or(self.histogram_max_buckets),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ConfigError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ConfigError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}

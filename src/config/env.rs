use std::collections::BTreeMap;

use crate::error::ConfigError;

use super::parse::{parse_bool, parse_list};
use super::types::{ConfigFile, DurationValue};

pub const ENV_PREFIX: &str = "STREST_RW_";
const HEADERS_PREFIX: &str = "HEADERS_";

/// Reads `STREST_RW_*` overrides from the process environment. Variables that
/// are not valid unicode are ignored.
///
/// # Errors
///
/// Returns an error when a recognised variable holds an invalid value.
pub fn overrides_from_env() -> Result<ConfigFile, ConfigError> {
    env_overrides(std::env::vars_os().filter_map(|(name, value)| {
        Some((name.into_string().ok()?, value.into_string().ok()?))
    }))
}

/// Builds an override layer from `(name, value)` pairs. Unknown
/// `STREST_RW_*` names are skipped so unrelated settings such as the log
/// filter can share the prefix.
///
/// `STREST_RW_HEADERS_X_SCOPE_ORGID=tenant` becomes the header
/// `x-scope-orgid: tenant`.
///
/// # Errors
///
/// Returns an error when a boolean cannot be parsed or a header variable
/// has no name.
pub fn env_overrides<I, K, V>(vars: I) -> Result<ConfigFile, ConfigError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut file = ConfigFile::default();
    let mut headers: BTreeMap<String, String> = BTreeMap::new();

    for (name, value) in vars {
        let name = name.as_ref();
        let value = value.as_ref();
        let Some(key) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if let Some(header) = key.strip_prefix(HEADERS_PREFIX) {
            if header.is_empty() {
                return Err(ConfigError::InvalidHeader {
                    name: name.to_owned(),
                });
            }
            headers.insert(header.to_ascii_lowercase().replace('_', "-"), value.to_owned());
            continue;
        }
        match key {
            "SERVER_URL" => file.url = Some(value.to_owned()),
            "PUSH_INTERVAL" => file.push_interval = Some(DurationValue::Text(value.to_owned())),
            "TIMEOUT" => file.timeout = Some(DurationValue::Text(value.to_owned())),
            "USERNAME" => file.username = Some(value.to_owned()),
            "PASSWORD" => file.password = Some(value.to_owned()),
            "BEARER_TOKEN" => file.bearer_token = Some(value.to_owned()),
            "INSECURE_SKIP_TLS_VERIFY" => {
                file.insecure_skip_tls_verify = Some(parse_bool(name, value)?);
            }
            "TREND_AS_NATIVE_HISTOGRAM" => {
                file.trend_as_native_histogram = Some(parse_bool(name, value)?);
            }
            "TREND_STATS" => file.trend_stats = Some(parse_list(value)),
            "METRIC_PREFIX" => file.metric_prefix = Some(value.to_owned()),
            _ => {}
        }
    }

    if !headers.is_empty() {
        file.headers = Some(headers);
    }
    Ok(file)
}

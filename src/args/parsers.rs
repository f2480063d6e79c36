use crate::config::parse_bool;
use crate::error::ConfigError;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ConfigError> {
    match s.split_once(':') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.trim().to_owned()))
        }
        Some(_) | None => Err(ConfigError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

pub(crate) fn parse_bool_env(s: &str) -> Result<bool, ConfigError> {
    parse_bool("NO_COLOR", s)
}

use std::time::Duration;

use tempfile::tempdir;

use super::{
    ConfigFile, DurationValue, OutputConfig, RemoteAuth, env_overrides, load_config_file,
    parse_duration_value, parse_list,
};
use crate::error::{AppError, ConfigError};

fn load(path: &std::path::Path) -> Result<ConfigFile, String> {
    load_config_file(path).map_err(|err| format!("load failed: {}", err))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("strest-rw.toml");
    let content = r#"
url = "https://prom.example:9090/api/v1/write"
push_interval = "500ms"
timeout = 10
trend_stats = ["p(95)", "avg"]

[headers]
X-Scope-OrgID = "tenant-a"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load(&path)?;
    if config.url.as_deref() != Some("https://prom.example:9090/api/v1/write") {
        return Err("Unexpected url".to_owned());
    }
    if config.push_interval != Some(DurationValue::Text("500ms".to_owned())) {
        return Err(format!("Unexpected push interval {:?}", config.push_interval));
    }
    if config.timeout != Some(DurationValue::Seconds(10)) {
        return Err(format!("Unexpected timeout {:?}", config.timeout));
    }
    let tenant = config
        .headers
        .as_ref()
        .and_then(|headers| headers.get("X-Scope-OrgID"));
    if tenant.map(String::as_str) != Some("tenant-a") {
        return Err("Expected tenant header".to_owned());
    }

    let output = OutputConfig::from_file(config).map_err(|err| format!("{}", err))?;
    if output.push_interval != Duration::from_millis(500) || output.timeout != Duration::from_secs(10) {
        return Err("Unexpected resolved durations".to_owned());
    }
    if output.trend_stats.len() != 2 {
        return Err(format!("Expected two stats, got {}", output.trend_stats.len()));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("strest-rw.json");
    let content = r#"{
  "server_url": "http://localhost:9091/write",
  "trend_as_native_histogram": true,
  "trend_stats": [],
  "bearer_token": "secret"
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let output = OutputConfig::from_file(load(&path)?).map_err(|err| format!("{}", err))?;
    if output.url.as_str() != "http://localhost:9091/write" {
        return Err(format!("Unexpected url {}", output.url));
    }
    if !output.trend_as_native_histogram || !output.trend_stats.is_empty() {
        return Err("Expected native histogram with no stats".to_owned());
    }
    if output.auth
        != Some(RemoteAuth::Bearer {
            token: "secret".to_owned(),
        })
    {
        return Err(format!("Unexpected auth {:?}", output.auth));
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("strest-rw.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected yaml to be rejected".to_owned()),
    }
}

#[test]
fn defaults_apply_to_empty_config() -> Result<(), String> {
    let output = OutputConfig::from_file(ConfigFile::default()).map_err(|err| format!("{}", err))?;
    if output.url.as_str() != "http://localhost:9090/api/v1/write" {
        return Err(format!("Unexpected url {}", output.url));
    }
    if output.push_interval != Duration::from_secs(5) || output.timeout != Duration::from_secs(5) {
        return Err("Unexpected default durations".to_owned());
    }
    let names: Vec<&str> = output.trend_stats.iter().map(|(key, _)| key).collect();
    if names != ["p99"] {
        return Err(format!("Unexpected default stats {:?}", names));
    }
    if output.metric_prefix != "strest_" || output.histogram_max_buckets != 160 {
        return Err("Unexpected prefix or bucket limit".to_owned());
    }
    if output.auth.is_some() || output.insecure_skip_tls_verify {
        return Err("Expected no auth and verified TLS".to_owned());
    }
    Ok(())
}

#[test]
fn validation_rejects_bad_settings() -> Result<(), String> {
    let cases: Vec<(ConfigFile, fn(&ConfigError) -> bool)> = vec![
        (
            ConfigFile {
                url: Some("ftp://example.com/write".to_owned()),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::UnsupportedScheme { scheme } if scheme == "ftp"),
        ),
        (
            ConfigFile {
                url: Some("not a url".to_owned()),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::InvalidUrl { .. }),
        ),
        (
            ConfigFile {
                push_interval: Some(DurationValue::Seconds(0)),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::DurationZero),
        ),
        (
            ConfigFile {
                username: Some("user".to_owned()),
                bearer_token: Some("token".to_owned()),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::Conflict { .. }),
        ),
        (
            ConfigFile {
                password: Some("secret".to_owned()),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::PasswordWithoutUsername),
        ),
        (
            ConfigFile {
                trend_stats: Some(vec!["p(99)".to_owned(), "p95".to_owned()]),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::UnsupportedTrendStat { stat } if stat == "p95"),
        ),
        (
            ConfigFile {
                trend_stats: Some(Vec::new()),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::TrendStatsEmpty),
        ),
        (
            ConfigFile {
                histogram_max_buckets: Some(0),
                ..ConfigFile::default()
            },
            |err| matches!(err, ConfigError::HistogramMaxBucketsZero),
        ),
    ];

    for (index, (file, expected)) in cases.into_iter().enumerate() {
        match OutputConfig::from_file(file) {
            Err(err) if expected(&err) => {}
            Err(err) => return Err(format!("case {}: unexpected error {}", index, err)),
            Ok(_) => return Err(format!("case {}: expected an error", index)),
        }
    }
    Ok(())
}

#[test]
fn basic_auth_keeps_optional_password() -> Result<(), String> {
    let output = OutputConfig::from_file(ConfigFile {
        username: Some("admin".to_owned()),
        ..ConfigFile::default()
    })
    .map_err(|err| format!("{}", err))?;
    if output.auth
        != Some(RemoteAuth::Basic {
            username: "admin".to_owned(),
            password: None,
        })
    {
        return Err(format!("Unexpected auth {:?}", output.auth));
    }
    Ok(())
}

#[test]
fn env_overrides_parse_prefixed_variables() -> Result<(), String> {
    let vars = [
        ("STREST_RW_SERVER_URL", "https://remote:9090/api/v1/write"),
        ("STREST_RW_PUSH_INTERVAL", "250ms"),
        ("STREST_RW_TREND_STATS", "p(90), p(99.9) ,max"),
        ("STREST_RW_TREND_AS_NATIVE_HISTOGRAM", "yes"),
        ("STREST_RW_HEADERS_X_SCOPE_ORGID", "tenant-b"),
        ("STREST_RW_LOG", "debug"),
        ("HOME", "/root"),
    ];
    let file = env_overrides(vars).map_err(|err| format!("{}", err))?;

    if file.url.as_deref() != Some("https://remote:9090/api/v1/write") {
        return Err(format!("Unexpected url {:?}", file.url));
    }
    if file.trend_stats
        != Some(vec![
            "p(90)".to_owned(),
            "p(99.9)".to_owned(),
            "max".to_owned(),
        ])
    {
        return Err(format!("Unexpected stats {:?}", file.trend_stats));
    }
    if file.trend_as_native_histogram != Some(true) {
        return Err("Expected native histogram override".to_owned());
    }
    let header = file
        .headers
        .as_ref()
        .and_then(|headers| headers.get("x-scope-orgid"));
    if header.map(String::as_str) != Some("tenant-b") {
        return Err(format!("Unexpected headers {:?}", file.headers));
    }
    Ok(())
}

#[test]
fn env_overrides_reject_invalid_bool() -> Result<(), String> {
    match env_overrides([("STREST_RW_INSECURE_SKIP_TLS_VERIFY", "maybe")]) {
        Err(ConfigError::InvalidEnvValue { name, value })
            if name == "STREST_RW_INSECURE_SKIP_TLS_VERIFY" && value == "maybe" =>
        {
            Ok(())
        }
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected invalid boolean to fail".to_owned()),
    }
}

#[test]
fn merge_prefers_overrides_and_merges_headers() -> Result<(), String> {
    let base = ConfigFile {
        url: Some("http://file:9090/write".to_owned()),
        metric_prefix: Some("file_".to_owned()),
        headers: Some(
            [("a".to_owned(), "1".to_owned()), ("b".to_owned(), "1".to_owned())]
                .into_iter()
                .collect(),
        ),
        ..ConfigFile::default()
    };
    let overrides = ConfigFile {
        url: Some("http://env:9090/write".to_owned()),
        headers: Some([("b".to_owned(), "2".to_owned())].into_iter().collect()),
        ..ConfigFile::default()
    };
    let merged = base.merge(overrides);

    if merged.url.as_deref() != Some("http://env:9090/write") {
        return Err(format!("Unexpected url {:?}", merged.url));
    }
    if merged.metric_prefix.as_deref() != Some("file_") {
        return Err("Base prefix should survive".to_owned());
    }
    let headers = merged.headers.unwrap_or_default();
    if headers.get("a").map(String::as_str) != Some("1") || headers.get("b").map(String::as_str) != Some("2") {
        return Err(format!("Unexpected headers {:?}", headers));
    }
    Ok(())
}

#[test]
fn parse_duration_value_units() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("5", Duration::from_secs(5)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_duration_value(raw).map_err(|err| format!("{}: {}", raw, err))?;
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", raw, parsed));
        }
    }
    if !matches!(parse_duration_value("10d"), Err(ConfigError::InvalidDurationUnit { .. })) {
        return Err("Expected invalid unit".to_owned());
    }
    if !matches!(parse_duration_value("0ms"), Err(ConfigError::DurationZero)) {
        return Err("Expected zero duration error".to_owned());
    }
    if !matches!(parse_duration_value(""), Err(ConfigError::DurationEmpty)) {
        return Err("Expected empty duration error".to_owned());
    }
    Ok(())
}

#[test]
fn parse_list_drops_blank_entries() -> Result<(), ConfigError> {
    let parsed = parse_list(" avg, ,p(99),");
    if parsed != vec!["avg".to_owned(), "p(99)".to_owned()] {
        return Err(ConfigError::from(format!("Unexpected list {:?}", parsed)));
    }
    Ok(())
}

#[test]
fn sink_factory_follows_trend_encoding() -> Result<(), ConfigError> {
    use crate::metrics::MetricKind;
    use crate::sinks::Sink;

    let classic = OutputConfig::from_file(ConfigFile::default())?;
    if !matches!(classic.sink_factory().build(MetricKind::Trend), Sink::Trend(_)) {
        return Err(ConfigError::from("Expected a classic trend sink"));
    }
    let native = OutputConfig::from_file(ConfigFile {
        trend_as_native_histogram: Some(true),
        ..ConfigFile::default()
    })?;
    if !matches!(native.sink_factory().build(MetricKind::Trend), Sink::NativeHistogram(_)) {
        return Err(ConfigError::from("Expected a native histogram sink"));
    }
    Ok(())
}

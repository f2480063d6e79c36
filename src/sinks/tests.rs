use super::*;
use crate::error::ConfigError;
use crate::metrics::MetricKind;

const EPSILON: f64 = 1e-9;

fn close(lhs: f64, rhs: f64) -> bool {
    (lhs - rhs).abs() < EPSILON
}

fn classic_factory(stats: &[&str]) -> Result<SinkFactory, String> {
    let resolver = TrendStatsResolver::new(stats).map_err(|err| format!("{}", err))?;
    Ok(SinkFactory::classic(resolver))
}

fn single_value(sink: &Sink) -> Result<f64, String> {
    match sink.emit() {
        Emission::Value(value) => Ok(value),
        other => Err(format!("Expected single value, got {:?}", other)),
    }
}

fn stat_values(sink: &Sink) -> Result<Vec<(String, f64)>, String> {
    match sink.emit() {
        Emission::Stats(stats) => Ok(stats
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect()),
        other => Err(format!("Expected trend stats, got {:?}", other)),
    }
}

#[test]
fn counter_sums_raw_values() -> Result<(), String> {
    let factory = SinkFactory::native_histogram(DEFAULT_MAX_BUCKETS);
    let mut sink = factory.build(MetricKind::Counter);
    for value in [1.0, 2.0, 3.0] {
        sink.add(value);
    }
    let value = single_value(&sink)?;
    if !close(value, 6.0) {
        return Err(format!("Expected 6, got {}", value));
    }
    Ok(())
}

#[test]
fn counter_and_rate_ignore_arrival_order() -> Result<(), String> {
    let factory = SinkFactory::native_histogram(DEFAULT_MAX_BUCKETS);
    let values = [4.0, 0.0, 1.5, 0.0, 2.5, 7.0];
    let mut reversed = values;
    reversed.reverse();

    for kind in [MetricKind::Counter, MetricKind::Rate] {
        let mut forward = factory.build(kind);
        let mut backward = factory.build(kind);
        for value in values {
            forward.add(value);
        }
        for value in reversed {
            backward.add(value);
        }
        if forward != backward {
            return Err(format!("{:?} depends on arrival order", kind));
        }
    }
    Ok(())
}

#[test]
fn gauge_keeps_last_value() -> Result<(), String> {
    let factory = SinkFactory::native_histogram(DEFAULT_MAX_BUCKETS);
    let mut sink = factory.build(MetricKind::Gauge);
    for value in [10.0, 3.0, 42.0, 7.0] {
        sink.add(value);
    }
    let value = single_value(&sink)?;
    if !close(value, 7.0) {
        return Err(format!("Expected 7, got {}", value));
    }
    Ok(())
}

#[test]
fn rate_counts_non_zero_samples() -> Result<(), String> {
    let factory = SinkFactory::native_histogram(DEFAULT_MAX_BUCKETS);
    let mut sink = factory.build(MetricKind::Rate);
    for index in 0..10 {
        sink.add(if index < 3 { 1.0 } else { 0.0 });
    }
    let value = single_value(&sink)?;
    if !close(value, 0.3) {
        return Err(format!("Expected 0.3, got {}", value));
    }
    Ok(())
}

#[test]
fn rate_without_samples_is_zero() -> Result<(), String> {
    let rate = RateSink::default();
    if !close(rate.rate(), 0.0) {
        return Err(format!("Expected 0, got {}", rate.rate()));
    }
    Ok(())
}

#[test]
fn classic_trend_interpolates_median() -> Result<(), String> {
    let factory = classic_factory(&["p(50)", "med"])?;
    let mut sink = factory.build(MetricKind::Trend);
    for value in [7.0, 3.0, 10.0, 1.0, 5.0, 2.0, 9.0, 4.0, 8.0, 6.0] {
        sink.add(value);
    }
    let stats = stat_values(&sink)?;
    for (key, value) in &stats {
        if !close(*value, 5.5) {
            return Err(format!("Expected {} = 5.5, got {}", key, value));
        }
    }
    if stats.len() != 2 {
        return Err(format!("Expected two stats, got {:?}", stats));
    }
    Ok(())
}

#[test]
fn classic_trend_resolves_all_stats() -> Result<(), String> {
    let factory = classic_factory(&[
        "count", "sum", "min", "max", "avg", "p(90)", "p(99.9)", "p(0)", "p(100)",
    ])?;
    let mut sink = factory.build(MetricKind::Trend);
    for value in 1..=10 {
        sink.add(f64::from(value));
    }
    let expected = [
        ("count", 10.0),
        ("sum", 55.0),
        ("min", 1.0),
        ("max", 10.0),
        ("avg", 5.5),
        ("p90", 9.1),
        ("p999", 9.991),
        ("p0", 1.0),
        ("p100", 10.0),
    ];
    let stats = stat_values(&sink)?;
    if stats.len() != expected.len() {
        return Err(format!("Unexpected stats {:?}", stats));
    }
    for ((key, value), (expected_key, expected_value)) in stats.iter().zip(expected) {
        if key != expected_key || !close(*value, expected_value) {
            return Err(format!(
                "Expected {}={}, got {}={}",
                expected_key, expected_value, key, value
            ));
        }
    }
    Ok(())
}

#[test]
fn classic_trend_without_values_reports_zero() -> Result<(), String> {
    let factory = classic_factory(&["min", "max", "avg", "p(95)"])?;
    let sink = factory.build(MetricKind::Trend);
    for (key, value) in stat_values(&sink)? {
        if !close(value, 0.0) {
            return Err(format!("Expected {} = 0 on empty trend, got {}", key, value));
        }
    }
    Ok(())
}

#[test]
fn classic_trend_retains_every_observation() -> Result<(), String> {
    let resolver = TrendStatsResolver::new(&["count"]).map_err(|err| format!("{}", err))?;
    let mut trend = TrendSink::new(std::sync::Arc::new(resolver));
    for value in 0..5_000 {
        trend.add(f64::from(value % 97));
    }
    if trend.count() != 5_000 {
        return Err(format!("Expected 5000 observations, got {}", trend.count()));
    }
    Ok(())
}

#[test]
fn stat_keys_follow_percentile_naming() -> Result<(), String> {
    let resolver = TrendStatsResolver::new(&["p(99)", "p(99.9)", "p(0.95)", "mean", "p(99)"])
        .map_err(|err| format!("{}", err))?;
    let keys: Vec<&str> = resolver.iter().map(|(key, _)| key).collect();
    if keys != ["p99", "p999", "p095", "mean"] {
        return Err(format!("Unexpected keys {:?}", keys));
    }
    Ok(())
}

#[test]
fn unknown_stat_fails_resolution() -> Result<(), String> {
    match TrendStatsResolver::new(&["p(95)", "median-ish"]) {
        Err(ConfigError::UnsupportedTrendStat { stat }) if stat == "median-ish" => {}
        other => return Err(format!("Expected unsupported stat error, got {:?}", other)),
    }
    for bad in ["p(101)", "p(-1)", "p(abc)", "p()"] {
        match TrendStat::parse(bad) {
            Err(ConfigError::InvalidPercentile { .. }) => {}
            other => return Err(format!("Expected invalid percentile for {}, got {:?}", bad, other)),
        }
    }
    Ok(())
}

#[test]
fn native_histogram_emits_single_histogram() -> Result<(), String> {
    let factory = SinkFactory::native_histogram(DEFAULT_MAX_BUCKETS);
    let mut sink = factory.build(MetricKind::Trend);
    for value in [0.0, 1.0, 2.0, 3.5, -4.0] {
        sink.add(value);
    }
    let Emission::Histogram(histogram) = sink.emit() else {
        return Err("Expected a histogram emission".to_owned());
    };
    if histogram.count() != 5 || histogram.zero_count() != 1 {
        return Err(format!("Unexpected counts: {:?}", histogram));
    }
    if !close(histogram.sum(), 2.5) {
        return Err(format!("Unexpected sum {}", histogram.sum()));
    }
    let bucket_total: u64 = histogram
        .positive_buckets()
        .values()
        .chain(histogram.negative_buckets().values())
        .sum();
    if bucket_total != 4 {
        return Err(format!("Expected 4 bucketed values, got {}", bucket_total));
    }
    Ok(())
}

#[test]
fn native_histogram_places_values_inside_bucket_bounds() -> Result<(), String> {
    for value in [0.001, 0.5, 1.0, 2.0, 3.0, 1_000.0, 123_456.789] {
        let mut histogram = NativeHistogram::new(DEFAULT_MAX_BUCKETS);
        histogram.observe(value);
        let Some((&index, _)) = histogram.positive_buckets().iter().next() else {
            return Err(format!("No bucket for {}", value));
        };
        let schema = histogram.schema();
        let upper = bucket_upper_bound(index, schema);
        let lower = bucket_upper_bound(index.saturating_sub(1), schema);
        let tolerance = upper * 1e-12;
        if value > upper + tolerance || value < lower - tolerance {
            return Err(format!(
                "{} outside bucket {} ({}, {}]",
                value, index, lower, upper
            ));
        }
    }
    Ok(())
}

#[test]
fn native_histogram_memory_is_bounded() -> Result<(), String> {
    let max_buckets = 40;
    let mut histogram = NativeHistogram::new(max_buckets);
    let mut value = 1e-6;
    for _ in 0..200_000 {
        histogram.observe(value);
        histogram.observe(-value);
        value *= 1.000_37;
        if value > 1e9 {
            value = 1e-6;
        }
    }
    if histogram.bucket_count() > max_buckets {
        return Err(format!(
            "Expected at most {} buckets, got {}",
            max_buckets,
            histogram.bucket_count()
        ));
    }
    if histogram.schema() >= DEFAULT_SCHEMA {
        return Err("Expected the schema to be reduced".to_owned());
    }
    if histogram.count() != 400_000 {
        return Err(format!("Unexpected count {}", histogram.count()));
    }
    let bucket_total: u64 = histogram
        .positive_buckets()
        .values()
        .chain(histogram.negative_buckets().values())
        .sum();
    if bucket_total.saturating_add(histogram.zero_count()) != histogram.count() {
        return Err("Downscaling lost observations".to_owned());
    }
    Ok(())
}

#[test]
fn native_histogram_skips_nan() -> Result<(), String> {
    let mut histogram = NativeHistogram::new(DEFAULT_MAX_BUCKETS);
    histogram.observe(f64::NAN);
    histogram.observe(1.0);
    if histogram.count() != 1 || histogram.sum().is_nan() {
        return Err(format!("NaN should be ignored: {:?}", histogram));
    }
    Ok(())
}

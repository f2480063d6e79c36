use crate::error::ConfigError;

use super::trend::TrendSink;

/// A summary statistic computed from a classic trend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrendStat {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    Med,
    /// Percentile in `0.0..=100.0`.
    Percentile(f64),
}

impl TrendStat {
    /// Parses a configured stat name such as `avg`, `sum` or `p(99.9)`.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names and for percentiles outside
    /// `0..=100`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let name = raw.trim();
        match name {
            "count" => return Ok(TrendStat::Count),
            "sum" => return Ok(TrendStat::Sum),
            "min" => return Ok(TrendStat::Min),
            "max" => return Ok(TrendStat::Max),
            "avg" | "mean" => return Ok(TrendStat::Avg),
            "med" => return Ok(TrendStat::Med),
            _ => {}
        }

        let Some(inner) = name
            .strip_prefix("p(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(ConfigError::UnsupportedTrendStat {
                stat: raw.to_owned(),
            });
        };
        let pct: f64 = inner
            .trim()
            .parse()
            .map_err(|_parse_err| ConfigError::InvalidPercentile {
                stat: raw.to_owned(),
            })?;
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ConfigError::InvalidPercentile {
                stat: raw.to_owned(),
            });
        }
        Ok(TrendStat::Percentile(pct))
    }

    #[must_use]
    pub fn resolve(self, trend: &TrendSink) -> f64 {
        match self {
            TrendStat::Count => trend.count_f64(),
            TrendStat::Sum => trend.sum(),
            TrendStat::Min => trend.min(),
            TrendStat::Max => trend.max(),
            TrendStat::Avg => trend.avg(),
            TrendStat::Med => trend.percentile(50.0),
            TrendStat::Percentile(pct) => trend.percentile(pct),
        }
    }
}

/// Series suffix for a configured stat name: `p(99)` becomes `p99`,
/// `p(99.9)` becomes `p999`; other names are used as written.
fn stat_key(raw: &str) -> String {
    let name = raw.trim();
    match name
        .strip_prefix("p(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => format!("p{}", inner.trim().replace('.', "")),
        None => name.to_owned(),
    }
}

/// Validated list of trend stats, built once from configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendStatsResolver {
    stats: Vec<(String, TrendStat)>,
}

impl TrendStatsResolver {
    /// Builds the resolver from configured stat names. Names that map to the
    /// same series suffix are kept once.
    ///
    /// # Errors
    ///
    /// Returns an error if any name cannot be resolved.
    pub fn new<S>(names: &[S]) -> Result<Self, ConfigError>
    where
        S: AsRef<str>,
    {
        let mut stats: Vec<(String, TrendStat)> = Vec::with_capacity(names.len());
        for name in names {
            let stat = TrendStat::parse(name.as_ref())?;
            let key = stat_key(name.as_ref());
            if stats.iter().any(|(existing, _)| *existing == key) {
                continue;
            }
            stats.push((key, stat));
        }
        Ok(Self { stats })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TrendStat)> + '_ {
        self.stats.iter().map(|(key, stat)| (key.as_str(), *stat))
    }
}

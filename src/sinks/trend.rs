use std::sync::Arc;

use super::stats::TrendStatsResolver;

/// Classic trend: keeps every observation, sorted, and resolves the
/// configured stats at emission time.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSink {
    values: Vec<f64>,
    sum: f64,
    stats: Arc<TrendStatsResolver>,
}

impl TrendSink {
    #[must_use]
    pub const fn new(stats: Arc<TrendStatsResolver>) -> Self {
        Self {
            values: Vec::new(),
            sum: 0.0,
            stats,
        }
    }

    pub fn add(&mut self, value: f64) {
        let position = self
            .values
            .partition_point(|existing| existing.total_cmp(&value).is_le());
        self.values.insert(position, value);
        self.sum += value;
    }

    #[must_use]
    pub fn stats(&self) -> &TrendStatsResolver {
        &self.stats
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn count_f64(&self) -> f64 {
        self.values.len() as f64
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn avg(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.sum / self.count_f64()
    }

    /// Percentile by linear interpolation between the two closest ranks,
    /// rank = `pct / 100 * (n - 1)`.
    #[must_use]
    pub fn percentile(&self, pct: f64) -> f64 {
        let Some(last_index) = self.values.len().checked_sub(1) else {
            return 0.0;
        };
        let rank = (pct / 100.0).clamp(0.0, 1.0) * last_index as f64;
        let lower_rank = rank.floor();
        let lower_index = (lower_rank as usize).min(last_index);
        let upper_index = lower_index.saturating_add(1).min(last_index);
        let (Some(lower), Some(upper)) = (
            self.values.get(lower_index).copied(),
            self.values.get(upper_index).copied(),
        ) else {
            return 0.0;
        };
        lower + (upper - lower) * (rank - lower_rank)
    }
}

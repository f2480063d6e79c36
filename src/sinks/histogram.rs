use std::collections::BTreeMap;

/// Starting resolution: bucket boundaries grow by a factor of `2^(2^-8)`,
/// roughly 0.27% per bucket.
pub const DEFAULT_SCHEMA: i32 = 8;
/// Coarsest resolution the histogram falls back to (factor `2^16`).
pub const MIN_SCHEMA: i32 = -4;
pub const DEFAULT_MAX_BUCKETS: usize = 160;
/// Observations with an absolute value at or below this land in the zero
/// bucket.
pub const DEFAULT_ZERO_THRESHOLD: f64 = 2.938_735_877_055_719e-39;

/// Sparse exponential histogram.
///
/// Bucket `i` at schema `s` covers `(2^((i-1)/2^s), 2^(i/2^s)]`. Whenever
/// the populated bucket count exceeds `max_buckets` the schema is lowered,
/// merging neighbouring buckets pairwise, so memory stays bounded no matter
/// how many values are observed.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeHistogram {
    schema: i32,
    zero_threshold: f64,
    zero_count: u64,
    count: u64,
    sum: f64,
    positive: BTreeMap<i32, u64>,
    negative: BTreeMap<i32, u64>,
    max_buckets: usize,
}

impl NativeHistogram {
    #[must_use]
    pub const fn new(max_buckets: usize) -> Self {
        Self {
            schema: DEFAULT_SCHEMA,
            zero_threshold: DEFAULT_ZERO_THRESHOLD,
            zero_count: 0,
            count: 0,
            sum: 0.0,
            positive: BTreeMap::new(),
            negative: BTreeMap::new(),
            max_buckets,
        }
    }

    pub fn observe(&mut self, value: f64) {
        // NaN has no bucket; dropping it keeps count equal to the bucket total.
        if value.is_nan() {
            return;
        }
        self.count = self.count.saturating_add(1);
        self.sum += value;

        let magnitude = value.abs();
        if magnitude <= self.zero_threshold {
            self.zero_count = self.zero_count.saturating_add(1);
            return;
        }

        let index = bucket_index(magnitude, self.schema);
        let buckets = if value > 0.0 {
            &mut self.positive
        } else {
            &mut self.negative
        };
        let slot = buckets.entry(index).or_insert(0);
        *slot = slot.saturating_add(1);

        while self.bucket_count() > self.max_buckets && self.schema > MIN_SCHEMA {
            self.downscale();
        }
    }

    fn downscale(&mut self) {
        self.schema = self.schema.saturating_sub(1);
        self.positive = merge_pairs(&self.positive);
        self.negative = merge_pairs(&self.negative);
    }

    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.positive.len().saturating_add(self.negative.len())
    }

    #[must_use]
    pub const fn schema(&self) -> i32 {
        self.schema
    }

    #[must_use]
    pub const fn zero_threshold(&self) -> f64 {
        self.zero_threshold
    }

    #[must_use]
    pub const fn zero_count(&self) -> u64 {
        self.zero_count
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    #[must_use]
    pub const fn positive_buckets(&self) -> &BTreeMap<i32, u64> {
        &self.positive
    }

    #[must_use]
    pub const fn negative_buckets(&self) -> &BTreeMap<i32, u64> {
        &self.negative
    }
}

/// Index of the bucket holding `magnitude` (> 0) at `schema`.
pub(crate) fn bucket_index(magnitude: f64, schema: i32) -> i32 {
    let scaled = magnitude.log2() * 2_f64.powi(schema);
    scaled.ceil() as i32
}

/// Upper (inclusive) boundary of bucket `index` at `schema`.
#[must_use]
pub fn bucket_upper_bound(index: i32, schema: i32) -> f64 {
    2_f64.powf(f64::from(index) * 2_f64.powi(schema.saturating_neg()))
}

fn merge_pairs(buckets: &BTreeMap<i32, u64>) -> BTreeMap<i32, u64> {
    let mut merged = BTreeMap::new();
    for (index, count) in buckets {
        // ceil(index / 2), also for negative indexes.
        let target = index.saturating_add(1) >> 1;
        let slot = merged.entry(target).or_insert(0_u64);
        *slot = slot.saturating_add(*count);
    }
    merged
}

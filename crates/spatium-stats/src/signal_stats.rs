use std::collections::HashMap;

/// A streaming statistic computed incrementally from scalar samples with
/// constant time and memory cost per sample.
pub trait SignalStatistic {
    /// Current value of the statistic.
    fn value(&self) -> f64;

    /// Short name used as the key in [`SignalStats::map`].
    fn short_name(&self) -> &'static str;

    /// Number of samples inserted so far.
    fn count(&self) -> usize;

    /// Add a new sample.
    fn insert_data(&mut self, data: f64);

    /// Forget all samples and start over.
    fn reset(&mut self);
}

/// Largest sample seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMaximum {
    data: f64,
    count: usize,
}

impl SignalStatistic for SignalMaximum {
    fn value(&self) -> f64 {
        self.data
    }

    fn short_name(&self) -> &'static str {
        "max"
    }

    fn count(&self) -> usize {
        self.count
    }

    fn insert_data(&mut self, data: f64) {
        if self.count == 0 || data > self.data {
            self.data = data;
        }
        self.count += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Arithmetic mean of all samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMean {
    sum: f64,
    count: usize,
}

impl SignalStatistic for SignalMean {
    fn value(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    fn short_name(&self) -> &'static str {
        "mean"
    }

    fn count(&self) -> usize {
        self.count
    }

    fn insert_data(&mut self, data: f64) {
        self.sum += data;
        self.count += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Smallest sample seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMinimum {
    data: f64,
    count: usize,
}

impl SignalStatistic for SignalMinimum {
    fn value(&self) -> f64 {
        self.data
    }

    fn short_name(&self) -> &'static str {
        "min"
    }

    fn count(&self) -> usize {
        self.count
    }

    fn insert_data(&mut self, data: f64) {
        if self.count == 0 || data < self.data {
            self.data = data;
        }
        self.count += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Root mean square of all samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalRootMeanSquare {
    sum_squares: f64,
    count: usize,
}

impl SignalStatistic for SignalRootMeanSquare {
    fn value(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.sum_squares / self.count as f64).sqrt()
    }

    fn short_name(&self) -> &'static str {
        "rms"
    }

    fn count(&self) -> usize {
        self.count
    }

    fn insert_data(&mut self, data: f64) {
        self.sum_squares += data * data;
        self.count += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Largest absolute value seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalMaxAbsoluteValue {
    data: f64,
    count: usize,
}

impl SignalStatistic for SignalMaxAbsoluteValue {
    fn value(&self) -> f64 {
        self.data
    }

    fn short_name(&self) -> &'static str {
        "maxAbs"
    }

    fn count(&self) -> usize {
        self.count
    }

    fn insert_data(&mut self, data: f64) {
        let abs_data = data.abs();
        if abs_data > self.data {
            self.data = abs_data;
        }
        self.count += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sample variance computed with Welford's online algorithm.
///
/// Returns zero until at least two samples have been inserted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalVariance {
    m2: f64,
    mean: f64,
    count: usize,
}

impl SignalStatistic for SignalVariance {
    fn value(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    fn short_name(&self) -> &'static str {
        "var"
    }

    fn count(&self) -> usize {
        self.count
    }

    fn insert_data(&mut self, data: f64) {
        self.count += 1;
        let delta = data - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (data - self.mean);
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A collection of streaming statistics fed from a single scalar signal.
///
/// Statistics are registered by short name and every inserted sample updates
/// all of them.
///
/// ```
/// use spatium_stats::SignalStats;
///
/// let mut stats = SignalStats::default();
/// stats.insert_statistics("max,mean,min");
/// stats.insert_data(1.0);
/// stats.insert_data(3.0);
/// assert_eq!(stats.map()["mean"], 2.0);
/// ```
#[derive(Default)]
pub struct SignalStats {
    stats: Vec<Box<dyn SignalStatistic>>,
}

impl SignalStats {
    /// Number of samples inserted so far.
    pub fn count(&self) -> usize {
        self.stats.first().map_or(0, |s| s.count())
    }

    /// Values of all registered statistics keyed by short name.
    pub fn map(&self) -> HashMap<String, f64> {
        self.stats
            .iter()
            .map(|s| (s.short_name().to_owned(), s.value()))
            .collect()
    }

    /// Add a sample to every registered statistic.
    pub fn insert_data(&mut self, data: f64) {
        for statistic in &mut self.stats {
            statistic.insert_data(data);
        }
    }

    /// Register a statistic by short name. Returns false for an unknown
    /// name or one that is already registered.
    pub fn insert_statistic(&mut self, name: &str) -> bool {
        if self.stats.iter().any(|s| s.short_name() == name) {
            return false;
        }
        let statistic: Box<dyn SignalStatistic> = match name {
            "max" => Box::new(SignalMaximum::default()),
            "mean" => Box::new(SignalMean::default()),
            "min" => Box::new(SignalMinimum::default()),
            "rms" => Box::new(SignalRootMeanSquare::default()),
            "maxAbs" => Box::new(SignalMaxAbsoluteValue::default()),
            "var" => Box::new(SignalVariance::default()),
            _ => return false,
        };
        self.stats.push(statistic);
        true
    }

    /// Register a comma-separated list of statistics. Returns true only if
    /// every name in the list was registered.
    pub fn insert_statistics(&mut self, names: &str) -> bool {
        if names.is_empty() {
            return false;
        }
        let mut result = true;
        for name in names.split(',') {
            result = self.insert_statistic(name) && result;
        }
        result
    }

    /// Reset all registered statistics.
    pub fn reset(&mut self) {
        for statistic in &mut self.stats {
            statistic.reset();
        }
    }
}

impl std::fmt::Debug for SignalStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.stats.iter().map(|s| (s.short_name(), s.value())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_maximum() {
        let mut stat = SignalMaximum::default();
        assert_eq!(stat.value(), 0.0);
        assert_eq!(stat.short_name(), "max");
        for value in [-1.0, -3.0, 2.0, 1.5] {
            stat.insert_data(value);
        }
        assert_eq!(stat.value(), 2.0);
        assert_eq!(stat.count(), 4);

        // The first sample wins even when it is below the default value.
        stat.reset();
        stat.insert_data(-5.0);
        assert_eq!(stat.value(), -5.0);
    }

    #[test]
    fn test_minimum() {
        let mut stat = SignalMinimum::default();
        assert_eq!(stat.short_name(), "min");
        for value in [4.0, -3.0, 2.0] {
            stat.insert_data(value);
        }
        assert_eq!(stat.value(), -3.0);

        stat.reset();
        stat.insert_data(7.0);
        assert_eq!(stat.value(), 7.0);
    }

    #[test]
    fn test_mean() {
        let mut stat = SignalMean::default();
        assert_eq!(stat.value(), 0.0);
        assert_eq!(stat.short_name(), "mean");
        for value in [1.0, 2.0, 3.0, 4.0] {
            stat.insert_data(value);
        }
        assert_relative_eq!(stat.value(), 2.5);
        assert_eq!(stat.count(), 4);
    }

    #[test]
    fn test_root_mean_square() {
        let mut stat = SignalRootMeanSquare::default();
        assert_eq!(stat.value(), 0.0);
        assert_eq!(stat.short_name(), "rms");
        for value in [3.0, -4.0] {
            stat.insert_data(value);
        }
        assert_relative_eq!(stat.value(), (12.5_f64).sqrt());
    }

    #[test]
    fn test_max_absolute_value() {
        let mut stat = SignalMaxAbsoluteValue::default();
        assert_eq!(stat.short_name(), "maxAbs");
        for value in [1.0, -6.0, 4.0] {
            stat.insert_data(value);
        }
        assert_eq!(stat.value(), 6.0);
    }

    #[test]
    fn test_variance() {
        let mut stat = SignalVariance::default();
        assert_eq!(stat.value(), 0.0);
        assert_eq!(stat.short_name(), "var");

        stat.insert_data(2.0);
        assert_eq!(stat.value(), 0.0);

        // Sample variance of {2, 4, 4, 4, 5, 5, 7, 9} is 32/7.
        for value in [4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stat.insert_data(value);
        }
        assert_relative_eq!(stat.value(), 32.0 / 7.0, epsilon = 1e-12);

        stat.reset();
        assert_eq!(stat.value(), 0.0);
        assert_eq!(stat.count(), 0);
    }

    #[test]
    fn test_insert_statistic() {
        let mut stats = SignalStats::default();
        assert!(stats.insert_statistic("max"));
        assert!(stats.insert_statistic("var"));

        // Duplicates and unknown names are rejected.
        assert!(!stats.insert_statistic("max"));
        assert!(!stats.insert_statistic("median"));
        assert!(!stats.insert_statistic(""));

        let map = stats.map();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("max"));
        assert!(map.contains_key("var"));
    }

    #[test]
    fn test_insert_statistics() {
        let mut stats = SignalStats::default();
        assert!(stats.insert_statistics("max,mean,min,rms,maxAbs,var"));
        assert_eq!(stats.map().len(), 6);

        let mut stats = SignalStats::default();
        assert!(!stats.insert_statistics("mean,bogus"));
        assert_eq!(stats.map().len(), 1);

        let mut stats = SignalStats::default();
        assert!(!stats.insert_statistics(""));
    }

    #[test]
    fn test_aggregate_insert_and_reset() {
        let mut stats = SignalStats::default();
        assert!(stats.insert_statistics("max,mean,min,var"));
        assert_eq!(stats.count(), 0);

        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            stats.insert_data(value);
        }
        assert_eq!(stats.count(), 5);

        let map = stats.map();
        assert_relative_eq!(map["max"], 5.0);
        assert_relative_eq!(map["mean"], 3.0);
        assert_relative_eq!(map["min"], 1.0);
        assert_relative_eq!(map["var"], 2.5);

        stats.reset();
        assert_eq!(stats.count(), 0);
        assert_relative_eq!(stats.map()["mean"], 0.0);
    }
}

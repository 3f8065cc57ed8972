use std::collections::VecDeque;

/// Mean of the most recent values pushed into a fixed-size window.
///
/// Older values fall off the back of the window as new ones arrive, so the
/// mean tracks the recent behavior of a signal instead of its whole history.
///
/// ```
/// use spatium_stats::RollingMean;
///
/// let mut mean = RollingMean::new(3);
/// mean.push(1.0);
/// mean.push(2.0);
/// mean.push(3.0);
/// mean.push(10.0);
/// assert_eq!(mean.mean(), 5.0);
/// ```
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RollingMean {
    window_size: usize,
    values: VecDeque<f64>,
}

impl Default for RollingMean {
    fn default() -> Self {
        Self::new(10)
    }
}

impl RollingMean {
    /// Create a rolling mean with the given window size. A window size of
    /// zero falls back to the default of 10.
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size: if window_size > 0 { window_size } else { 10 },
            values: VecDeque::new(),
        }
    }

    /// Mean of the values currently in the window, or NaN when no values
    /// have been pushed.
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Number of values currently in the window.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Push a new value, evicting the oldest values beyond the window size.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        while self.values.len() > self.window_size {
            self.values.pop_front();
        }
    }

    /// Remove all values from the window.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Set the window size and clear the stored values. A window size of
    /// zero is ignored.
    pub fn set_window_size(&mut self, window_size: usize) {
        if window_size > 0 {
            self.window_size = window_size;
            self.clear();
        }
    }

    /// The window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

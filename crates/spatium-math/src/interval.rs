//! 1D intervals with independently open or closed bounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An interval on the real line.
///
/// Each bound is independently open or closed. Two intervals compare
/// equal when each contains the other, so all empty intervals are equal
/// regardless of their stored bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interval {
    /// Left bound value.
    left: f64,
    /// Whether the left bound is included.
    left_closed: bool,
    /// Right bound value.
    right: f64,
    /// Whether the right bound is included.
    right_closed: bool,
}

impl Default for Interval {
    /// The open interval (0, 0), which is empty.
    fn default() -> Self {
        Self::open(0.0, 0.0)
    }
}

impl Interval {
    /// The whole real line, (-inf, inf).
    pub const UNBOUNDED: Interval = Interval {
        left: f64::NEG_INFINITY,
        left_closed: false,
        right: f64::INFINITY,
        right_closed: false,
    };

    /// An interval with explicit bound openness flags.
    pub const fn new(left: f64, left_closed: bool, right: f64, right_closed: bool) -> Self {
        Self {
            left,
            left_closed,
            right,
            right_closed,
        }
    }

    /// The open interval (left, right).
    pub const fn open(left: f64, right: f64) -> Self {
        Self::new(left, false, right, false)
    }

    /// The half-open interval [left, right).
    pub const fn left_closed(left: f64, right: f64) -> Self {
        Self::new(left, true, right, false)
    }

    /// The half-open interval (left, right].
    pub const fn right_closed(left: f64, right: f64) -> Self {
        Self::new(left, false, right, true)
    }

    /// The closed interval [left, right].
    pub const fn closed(left: f64, right: f64) -> Self {
        Self::new(left, true, right, true)
    }

    /// The left bound value.
    pub fn left_value(&self) -> f64 {
        self.left
    }

    /// Whether the left bound is included.
    pub fn is_left_closed(&self) -> bool {
        self.left_closed
    }

    /// The right bound value.
    pub fn right_value(&self) -> f64 {
        self.right
    }

    /// Whether the right bound is included.
    pub fn is_right_closed(&self) -> bool {
        self.right_closed
    }

    /// True when no value lies within the bounds.
    pub fn is_empty(&self) -> bool {
        if self.left_closed && self.right_closed {
            self.right < self.left
        } else {
            self.right <= self.left
        }
    }

    /// True when `value` lies within the bounds.
    pub fn contains(&self, value: f64) -> bool {
        match (self.left_closed, self.right_closed) {
            (true, true) => self.left <= value && value <= self.right,
            (true, false) => self.left <= value && value < self.right,
            (false, true) => self.left < value && value <= self.right,
            (false, false) => self.left < value && value < self.right,
        }
    }

    /// True when `other` is a subset of this interval.
    ///
    /// Openness matters at shared bounds: an open interval never contains
    /// a closed interval with the same bound value.
    pub fn contains_interval(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let left_ok = if !self.left_closed && other.left_closed {
            self.left < other.left
        } else {
            self.left <= other.left
        };
        let right_ok = if !self.right_closed && other.right_closed {
            other.right < self.right
        } else {
            other.right <= self.right
        };
        left_ok && right_ok
    }

    /// True when the two intervals share at least one value.
    pub fn intersects(&self, other: &Interval) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let left_ok = if self.right_closed && other.left_closed {
            other.left <= self.right
        } else {
            other.left < self.right
        };
        let right_ok = if self.left_closed && other.right_closed {
            self.left <= other.right
        } else {
            self.left < other.right
        };
        left_ok && right_ok
    }
}

impl PartialEq for Interval {
    /// Mutual containment; all empty intervals compare equal.
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() {
            return other.is_empty();
        }
        self.contains_interval(other) && other.contains_interval(self)
    }
}

impl fmt::Display for Interval {
    /// Bracket notation, e.g. `[0, 1)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}",
            if self.left_closed { '[' } else { '(' },
            self.left,
            self.right,
            if self.right_closed { ']' } else { ')' },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(Interval::open(0.0, 0.0).is_empty());
        assert!(!Interval::closed(0.0, 0.0).is_empty());
        assert!(Interval::left_closed(1.0, 1.0).is_empty());
        assert!(Interval::closed(1.0, 0.0).is_empty());
        assert!(!Interval::UNBOUNDED.is_empty());
    }

    #[test]
    fn test_contains_value() {
        let i = Interval::left_closed(0.0, 1.0);
        assert!(i.contains(0.0));
        assert!(i.contains(0.5));
        assert!(!i.contains(1.0));

        let o = Interval::open(0.0, 1.0);
        assert!(!o.contains(0.0));
        assert!(!o.contains(1.0));
        assert!(o.contains(0.5));
    }

    #[test]
    fn test_contains_interval_boundary_exactness() {
        let open = Interval::open(0.0, 1.0);
        let closed = Interval::closed(0.0, 1.0);
        assert!(!open.contains_interval(&closed));
        assert!(closed.contains_interval(&open));
        assert!(closed.contains_interval(&closed));
        assert!(open.contains_interval(&open));

        // empty intervals are never contained
        assert!(!closed.contains_interval(&Interval::open(0.5, 0.5)));
    }

    #[test]
    fn test_intersects() {
        let a = Interval::closed(0.0, 1.0);
        let b = Interval::closed(1.0, 2.0);
        assert!(a.intersects(&b));

        let c = Interval::open(1.0, 2.0);
        assert!(!a.intersects(&c));
        assert!(!Interval::open(0.0, 1.0).intersects(&c));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Interval::closed(0.0, 1.0), Interval::closed(0.0, 1.0));
        assert_ne!(Interval::closed(0.0, 1.0), Interval::open(0.0, 1.0));
        // all empty intervals are equal
        assert_eq!(Interval::open(0.0, 0.0), Interval::open(5.0, 5.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::left_closed(0.0, 1.0).to_string(), "[0, 1)");
        assert_eq!(Interval::open(-1.0, 2.5).to_string(), "(-1, 2.5)");
    }
}

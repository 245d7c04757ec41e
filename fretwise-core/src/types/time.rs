//! Rational beat positions
//!
//! Note starts are whole beats and sustains are a fixed fraction of a beat, so
//! a sequence's layout is exact in beats. Conversion to seconds happens once,
//! at the tempo boundary.

use num_rational::Ratio;
use num_traits::ToPrimitive;

/// Exact time point in beats from the start of a sequence
pub type Time = Ratio<i64>;

/// A span of beats [start, end)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    pub start: Time,
    pub end: Time,
}

impl Arc {
    pub fn new(start: Time, end: Time) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    /// Check if a time point falls within this arc [start, end)
    pub fn contains(&self, t: Time) -> bool {
        t >= self.start && t < self.end
    }
}

#[inline]
pub fn time(n: i64, d: i64) -> Time {
    Ratio::new(n, d)
}

/// Create Time from an integer (whole beats)
#[inline]
pub fn beats(n: i64) -> Time {
    Ratio::from_integer(n)
}

/// Convert rational to f64 for audio output
#[inline]
pub fn to_f64(t: Time) -> f64 {
    t.to_f64().unwrap_or(0.0)
}

/// Seconds covered by `t` beats at `seconds_per_beat`
#[inline]
pub fn to_seconds(t: Time, seconds_per_beat: f64) -> f64 {
    to_f64(t) * seconds_per_beat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_arithmetic() {
        let a = time(1, 3);
        let b = time(1, 6);
        assert_eq!(a + b, time(1, 2));
    }

    #[test]
    fn test_arc_contains() {
        let arc = Arc::new(beats(0), time(9, 10));
        assert!(arc.contains(beats(0)));
        assert!(arc.contains(time(1, 2)));
        assert!(!arc.contains(time(9, 10))); // End is exclusive
        assert_eq!(arc.duration(), time(9, 10));
    }

    #[test]
    fn test_seconds_conversion() {
        assert_eq!(to_seconds(beats(3), 0.5), 1.5);
        assert!((to_seconds(time(9, 10), 0.5) - 0.45).abs() < 1e-12);
    }
}

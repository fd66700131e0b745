//! Small numeric helpers shared by the scorers.
//!
//! Ratios keep numerator and denominator so callers can tell a computed `0.0`
//! apart from "no data" (`value() == None`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    pub hits: u32,
    pub total: u32,
}

impl Ratio {
    pub fn new(hits: u32, total: u32) -> Self {
        Self { hits, total }
    }

    /// `hits / total`, `None` for an empty denominator.
    pub fn value(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.hits as f64 / self.total as f64)
        }
    }

    /// Same as [`Ratio::value`] but an empty denominator reads as `0.0`.
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    pub fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.hits += 1;
        }
    }
}

/// Division that yields `None` instead of inf/NaN.
pub fn checked_div(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 || !num.is_finite() || !den.is_finite() {
        None
    } else {
        Some(num / den)
    }
}

/// Mean of the finite values; `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        if v.is_finite() {
            sum += v;
            n += 1;
        }
    }
    if n > 0 {
        Some(sum / n as f64)
    } else {
        None
    }
}

/// Mean over present values, skipping `None` (nan-mean).
pub fn mean_present<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    mean(values.into_iter().flatten())
}

//! # Binary-Search Font Fitting
//!
//! Finds the largest integer font size whose measured extent fits a pixel
//! budget. Every layout uses this one search; what differs between call
//! sites is the measurement, passed in as a function value:
//!
//! | Text orientation | Measurement | Budget |
//! |------------------|-------------|--------|
//! | Upright | line height (ascent + descent) | vertical space left |
//! | Rotated ±90° | ink width (becomes height after rotation) | tape height minus margins |
//!
//! ## Algorithm
//!
//! ```text
//! measure(max) <= budget?  -> max
//! measure(min) >  budget?  -> max, fits = false      (degenerate)
//! otherwise bisect [lo, hi) keeping measure(lo) <= budget < measure(hi)
//! until hi - lo == 1       -> lo
//! ```
//!
//! The measurement must be non-decreasing in size. Font rendering satisfies
//! this; the search relies on it.
//!
//! ## Degenerate Fits
//!
//! [`fit_size`] reports a degenerate fit as `Fit { size: max, fits: false }`
//! and leaves the decision to the caller. [`fit_with_policy`] applies an
//! [`OverflowPolicy`]: shrink below the documented minimum, or fail with
//! [`LabelError::LayoutOverflow`].

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// Inclusive font size search range in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeBounds {
    pub min: u32,
    pub max: u32,
}

impl SizeBounds {
    pub fn new(min: u32, max: u32) -> Self {
        // A requested maximum below the template minimum narrows the range
        // to that maximum.
        Self {
            min: min.min(max).max(1),
            max: max.max(1),
        }
    }

    /// Scale nominal bounds by a tape scale factor (truncating).
    pub fn scaled(min_pt: u32, max_pt: u32, scale: f64) -> Self {
        Self::new((min_pt as f64 * scale) as u32, (max_pt as f64 * scale) as u32)
    }
}

/// Result of a font fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub size: u32,
    /// `false` when not even `bounds.min` fits (then `size == bounds.max`).
    pub fits: bool,
}

/// What to do when text does not fit even at the minimum size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep searching below the minimum down to 1pt; fail only if 1pt
    /// still overflows.
    #[default]
    Shrink,
    /// Fail with [`LabelError::LayoutOverflow`] as soon as the minimum
    /// overflows.
    Strict,
}

/// Find the largest size in `bounds` with `measure(size) <= budget_px`.
///
/// Returns `Fit { size: bounds.max, fits: false }` if no size in range
/// satisfies the budget.
pub fn fit_size(bounds: SizeBounds, budget_px: i64, measure: impl Fn(u32) -> u32) -> Fit {
    let fits = |size: u32| measure(size) as i64 <= budget_px;

    if fits(bounds.max) {
        return Fit {
            size: bounds.max,
            fits: true,
        };
    }
    if !fits(bounds.min) {
        return Fit {
            size: bounds.max,
            fits: false,
        };
    }

    // Invariant: lo fits, hi does not
    let (mut lo, mut hi) = (bounds.min, bounds.max);
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    Fit { size: lo, fits: true }
}

/// [`fit_size`] followed by the overflow policy.
///
/// `element` names the text being fitted in logs and errors.
pub fn fit_with_policy(
    element: &str,
    bounds: SizeBounds,
    budget_px: i64,
    policy: OverflowPolicy,
    measure: impl Fn(u32) -> u32,
) -> Result<u32> {
    let fit = fit_size(bounds, budget_px, &measure);
    if fit.fits {
        log::debug!(
            "fit {}: {}pt in [{}, {}] for budget {}px",
            element,
            fit.size,
            bounds.min,
            bounds.max,
            budget_px
        );
        return Ok(fit.size);
    }

    let overflow = || LabelError::LayoutOverflow {
        element: element.to_string(),
        budget_px,
    };

    match policy {
        OverflowPolicy::Strict => Err(overflow()),
        OverflowPolicy::Shrink => {
            let below = fit_size(SizeBounds::new(1, bounds.min), budget_px, &measure);
            if !below.fits {
                return Err(overflow());
            }
            log::warn!(
                "{} does not fit at {}pt; shrinking to {}pt for budget {}px",
                element,
                bounds.min,
                below.size,
                budget_px
            );
            Ok(below.size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{DEFAULT_FONT, LabelFont};

    /// Brute-force reference: largest fitting size by linear scan.
    fn linear(bounds: SizeBounds, budget: i64, measure: impl Fn(u32) -> u32) -> Option<u32> {
        (bounds.min..=bounds.max)
            .rev()
            .find(|&s| measure(s) as i64 <= budget)
    }

    #[test]
    fn test_matches_linear_scan() {
        let bounds = SizeBounds::new(20, 100);
        for budget in [20i64, 37, 50, 64, 99, 100, 117, 150] {
            let measure = |s: u32| s * 7 / 6;
            let fit = fit_size(bounds, budget, measure);
            match linear(bounds, budget, measure) {
                Some(expected) => {
                    assert!(fit.fits);
                    assert_eq!(fit.size, expected, "budget {}", budget);
                }
                None => assert!(!fit.fits),
            }
        }
    }

    #[test]
    fn test_everything_fits_returns_max() {
        let fit = fit_size(SizeBounds::new(20, 100), 1000, |s| s);
        assert_eq!(fit, Fit { size: 100, fits: true });
    }

    #[test]
    fn test_nothing_fits_returns_max_unverified() {
        let fit = fit_size(SizeBounds::new(20, 100), 10, |s| s);
        assert_eq!(fit, Fit { size: 100, fits: false });
    }

    #[test]
    fn test_negative_budget_never_fits() {
        let fit = fit_size(SizeBounds::new(1, 50), -14, |s| s);
        assert!(!fit.fits);
    }

    #[test]
    fn test_scaled_bounds() {
        let bounds = SizeBounds::scaled(20, 100, 696.0 / 306.0);
        assert_eq!(bounds, SizeBounds { min: 45, max: 227 });
    }

    #[test]
    fn test_inverted_bounds_collapse_to_max() {
        let bounds = SizeBounds::new(20, 10);
        assert_eq!(bounds, SizeBounds { min: 10, max: 10 });
    }

    #[test]
    fn test_policy_shrinks_below_minimum() {
        let size = fit_with_policy("text", SizeBounds::new(20, 100), 12, OverflowPolicy::Shrink, |s| s).unwrap();
        assert_eq!(size, 12);
    }

    #[test]
    fn test_policy_strict_fails() {
        let err = fit_with_policy("text", SizeBounds::new(20, 100), 12, OverflowPolicy::Strict, |s| s)
            .unwrap_err();
        assert!(matches!(err, LabelError::LayoutOverflow { budget_px: 12, .. }));
    }

    #[test]
    fn test_policy_shrink_fails_when_one_point_overflows() {
        let err = fit_with_policy("text", SizeBounds::new(20, 100), -5, OverflowPolicy::Shrink, |s| s)
            .unwrap_err();
        assert!(matches!(err, LabelError::LayoutOverflow { .. }));
    }

    #[test]
    fn test_size_non_increasing_with_text_length() {
        let font = LabelFont::load(DEFAULT_FONT).unwrap();
        let bounds = SizeBounds::new(1, 300);
        let mut last = u32::MAX;
        let mut text = String::new();
        for ch in "STORAGE BOX 1234567".chars() {
            text.push(ch);
            let fit = fit_size(bounds, 266, |s| font.text_width(&text, s));
            assert!(fit.size <= last, "size grew when text became {:?}", text);
            last = fit.size;
        }
    }

    #[test]
    fn test_fit_is_idempotent() {
        let font = LabelFont::load(DEFAULT_FONT).unwrap();
        let bounds = SizeBounds::new(20, 100);
        let first = fit_size(bounds, 226, |s| font.line_height(s));
        for _ in 0..5 {
            assert_eq!(fit_size(bounds, 226, |s| font.line_height(s)), first);
        }
    }
}

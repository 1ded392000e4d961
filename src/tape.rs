//! # Tape Classes
//!
//! This module defines the supported continuous-tape widths and the scale
//! model derived from them.
//!
//! For continuous tape the bitmap HEIGHT is fixed by the tape width and the
//! bitmap WIDTH is free (it becomes the label length).
//!
//! ## Supported Tapes
//!
//! | Tape | Height (px) | Scale |
//! |------|-------------|-------|
//! | 29mm | 306 | 1.000 |
//! | 38mm | 413 | ~1.350 |
//! | 50mm | 554 | ~1.810 |
//! | 62mm | 696 | ~2.275 |
//!
//! Pixel heights are given at the printer's 300 DPI resolution.
//!
//! ## Usage
//!
//! ```
//! use cinta::tape::TapeClass;
//!
//! let tape = TapeClass::from_mm(62)?;
//! assert_eq!(tape.height_px(), 696);
//! assert!((tape.scale() - 696.0 / 306.0).abs() < 1e-9);
//! # Ok::<(), cinta::LabelError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// The tape every scale factor is relative to.
pub const REFERENCE_TAPE: TapeClass = TapeClass::Mm29;

/// One of the four supported physical tape widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TapeClass {
    Mm29,
    Mm38,
    Mm50,
    Mm62,
}

impl TapeClass {
    /// All supported classes, smallest first.
    pub const ALL: [TapeClass; 4] = [Self::Mm29, Self::Mm38, Self::Mm50, Self::Mm62];

    /// Look up a tape class by its width in millimeters.
    ///
    /// ## Errors
    ///
    /// Returns [`LabelError::Configuration`] listing the supported widths
    /// when `mm` is not one of them.
    pub fn from_mm(mm: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tape| tape.mm() == mm)
            .ok_or_else(|| {
                let supported: Vec<u32> = Self::ALL.iter().map(|t| t.mm()).collect();
                LabelError::Configuration(format!(
                    "Unsupported tape width: {}mm. Supported: {:?}",
                    mm, supported
                ))
            })
    }

    /// Tape width in millimeters (the literal value handed to the printer).
    #[inline]
    pub const fn mm(self) -> u32 {
        match self {
            Self::Mm29 => 29,
            Self::Mm38 => 38,
            Self::Mm50 => 50,
            Self::Mm62 => 62,
        }
    }

    /// Fixed bitmap height in pixels.
    ///
    /// This is the only height a composed label for this tape may have.
    #[inline]
    pub const fn height_px(self) -> u32 {
        match self {
            Self::Mm29 => 306,
            Self::Mm38 => 413,
            Self::Mm50 => 554,
            Self::Mm62 => 696,
        }
    }

    /// Scale factor relative to the 29mm reference tape.
    ///
    /// ```text
    /// scale = height_px(tape) / height_px(29mm)
    /// ```
    #[inline]
    pub fn scale(self) -> f64 {
        self.height_px() as f64 / REFERENCE_TAPE.height_px() as f64
    }

    /// Scale a nominal (29mm) pixel constant, truncating toward zero.
    #[inline]
    pub fn scale_px(self, nominal: u32) -> u32 {
        (nominal as f64 * self.scale()) as u32
    }
}

impl Default for TapeClass {
    fn default() -> Self {
        REFERENCE_TAPE
    }
}

impl fmt::Display for TapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}mm", self.mm())
    }
}

impl TryFrom<u32> for TapeClass {
    type Error = LabelError;

    fn try_from(mm: u32) -> Result<Self> {
        Self::from_mm(mm)
    }
}

impl From<TapeClass> for u32 {
    fn from(tape: TapeClass) -> u32 {
        tape.mm()
    }
}

//! # Print Transport
//!
//! Hands composed labels to a printer, one copy at a time.
//!
//! ## Sinks
//!
//! A [`LabelSink`] is anything that accepts a finished label plus the job
//! options a continuous-tape printer needs:
//!
//! | Option | Meaning | Default |
//! |--------|---------|---------|
//! | `tape` | tape class loaded in the printer | (required) |
//! | `rotation` | quarter turns applied before transmission | 90° |
//! | `cut` | cut the tape after each label | `true` |
//!
//! ## Available Sinks
//!
//! - [`png`]: writes each copy as a PNG into a spool directory
//!
//! Device drivers implement [`LabelSink`] outside this crate.

pub mod png;

pub use png::PngSink;

use std::fmt;

use image::{RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::compose::ComposedImage;
use crate::error::{LabelError, Result};
use crate::tape::TapeClass;

/// Counterclockwise rotation applied to a label before transmission.
///
/// Labels are composed with the tape running left to right; most
/// continuous-tape printers feed them top to bottom, hence the 90° default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    Deg0,
    #[default]
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(LabelError::Configuration(format!(
                "Unsupported rotation: {}. Supported: [0, 90, 180, 270]",
                other
            ))),
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Rotate `image` counterclockwise by this angle.
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        match self {
            Rotation::Deg0 => image.clone(),
            Rotation::Deg90 => imageops::rotate270(image),
            Rotation::Deg180 => imageops::rotate180(image),
            Rotation::Deg270 => imageops::rotate90(image),
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = LabelError;

    fn try_from(degrees: u32) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Options for one print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintJob {
    pub tape: TapeClass,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default = "default_cut")]
    pub cut: bool,
}

fn default_cut() -> bool {
    true
}

impl PrintJob {
    pub fn new(tape: TapeClass) -> Self {
        Self {
            tape,
            rotation: Rotation::default(),
            cut: true,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_cut(mut self, cut: bool) -> Self {
        self.cut = cut;
        self
    }
}

/// Accepts finished labels for printing.
pub trait LabelSink {
    /// Transmit one copy. Blocks until the device acknowledged it.
    fn transmit(&mut self, image: &ComposedImage, job: &PrintJob) -> Result<()>;
}

/// Transmit `copies` copies, one at a time.
///
/// Stops at the first failure. Returns the number of copies acknowledged,
/// which is `copies` on success; on failure the count travels in the error.
///
/// ## Errors
///
/// - [`LabelError::Validation`] if `copies` is zero
/// - [`LabelError::Configuration`] if the label was composed for a
///   different tape than the job's
/// - [`LabelError::PrintInterrupted`] if the sink fails, carrying the
///   acknowledged count and the sink's error
pub fn print_copies(
    sink: &mut dyn LabelSink,
    image: &ComposedImage,
    job: &PrintJob,
    copies: u32,
) -> Result<u32> {
    if copies == 0 {
        return Err(LabelError::Validation("At least one copy is required".to_string()));
    }
    if image.tape() != job.tape {
        return Err(LabelError::Configuration(format!(
            "Label composed for {} tape but the job uses {}",
            image.tape(),
            job.tape
        )));
    }

    for copy in 1..=copies {
        sink.transmit(image, job).map_err(|e| LabelError::PrintInterrupted {
            acknowledged: copy - 1,
            requested: copies,
            source: Box::new(e),
        })?;
        log::info!("printed copy {}/{} on {} tape", copy, copies, job.tape);
    }

    Ok(copies)
}

//! # Batch Composition
//!
//! Composes many labels against one [`Composer`], in parallel.
//!
//! Composition is a pure function over read-only inputs (font, encoder,
//! configuration), so entries are farmed out to a rayon pool with no shared
//! mutable state. Each entry succeeds or fails on its own: a failed entry is
//! reported by index and never aborts the rest of the batch.
//!
//! ## Batch Files
//!
//! ```json
//! {
//!   "template": "horizontal",
//!   "tape_mm": 29,
//!   "font": null,
//!   "font_size": 100,
//!   "labels": [
//!     { "text": "BOX 1", "payload": "https://inventory.local/box/1", "include_code": true },
//!     { "text": "SHELF", "number": "7", "copies": 2 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::compose::{ComposedImage, Composer, TemplateVariant};
use crate::error::{LabelError, Result};
use crate::font::FontSpec;
use crate::label::LabelContent;
use crate::tape::TapeClass;

/// Vertical gap between labels in a preview strip.
pub const PREVIEW_GAP_PX: u32 = 10;

fn one() -> u32 {
    1
}

/// One label in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchEntry {
    #[serde(flatten)]
    pub content: LabelContent,
    /// Number of copies to print.
    #[serde(default = "one")]
    pub copies: u32,
}

impl BatchEntry {
    pub fn new(content: LabelContent) -> Self {
        Self { content, copies: 1 }
    }
}

/// A batch file: shared settings plus the labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFile {
    pub template: TemplateVariant,
    pub tape_mm: TapeClass,
    /// Font file; the bundled font when absent.
    #[serde(default)]
    pub font: Option<PathBuf>,
    /// Requested font size in points.
    #[serde(default)]
    pub font_size: Option<u32>,
    pub labels: Vec<BatchEntry>,
}

impl BatchFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LabelError::Configuration(format!("Invalid batch file: {}", e)))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| {
            LabelError::Configuration(format!("Invalid batch file {}: {}", path.display(), e))
        })
    }

    /// Font spec for this batch.
    pub fn font_spec(&self) -> FontSpec {
        let spec = self.font.clone().map(FontSpec::new).unwrap_or_default();
        FontSpec {
            max_size_pt: self.font_size,
            ..spec
        }
    }
}

/// A successfully composed batch entry.
#[derive(Debug, Clone)]
pub struct BatchLabel {
    /// Position of the entry in the batch.
    pub index: usize,
    pub copies: u32,
    pub image: ComposedImage,
}

/// Outcome of [`compose_batch`], both lists in index order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub labels: Vec<BatchLabel>,
    pub failures: Vec<(usize, LabelError)>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total copies across the composed labels.
    pub fn total_copies(&self) -> u32 {
        self.labels.iter().map(|l| l.copies).sum()
    }
}

/// Compose every entry with the same template and tape.
pub fn compose_batch(
    composer: &Composer,
    variant: TemplateVariant,
    tape: TapeClass,
    entries: &[BatchEntry],
) -> BatchReport {
    let results: Vec<Result<ComposedImage>> = entries
        .par_iter()
        .map(|entry| composer.compose(variant, &entry.content, tape))
        .collect();

    let mut report = BatchReport::default();
    for (index, (entry, result)) in entries.iter().zip(results).enumerate() {
        match result {
            Ok(image) => report.labels.push(BatchLabel {
                index,
                copies: entry.copies,
                image,
            }),
            Err(e) => {
                log::warn!("batch entry {} ({:?}) failed: {}", index, entry.content.text(), e);
                report.failures.push((index, e));
            }
        }
    }

    log::info!(
        "composed {}/{} labels ({} failed)",
        report.labels.len(),
        entries.len(),
        report.failures.len()
    );
    report
}

/// Compose a whole batch file.
pub fn compose_file(batch: &BatchFile) -> Result<BatchReport> {
    let composer = Composer::new(&batch.font_spec())?;
    Ok(compose_batch(&composer, batch.template, batch.tape_mm, &batch.labels))
}

/// Stack labels vertically, left aligned, separated by [`PREVIEW_GAP_PX`].
pub fn preview_strip<'a>(images: impl IntoIterator<Item = &'a ComposedImage>) -> RgbImage {
    let images: Vec<&ComposedImage> = images.into_iter().collect();
    let width = images.iter().map(|i| i.width()).max().unwrap_or(0);
    let height = images.iter().map(|i| i.height()).sum::<u32>()
        + PREVIEW_GAP_PX * images.len().saturating_sub(1) as u32;

    let mut strip = RgbImage::from_pixel(width.max(1), height.max(1), Rgb([255, 255, 255]));
    let mut y = 0i64;
    for image in images {
        image::imageops::overlay(&mut strip, image.image(), 0, y);
        y += (image.height() + PREVIEW_GAP_PX) as i64;
    }
    strip
}

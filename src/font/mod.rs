//! # Font Loading and Text Measurement
//!
//! Loads TrueType/OpenType fonts with `ab_glyph` and provides the two
//! measurements the layouts fit against, plus anti-aliased text drawing onto
//! an RGB canvas.
//!
//! ## Size Convention
//!
//! Sizes are integer "points" where one point is one pixel per em. A font
//! loaded at size `s` therefore reports `ascent = s * ascender / units_per_em`.
//!
//! ## Geometry
//!
//! ```text
//!   x (ink left)
//!   │
//!   ▼ ┌──────────────┐ ◄── y (line top)
//!     │  ██   ████   │ ascent
//!     │ █  █  █   █  │
//!     │ ████  ████   │ ◄── baseline
//!     │              │ descent
//!     └──────────────┘
//!     ◄──── width ───►
//! ```
//!
//! Horizontally text is placed by its ink box, so the measured width is
//! exactly the painted width. Vertically it is placed by its line box
//! (ascent + descent), which does not depend on the glyphs used.

pub mod fit;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, Glyph, PxScale, Rect, ScaleFont, point};
use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::error::{LabelError, Result};

/// Font bundled with the crate (DejaVu Sans Bold).
pub const DEFAULT_FONT: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans-Bold.ttf"
);

/// Font file plus the requested maximum size.
///
/// The requested size is an upper bound, not a guarantee: the rendered size
/// is chosen by the fitter and is always `<= max_size_pt * scale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSpec {
    pub path: PathBuf,
    /// `None` lets every template use its own nominal upper bound.
    #[serde(default)]
    pub max_size_pt: Option<u32>,
}

impl FontSpec {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size_pt: None,
        }
    }

    /// Set the requested maximum font size in points.
    pub fn with_max_size(mut self, pt: u32) -> Self {
        self.max_size_pt = Some(pt);
        self
    }

    /// Load the font file.
    pub fn load(&self) -> Result<LabelFont> {
        LabelFont::load(&self.path)
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FONT)
    }
}

/// Vertical font metrics at one size, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMetrics {
    pub ascent: u32,
    pub descent: u32,
}

impl LineMetrics {
    /// Height of the line box (ascent + descent).
    #[inline]
    pub fn height(&self) -> u32 {
        self.ascent + self.descent
    }
}

/// Measured extent of a text run at one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    /// Ink width in pixels.
    pub width: u32,
    /// Offset of the leftmost ink pixel from the pen origin.
    pub ink_left: i32,
    pub line: LineMetrics,
}

/// A loaded font, cheap to clone and shareable across threads.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    path: PathBuf,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont").field("path", &self.path).finish()
    }
}

impl LabelFont {
    /// Load a font from a file.
    ///
    /// ## Errors
    ///
    /// [`LabelError::Resource`] if the file is missing, unreadable, or not a
    /// font.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            LabelError::Resource(format!("Cannot read font {}: {}", path.display(), e))
        })?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| {
            LabelError::Resource(format!("Invalid font {}: {}", path.display(), e))
        })?;

        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn px_scale(&self, size: u32) -> PxScale {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        PxScale::from(size as f32 * self.font.height_unscaled() / units_per_em)
    }

    /// Ascent and descent at `size`.
    pub fn line_metrics(&self, size: u32) -> LineMetrics {
        let scaled = self.font.as_scaled(self.px_scale(size));
        LineMetrics {
            ascent: scaled.ascent().ceil().max(0.0) as u32,
            descent: (-scaled.descent()).ceil().max(0.0) as u32,
        }
    }

    /// Line box height (ascent + descent) at `size`.
    ///
    /// This is the measurement upright text is fitted against.
    pub fn line_height(&self, size: u32) -> u32 {
        self.line_metrics(size).height()
    }

    /// Ink width of `text` at `size`.
    ///
    /// This is the measurement text that will be rotated is fitted against.
    pub fn text_width(&self, text: &str, size: u32) -> u32 {
        self.measure(text, size).width
    }

    /// Measure `text` at `size`.
    pub fn measure(&self, text: &str, size: u32) -> TextExtent {
        let line = self.line_metrics(size);
        let (glyphs, advance) = self.layout(text, size, 0.0, line.ascent as f32);

        match self.ink_bounds(&glyphs) {
            Some(bounds) => TextExtent {
                width: (bounds.max.x - bounds.min.x).max(0.0) as u32,
                ink_left: bounds.min.x as i32,
                line,
            },
            // Whitespace only: fall back to the advance width
            None => TextExtent {
                width: advance.ceil() as u32,
                ink_left: 0,
                line,
            },
        }
    }

    /// Draw `text` in black with its ink box starting at `x` and its line
    /// box starting at `y`.
    ///
    /// Pixels falling outside the canvas are dropped.
    pub fn draw(&self, canvas: &mut RgbImage, text: &str, size: u32, x: i64, y: i64) {
        let extent = self.measure(text, size);
        let origin_x = (x - extent.ink_left as i64) as f32;
        let baseline = (y + extent.line.ascent as i64) as f32;
        let (glyphs, _) = self.layout(text, size, origin_x, baseline);

        let (width, height) = canvas.dimensions();
        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= width as i64 || py >= height as i64 {
                    return;
                }
                let keep = 1.0 - coverage.clamp(0.0, 1.0);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for channel in pixel.0.iter_mut() {
                    *channel = (*channel as f32 * keep).round() as u8;
                }
            });
        }
    }

    /// Position glyphs along a single line with kerning.
    ///
    /// Returns the glyphs and the total advance width.
    fn layout(&self, text: &str, size: u32, origin_x: f32, baseline: f32) -> (Vec<Glyph>, f32) {
        let scale = self.px_scale(size);
        let scaled = self.font.as_scaled(scale);

        let mut glyphs = Vec::with_capacity(text.len());
        let mut caret = 0.0f32;
        let mut previous = None;

        for ch in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(origin_x + caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret)
    }

    fn ink_bounds(&self, glyphs: &[Glyph]) -> Option<Rect> {
        glyphs
            .iter()
            .filter_map(|g| self.font.outline_glyph(g.clone()))
            .map(|outlined| outlined.px_bounds())
            .reduce(|a, b| Rect {
                min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
                max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn font() -> LabelFont {
        LabelFont::load(DEFAULT_FONT).unwrap()
    }

    #[test]
    fn test_loaded_font_keeps_its_path() {
        let font = font();
        assert_eq!(font.path(), Path::new(DEFAULT_FONT));
    }

    #[test]
    fn test_missing_font_is_resource_error() {
        let err = LabelFont::load("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, LabelError::Resource(_)), "{:?}", err);
    }

    #[test]
    fn test_non_font_file_is_resource_error() {
        let err = LabelFont::load(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml")).unwrap_err();
        assert!(matches!(err, LabelError::Resource(_)));
    }

    #[test]
    fn test_line_height_grows_with_size() {
        let font = font();
        let mut last = 0;
        for size in (10..200).step_by(7) {
            let h = font.line_height(size);
            assert!(h >= last, "line height shrank at {}pt", size);
            last = h;
        }
        // DejaVu's line box is a bit taller than its em
        assert!(font.line_height(100) > 100);
    }

    #[test]
    fn test_width_grows_with_text() {
        let font = font();
        assert!(font.text_width("BOX 1", 60) < font.text_width("BOX 12", 60));
        assert!(font.text_width("W", 60) > 0);
    }

    #[test]
    fn test_whitespace_falls_back_to_advance() {
        let font = font();
        let extent = font.measure("   ", 50);
        assert!(extent.width > 0);
        assert_eq!(extent.ink_left, 0);
    }

    #[test]
    fn test_draw_stays_inside_measured_box() {
        let font = font();
        let size = 80;
        let extent = font.measure("BOX 1", size);
        let (w, h) = (extent.width + 40, extent.line.height() + 40);
        let mut canvas = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
        font.draw(&mut canvas, "BOX 1", size, 20, 20);

        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for (x, y, p) in canvas.enumerate_pixels() {
            if p.0[0] < 255 {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                assert!(y >= 20 && y < 20 + extent.line.height(), "ink outside line box at y={}", y);
            }
        }
        // The first ink column may be faint enough to round back to white
        assert!(min_x == 20 || min_x == 21, "ink starts at {}", min_x);
        assert!(max_x < 20 + extent.width);
    }
}

//! # Label Composition
//!
//! Turns [`LabelContent`] into a white RGB canvas whose height is exactly
//! the tape's printable height and whose width follows from the content.
//!
//! ## Templates
//!
//! | # | Template | Arrangement |
//! |---|----------|-------------|
//! | 1 | [`Horizontal`](TemplateVariant::Horizontal) | code left, text right, faint box watermark |
//! | 2 | [`CompactVertical`](TemplateVariant::CompactVertical) | code above text |
//! | 3 | [`Rotated`](TemplateVariant::Rotated) | code left, text turned 90° counterclockwise |
//! | 4 | [`TextOnly`](TemplateVariant::TextOnly) | one line of upright text |
//! | 5 | [`VerticalOnly`](TemplateVariant::VerticalOnly) | rotated text alone |
//! | 6 | [`TextAboveCode`](TemplateVariant::TextAboveCode) | text above code |
//! | 7 | [`ShelfNumber`](TemplateVariant::ShelfNumber) | rotated word, large number |
//! | 8 | [`StorageCode`](TemplateVariant::StorageCode) | code over caption, large number |
//!
//! ## Pipeline
//!
//! ```text
//! content ──validate──► TemplateConfig::scaled(tape) ──► template layout
//!                                                          │ fit fonts
//!                                                          │ size canvas
//!                                                          │ paste code / text
//!                                                          ▼
//!                                              draw_border ──► ComposedImage
//! ```
//!
//! Every layout is a pure function of its inputs: composing the same content
//! twice yields identical pixels.
//!
//! ## Example
//!
//! ```
//! use cinta::compose::{Composer, TemplateVariant};
//! use cinta::font::FontSpec;
//! use cinta::label::LabelContent;
//! use cinta::tape::TapeClass;
//!
//! let composer = Composer::new(&FontSpec::default())?;
//! let content = LabelContent::new("BOX 1").with_code("https://inventory.local/box/1");
//! let label = composer.compose(TemplateVariant::Horizontal, &content, TapeClass::Mm29)?;
//! assert_eq!(label.height(), 306);
//! # Ok::<(), cinta::LabelError>(())
//! ```

pub mod border;
pub mod config;
pub mod icon;
pub mod rotate;

mod horizontal;
mod rotated;
mod shelf;
mod stacked;
mod storage;
mod text_only;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{ImageFormat, Rgb, RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::code::{CodeEncoder, QrEncoder, code_bitmap};
use crate::error::{LabelError, Result};
use crate::font::fit::{OverflowPolicy, SizeBounds, fit_with_policy};
use crate::font::{FontSpec, LabelFont, LineMetrics};
use crate::label::LabelContent;
use crate::tape::TapeClass;

use config::{ScaledConfig, TemplateConfig};

// ============================================================================
// Template variants
// ============================================================================

/// The eight label templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateVariant {
    Horizontal,
    CompactVertical,
    Rotated,
    TextOnly,
    VerticalOnly,
    TextAboveCode,
    ShelfNumber,
    StorageCode,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 8] = [
        TemplateVariant::Horizontal,
        TemplateVariant::CompactVertical,
        TemplateVariant::Rotated,
        TemplateVariant::TextOnly,
        TemplateVariant::VerticalOnly,
        TemplateVariant::TextAboveCode,
        TemplateVariant::ShelfNumber,
        TemplateVariant::StorageCode,
    ];

    /// Template number, 1 through 8.
    pub fn id(&self) -> u8 {
        match self {
            TemplateVariant::Horizontal => 1,
            TemplateVariant::CompactVertical => 2,
            TemplateVariant::Rotated => 3,
            TemplateVariant::TextOnly => 4,
            TemplateVariant::VerticalOnly => 5,
            TemplateVariant::TextAboveCode => 6,
            TemplateVariant::ShelfNumber => 7,
            TemplateVariant::StorageCode => 8,
        }
    }

    pub fn from_id(id: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.id() == id)
            .ok_or_else(|| LabelError::Configuration(format!("Unknown template: {}", id)))
    }

    /// Kebab-case name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            TemplateVariant::Horizontal => "horizontal",
            TemplateVariant::CompactVertical => "compact-vertical",
            TemplateVariant::Rotated => "rotated",
            TemplateVariant::TextOnly => "text-only",
            TemplateVariant::VerticalOnly => "vertical-only",
            TemplateVariant::TextAboveCode => "text-above-code",
            TemplateVariant::ShelfNumber => "shelf-number",
            TemplateVariant::StorageCode => "storage-code",
        }
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            TemplateVariant::Horizontal => "Code left, text right, box watermark",
            TemplateVariant::CompactVertical => "Code above text",
            TemplateVariant::Rotated => "Code left, text rotated 90 degrees",
            TemplateVariant::TextOnly => "Single line of text",
            TemplateVariant::VerticalOnly => "Rotated text only",
            TemplateVariant::TextAboveCode => "Text above code",
            TemplateVariant::ShelfNumber => "Rotated word with a large number",
            TemplateVariant::StorageCode => "Code and caption with a large number",
        }
    }

    /// Whether the template can show a code at all.
    pub fn supports_code(&self) -> bool {
        !matches!(
            self,
            TemplateVariant::TextOnly | TemplateVariant::VerticalOnly | TemplateVariant::ShelfNumber
        )
    }

    /// Whether the template requires [`LabelContent::number`].
    pub fn requires_number(&self) -> bool {
        matches!(self, TemplateVariant::ShelfNumber | TemplateVariant::StorageCode)
    }

    pub fn config(&self) -> &'static TemplateConfig {
        match self {
            TemplateVariant::Horizontal => &TemplateConfig::HORIZONTAL,
            TemplateVariant::CompactVertical => &TemplateConfig::COMPACT_VERTICAL,
            TemplateVariant::Rotated => &TemplateConfig::ROTATED,
            TemplateVariant::TextOnly => &TemplateConfig::TEXT_ONLY,
            TemplateVariant::VerticalOnly => &TemplateConfig::VERTICAL_ONLY,
            TemplateVariant::TextAboveCode => &TemplateConfig::TEXT_ABOVE_CODE,
            TemplateVariant::ShelfNumber => &TemplateConfig::SHELF_NUMBER,
            TemplateVariant::StorageCode => &TemplateConfig::STORAGE_CODE,
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateVariant {
    type Err = LabelError;

    /// Accepts the template number (`"3"`), its name (`"rotated"`,
    /// `"text_only"`, `"Text-Only"`), or `"shelf"` / `"storage"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<u8>() {
            return Self::from_id(id);
        }
        let name = s.to_ascii_lowercase().replace('_', "-");
        match name.as_str() {
            "shelf" => return Ok(TemplateVariant::ShelfNumber),
            "storage" => return Ok(TemplateVariant::StorageCode),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| LabelError::Configuration(format!("Unknown template: {}", s)))
    }
}

// ============================================================================
// Composed image
// ============================================================================

/// A finished label bitmap.
///
/// Height always equals [`TapeClass::height_px`] of `tape`.
#[derive(Debug, Clone)]
pub struct ComposedImage {
    image: RgbImage,
    tape: TapeClass,
    variant: TemplateVariant,
}

impl ComposedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn tape(&self) -> TapeClass {
        self.tape
    }

    pub fn variant(&self) -> TemplateVariant {
        self.variant
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Encode as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| LabelError::Image(format!("Cannot write {}: {}", path.display(), e)))
    }
}

// ============================================================================
// Composer
// ============================================================================

/// Composes labels with one loaded font and one code encoder.
///
/// A composer is immutable once built and can be shared across threads
/// (batch composition runs labels in parallel against one composer).
pub struct Composer {
    font: LabelFont,
    max_size_pt: Option<u32>,
    policy: OverflowPolicy,
    encoder: Box<dyn CodeEncoder>,
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("font", &self.font)
            .field("max_size_pt", &self.max_size_pt)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Composer {
    /// Load the font named by `spec` and use the default QR encoder.
    pub fn new(spec: &FontSpec) -> Result<Self> {
        Ok(Self::from_font(spec.load()?).with_max_size(spec.max_size_pt))
    }

    pub fn from_font(font: LabelFont) -> Self {
        Self {
            font,
            max_size_pt: None,
            policy: OverflowPolicy::default(),
            encoder: Box::new(QrEncoder::default()),
        }
    }

    /// Replace the code encoder.
    pub fn with_encoder(mut self, encoder: impl CodeEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn with_overflow_policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Requested maximum font size in points (`None` = template default).
    pub fn with_max_size(mut self, pt: Option<u32>) -> Self {
        self.max_size_pt = pt;
        self
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Compose one label.
    ///
    /// ## Errors
    ///
    /// - [`LabelError::Validation`] for empty text, a missing payload, or a
    ///   missing number on the number templates
    /// - [`LabelError::Encode`] if the payload cannot be encoded
    /// - [`LabelError::LayoutOverflow`] if text cannot fit under the
    ///   overflow policy
    pub fn compose(
        &self,
        variant: TemplateVariant,
        content: &LabelContent,
        tape: TapeClass,
    ) -> Result<ComposedImage> {
        content.validate()?;

        let layout = Layout {
            font: &self.font,
            cfg: variant.config().scaled(tape, self.max_size_pt),
            policy: self.policy,
            encoder: self.encoder.as_ref(),
        };

        let mut image = match variant {
            TemplateVariant::Horizontal => horizontal::compose(&layout, content)?,
            TemplateVariant::CompactVertical => {
                stacked::compose(&layout, content, stacked::Order::CodeFirst)?
            }
            TemplateVariant::Rotated => rotated::compose_with_code(&layout, content)?,
            TemplateVariant::TextOnly => text_only::compose(&layout, content)?,
            TemplateVariant::VerticalOnly => rotated::compose_text_only(&layout, content)?,
            TemplateVariant::TextAboveCode => {
                stacked::compose(&layout, content, stacked::Order::TextFirst)?
            }
            TemplateVariant::ShelfNumber => shelf::compose(&layout, content)?,
            TemplateVariant::StorageCode => storage::compose(&layout, content)?,
        };

        border::draw_border(&mut image, layout.cfg.scale);

        log::debug!(
            "composed {} label {:?} on {}: {}x{}",
            variant,
            content.text(),
            tape,
            image.width(),
            image.height()
        );

        Ok(ComposedImage {
            image,
            tape,
            variant,
        })
    }
}

/// Compose one label with a freshly loaded font and the default encoder.
pub fn compose(
    variant: TemplateVariant,
    content: &LabelContent,
    tape: TapeClass,
    font: &FontSpec,
) -> Result<ComposedImage> {
    Composer::new(font)?.compose(variant, content, tape)
}

// ============================================================================
// Layout helpers
// ============================================================================

/// Everything a template layout needs for one label.
pub(crate) struct Layout<'a> {
    pub font: &'a LabelFont,
    pub cfg: ScaledConfig,
    pub policy: OverflowPolicy,
    encoder: &'a dyn CodeEncoder,
}

impl Layout<'_> {
    /// Fit upright text: its line height must fit `budget_px`.
    pub fn fit_upright(&self, element: &str, bounds: SizeBounds, budget_px: i64) -> Result<u32> {
        fit_with_policy(element, bounds, budget_px, self.policy, |size| {
            self.font.line_height(size)
        })
    }

    /// Fit text by its ink width (text that will be rotated, or that must
    /// stay inside a column).
    pub fn fit_width(
        &self,
        element: &str,
        text: &str,
        bounds: SizeBounds,
        budget_px: i64,
    ) -> Result<u32> {
        fit_with_policy(element, bounds, budget_px, self.policy, |size| {
            self.font.text_width(text, size)
        })
    }

    /// Code bitmap at the template's code size.
    pub fn code(&self, payload: &str) -> Result<RgbImage> {
        code_bitmap(self.encoder, payload, self.cfg.code_size)
    }

    /// Blank canvas of the tape's height.
    pub fn canvas(&self, width: u32) -> RgbImage {
        blank(width, self.cfg.height)
    }
}

/// White RGB image.
pub(crate) fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width.max(1), height.max(1), Rgb([255, 255, 255]))
}

/// Paste `top` onto `canvas` at (`x`, `y`).
pub(crate) fn paste(canvas: &mut RgbImage, top: &RgbImage, x: i64, y: i64) {
    imageops::overlay(canvas, top, x, y);
}

/// Offset that centers `inner` within `outer` (may be negative).
pub(crate) fn center(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64) / 2
}

/// Line-box top that visually centers upright text on a canvas of
/// `height`: centered line box, nudged down by half the descent.
///
/// The nudge never pushes the line box past `height - padding`; a line
/// taller than the padded room stays plainly centered.
pub(crate) fn centered_line_top(height: u32, padding: u32, line: LineMetrics) -> i64 {
    let centered = center(height, line.height());
    let limit = height as i64 - padding as i64 - line.height() as i64;
    (centered + (line.descent / 2) as i64).min(limit).max(centered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_ids_round_trip() {
        for (i, variant) in TemplateVariant::ALL.iter().enumerate() {
            assert_eq!(variant.id() as usize, i + 1);
            assert_eq!(TemplateVariant::from_id(variant.id()).unwrap(), *variant);
        }
        assert!(TemplateVariant::from_id(0).is_err());
        assert!(TemplateVariant::from_id(9).is_err());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("3".parse::<TemplateVariant>().unwrap(), TemplateVariant::Rotated);
        assert_eq!("text_only".parse::<TemplateVariant>().unwrap(), TemplateVariant::TextOnly);
        assert_eq!(
            "Shelf-Number".parse::<TemplateVariant>().unwrap(),
            TemplateVariant::ShelfNumber
        );
        assert_eq!("shelf".parse::<TemplateVariant>().unwrap(), TemplateVariant::ShelfNumber);
        let err = "banner".parse::<TemplateVariant>().unwrap_err();
        assert!(matches!(err, LabelError::Configuration(_)));
    }

    #[test]
    fn test_variant_serde_kebab_case() {
        let json = serde_json::to_string(&TemplateVariant::TextAboveCode).unwrap();
        assert_eq!(json, "\"text-above-code\"");
        let back: TemplateVariant = serde_json::from_str("\"storage-code\"").unwrap();
        assert_eq!(back, TemplateVariant::StorageCode);
    }

    #[test]
    fn test_centered_line_top() {
        let line = LineMetrics { ascent: 80, descent: 20 };
        // (306 - 100) / 2 + 10
        assert_eq!(centered_line_top(306, 15, line), 113);
    }

    #[test]
    fn test_centered_line_top_keeps_padding() {
        // Fills 306 - 30 exactly; the descent nudge would cross the padding
        let line = LineMetrics { ascent: 220, descent: 56 };
        assert_eq!(centered_line_top(306, 15, line), 15);

        // Taller than the padded room: centered, no nudge
        let line = LineMetrics { ascent: 240, descent: 60 };
        assert_eq!(centered_line_top(306, 15, line), 3);
    }

    #[test]
    fn test_validation_runs_before_layout() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let err = composer
            .compose(TemplateVariant::TextOnly, &LabelContent::new(" "), TapeClass::Mm29)
            .unwrap_err();
        assert!(matches!(err, LabelError::Validation(_)));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let content = LabelContent::new("BOX 1").with_code("https://example.com/box/1");
        let a = composer.compose(TemplateVariant::Horizontal, &content, TapeClass::Mm38).unwrap();
        let b = composer.compose(TemplateVariant::Horizontal, &content, TapeClass::Mm38).unwrap();
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn test_missing_font_is_resource_error() {
        let err = compose(
            TemplateVariant::TextOnly,
            &LabelContent::new("BOX 1"),
            TapeClass::Mm29,
            &FontSpec::new("/nonexistent.ttf"),
        )
        .unwrap_err();
        assert!(matches!(err, LabelError::Resource(_)));
    }
}

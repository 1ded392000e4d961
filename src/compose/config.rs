//! # Template Configuration
//!
//! Every constant a layout uses lives here, as one declarative record per
//! template, in nominal pixels for the 29mm reference tape. Layout code
//! never contains a literal size; it reads a [`ScaledConfig`] produced by
//! [`TemplateConfig::scaled`] for the tape being printed.
//!
//! ## Scaling Rule
//!
//! ```text
//! px     = int(nominal * scale)
//! margin = max(int(nominal * scale), int(height * ratio))   (ratio-based margins)
//! code   = int(height * code_ratio)
//! ```
//!
//! ## Nominal Values
//!
//! | Template | padding | text pad | gap | code | icon | rot. margin | text pt | number pt |
//! |----------|---------|----------|-----|------|------|-------------|---------|-----------|
//! | horizontal | 15 | 45 | - | 85% | 80 | - | 20..req | - |
//! | compact-vertical | 15 | - | 30 | 60% | - | - | 20..req | - |
//! | rotated | 15 | 40 (right) | - | 90% | - | 20 | 20..req | - |
//! | text-only | 40 (vert.) | 60 | - | - | - | - | 20..req | - |
//! | vertical-only | 15 / 5% | - | - | - | - | 10 / 3% | 20..500 | - |
//! | text-above-code | 15 | - | 30 | 60% | - | - | 20..req | - |
//! | shelf-number | 20 | - | 30 | - | - | 20 | 30..200 | 80..500 @ 70% |
//! | storage-code | 20 | - | 40 | 65% | - | - | 20..150 | 100..600 @ 75% |
//!
//! `req` is the requested font size (100pt when none is given).

use crate::font::fit::SizeBounds;
use crate::tape::TapeClass;

/// Upper bound used when no font size was requested.
pub const DEFAULT_REQUESTED_PT: u32 = 100;

/// Nominal font size range in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PtRange {
    pub min: u32,
    pub max: u32,
    /// When true the requested size replaces `max`; otherwise the requested
    /// size can only lower it.
    pub follows_request: bool,
}

impl PtRange {
    const fn requested(min: u32) -> Self {
        Self {
            min,
            max: DEFAULT_REQUESTED_PT,
            follows_request: true,
        }
    }

    const fn fixed(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            follows_request: false,
        }
    }

    /// Resolve against the requested size, then scale.
    pub fn resolve(&self, requested: Option<u32>, scale: f64) -> SizeBounds {
        let max = match (requested, self.follows_request) {
            (Some(req), true) => req,
            (Some(req), false) => req.min(self.max),
            (None, _) => self.max,
        };
        SizeBounds::scaled(self.min, max, scale)
    }
}

/// Declarative constants for one template (nominal 29mm pixels).
///
/// Fields a template does not use are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateConfig {
    /// Outer padding around the content.
    pub padding: u32,
    /// Horizontal padding around the main text (right-side padding for the
    /// rotated template).
    pub text_padding: u32,
    /// Vertical padding above and below the text (text-only template).
    pub vertical_padding: u32,
    /// Gap between stacked or side-by-side elements.
    pub gap: u32,
    /// Code side length as a fraction of the tape height (0 = no code).
    pub code_ratio: f64,
    /// Watermark icon side length.
    pub icon_size: u32,
    /// Margin on each side of text before rotation.
    pub rotation_margin: u32,
    /// Minimum rotation margin as a fraction of the tape height.
    pub rotation_margin_ratio: f64,
    /// Minimum outer margin as a fraction of the tape height.
    pub outer_margin_ratio: f64,
    /// Font range of the main text.
    pub text_pt: PtRange,
    /// Font range of the large number.
    pub number_pt: PtRange,
    /// Height budget of the large number as a fraction of the tape height.
    pub number_height_ratio: f64,
    /// Share of the space under the code the caption may fill.
    pub caption_fill: f64,
    /// Caption height cap as a fraction of the tape height.
    pub caption_max_ratio: f64,
    /// Caption band as a fraction of the tape height when there is no code.
    pub caption_band_without_code: f64,
}

const BASE: TemplateConfig = TemplateConfig {
    padding: 0,
    text_padding: 0,
    vertical_padding: 0,
    gap: 0,
    code_ratio: 0.0,
    icon_size: 0,
    rotation_margin: 0,
    rotation_margin_ratio: 0.0,
    outer_margin_ratio: 0.0,
    text_pt: PtRange::requested(20),
    number_pt: PtRange::fixed(0, 0),
    number_height_ratio: 0.0,
    caption_fill: 0.0,
    caption_max_ratio: 0.0,
    caption_band_without_code: 0.0,
};

impl TemplateConfig {
    pub const HORIZONTAL: Self = Self {
        padding: 15,
        text_padding: 45,
        code_ratio: 0.85,
        icon_size: 80,
        ..BASE
    };

    pub const COMPACT_VERTICAL: Self = Self {
        padding: 15,
        gap: 30,
        code_ratio: 0.60,
        ..BASE
    };

    pub const ROTATED: Self = Self {
        padding: 15,
        text_padding: 40,
        code_ratio: 0.90,
        rotation_margin: 20,
        ..BASE
    };

    pub const TEXT_ONLY: Self = Self {
        text_padding: 60,
        vertical_padding: 40,
        ..BASE
    };

    pub const VERTICAL_ONLY: Self = Self {
        padding: 15,
        outer_margin_ratio: 0.05,
        rotation_margin: 10,
        rotation_margin_ratio: 0.03,
        text_pt: PtRange::fixed(20, 500),
        ..BASE
    };

    pub const TEXT_ABOVE_CODE: Self = Self {
        padding: 15,
        gap: 30,
        code_ratio: 0.60,
        ..BASE
    };

    pub const SHELF_NUMBER: Self = Self {
        padding: 20,
        gap: 30,
        rotation_margin: 20,
        text_pt: PtRange::fixed(30, 200),
        number_pt: PtRange::fixed(80, 500),
        number_height_ratio: 0.70,
        ..BASE
    };

    pub const STORAGE_CODE: Self = Self {
        padding: 20,
        gap: 40,
        code_ratio: 0.65,
        text_pt: PtRange::fixed(20, 150),
        number_pt: PtRange::fixed(100, 600),
        number_height_ratio: 0.75,
        caption_fill: 0.8,
        caption_max_ratio: 0.2,
        caption_band_without_code: 0.3,
        ..BASE
    };

    /// Scale every constant for `tape`.
    pub fn scaled(&self, tape: TapeClass, requested_pt: Option<u32>) -> ScaledConfig {
        let height = tape.height_px();
        let scale = tape.scale();
        let of_height = |ratio: f64| (height as f64 * ratio) as u32;

        ScaledConfig {
            height,
            scale,
            padding: tape.scale_px(self.padding),
            text_padding: tape.scale_px(self.text_padding),
            vertical_padding: tape.scale_px(self.vertical_padding),
            gap: tape.scale_px(self.gap),
            code_size: of_height(self.code_ratio),
            icon_size: tape.scale_px(self.icon_size),
            rotation_margin: tape
                .scale_px(self.rotation_margin)
                .max(of_height(self.rotation_margin_ratio)),
            outer_margin: tape
                .scale_px(self.padding)
                .max(of_height(self.outer_margin_ratio)),
            text_bounds: self.text_pt.resolve(requested_pt, scale),
            number_bounds: self.number_pt.resolve(requested_pt, scale),
            number_budget: of_height(self.number_height_ratio) as i64,
            caption_fill: self.caption_fill,
            caption_max: height as f64 * self.caption_max_ratio,
            caption_band_without_code: height as f64 * self.caption_band_without_code,
        }
    }
}

/// A [`TemplateConfig`] resolved for one tape, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledConfig {
    pub height: u32,
    pub scale: f64,
    pub padding: u32,
    pub text_padding: u32,
    pub vertical_padding: u32,
    pub gap: u32,
    pub code_size: u32,
    pub icon_size: u32,
    pub rotation_margin: u32,
    pub outer_margin: u32,
    pub text_bounds: SizeBounds,
    pub number_bounds: SizeBounds,
    pub number_budget: i64,
    pub caption_fill: f64,
    pub caption_max: f64,
    pub caption_band_without_code: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_tape_is_nominal() {
        let cfg = TemplateConfig::HORIZONTAL.scaled(TapeClass::Mm29, None);
        assert_eq!(cfg.height, 306);
        assert_eq!(cfg.padding, 15);
        assert_eq!(cfg.text_padding, 45);
        assert_eq!(cfg.icon_size, 80);
        assert_eq!(cfg.code_size, 260);
        assert_eq!(cfg.text_bounds, SizeBounds::new(20, 100));
    }

    #[test]
    fn test_everything_grows_with_tape() {
        let small = TemplateConfig::STORAGE_CODE.scaled(TapeClass::Mm29, None);
        let large = TemplateConfig::STORAGE_CODE.scaled(TapeClass::Mm62, None);
        assert!(large.padding > small.padding);
        assert!(large.gap > small.gap);
        assert!(large.code_size > small.code_size);
        assert!(large.text_bounds.min > small.text_bounds.min);
        assert!(large.number_bounds.max > small.number_bounds.max);
        assert!(large.number_budget > small.number_budget);
    }

    #[test]
    fn test_62mm_values() {
        let cfg = TemplateConfig::TEXT_ONLY.scaled(TapeClass::Mm62, Some(100));
        // int(60 * 2.2745) and int(40 * 2.2745)
        assert_eq!(cfg.text_padding, 136);
        assert_eq!(cfg.vertical_padding, 90);
        assert_eq!(cfg.text_bounds, SizeBounds::new(45, 227));
    }

    #[test]
    fn test_requested_size_replaces_or_caps() {
        let follows = TemplateConfig::HORIZONTAL.scaled(TapeClass::Mm29, Some(150));
        assert_eq!(follows.text_bounds.max, 150);

        let fixed = TemplateConfig::VERTICAL_ONLY.scaled(TapeClass::Mm29, Some(150));
        assert_eq!(fixed.text_bounds.max, 150);
        let fixed = TemplateConfig::VERTICAL_ONLY.scaled(TapeClass::Mm29, None);
        assert_eq!(fixed.text_bounds.max, 500);
    }

    #[test]
    fn test_ratio_margins() {
        // 29mm: max(15, int(306 * 0.05) = 15) and max(10, int(306 * 0.03) = 9)
        let cfg = TemplateConfig::VERTICAL_ONLY.scaled(TapeClass::Mm29, None);
        assert_eq!(cfg.outer_margin, 15);
        assert_eq!(cfg.rotation_margin, 10);
    }

    #[test]
    fn test_compact_code_leaves_room_for_text() {
        for tape in TapeClass::ALL {
            let cfg = TemplateConfig::COMPACT_VERTICAL.scaled(tape, None);
            let budget = cfg.height as i64 - cfg.code_size as i64 - cfg.gap as i64 - 2 * cfg.padding as i64;
            assert!(budget > 0, "{} has no room for text", tape);
        }
    }
}

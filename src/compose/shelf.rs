//! Template 7: a rotated word beside a large number.
//!
//! ```text
//! ┌───┬───┬─────┬──────────────┬───┐
//! │ p │ S │ gap │     ███      │ p │
//! │   │ H │     │    █  █      │   │
//! │   │ E │     │      █       │   │
//! │   │ L │     │     █        │   │
//! │   │ F │     │    ████      │   │
//! └───┴───┴─────┴──────────────┴───┘
//! ```
//!
//! The word is turned 90° clockwise and fitted by its ink width against the
//! height between the paddings; the rotation margin equals the padding, so
//! the rotated block never exceeds the tape height. The number is fitted by
//! its line height against a fixed share of the tape height. Each element
//! is centered vertically on its own.

use image::RgbImage;

use super::rotate::{Turn, rotated_text};
use super::{Layout, center, centered_line_top, paste};
use crate::error::Result;
use crate::label::LabelContent;

pub(super) fn compose(layout: &Layout<'_>, content: &LabelContent) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let word = content.text();
    let number = content.require_number("shelf-number template")?;

    let word_budget = cfg.height as i64 - 2 * cfg.padding as i64;
    let word_size = layout.fit_width("shelf word", word, cfg.text_bounds, word_budget)?;
    let block = rotated_text(layout.font, word, word_size, cfg.rotation_margin, Turn::Clockwise);

    let number_size = layout.fit_upright("shelf number", cfg.number_bounds, cfg.number_budget)?;
    let number_extent = layout.font.measure(number, number_size);

    let number_x = cfg.padding + block.width() + cfg.gap;
    let mut canvas = layout.canvas(number_x + number_extent.width + cfg.padding);

    paste(&mut canvas, &block, cfg.padding as i64, center(cfg.height, block.height()));
    layout.font.draw(
        &mut canvas,
        number,
        number_size,
        number_x as i64,
        centered_line_top(cfg.height, cfg.padding, number_extent.line),
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use crate::LabelError;
    use crate::compose::{Composer, TemplateVariant};
    use crate::font::FontSpec;
    use crate::label::LabelContent;
    use crate::tape::TapeClass;

    #[test]
    fn test_number_is_required() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let err = composer
            .compose(TemplateVariant::ShelfNumber, &LabelContent::new("SHELF"), TapeClass::Mm29)
            .unwrap_err();
        assert!(matches!(err, LabelError::Validation(_)));
    }

    #[test]
    fn test_geometry() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let font = composer.font();
        let content = LabelContent::new("SHELF").with_number("7");
        let label = composer.compose(TemplateVariant::ShelfNumber, &content, TapeClass::Mm29).unwrap();

        // Number: largest size in 80..=500 with line height <= int(306 * 0.7)
        let number_size = (80..=500).rev().find(|&s| font.line_height(s) <= 214).unwrap();
        // Word: largest size in 30..=200 with ink width <= 306 - 40
        let word_size = (30..=200).rev().find(|&s| font.text_width("SHELF", s) <= 266).unwrap();

        let block_width = font.line_height(word_size) + 40;
        let expected = 20 + block_width + 30 + font.text_width("7", number_size) + 20;
        assert_eq!(label.width(), expected);
        assert_eq!(label.height(), 306);
    }

    #[test]
    fn test_wider_tape_gives_bigger_number() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let content = LabelContent::new("SHELF").with_number("12");
        let small = composer.compose(TemplateVariant::ShelfNumber, &content, TapeClass::Mm29).unwrap();
        let large = composer.compose(TemplateVariant::ShelfNumber, &content, TapeClass::Mm62).unwrap();
        assert!(large.width() > small.width());
        assert_eq!(large.height(), 696);
    }
}

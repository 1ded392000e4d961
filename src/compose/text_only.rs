//! Template 4: a single line of upright text.
//!
//! Width is the text's ink width plus `text_padding` on both sides; the line
//! box is fitted to the height minus `vertical_padding` above and below.

use image::RgbImage;

use super::{Layout, centered_line_top};
use crate::error::Result;
use crate::label::LabelContent;

pub(super) fn compose(layout: &Layout<'_>, content: &LabelContent) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let text = content.text();

    let budget = cfg.height as i64 - 2 * cfg.vertical_padding as i64;
    let size = layout.fit_upright("text", cfg.text_bounds, budget)?;
    let extent = layout.font.measure(text, size);

    let mut canvas = layout.canvas(extent.width + 2 * cfg.text_padding);
    layout.font.draw(
        &mut canvas,
        text,
        size,
        cfg.text_padding as i64,
        centered_line_top(cfg.height, cfg.vertical_padding, extent.line),
    );

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use crate::compose::{Composer, TemplateVariant};
    use crate::font::FontSpec;
    use crate::label::LabelContent;
    use crate::tape::TapeClass;

    #[test]
    fn test_width_is_text_plus_padding() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let label = composer
            .compose(TemplateVariant::TextOnly, &LabelContent::new("BOX 1"), TapeClass::Mm29)
            .unwrap();
        let text = composer.font().text_width("BOX 1", 100);
        assert_eq!(label.width(), text + 120);
    }

    #[test]
    fn test_code_is_ignored() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let plain = LabelContent::new("BOX 1");
        let with_code = plain.clone().with_code("https://example.com/box/1");
        let a = composer.compose(TemplateVariant::TextOnly, &plain, TapeClass::Mm38).unwrap();
        let b = composer.compose(TemplateVariant::TextOnly, &with_code, TapeClass::Mm38).unwrap();
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn test_requested_size_larger_than_room() {
        // 250pt does not fit 306 - 80; the fitter lands below it
        let composer = Composer::new(&FontSpec::default().with_max_size(250)).unwrap();
        let label = composer
            .compose(TemplateVariant::TextOnly, &LabelContent::new("Hi"), TapeClass::Mm29)
            .unwrap();
        assert!(label.width() < composer.font().text_width("Hi", 250) + 120);
    }
}

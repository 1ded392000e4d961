//! Template 1: code on the left, text on the right, box watermark.
//!
//! ```text
//! ┌─────┬────────┬───────┬──────────────┬─────┬──────┬───┐
//! │  p  │  code  │  tp   │     text     │ tp  │ icon │ p │
//! └─────┴────────┴───────┴──────────────┴─────┴──────┴───┘
//! ```
//!
//! Without a code the text starts at `2 * padding`.

use image::RgbImage;

use super::{Layout, center, centered_line_top, icon, paste};
use crate::error::Result;
use crate::label::LabelContent;

pub(super) fn compose(layout: &Layout<'_>, content: &LabelContent) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let text = content.text();

    let budget = cfg.height as i64 - 2 * cfg.padding as i64;
    let size = layout.fit_upright("text", cfg.text_bounds, budget)?;
    let extent = layout.font.measure(text, size);

    let code = content.payload().map(|p| layout.code(p)).transpose()?;
    let text_x = match &code {
        Some(code) => cfg.padding + code.width() + cfg.text_padding,
        None => 2 * cfg.padding,
    };
    let width = text_x + extent.width + cfg.text_padding + cfg.icon_size + cfg.padding;

    let mut canvas = layout.canvas(width);
    if let Some(code) = &code {
        paste(&mut canvas, code, cfg.padding as i64, center(cfg.height, code.height()));
    }
    layout.font.draw(
        &mut canvas,
        text,
        size,
        text_x as i64,
        centered_line_top(cfg.height, cfg.padding, extent.line),
    );
    icon::stamp(
        &mut canvas,
        width - cfg.icon_size - cfg.padding,
        cfg.height - cfg.icon_size - cfg.padding,
        cfg.icon_size,
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
    fn test_width_without_code() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let label = composer
            .compose(TemplateVariant::Horizontal, &LabelContent::new("BOX 1"), TapeClass::Mm29)
            .unwrap();
        // 2p + text + tp + icon + p = text + 30 + 45 + 80 + 15; text fits at 100pt
        let text = composer.font().text_width("BOX 1", 100);
        assert_eq!(label.width(), text + 170);
        assert_eq!(label.height(), 306);
    }

    #[test]
    fn test_code_widens_label() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let plain = LabelContent::new("BOX 1");
        let with_code = plain.clone().with_code("https://example.com/box/1");
        let a = composer.compose(TemplateVariant::Horizontal, &plain, TapeClass::Mm29).unwrap();
        let b = composer.compose(TemplateVariant::Horizontal, &with_code, TapeClass::Mm29).unwrap();
        // + code (260) + tp (45) - p (15)
        assert_eq!(b.width(), a.width() + 290);
    }

    #[test]
    fn test_code_sits_left_and_centered() {
        let composer = Composer::new(&FontSpec::default()).unwrap();
        let content = LabelContent::new("BOX 1").with_code("https://example.com/box/1");
        let label = composer.compose(TemplateVariant::Horizontal, &content, TapeClass::Mm29).unwrap();
        // Code spans x 15..275, y 23..283; its first module row after the
        // quiet zone is black finder pattern.
        let module = 260.0 / 33.0;
        let finder = (15.0 + 4.5 * module) as u32;
        let finder_y = (23.0 + 4.5 * module) as u32;
        assert_eq!(label.image().get_pixel(finder, finder_y).0, [0, 0, 0]);
        // Quiet zone stays white
        assert_eq!(label.image().get_pixel(17, 150).0, [255, 255, 255]);
    }

    #[test]
    fn test_descenders_stay_inside_padding() {
        // A large request fills the padded height; the descent nudge must
        // not push "gyp" into the bottom padding.
        let composer = Composer::new(&FontSpec::default().with_max_size(300)).unwrap();
        let label = composer
            .compose(TemplateVariant::Horizontal, &LabelContent::new("gyp"), TapeClass::Mm29)
            .unwrap();
        let image = label.image();
        let bottom = label.height() - 15;
        let dark_rows: Vec<u32> = (bottom..label.height())
            .filter(|&y| (0..label.width()).any(|x| image.get_pixel(x, y).0[0] < 128))
            .collect();
        assert!(dark_rows.is_empty(), "ink in bottom padding at rows {:?}", dark_rows);
    }
}

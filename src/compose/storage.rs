//! Template 8: code over a caption, beside a large number.
//!
//! ```text
//! ┌───┬────────────┬─────┬──────────────┬───┐
//! │ p │    code    │ gap │     ████     │ p │
//! │   │            │     │        █     │   │
//! │   │  CAPTION   │     │        █     │   │
//! └───┴────────────┴─────┴──────────────┴───┘
//!      ◄─ left ───►
//!      max(code, caption)
//! ```
//!
//! The caption height budget is a share of the room left under the code,
//! capped at a fraction of the tape height. Without a code the caption gets
//! a fixed band instead and is centered on its own.

use image::RgbImage;

use super::{Layout, center, centered_line_top, paste};
use crate::error::Result;
use crate::label::LabelContent;

pub(super) fn compose(layout: &Layout<'_>, content: &LabelContent) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let caption = content.text();
    let number = content.require_number("storage-code template")?;
    let code = content.payload().map(|p| layout.code(p)).transpose()?;
    let code_side = code.as_ref().map_or(0, |c| c.width());

    let room = match &code {
        Some(_) => cfg.height as f64 - code_side as f64 - 2.0 * cfg.padding as f64,
        None => cfg.caption_band_without_code,
    };
    let caption_budget = (room * cfg.caption_fill).min(cfg.caption_max).floor() as i64;
    let caption_size = layout.fit_upright("caption", cfg.text_bounds, caption_budget)?;
    let caption_extent = layout.font.measure(caption, caption_size);

    let number_size = layout.fit_upright("storage number", cfg.number_bounds, cfg.number_budget)?;
    let number_extent = layout.font.measure(number, number_size);

    let left = code_side.max(caption_extent.width);
    let number_x = cfg.padding + left + cfg.gap;
    let mut canvas = layout.canvas(number_x + number_extent.width + cfg.padding);

    let pad = cfg.padding as i64;
    let caption_x = pad + center(left, caption_extent.width);
    match &code {
        Some(code) => {
            let top = center(cfg.height, code_side + caption_extent.line.height());
            paste(&mut canvas, code, pad + center(left, code_side), top);
            layout
                .font
                .draw(&mut canvas, caption, caption_size, caption_x, top + code_side as i64);
        }
        None => {
            let top = center(cfg.height, caption_extent.line.height());
            layout.font.draw(&mut canvas, caption, caption_size, caption_x, top);
        }
    }

    layout.font.draw(
        &mut canvas,
        number,
        number_size,
        number_x as i64,
        centered_line_top(cfg.height, cfg.padding, number_extent.line),
    );

    Ok(canvas)
}

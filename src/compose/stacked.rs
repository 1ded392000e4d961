//! Templates 2 and 6: code and text stacked vertically.
//!
//! ```text
//!   CodeFirst          TextFirst
//!  ┌──────────┐       ┌──────────┐
//!  │   code   │       │   text   │
//!  │   gap    │       │   gap    │
//!  │   text   │       │   code   │
//!  └──────────┘       └──────────┘
//!  width = max(code, text) + 2 * padding
//! ```
//!
//! The code + gap + text block is centered vertically. Without a code the
//! text gets the whole height and is centered on its own.

use image::RgbImage;

use super::{Layout, center, centered_line_top, paste};
use crate::error::Result;
use crate::label::LabelContent;

/// Which element sits on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Order {
    CodeFirst,
    TextFirst,
}

pub(super) fn compose(layout: &Layout<'_>, content: &LabelContent, order: Order) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let text = content.text();
    let code = content.payload().map(|p| layout.code(p)).transpose()?;

    let height = cfg.height as i64;
    let pad = cfg.padding as i64;
    let budget = match &code {
        Some(code) => height - code.height() as i64 - cfg.gap as i64 - 2 * pad,
        None => height - 2 * pad,
    };
    let size = layout.fit_upright("text", cfg.text_bounds, budget)?;
    let extent = layout.font.measure(text, size);

    let code_side = code.as_ref().map_or(0, |c| c.width());
    let column = code_side.max(extent.width);
    let mut canvas = layout.canvas(column + 2 * cfg.padding);

    let text_x = pad + center(column, extent.width);
    let Some(code) = code else {
        let text_y = centered_line_top(cfg.height, cfg.padding, extent.line);
        layout.font.draw(&mut canvas, text, size, text_x, text_y);
        return Ok(canvas);
    };

    let line = extent.line.height();
    let top = center(cfg.height, code_side + cfg.gap + line);
    let code_x = pad + center(column, code_side);
    let (code_y, text_y) = match order {
        Order::CodeFirst => (top, top + (code_side + cfg.gap) as i64),
        Order::TextFirst => (top + (line + cfg.gap) as i64, top),
    };

    paste(&mut canvas, &code, code_x, code_y);
    layout.font.draw(&mut canvas, text, size, text_x, text_y);

    Ok(canvas)
}

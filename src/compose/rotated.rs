//! Templates 3 and 5: text turned 90° counterclockwise.
//!
//! ```text
//!  Template 3 (with code)              Template 5 (text only)
//! ┌───┬────────┬───┬─────┬────┐       ┌───────┬─────┬───────┐
//! │ p │  code  │ p │  T  │ tp │       │ outer │  T  │ outer │
//! │   │        │   │  X  │    │       │       │  X  │       │
//! │   │        │   │  E  │    │       │       │  E  │       │
//! └───┴────────┴───┴─────┴────┘       └───────┴─────┴───────┘
//! ```
//!
//! The text is fitted by its ink width, which becomes its height once
//! rotated. The rotation margin is part of the rotated block, so it is
//! subtracted from the budget: the rotated block never exceeds the space
//! between the outer margins.

use image::RgbImage;

use super::rotate::{Turn, rotated_text};
use super::{Layout, center, paste};
use crate::error::Result;
use crate::label::LabelContent;

/// Template 3.
pub(super) fn compose_with_code(layout: &Layout<'_>, content: &LabelContent) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let text = content.text();
    let margin = cfg.rotation_margin;

    let budget = cfg.height as i64 - 2 * cfg.padding as i64 - 2 * margin as i64;
    let size = layout.fit_width("text", text, cfg.text_bounds, budget)?;
    let block = rotated_text(layout.font, text, size, margin, Turn::CounterClockwise);

    let code = content.payload().map(|p| layout.code(p)).transpose()?;
    let lead = match &code {
        Some(code) => cfg.padding + code.width() + cfg.padding,
        None => cfg.padding,
    };
    let mut canvas = layout.canvas(lead + block.width() + cfg.text_padding);

    if let Some(code) = &code {
        paste(&mut canvas, code, cfg.padding as i64, center(cfg.height, code.height()));
    }
    paste(&mut canvas, &block, lead as i64, center(cfg.height, block.height()));

    Ok(canvas)
}

/// Template 5.
pub(super) fn compose_text_only(layout: &Layout<'_>, content: &LabelContent) -> Result<RgbImage> {
    let cfg = &layout.cfg;
    let text = content.text();
    let margin = cfg.rotation_margin;
    let outer = cfg.outer_margin;

    let budget = cfg.height as i64 - 2 * outer as i64 - 2 * margin as i64;
    let size = layout.fit_width("text", text, cfg.text_bounds, budget)?;
    let block = rotated_text(layout.font, text, size, margin, Turn::CounterClockwise);

    let mut canvas = layout.canvas(block.width() + 2 * outer);
    paste(&mut canvas, &block, outer as i64, center(cfg.height, block.height()));

    Ok(canvas)
}

//! # Rotated Text
//!
//! Renders a text run on its own padded canvas and turns it by a quarter
//! turn, so its width becomes vertical extent on the label.
//!
//! ```text
//!  ┌──────────────────┐         ┌────────┐
//!  │ margin           │         │        │
//!  │   SHELF          │  ──►    │ F      │   (counterclockwise)
//!  │           margin │         │ L  ... │
//!  └──────────────────┘         └────────┘
//!   width  = text + 2m           height = text + 2m
//!   height = line + 2m           width  = line + 2m
//! ```
//!
//! The margin is mandatory: anti-aliased glyph edges touching the canvas
//! border get cut off at the corners of the rotated image.

use image::{RgbImage, imageops};

use super::blank;
use crate::font::LabelFont;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// +90°: text reads bottom to top.
    CounterClockwise,
    /// −90°: text reads top to bottom.
    Clockwise,
}

/// Render `text` at `size` with `margin` pixels on every side, then rotate.
///
/// The result is `line_height + 2 * margin` wide and
/// `text_width + 2 * margin` tall.
pub fn rotated_text(font: &LabelFont, text: &str, size: u32, margin: u32, turn: Turn) -> RgbImage {
    let extent = font.measure(text, size);
    let mut canvas = blank(
        extent.width + 2 * margin,
        extent.line.height() + 2 * margin,
    );
    font.draw(&mut canvas, text, size, margin as i64, margin as i64);

    match turn {
        Turn::CounterClockwise => imageops::rotate270(&canvas),
        Turn::Clockwise => imageops::rotate90(&canvas),
    }
}

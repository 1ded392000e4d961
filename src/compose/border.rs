//! Light gray frame drawn around every finished label.

use image::{Rgb, RgbImage};

/// Frame color.
pub const BORDER_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

/// Nominal stroke width at the reference tape, and the floor at any scale.
pub const MIN_BORDER_WIDTH: u32 = 2;

/// Stroke width for a scale factor: `max(2, int(2 * scale))`.
pub fn border_width(scale: f64) -> u32 {
    ((MIN_BORDER_WIDTH as f64 * scale) as u32).max(MIN_BORDER_WIDTH)
}

/// Draw the frame.
///
/// The outer edge of the stroke is inset by half the stroke width from the
/// canvas edge; the stroke then extends `width` pixels inwards.
pub fn draw_border(canvas: &mut RgbImage, scale: f64) {
    let stroke = border_width(scale);
    let inset = stroke / 2;
    let (width, height) = canvas.dimensions();
    if width <= 2 * inset || height <= 2 * inset {
        return;
    }

    // Outer box, inclusive
    let (x0, y0) = (inset, inset);
    let (x1, y1) = (width - inset - 1, height - inset - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let on_stroke =
                x < x0 + stroke || x + stroke > x1 || y < y0 + stroke || y + stroke > y1;
            if on_stroke {
                canvas.put_pixel(x, y, BORDER_COLOR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::blank;

    #[test]
    fn test_width_floor() {
        assert_eq!(border_width(1.0), 2);
        assert_eq!(border_width(1.35), 2);
        assert_eq!(border_width(1.81), 3);
        assert_eq!(border_width(2.27), 4);
        assert_eq!(border_width(0.3), 2);
    }

    #[test]
    fn test_inset_by_half_stroke() {
        let mut canvas = blank(40, 30);
        draw_border(&mut canvas, 2.27); // stroke 4, inset 2
        let white = Rgb([255, 255, 255]);
        assert_eq!(*canvas.get_pixel(0, 0), white);
        assert_eq!(*canvas.get_pixel(1, 15), white);
        for x in 2..6 {
            assert_eq!(*canvas.get_pixel(x, 15), BORDER_COLOR);
        }
        assert_eq!(*canvas.get_pixel(6, 15), white);
        for x in 34..38 {
            assert_eq!(*canvas.get_pixel(x, 15), BORDER_COLOR);
        }
        assert_eq!(*canvas.get_pixel(38, 15), white);
        assert_eq!(*canvas.get_pixel(20, 15), white);
    }
}

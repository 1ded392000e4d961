//! # Box Watermark
//!
//! A small line drawing of a taped cardboard box, stamped faintly into the
//! bottom-right corner of the horizontal template. It is drawn procedurally
//! from a handful of segments in unit coordinates, so it scales to any icon
//! size without an image asset.
//!
//! ```text
//!        ┌───────────┐
//!       ╱  ╱        ╱│
//!      ┌───────────┐ │
//!      │           │ │
//!      │           │╱
//!      └───────────┘
//! ```

use image::RgbImage;

/// Watermark opacity (0.0 transparent, 1.0 black).
pub const ICON_OPACITY: f32 = 0.3;

/// Stroke width as a fraction of the icon size.
const STROKE: f32 = 0.06;

/// Line segments in unit coordinates: ((x0, y0), (x1, y1)).
const SEGMENTS: &[((f32, f32), (f32, f32))] = &[
    // Front face
    ((0.12, 0.38), (0.62, 0.38)),
    ((0.62, 0.38), (0.62, 0.90)),
    ((0.62, 0.90), (0.12, 0.90)),
    ((0.12, 0.90), (0.12, 0.38)),
    // Top face
    ((0.12, 0.38), (0.38, 0.14)),
    ((0.38, 0.14), (0.88, 0.14)),
    ((0.88, 0.14), (0.62, 0.38)),
    // Right face
    ((0.88, 0.14), (0.88, 0.66)),
    ((0.88, 0.66), (0.62, 0.90)),
    // Tape strip
    ((0.37, 0.38), (0.63, 0.14)),
];

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Coverage of the icon at pixel (`x`, `y`) of a `size` x `size` square,
/// in `0.0..=1.0`.
pub fn coverage(x: u32, y: u32, size: u32) -> f32 {
    if size == 0 {
        return 0.0;
    }
    let s = size as f32;
    let center = ((x as f32 + 0.5) / s, (y as f32 + 0.5) / s);
    let half_stroke = STROKE * s / 2.0;

    let nearest = SEGMENTS
        .iter()
        .map(|&(a, b)| segment_distance(center, a, b) * s)
        .fold(f32::INFINITY, f32::min);

    // One pixel of anti-aliasing at the stroke edge
    (half_stroke + 0.5 - nearest).clamp(0.0, 1.0)
}

/// Darken a `size` x `size` square at (`x`, `y`) with the icon at
/// [`ICON_OPACITY`]. Pixels outside the canvas are skipped.
pub fn stamp(canvas: &mut RgbImage, x: u32, y: u32, size: u32) {
    let (width, height) = canvas.dimensions();
    for iy in 0..size {
        for ix in 0..size {
            let (px, py) = (x + ix, y + iy);
            if px >= width || py >= height {
                continue;
            }
            let alpha = coverage(ix, iy, size) * ICON_OPACITY;
            if alpha <= 0.0 {
                continue;
            }
            let pixel = canvas.get_pixel_mut(px, py);
            for channel in pixel.0.iter_mut() {
                *channel = (*channel as f32 * (1.0 - alpha)).round() as u8;
            }
        }
    }
}

//! # Code Bitmaps
//!
//! Adapter around the machine-readable code encoder.
//!
//! The encoder is a capability ([`CodeEncoder`]): payload in, square
//! monochrome module bitmap out, one pixel per module including the quiet
//! zone. The layouts never talk to a concrete encoder; they call
//! [`code_bitmap`], which asks the encoder for modules and resamples them to
//! the exact pixel size the layout reserved.
//!
//! ## Resampling
//!
//! Resampling is always nearest-neighbor:
//!
//! ```text
//!   modules (33x33)          nearest (260x260)        smooth (260x260)
//!   ██  ██                   ████████    ████████     ▓▓██▓▓░░  ▓▓██▓▓
//!   ██  ██       ──────►     ████████    ████████     ▓▓██▓▓░░  ▓▓██▓▓
//! ```
//!
//! Any smoothing filter produces gray module edges, which scanners misread
//! on small physical labels.

use image::{GrayImage, Luma, RgbImage, imageops, imageops::FilterType};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::{LabelError, Result};

/// Quiet zone width in modules used for labels.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Encodes a payload into a square module bitmap.
///
/// Implementations return one pixel per module (black = 0, white = 255),
/// quiet zone included.
pub trait CodeEncoder: Send + Sync {
    fn encode(&self, payload: &str) -> Result<GrayImage>;
}

/// Error correction level requested for every label code (~15% recovery).
pub const ERROR_CORRECTION: EcLevel = EcLevel::M;

/// QR code encoder.
///
/// Medium error correction and a 4-module quiet zone, the reliability/size
/// balance used for small labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrEncoder {
    pub quiet_zone: u32,
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self {
            quiet_zone: QUIET_ZONE_MODULES,
        }
    }
}

impl CodeEncoder for QrEncoder {
    fn encode(&self, payload: &str) -> Result<GrayImage> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), ERROR_CORRECTION)
            .map_err(|e| LabelError::Encode(format!("QR code generation failed: {}", e)))?;

        let modules = code.width() as u32;
        let colors = code.to_colors();
        let side = modules + 2 * self.quiet_zone;

        let mut bitmap = GrayImage::from_pixel(side, side, Luma([255]));
        for (i, color) in colors.iter().enumerate() {
            if *color == Color::Dark {
                let x = i as u32 % modules + self.quiet_zone;
                let y = i as u32 / modules + self.quiet_zone;
                bitmap.put_pixel(x, y, Luma([0]));
            }
        }

        Ok(bitmap)
    }
}

/// Encode `payload` and resample it to exactly `size_px` x `size_px`.
pub fn code_bitmap(encoder: &dyn CodeEncoder, payload: &str, size_px: u32) -> Result<RgbImage> {
    if size_px == 0 {
        return Err(LabelError::Image("Code bitmap size must be positive".to_string()));
    }

    let modules = encoder.encode(payload)?;
    if modules.width() != modules.height() || modules.width() == 0 {
        return Err(LabelError::Encode(format!(
            "Encoder returned a {}x{} bitmap, expected a square",
            modules.width(),
            modules.height()
        )));
    }

    log::debug!(
        "code bitmap: {} modules -> {}px ({:.2}px/module)",
        modules.width(),
        size_px,
        size_px as f64 / modules.width() as f64
    );

    let resized = imageops::resize(&modules, size_px, size_px, FilterType::Nearest);
    Ok(image::DynamicImage::ImageLuma8(resized).to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_has_quiet_zone() {
        let bitmap = QrEncoder::default().encode("https://example.com/box/1").unwrap();
        assert_eq!(bitmap.width(), bitmap.height());
        // Version 2 at medium tolerance: 25 modules + 2 * 4 quiet zone
        assert_eq!(bitmap.width(), 33);
        for i in 0..bitmap.width() {
            for q in 0..QUIET_ZONE_MODULES {
                assert_eq!(bitmap.get_pixel(i, q).0[0], 255);
                assert_eq!(bitmap.get_pixel(q, i).0[0], 255);
            }
        }
        // Finder pattern corner starts right after the quiet zone
        assert_eq!(bitmap.get_pixel(4, 4).0[0], 0);
    }

    #[test]
    fn test_resampled_to_exact_size() {
        for size in [183, 260, 275, 626] {
            let bitmap = code_bitmap(&QrEncoder::default(), "BOX 1", size).unwrap();
            assert_eq!(bitmap.dimensions(), (size, size));
        }
    }

    #[test]
    fn test_resampling_keeps_pure_black_and_white() {
        let bitmap = code_bitmap(&QrEncoder::default(), "https://example.com/box/1", 260).unwrap();
        for pixel in bitmap.pixels() {
            let v = pixel.0[0];
            assert!(v == 0 || v == 255, "gray module edge value {}", v);
            assert_eq!(pixel.0[0], pixel.0[1]);
            assert_eq!(pixel.0[1], pixel.0[2]);
        }
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(code_bitmap(&QrEncoder::default(), "x", 0).is_err());
    }

    #[test]
    fn test_oversized_payload_is_encode_error() {
        let payload = "x".repeat(5000);
        let err = QrEncoder::default().encode(&payload).unwrap_err();
        assert!(matches!(err, LabelError::Encode(_)));
    }

    #[test]
    fn test_non_square_encoder_output_rejected() {
        struct Skewed;
        impl CodeEncoder for Skewed {
            fn encode(&self, _payload: &str) -> Result<GrayImage> {
                Ok(GrayImage::new(10, 12))
            }
        }
        let err = code_bitmap(&Skewed, "x", 100).unwrap_err();
        assert!(matches!(err, LabelError::Encode(_)));
    }
}

//! Sprite image loading.
//!
//! A [`SpriteImage`] is decoded RGBA pixel data on the CPU, either loaded
//! from a PNG/JPEG file or generated procedurally. The engine never touches
//! these bytes; they are uploaded once into a
//! [`SpriteTexture`](crate::canvas::SpriteTexture) by the canvas glue.

use std::path::Path;

use crate::error::TextureError;

/// Decoded RGBA sprite pixels.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    /// Raw RGBA data, 4 bytes per pixel, row-major.
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl SpriteImage {
    /// Wrap raw RGBA data.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != width * height * 4`.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 4) as usize,
            "RGBA data size mismatch"
        );
        Self { data, width, height }
    }

    /// Load and decode an image file (PNG or JPEG).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path)?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = image.dimensions();
        Ok(Self {
            data: image.into_raw(),
            width,
            height,
        })
    }

    /// A white disc with a smooth alpha falloff toward the rim, the
    /// stand-in when no sprite file is available.
    pub fn soft_circle(diameter: u32) -> Self {
        let diameter = diameter.max(1);
        let mut data = Vec::with_capacity((diameter * diameter * 4) as usize);
        let center = (diameter as f32 - 1.0) / 2.0;
        let radius = diameter as f32 / 2.0;
        for y in 0..diameter {
            for x in 0..diameter {
                let dx = x as f32 - center;
                let dy = y as f32 - center;
                let d = (dx * dx + dy * dy).sqrt() / radius;
                let t = (1.0 - d).clamp(0.0, 1.0);
                // Smoothstep for a soft rim.
                let alpha = t * t * (3.0 - 2.0 * t);
                data.extend_from_slice(&[255, 255, 255, (alpha * 255.0).round() as u8]);
            }
        }
        Self {
            data,
            width: diameter,
            height: diameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_circle_dimensions() {
        let sprite = SpriteImage::soft_circle(16);
        assert_eq!(sprite.width, 16);
        assert_eq!(sprite.height, 16);
        assert_eq!(sprite.data.len(), 16 * 16 * 4);
    }

    #[test]
    fn test_soft_circle_center_opaque_corner_transparent() {
        let sprite = SpriteImage::soft_circle(17);
        let at = |x: u32, y: u32| sprite.data[((y * 17 + x) * 4 + 3) as usize];
        assert_eq!(at(8, 8), 255);
        assert_eq!(at(0, 0), 0);
        assert_eq!(at(16, 16), 0);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = SpriteImage::from_path("no/such/sprite.png").unwrap_err();
        assert!(matches!(err, TextureError::Io(_)));
    }

    #[test]
    #[should_panic(expected = "RGBA data size mismatch")]
    fn test_from_rgba_checks_size() {
        SpriteImage::from_rgba(vec![0; 3], 2, 2);
    }
}

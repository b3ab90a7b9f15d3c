//! Decoded row artwork
//!
//! Thumbnails are shrunk to a tiny RGB grid right after download. The view
//! draws two pixel rows per terminal line with half-block cells.

use image::imageops::FilterType;

pub const THUMB_COLUMNS: u32 = 4;
pub const THUMB_ROWS: u32 = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 3]>,
}

impl Thumbnail {
    /// Decode raw image bytes. Anything that is not a supported image yields
    /// an error and the caller keeps its placeholder.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(bytes)?;
        let small = img
            .resize_exact(THUMB_COLUMNS, THUMB_ROWS, FilterType::Triangle)
            .to_rgb8();

        let pixels = small.pixels().map(|p| p.0).collect();
        Ok(Self {
            width: small.width(),
            height: small.height(),
            pixels,
        })
    }

    #[cfg(test)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[cfg(test)]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

#[cfg(test)]
pub(crate) fn png_bytes(color: [u8; 3]) -> Vec<u8> {
    use std::io::Cursor;

    let img = image::RgbImage::from_pixel(8, 8, image::Rgb(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("png encoding to memory");
    out.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_shrinks_png() {
        let thumb = Thumbnail::decode(&png_bytes([255, 0, 0])).unwrap();
        assert_eq!(thumb.width(), THUMB_COLUMNS);
        assert_eq!(thumb.height(), THUMB_ROWS);
        assert_eq!(thumb.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(thumb.pixel(THUMB_COLUMNS, 0), None);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(Thumbnail::decode(b"<html>404</html>").is_err());
        assert!(Thumbnail::decode(&[]).is_err());
    }
}

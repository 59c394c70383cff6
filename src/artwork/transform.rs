//! Square-crop and rescale of raw cover art.
//!
//! Covers are conventionally square, so the longer side of the source is trimmed
//! symmetrically and the remaining square is resampled to the requested edge length.
//! There is no letterboxing and no guard against upscaling small sources.

use image::RgbImage;
use image::imageops::{self, FilterType};

use super::ArtworkError;

/// Something that turns raw image bytes into a square raster of `target` pixels.
pub trait ArtworkTransformer {
    fn transform(&self, bytes: &[u8], target: u32) -> Result<RgbImage, ArtworkError>;
}

/// The default transformer: center crop to a square, then linear resize.
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareCrop;

impl ArtworkTransformer for SquareCrop {
    fn transform(&self, bytes: &[u8], target: u32) -> Result<RgbImage, ArtworkError> {
        square_resize(bytes, target)
    }
}

/// Offsets and edge length of the centered square inside a `width` x `height` raster.
pub fn square_crop_region(width: u32, height: u32) -> (u32, u32, u32) {
    let square = width.min(height);
    ((width - square) / 2, (height - square) / 2, square)
}

/// Crop the centered square out of `img`, discarding the longer side's excess.
pub fn crop_square(img: &RgbImage) -> RgbImage {
    let (x, y, square) = square_crop_region(img.width(), img.height());
    imageops::crop_imm(img, x, y, square, square).to_image()
}

/// Decode `bytes`, crop them to a centered square and resample to `target` x `target`.
pub fn square_resize(bytes: &[u8], target: u32) -> Result<RgbImage, ArtworkError> {
    if target == 0 {
        return Err(ArtworkError::Transform(
            "target size is zero (cell pixel size unknown?)".to_string(),
        ));
    }

    let decoded = image::load_from_memory(bytes).map_err(ArtworkError::Decode)?;
    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(ArtworkError::Transform("source image is empty".to_string()));
    }

    let cropped = crop_square(&rgb);
    Ok(imageops::resize(&cropped, target, target, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode_png(img: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// 200x100 with a red left margin, green center square and blue right margin
    fn banded_landscape() -> RgbImage {
        RgbImage::from_fn(200, 100, |x, _| match x {
            0..50 => Rgb([255, 0, 0]),
            50..150 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        })
    }

    #[test]
    fn test_crop_region_landscape() {
        assert_eq!(square_crop_region(200, 100), (50, 0, 100));
    }

    #[test]
    fn test_crop_region_portrait_and_odd() {
        assert_eq!(square_crop_region(100, 300), (0, 100, 100));
        assert_eq!(square_crop_region(201, 100), (50, 0, 100));
        assert_eq!(square_crop_region(64, 64), (0, 0, 64));
    }

    #[test]
    fn test_crop_square_sampling_boundaries() {
        let src = RgbImage::from_fn(200, 100, |x, y| Rgb([x as u8, y as u8, 0]));
        let cropped = crop_square(&src);

        assert_eq!(cropped.dimensions(), (100, 100));
        assert_eq!(cropped.get_pixel(0, 0), &Rgb([50, 0, 0]));
        assert_eq!(cropped.get_pixel(99, 0), &Rgb([149, 0, 0]));
        assert_eq!(cropped.get_pixel(99, 99), &Rgb([149, 99, 0]));
    }

    #[test]
    fn test_square_resize_discards_margins() {
        let bytes = encode_png(banded_landscape());
        let out = square_resize(&bytes, 10).unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        for pixel in out.pixels() {
            assert!(pixel[0] <= 5, "red margin leaked: {:?}", pixel);
            assert!(pixel[1] >= 250);
            assert!(pixel[2] <= 5, "blue margin leaked: {:?}", pixel);
        }
    }

    #[test]
    fn test_square_resize_upscales_without_error() {
        let bytes = encode_png(RgbImage::from_pixel(4, 2, Rgb([10, 20, 30])));
        let out = square_resize(&bytes, 16).unwrap();
        assert_eq!(out.dimensions(), (16, 16));
    }

    #[test]
    fn test_square_resize_rejects_garbage() {
        let err = square_resize(b"definitely not an image", 32).unwrap_err();
        assert!(matches!(err, ArtworkError::Decode(_)));
    }

    #[test]
    fn test_square_resize_rejects_zero_target() {
        let bytes = encode_png(banded_landscape());
        assert!(matches!(
            square_resize(&bytes, 0),
            Err(ArtworkError::Transform(_))
        ));
    }
}

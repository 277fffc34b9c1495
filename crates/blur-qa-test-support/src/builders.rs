//! Synthetic images with predictable blur scores.

use blur_qa_core::domain::ImageInfo;
use image::{imageops, DynamicImage, GrayImage, Luma, Rgb, RgbImage};

/// Builds in-memory images for analyzer and pipeline tests.
///
/// Flat fields score exactly `value²`, so `uniform_gray(.., 5)` lands well
/// under the default threshold while `uniform_gray(.., 40)` is comfortably
/// above it. Checkerboards give very high scores.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// Black and white checkerboard with 8px cells.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Black and white checkerboard with `cell` pixel cells.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell: u32) -> ImageInfo {
        let cell = cell.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            let on = (x / cell + y / cell) % 2 == 0;
            Luma([if on { u8::MAX } else { 0 }])
        });
        gray("synthetic://checkerboard", img)
    }

    /// Single-valued luminance field.
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        gray(
            "synthetic://uniform_gray",
            GrayImage::from_pixel(width, height, Luma([value])),
        )
    }

    /// 16px checkerboard after a Gaussian blur of `sigma`.
    #[must_use]
    pub fn blurred_checkerboard(width: u32, height: u32, sigma: f32) -> ImageInfo {
        let sharp = Self::checkerboard_with_cell_size(width, height, 16);
        let img = imageops::blur(&sharp.image.to_luma8(), sigma);
        gray("synthetic://blurred_checkerboard", img)
    }

    /// 2x2 image, below the analyzable minimum.
    #[must_use]
    pub fn tiny(values: [[u8; 2]; 2]) -> ImageInfo {
        let img = GrayImage::from_fn(2, 2, |x, y| Luma([values[y as usize][x as usize]]));
        gray("synthetic://2x2", img)
    }

    /// Single-coloured RGB field.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_pixel(width, height, Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }

    /// 128x128 checkerboard, far above any sensible threshold.
    #[must_use]
    pub fn sharp_image() -> ImageInfo {
        Self::checkerboard(128, 128)
    }

    /// 128x128 flat field of value 5, scoring 25.
    #[must_use]
    pub fn blurry_image() -> ImageInfo {
        Self::uniform_gray(128, 128, 5)
    }
}

fn gray(path: &str, img: GrayImage) -> ImageInfo {
    ImageInfo::new(path, DynamicImage::ImageLuma8(img))
}

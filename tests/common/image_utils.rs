//! Image inspection utilities for testing.
//!
//! Helpers for checking encoded map images and their pixel content.

use image::{DynamicImage, GenericImageView, ImageError, ImageFormat, Rgba};

/// Load an image from a byte array
pub fn load_image_from_bytes(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    image::load_from_memory(bytes)
}

/// Detect image format from bytes
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Check if an image has the expected dimensions
pub fn assert_image_dimensions(
    image: &DynamicImage,
    expected_width: u32,
    expected_height: u32,
) -> Result<(), String> {
    let (actual_width, actual_height) = image.dimensions();

    if actual_width != expected_width || actual_height != expected_height {
        return Err(format!(
            "Image dimensions differ: actual = {}x{}, expected = {}x{}",
            actual_width, actual_height, expected_width, expected_height
        ));
    }

    Ok(())
}

/// Check if encoded bytes have the expected format
pub fn assert_image_format(bytes: &[u8], expected_format: ImageFormat) -> Result<(), String> {
    let actual_format =
        detect_image_format(bytes).ok_or_else(|| "Could not detect image format".to_string())?;

    if actual_format != expected_format {
        return Err(format!(
            "Image format differs: actual = {:?}, expected = {:?}",
            actual_format, expected_format
        ));
    }

    Ok(())
}

/// Count the pixels in a horizontal band of rows that exactly match `color`
pub fn count_pixels_in_rows(
    image: &DynamicImage,
    rows: std::ops::Range<u32>,
    color: [u8; 4],
) -> usize {
    let (width, _) = image.dimensions();
    rows.flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| image.get_pixel(x, y) == Rgba(color))
        .count()
}

/// Number of distinct colors in an image
pub fn distinct_colors(image: &DynamicImage) -> usize {
    let mut colors: Vec<[u8; 4]> = image.pixels().map(|(_, _, p)| p.0).collect();
    colors.sort_unstable();
    colors.dedup();
    colors.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    #[test]
    fn test_detect_image_format() {
        let img = ImageBuffer::<Rgba<u8>, Vec<u8>>::new(2, 2);
        let mut png_bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
            .unwrap();

        assert_eq!(detect_image_format(&png_bytes), Some(ImageFormat::Png));
    }

    #[test]
    fn test_pixel_helpers() {
        let img = ImageBuffer::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        let img = DynamicImage::ImageRgba8(img);

        assert!(assert_image_dimensions(&img, 4, 2).is_ok());
        assert!(assert_image_dimensions(&img, 2, 4).is_err());
        assert_eq!(count_pixels_in_rows(&img, 0..1, [255, 0, 0, 255]), 2);
        assert_eq!(distinct_colors(&img), 2);
    }
}

use crate::thumbnails::consts::{JPEG_QUALITY, THUMBNAIL_WIDTH};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, ImageReader, Limits};
use std::io::{self, Cursor};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unable to determine image format")]
    UnknownFormat,
    #[error("failed to read image bytes: {0}")]
    Io(#[from] io::Error),
    #[error("{format} image has no pixels ({width}x{height})")]
    Empty {
        format: &'static str,
        width: u32,
        height: u32,
    },
    #[error("failed to decode {format} image: {source}")]
    Image {
        format: &'static str,
        #[source]
        source: ImageError,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to encode thumbnail as JPEG: {0}")]
pub struct EncodeError(#[from] ImageError);

#[derive(Debug)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn format_name(&self) -> &'static str {
        format_name(self.format)
    }
}

/// Short identifier of a source format, e.g. `"jpeg"` or `"png"`.
pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpeg",
        ImageFormat::Png => "png",
        ImageFormat::Gif => "gif",
        ImageFormat::WebP => "webp",
        ImageFormat::Bmp => "bmp",
        ImageFormat::Tiff => "tiff",
        other => other.extensions_str().first().copied().unwrap_or("unknown"),
    }
}

/// Decodes `bytes`, guessing the format from their content and refusing sources
/// wider or taller than `max_dimension`.
pub fn decode(bytes: &[u8], max_dimension: u32) -> Result<DecodedImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(DecodeError::UnknownFormat)?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(max_dimension);
    limits.max_image_height = Some(max_dimension);
    reader.limits(limits);

    let image = reader.decode().map_err(|source| DecodeError::Image {
        format: format_name(format),
        source,
    })?;
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::Empty {
            format: format_name(format),
            width: image.width(),
            height: image.height(),
        });
    }
    Ok(DecodedImage { image, format })
}

/// Scales `height` by the same ratio that brings `width` to [`THUMBNAIL_WIDTH`],
/// rounding toward zero and keeping the result within `1..=max_height`.
pub fn thumbnail_dimensions(width: u32, height: u32, max_height: u32) -> (u32, u32) {
    let thumbnail_height = (u64::from(height) * u64::from(THUMBNAIL_WIDTH))
        .checked_div(u64::from(width))
        .unwrap_or(u64::MAX)
        .clamp(1, u64::from(max_height.max(1)));
    (THUMBNAIL_WIDTH, u32::try_from(thumbnail_height).unwrap_or(u32::MAX))
}

pub fn resize(image: &DynamicImage, max_height: u32) -> DynamicImage {
    let (width, height) = thumbnail_dimensions(image.width(), image.height(), max_height);
    image.resize_exact(width, height, FilterType::Lanczos3)
}

pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, EncodeError> {
    // JPEG has no alpha channel.
    let rgb_image = image.to_rgb8();

    // Rough guess of one byte per pixel, JPEG usually ends up well below that.
    let estimated_size = (rgb_image.width() as usize) * (rgb_image.height() as usize);
    let mut jpeg_bytes = Vec::with_capacity(estimated_size);
    JpegEncoder::new_with_quality(&mut jpeg_bytes, JPEG_QUALITY).encode_image(&rgb_image)?;

    Ok(jpeg_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("Failed to encode test PNG.");
        bytes.into_inner()
    }

    #[test]
    fn test_thumbnail_dimensions_downscale() {
        assert_eq!(thumbnail_dimensions(600, 400, 10_000), (300, 200));
        assert_eq!(thumbnail_dimensions(1920, 1080, 10_000), (300, 168));
    }

    #[test]
    fn test_thumbnail_dimensions_upscale() {
        assert_eq!(thumbnail_dimensions(150, 100, 10_000), (300, 200));
    }

    #[test]
    fn test_thumbnail_dimensions_truncate() {
        // 1000 / (900 / 300) = 333.33...
        assert_eq!(thumbnail_dimensions(900, 1000, 10_000), (300, 333));
    }

    #[test]
    fn test_thumbnail_dimensions_never_zero() {
        assert_eq!(thumbnail_dimensions(10_000, 1, 10_000), (300, 1));
    }

    #[test]
    fn test_thumbnail_dimensions_preserve_aspect_ratio() {
        for (width, height) in [(640, 480), (1280, 720), (333, 777), (4000, 3000), (301, 299)] {
            let (thumbnail_width, thumbnail_height) = thumbnail_dimensions(width, height, 10_000);
            let expected = f64::from(height) * f64::from(thumbnail_width) / f64::from(width);
            assert!((f64::from(thumbnail_height) - expected).abs() <= 1.0);
        }
    }

    #[test]
    fn test_thumbnail_dimensions_bounded_height() {
        assert_eq!(thumbnail_dimensions(1, 10_000, 10_000), (300, 10_000));
        assert_eq!(thumbnail_dimensions(0, 5, 10_000), (300, 10_000));
        assert_eq!(thumbnail_dimensions(0, 0, 0), (300, 1));
    }

    #[test]
    fn test_decode_rejects_zero_width() {
        let result = decode(b"P6\n0 5\n255\n", 10_000);

        assert!(matches!(
            result,
            Err(DecodeError::Empty {
                width: 0,
                height: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_rejects_zero_height() {
        let result = decode(b"P6\n5 0\n255\n", 10_000);

        assert!(matches!(
            result,
            Err(DecodeError::Empty { height: 0, .. } | DecodeError::Image { .. })
        ));
    }

    #[test]
    fn test_decode_detects_format() {
        let decoded = decode(&png_bytes(40, 20), 1_000).expect("Failed to decode PNG.");

        assert_eq!(decoded.format_name(), "png");
        assert_eq!((decoded.width(), decoded.height()), (40, 20));
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let result = decode(b"definitely not an image", 1_000);

        assert!(matches!(result, Err(DecodeError::UnknownFormat)));
    }

    #[test]
    fn test_decode_enforces_dimension_limit() {
        let result = decode(&png_bytes(64, 8), 32);

        assert!(matches!(result, Err(DecodeError::Image { format: "png", .. })));
    }

    #[test]
    fn test_encode_jpeg_drops_alpha() {
        let pixel = Rgba([10, 20, 30, 40]);
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(30, 10, pixel));

        let jpeg_bytes = encode_jpeg(&image).expect("Failed to encode JPEG.");
        let decoded = decode(&jpeg_bytes, 1_000).expect("Failed to decode JPEG.");

        assert_eq!(decoded.format, ImageFormat::Jpeg);
        assert_eq!((decoded.width(), decoded.height()), (30, 10));
    }

    #[test]
    fn test_resize_then_encode_is_deterministic() {
        let decoded = decode(&png_bytes(640, 480), 1_000).expect("Failed to decode PNG.");

        let first = encode_jpeg(&resize(&decoded.image, 1_000)).expect("Failed to encode JPEG.");
        let second = encode_jpeg(&resize(&decoded.image, 1_000)).expect("Failed to encode JPEG.");

        assert_eq!(first, second);
    }
}

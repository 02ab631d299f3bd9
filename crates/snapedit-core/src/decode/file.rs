//! Decoding images from disk or memory.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::ImageReader;
use log::debug;

use super::orientation::{get_orientation, Orientation};
use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Placeholder path reported for in-memory decodes.
const MEMORY_SOURCE: &str = "<memory>";

/// Load an image file, applying its EXIF orientation.
///
/// # Errors
///
/// Returns [`EditError::Decode`] if the path does not exist, cannot be read,
/// or does not hold a decodable raster image.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<PixelBuffer, EditError> {
    load_path(path.as_ref(), true)
}

/// Load an image file without applying EXIF orientation.
pub fn load_from_file_no_orientation(path: impl AsRef<Path>) -> Result<PixelBuffer, EditError> {
    load_path(path.as_ref(), false)
}

/// Decode encoded image bytes (PNG, JPEG, ...), applying EXIF orientation.
pub fn load_from_memory(bytes: &[u8]) -> Result<PixelBuffer, EditError> {
    decode_bytes(bytes, true).map_err(|reason| EditError::Decode {
        path: PathBuf::from(MEMORY_SOURCE),
        reason,
    })
}

fn load_path(path: &Path, apply_orientation: bool) -> Result<PixelBuffer, EditError> {
    let decode_error = |reason: String| EditError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let bytes = std::fs::read(path).map_err(|e| decode_error(e.to_string()))?;
    let buffer = decode_bytes(&bytes, apply_orientation).map_err(decode_error)?;

    debug!(
        "loaded {} ({}x{})",
        path.display(),
        buffer.width(),
        buffer.height()
    );
    Ok(buffer)
}

fn decode_bytes(bytes: &[u8], apply_orientation: bool) -> Result<PixelBuffer, String> {
    let orientation = if apply_orientation {
        get_orientation(bytes)
    } else {
        Orientation::Normal
    };

    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())?;

    let rgb = orientation.correct(img).into_rgb8();
    PixelBuffer::from_rgb_image(rgb).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn gradient(width: u32, height: u32) -> image::RgbImage {
        image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x * 40) as u8, (y * 40) as u8, 200])
        })
    }

    fn encoded(img: &image::RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_load_png_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let img = gradient(5, 3);
        img.save(&path).unwrap();

        let buf = load_from_file(&path).unwrap();
        assert_eq!(buf.dimensions(), (5, 3));
        assert_eq!(buf.as_raw(), img.as_raw().as_slice());
    }

    #[test]
    fn test_load_jpeg_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.jpg");
        std::fs::write(&path, encoded(&gradient(8, 8), ImageFormat::Jpeg)).unwrap();

        let buf = load_from_file(&path).unwrap();
        assert_eq!(buf.dimensions(), (8, 8));
        assert_eq!(buf.as_raw().len(), 8 * 8 * 3);
    }

    #[test]
    fn test_load_rgba_png_drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();

        let buf = load_from_file_no_orientation(&path).unwrap();
        assert_eq!(buf.pixel(1, 1), Some([10, 20, 30]));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.png");

        match load_from_file(&path) {
            Err(EditError::Decode { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, [0x00, 0x01, 0x02, 0x03]).unwrap();

        assert!(matches!(
            load_from_file(&path),
            Err(EditError::Decode { .. })
        ));
    }

    #[test]
    fn test_load_truncated_png() {
        let bytes = encoded(&gradient(16, 16), ImageFormat::Png);
        let result = load_from_memory(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(EditError::Decode { .. })));
    }

    #[test]
    fn test_load_from_memory() {
        let img = gradient(4, 2);
        let buf = load_from_memory(&encoded(&img, ImageFormat::Png)).unwrap();
        assert_eq!(buf.dimensions(), (4, 2));
        assert_eq!(buf.pixel(3, 1), Some([120, 40, 200]));
    }

    #[test]
    fn test_load_from_empty_memory() {
        match load_from_memory(&[]) {
            Err(EditError::Decode { path, .. }) => assert_eq!(path, PathBuf::from("<memory>")),
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }
}

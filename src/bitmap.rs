use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use exif::{In, Reader, Tag, Value};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::{debug, warn};
use crate::error::ImageLoadError;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// A decoded RGBA image plus the copy currently scaled for display.
///
/// Resizing always starts again from `original`, so stepping through the
/// presets never compounds resampling blur.
#[derive(Debug, Clone)]
pub struct Bitmap {
    original: RgbaImage,
    pixels: RgbaImage,
    generation: u64,
}

impl Bitmap {
    pub fn new(original: RgbaImage) -> Self {
        Self {
            pixels: original.clone(),
            original,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn width(&self) -> i32 {
        self.pixels.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixels.height() as i32
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Changes whenever the displayed pixels change; the render surface keys
    /// its texture cache on it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns a new bitmap scaled to `width` x `height`.
    pub fn resized(&self, width: i32, height: i32) -> Self {
        let width = width.max(1) as u32;
        let height = height.max(1) as u32;

        let pixels = if self.original.dimensions() == (width, height) {
            self.original.clone()
        } else {
            image::imageops::resize(&self.original, width, height, FilterType::Lanczos3)
        };

        Self {
            original: self.original.clone(),
            pixels,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// PNG encoding of the displayed pixels, for handing over to raylib.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Vec::new();
        self.pixels().write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
        Ok(buffer)
    }
}

// --- Load Image File, Apply EXIF Rotation ---
pub fn load_bitmap(image_path: &Path) -> Result<Bitmap, ImageLoadError> {
    let file_bytes = fs::read(image_path).map_err(|source| ImageLoadError::Read {
        path: image_path.to_path_buf(),
        source,
    })?;

    decode_bitmap(image_path, &file_bytes)
}

pub fn decode_bitmap(image_path: &Path, file_bytes: &[u8]) -> Result<Bitmap, ImageLoadError> {
    let image = image::load_from_memory(file_bytes).map_err(|source| ImageLoadError::Decode {
        path: image_path.to_path_buf(),
        source,
    })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(ImageLoadError::Empty { path: image_path.to_path_buf() });
    }

    let orientation = match image::guess_format(file_bytes) {
        Ok(ImageFormat::Jpeg) => read_exif_orientation(image_path, file_bytes),
        _ => 1,
    };

    Ok(Bitmap::new(apply_orientation(image, orientation).to_rgba8()))
}

// EXIF reading only works reliably for JPEG; anything unreadable means "no rotation".
fn read_exif_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        debug!("{} EXIF orientation: {}", image_path.display(), orientation);
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            warn!("Could not read EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

// 1 = Top-left (Normal)
// 3 = Bottom-right (180 deg)
// 6 = Top-right (90 deg clockwise)
// 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
// Others involve flips, ignored.
fn apply_orientation(image: DynamicImage, orientation: u16) -> DynamicImage {
    match orientation {
        3 => image.rotate180(),
        6 => image.rotate90(),
        8 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Write;

    fn checkerboard(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        checkerboard(12, 7).save(&path).unwrap();

        let bitmap = load_bitmap(&path).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (12, 7));
    }

    #[test]
    fn rejects_non_image_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "definitely not pixels").unwrap();

        let err = load_bitmap(file.path()).unwrap_err();
        assert!(matches!(err, ImageLoadError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn reports_missing_file_as_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bitmap(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, ImageLoadError::Read { .. }), "{err:?}");
    }

    #[test]
    fn resizing_starts_from_original_pixels() {
        let bitmap = Bitmap::new(checkerboard(64, 48));

        let small = bitmap.resized(16, 12);
        let back = small.resized(64, 48);

        assert_eq!((small.width(), small.height()), (16, 12));
        assert_eq!(back.pixels(), bitmap.pixels());
        assert_ne!(small.generation(), bitmap.generation());
    }

    #[test]
    fn encodes_displayed_pixels_as_png() {
        let bitmap = Bitmap::new(checkerboard(4, 4)).resized(8, 2);
        let png = bitmap.encode_png().unwrap();

        let decoded = decode_bitmap(Path::new("roundtrip.png"), &png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 2));
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let rotated = apply_orientation(DynamicImage::ImageRgba8(checkerboard(10, 4)), 6);
        assert_eq!((rotated.width(), rotated.height()), (4, 10));
    }
}

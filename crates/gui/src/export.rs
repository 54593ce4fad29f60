//! "Download preview": encode the rendered shirt frame as a PNG.

use std::io::Cursor;
use std::path::Path;

use egui::ColorImage;

/// Why a preview could not be produced. Callers log and drop it.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("no frame content to save")]
    Empty,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write preview: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a captured frame (already cropped to the 3D view) as PNG bytes
pub fn preview_png(frame: &ColorImage) -> Result<Vec<u8>, PreviewError> {
    let [width, height] = frame.size;
    if width == 0 || height == 0 || frame.pixels.is_empty() {
        return Err(PreviewError::Empty);
    }
    let raw: Vec<u8> = frame
        .pixels
        .iter()
        .flat_map(|c| c.to_srgba_unmultiplied())
        .collect();
    let image = image::RgbaImage::from_raw(width as u32, height as u32, raw)
        .ok_or(PreviewError::Empty)?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

pub fn save_preview(frame: &ColorImage, path: &Path) -> Result<(), PreviewError> {
    let bytes = preview_png(frame)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_empty_frame_is_rejected() {
        let frame = ColorImage::new([0, 0], Color32::BLACK);
        assert!(matches!(preview_png(&frame), Err(PreviewError::Empty)));
    }

    #[test]
    fn test_png_decodes_back_to_frame() {
        let frame = ColorImage::new([4, 2], Color32::from_rgb(239, 189, 78));
        let bytes = preview_png(&frame).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.get_pixel(3, 1).0, [239, 189, 78, 255]);
    }

    #[test]
    fn test_save_preview_writes_file() {
        let dir = std::env::temp_dir().join(format!("stylecrop-preview-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(shared::PREVIEW_FILE_NAME);
        save_preview(&ColorImage::new([2, 2], Color32::WHITE), &path).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}

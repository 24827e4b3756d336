use crate::models::{ImageRules, PreviewItem, SelectedFile};
use crate::validation::ImageError;
use base64::Engine;
use image::ImageFormat;
use std::io::Cursor;

/// Encodes raw bytes as a `data:` URL
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime_type, b64)
}

/// Creates a downscaled WebP thumbnail whose longest edge is `max_edge`
pub fn create_thumbnail(bytes: &[u8], max_edge: u32) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| ImageError::DecodeError(format!("Failed to load image: {}", e)))?;

    let thumb = if img.width() > max_edge || img.height() > max_edge {
        img.thumbnail(max_edge, max_edge)
    } else {
        img
    };

    let mut buffer = Cursor::new(Vec::new());
    thumb
        .write_to(&mut buffer, ImageFormat::WebP)
        .map_err(|e| ImageError::EncodeError(format!("Failed to write thumbnail: {}", e)))?;

    Ok(buffer.into_inner())
}

/// Preview URL for a staged file; falls back to the original bytes if it cannot be decoded
pub fn preview_data_url(file: &SelectedFile, max_edge: u32) -> String {
    match create_thumbnail(&file.bytes, max_edge) {
        Ok(thumb) => data_url("image/webp", &thumb),
        Err(e) => {
            log::debug!("Preview for {} uses original bytes: {}", file.name, e);
            data_url(&file.mime_type, &file.bytes)
        }
    }
}

/// Builds preview entries for every file that passes validation.
/// Returns the previews and the rejected files with their errors.
pub fn build_previews(
    files: &[SelectedFile],
    rules: &ImageRules,
) -> (Vec<PreviewItem>, Vec<(usize, ImageError)>) {
    let mut previews = Vec::new();
    let mut rejected = Vec::new();

    for (index, file) in files.iter().enumerate() {
        match crate::validation::validate_image(file, rules) {
            Ok(()) => previews.push(PreviewItem {
                index,
                name: file.name.clone(),
                data_url: preview_data_url(file, rules.preview_edge),
            }),
            Err(e) => rejected.push((index, e)),
        }
    }

    (previews, rejected)
}

use crate::models::{ImageRules, SelectedFile};

/// Error type for staging operations
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    UnsupportedType(String),
    TooLarge { size: u64, limit: u64 },
    DecodeError(String),
    EncodeError(String),
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::UnsupportedType(mime) => write!(f, "Unsupported file type: {}", mime),
            ImageError::TooLarge { size, limit } => write!(
                f,
                "File too large: {} (max {})",
                format_file_size(*size),
                format_file_size(*limit)
            ),
            ImageError::DecodeError(msg) => write!(f, "Image decode error: {}", msg),
            ImageError::EncodeError(msg) => write!(f, "Image encode error: {}", msg),
        }
    }
}

impl std::error::Error for ImageError {}

/// Checks the MIME type against the allow-list first, then the size ceiling
pub fn validate_image(file: &SelectedFile, rules: &ImageRules) -> Result<(), ImageError> {
    validate_meta(&file.mime_type, file.size, rules)
}

/// Same checks as [`validate_image`] for a file whose bytes are not read yet
pub fn validate_meta(mime_type: &str, size: u64, rules: &ImageRules) -> Result<(), ImageError> {
    if !rules
        .allowed_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(mime_type))
    {
        return Err(ImageError::UnsupportedType(mime_type.to_string()));
    }
    if size > rules.max_size {
        return Err(ImageError::TooLarge {
            size,
            limit: rules.max_size,
        });
    }
    Ok(())
}

/// MIME type as reported, or guessed from the name when empty
pub fn resolve_mime(name: &str, mime_type: Option<String>) -> String {
    mime_type
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| guess_mime_from_name(name).to_string())
}

/// Guesses a MIME type from the file extension
pub fn guess_mime_from_name(name: &str) -> &'static str {
    match std::path::Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") | Some("heif") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Human readable byte size: `0 Bytes`, `1.5 KB`, `5 MB`
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

/// A file picked by the user and staged for upload, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Builds a staged file; an empty MIME type is guessed from the file name
    pub fn new(name: String, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        let mime_type = crate::validation::resolve_mime(&name, mime_type);
        Self {
            size: bytes.len() as u64,
            name,
            mime_type,
            bytes,
        }
    }
}

/// Upload rules applied to every selected file
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRules {
    pub allowed_types: Vec<String>,
    /// Size ceiling in bytes (inclusive)
    pub max_size: u64,
    /// Longest edge of generated previews in pixels
    pub preview_edge: u32,
}

impl Default for ImageRules {
    fn default() -> Self {
        Self {
            allowed_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
            ],
            max_size: 5 * 1024 * 1024,
            preview_edge: 256,
        }
    }
}

/// One entry of the preview grid
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewItem {
    /// Position of the file in the selection
    pub index: usize,
    pub name: String,
    pub data_url: String,
}

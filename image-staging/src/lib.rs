//! # Image Staging
//!
//! Client-side handling of photos attached to a new report.
//!
//! This crate provides:
//! - MIME allow-list and size ceiling validation
//! - Human readable byte sizes
//! - Downscaled WebP previews encoded as data URLs
//! - Optional Dioxus components for the preview grid and the full-size overlay
//!
//! Files never touch disk here; they are held in memory until the report is
//! submitted or the user removes them.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use image_staging::{build_previews, ImageRules, SelectedFile};
//!
//! let files = vec![SelectedFile::new("spill.jpg".into(), None, bytes)];
//! let (previews, rejected) = build_previews(&files, &ImageRules::default());
//! ```

pub mod models;
pub mod preview;
pub mod validation;

#[cfg(feature = "components")]
pub mod components;

pub use models::{ImageRules, PreviewItem, SelectedFile};
pub use preview::{build_previews, create_thumbnail, data_url, preview_data_url};
pub use validation::{
    format_file_size, guess_mime_from_name, resolve_mime, validate_image, validate_meta, ImageError,
};

#[cfg(feature = "components")]
pub use components::{FullscreenImage, PreviewGrid};

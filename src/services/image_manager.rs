use crate::error::AppError;
use crate::ui::Ui;
use crate::utils::{format_file_size, Utils};
use image_staging::{build_previews, PreviewItem, SelectedFile};

/// What the form shows for the staged images
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSelection {
    pub previews: Vec<PreviewItem>,
    /// "No image selected", the file name, or all names joined
    pub label: String,
}

pub struct ImageManager<U: Ui> {
    utils: Utils<U>,
}

impl<U: Ui> Clone for ImageManager<U> {
    fn clone(&self) -> Self {
        Self {
            utils: self.utils.clone(),
        }
    }
}

impl<U: Ui> ImageManager<U> {
    pub fn new(utils: Utils<U>) -> Self {
        Self { utils }
    }

    /// Replaces the selection with `files`, dropping any that fail validation
    pub fn handle_image_select(&self, files: Vec<SelectedFile>) -> ImageSelection {
        let mut accepted = Vec::with_capacity(files.len());
        for file in files {
            if self.accepts(&file.name, &file.mime_type, file.size) {
                log::debug!("Staging {} ({})", file.name, format_file_size(file.size));
                accepted.push(file);
            }
        }

        self.utils.state().borrow_mut().update_selected_files(accepted);
        self.update_preview()
    }

    /// Checks a picked file before its bytes are read; rejections raise a dialog
    pub fn accepts(&self, name: &str, mime_type: &str, size: u64) -> bool {
        match self.utils.validate_meta(mime_type, size) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Rejected {}: {}", name, e);
                self.utils.show_error(AppError::from(e).user_message());
                false
            }
        }
    }

    /// Rebuilds previews and label from the staged files
    pub fn update_preview(&self) -> ImageSelection {
        let state = self.utils.state().borrow();
        let files = state.selected_files();
        let (previews, rejected) = build_previews(files, self.utils.rules());
        for (index, e) in rejected {
            log::warn!("Staged file {} has no preview: {}", index, e);
        }

        let label = match files {
            [] => self.utils.t("no-image"),
            [single] => single.name.clone(),
            many => many
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        };

        ImageSelection { previews, label }
    }

    pub fn remove_image(&self, index: usize) -> ImageSelection {
        if let Some(removed) = self.utils.state().borrow_mut().remove_file_at_index(index) {
            log::debug!("Removed staged image {}", removed.name);
        }
        self.update_preview()
    }

    pub fn open_popup(&self, src: String) {
        self.utils.ui().show_image(Some(src));
    }

    pub fn close_popup(&self) {
        self.utils.ui().show_image(None);
    }
}

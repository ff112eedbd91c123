//! Image staging
//!
//! At most one pending local image per slot, held separately from the
//! image URL already persisted on a record. Upload is driven by the
//! submission pipeline only, never by form code.

use std::path::PathBuf;

use crate::error::ClientResult;

/// Where the image comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Gallery,
}

/// Locally selected image, not yet uploaded
#[derive(Debug, Clone, PartialEq)]
pub struct StagedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

impl StagedImage {
    /// Build a staged image from a local file path, guessing the MIME
    /// type from the extension. Pickers that name nothing fall back to
    /// the camera default.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo.jpg".to_string());
        let mime_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or("image/jpeg")
            .to_string();
        Self {
            path,
            file_name,
            mime_type,
        }
    }
}

/// Platform image picker boundary
///
/// `Ok(None)` means the user cancelled. Staging state is unchanged on
/// both cancellation and picker errors.
pub trait ImagePicker {
    fn pick(&mut self, source: ImageSource) -> ClientResult<Option<StagedImage>>;
}

/// One logical image slot (product-level or per-variant)
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    staged: Option<StagedImage>,
    persisted_url: Option<String>,
}

impl ImageSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot hydrated from an existing record
    pub fn with_persisted_url(url: Option<String>) -> Self {
        Self {
            staged: None,
            persisted_url: url,
        }
    }

    /// Run the picker; a picked image replaces any previously staged one.
    /// Returns whether the slot changed.
    pub fn pick(&mut self, picker: &mut dyn ImagePicker, source: ImageSource) -> ClientResult<bool> {
        match picker.pick(source)? {
            Some(image) => {
                self.staged = Some(image);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Discard the staged image and the persisted URL. Once committed,
    /// explicit removal is indistinguishable from never having had an
    /// image.
    pub fn clear(&mut self) {
        self.staged = None;
        self.persisted_url = None;
    }

    pub fn has_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub fn staged(&self) -> Option<&StagedImage> {
        self.staged.as_ref()
    }

    pub fn persisted_url(&self) -> Option<&str> {
        self.persisted_url.as_deref()
    }
}

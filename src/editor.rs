//! Editor workflow: pick a photo, place stickers, save the composition.
//!
//! DESIGN
//! ======
//! Everything outside the gesture engine is a host collaborator behind a trait:
//! the photo library ([`ImageSource`]), the permission prompt
//! ([`PermissionGate`]), and view flattening plus library writes
//! ([`Exporter`]). `Editor` sequences those calls around an owned
//! [`EngineCore`] and turns collaborator failures into [`EditorError`]s for the
//! host to show.
//!
//! ERROR HANDLING
//! ==============
//! A captured export image is always handed back to [`Exporter::discard`],
//! whether the save succeeded, failed, or was refused for lack of permission.
//! Replaced photos are handed back to [`ImageSource::release`].

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::catalog;
use crate::config::EngineConfig;
use crate::doc::PlacedObject;
use crate::engine::{Action, EngineCore};

// =============================================================================
// COLLABORATOR TYPES
// =============================================================================

/// A photo returned by the host's image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickedImage {
    pub uri: String,
    pub width: u32,
    pub height: u32,
    /// Size in bytes, when the source reports it.
    pub file_size: Option<u64>,
}

/// Photo library access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    Denied,
    /// Access to a user-chosen subset of the library.
    Limited,
}

impl Permission {
    /// Whether this level lets the editor read and write the library.
    #[must_use]
    pub fn allows_access(self) -> bool {
        matches!(self, Self::Granted | Self::Limited)
    }
}

/// Opaque handle to a flattened image produced by the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageSourceError {
    #[error("image pick cancelled")]
    Cancelled,
    #[error("photo library permission denied")]
    PermissionDenied,
    #[error("image processing failed: {0}")]
    Processing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("canvas capture failed: {0}")]
    CaptureFailed(String),
    #[error("save to library failed: {0}")]
    SaveFailed(String),
}

// =============================================================================
// COLLABORATOR TRAITS
// =============================================================================

/// Host photo library.
pub trait ImageSource {
    /// Let the user choose a photo.
    ///
    /// # Errors
    ///
    /// [`ImageSourceError::Cancelled`] when the user backs out, or
    /// [`ImageSourceError::PermissionDenied`] when the library is off limits.
    fn pick_image(&mut self) -> Result<PickedImage, ImageSourceError>;

    /// Resize `image` to `target_width` (keeping aspect) and re-encode it.
    ///
    /// # Errors
    ///
    /// [`ImageSourceError::Processing`] when the image cannot be re-encoded.
    fn compress(&mut self, image: &PickedImage, target_width: u32) -> Result<PickedImage, ImageSourceError>;

    /// Dispose of a photo the editor no longer uses (temp file cleanup).
    fn release(&mut self, _image: &PickedImage) {}
}

/// Host permission prompt for the photo library.
pub trait PermissionGate {
    /// Current access level, without prompting.
    fn check_permission(&mut self) -> Permission;

    /// Prompt the user and return the resulting access level.
    fn request_permission(&mut self) -> Permission;
}

/// Host view flattening and library writes.
pub trait Exporter {
    /// Flatten the photo and the stickers (in draw order) into one image.
    ///
    /// # Errors
    ///
    /// [`ExportError::CaptureFailed`] when the view cannot be rendered.
    fn capture_current_canvas(
        &mut self,
        image: &PickedImage,
        stickers: &[PlacedObject],
    ) -> Result<ImageHandle, ExportError>;

    /// Write a captured image into the user's library.
    ///
    /// # Errors
    ///
    /// [`ExportError::SaveFailed`] when the library rejects the write.
    fn save_to_library(&mut self, handle: &ImageHandle) -> Result<(), ExportError>;

    /// Dispose of a captured image.
    fn discard(&mut self, _handle: &ImageHandle) {}
}

// =============================================================================
// EDITOR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("no image selected")]
    NoImage,
    #[error("unknown sticker: {0}")]
    UnknownSticker(String),
    #[error("photo library permission denied")]
    PermissionDenied,
    #[error("image source error: {0}")]
    ImageSource(#[from] ImageSourceError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

impl EditorError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoImage => "E_NO_IMAGE",
            Self::UnknownSticker(_) => "E_UNKNOWN_STICKER",
            Self::PermissionDenied | Self::ImageSource(ImageSourceError::PermissionDenied) => "E_PERMISSION_DENIED",
            Self::ImageSource(ImageSourceError::Cancelled) => "E_CANCELLED",
            Self::ImageSource(ImageSourceError::Processing(_)) => "E_IMAGE_PROCESSING",
            Self::Export(ExportError::CaptureFailed(_)) => "E_CAPTURE_FAILED",
            Self::Export(ExportError::SaveFailed(_)) => "E_SAVE_FAILED",
        }
    }
}

/// Pick/add/save workflow around a gesture engine.
pub struct Editor<S, P, X> {
    engine: EngineCore,
    source: S,
    permissions: P,
    exporter: X,
    image: Option<PickedImage>,
    config: EngineConfig,
}

impl<S, P, X> Editor<S, P, X>
where
    S: ImageSource,
    P: PermissionGate,
    X: Exporter,
{
    /// Build an editor with default limits.
    pub fn new(source: S, permissions: P, exporter: X) -> Self {
        Self::with_config(source, permissions, exporter, EngineConfig::default())
    }

    /// Build an editor using `config` for both the engine and image intake.
    pub fn with_config(source: S, permissions: P, exporter: X, config: EngineConfig) -> Self {
        let config = config.validated();
        Self { engine: EngineCore::with_config(config), source, permissions, exporter, image: None, config }
    }

    /// The gesture engine, for rendering.
    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    /// The gesture engine, as the host's touch-event sink.
    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    /// The photo currently under the stickers, if any.
    #[must_use]
    pub fn image(&self) -> Option<&PickedImage> {
        self.image.as_ref()
    }

    /// Ask the user for a photo and make it the editing background.
    ///
    /// Photos larger than the configured byte limit are resized first. The
    /// previous photo, if any, is released once the new one is in place.
    ///
    /// # Errors
    ///
    /// [`EditorError::PermissionDenied`] when library access is refused, or
    /// the image source's error.
    pub fn pick_image(&mut self) -> Result<&PickedImage, EditorError> {
        self.ensure_permission()?;
        let picked = self.source.pick_image()?;
        let picked = if picked.file_size.is_some_and(|size| size > self.config.max_image_bytes) {
            info!(
                uri = %picked.uri,
                file_size = picked.file_size,
                target_width = self.config.resize_width,
                "compressing oversized image"
            );
            self.source.compress(&picked, self.config.resize_width)?
        } else {
            picked
        };
        info!(uri = %picked.uri, width = picked.width, height = picked.height, "image selected");

        let old = self.image.take();
        let current = self.image.insert(picked);
        if let Some(old) = old {
            self.source.release(&old);
        }
        Ok(&*current)
    }

    /// Place the palette sticker `sticker_id` at the canvas center.
    ///
    /// # Errors
    ///
    /// [`EditorError::NoImage`] before a photo is picked, or
    /// [`EditorError::UnknownSticker`] for an id not in the palette.
    pub fn add_sticker(&mut self, sticker_id: &str) -> Result<Vec<Action>, EditorError> {
        if self.image.is_none() {
            return Err(EditorError::NoImage);
        }
        let sticker = catalog::find(sticker_id).ok_or_else(|| EditorError::UnknownSticker(sticker_id.to_owned()))?;
        Ok(self.engine.add_sticker(sticker.symbol))
    }

    /// Flatten the photo and stickers and save the result to the library.
    ///
    /// # Errors
    ///
    /// [`EditorError::NoImage`] before a photo is picked,
    /// [`EditorError::PermissionDenied`] when write access is refused, or the
    /// exporter's error.
    pub fn save(&mut self) -> Result<(), EditorError> {
        let Some(image) = self.image.as_ref() else {
            return Err(EditorError::NoImage);
        };
        let stickers = self.engine.snapshot();
        let handle = self.exporter.capture_current_canvas(image, &stickers)?;

        let result = self.ensure_permission().and_then(|()| {
            self.exporter.save_to_library(&handle).map_err(EditorError::from)
        });
        self.exporter.discard(&handle);

        match &result {
            Ok(()) => info!(stickers = stickers.len(), "composition saved"),
            Err(e) => warn!(error = %e, code = e.error_code(), "composition not saved"),
        }
        result
    }

    fn ensure_permission(&mut self) -> Result<(), EditorError> {
        if self.permissions.check_permission().allows_access() {
            return Ok(());
        }
        if self.permissions.request_permission().allows_access() {
            return Ok(());
        }
        warn!("photo library permission denied");
        Err(EditorError::PermissionDenied)
    }
}

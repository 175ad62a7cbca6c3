//! Decoded images ready for display on the placement surface

use image::RgbaImage;

use super::composite::{RenderError, fit_signature, load_rgba};
use crate::domain::{ImageRef, Size};

/// An image decoded for display, with both raw RGBA data and a display handle
#[derive(Clone, Debug)]
pub struct PreviewImage {
    pub rgba: RgbaImage,
    pub handle: cosmic::widget::image::Handle,
}

impl PreviewImage {
    fn from_rgba(source: &ImageRef, rgba: RgbaImage) -> Self {
        log::debug!(
            "Preview decoded for {}: {}x{} pixels",
            source,
            rgba.width(),
            rgba.height()
        );
        let handle = cosmic::widget::image::Handle::from_rgba(
            rgba.width(),
            rgba.height(),
            rgba.clone().into_vec(),
        );
        Self { rgba, handle }
    }

    /// Decode an image at its native size
    pub fn load(source: &ImageRef) -> Result<Self, RenderError> {
        let rgba = load_rgba(source)?;
        Ok(Self::from_rgba(source, rgba))
    }

    /// Decode a signature already fitted to its placement box, so the preview
    /// matches what the compositor pastes
    pub fn load_fitted(source: &ImageRef, size: Size) -> Result<Self, RenderError> {
        let rgba = fit_signature(&load_rgba(source)?, size);
        Ok(Self::from_rgba(source, rgba))
    }

    pub fn size(&self) -> Size {
        Size::new(self.rgba.width(), self.rgba.height())
    }
}

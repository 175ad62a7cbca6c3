use std::collections::HashMap;
use std::path::PathBuf;

use crate::browser::FileBrowser;
use crate::config::SigstampConfig;
use crate::domain::{Composition, DragState, PlacementId, Size};
use crate::fl;
use crate::render::preview::PreviewImage;

/// Line shown under the surface after each action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

impl Status {
    pub fn text(&self) -> &str {
        match self {
            Status::Info(text) | Status::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error(_))
    }
}

/// Everything the window shows and edits
#[derive(Clone, Debug)]
pub struct SessionState {
    pub config: SigstampConfig,
    pub composition: Composition,
    pub browser: FileBrowser,
    pub drag: DragState,
    /// Decoded base image, present once a base image was opened successfully
    pub base_preview: Option<PreviewImage>,
    /// Decoded signatures, fitted to their placement size
    pub signature_previews: HashMap<PlacementId, PreviewImage>,
    /// Where Save writes the flattened image
    pub output_path: PathBuf,
    pub status: Status,
}

impl SessionState {
    pub fn new(config: SigstampConfig, browser: FileBrowser) -> Self {
        let output_path = config.output_path();
        Self {
            config,
            composition: Composition::new(),
            browser,
            drag: DragState::default(),
            base_preview: None,
            signature_previews: HashMap::new(),
            output_path,
            status: Status::Info(fl!("status-ready")),
        }
    }

    /// Size of the surface the placements live on
    pub fn canvas_size(&self) -> Option<Size> {
        self.base_preview.as_ref().map(PreviewImage::size)
    }

    /// Save is offered only once a base image is loaded
    pub fn can_save(&self) -> bool {
        self.composition.can_save() && self.base_preview.is_some()
    }
}

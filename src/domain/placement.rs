//! Signature placement types

use std::fmt;
use std::path::{Path, PathBuf};

use super::geometry::{Position, Rect, Size};

/// Default footprint of a signature in output pixels
pub const SIGNATURE_SIZE: Size = Size {
    width: 100,
    height: 50,
};

/// Path to a raster image on disk
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageRef(PathBuf);

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name for display, falling back to the full path
    pub fn display_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for ImageRef {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for ImageRef {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

/// Identifier of a placement, unique within one composition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementId(pub(crate) u64);

/// A signature image pinned at a position on the base image
#[derive(Clone, Debug, PartialEq)]
pub struct SignaturePlacement {
    pub id: PlacementId,
    pub image: ImageRef,
    /// Top-left corner in base-image pixel coordinates
    pub position: Position,
    pub size: Size,
}

impl SignaturePlacement {
    /// Rectangle currently covered by this placement
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn contains(&self, point: Position) -> bool {
        self.rect().contains(point)
    }
}

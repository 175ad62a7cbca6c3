//! In-window file browser used to pick base and signature images

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} is not a file in the current directory")]
    NotAFile(PathBuf),
}

/// A single row in the browser listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Listing options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrowserOptions {
    pub show_hidden: bool,
    pub image_files_only: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            image_files_only: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FileBrowser {
    dir: PathBuf,
    entries: Vec<Entry>,
    selection: Option<PathBuf>,
    visible: bool,
    options: BrowserOptions,
}

impl FileBrowser {
    /// Open a browser listing `dir`. The browser starts visible.
    pub fn open(dir: impl Into<PathBuf>, options: BrowserOptions) -> Result<Self, BrowserError> {
        let dir = dir.into();
        let entries = list_dir(&dir, options)?;
        Ok(Self {
            dir,
            entries,
            selection: None,
            visible: true,
            options,
        })
    }

    /// Browser with an empty listing, used when no start directory is readable
    pub fn empty(dir: impl Into<PathBuf>, options: BrowserOptions) -> Self {
        Self {
            dir: dir.into(),
            entries: Vec::new(),
            selection: None,
            visible: true,
            options,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selection(&self) -> Option<&Path> {
        self.selection.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Navigate into `dir`. On error the current listing is kept.
    pub fn enter(&mut self, dir: impl Into<PathBuf>) -> Result<(), BrowserError> {
        let dir = dir.into();
        let entries = list_dir(&dir, self.options)?;
        self.dir = dir;
        self.entries = entries;
        self.selection = None;
        Ok(())
    }

    /// Navigate to the parent directory. Returns false at the filesystem root.
    pub fn go_up(&mut self) -> Result<bool, BrowserError> {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return Ok(false);
        };
        self.enter(parent)?;
        Ok(true)
    }

    /// Re-read the current directory, keeping the selection if it still exists
    pub fn refresh(&mut self) -> Result<(), BrowserError> {
        self.entries = list_dir(&self.dir, self.options)?;
        if let Some(selected) = &self.selection
            && !self.entries.iter().any(|e| !e.is_dir && &e.path == selected)
        {
            self.selection = None;
        }
        Ok(())
    }

    /// Select a file from the current listing
    pub fn select(&mut self, path: &Path) -> Result<(), BrowserError> {
        if self.entries.iter().any(|e| !e.is_dir && e.path == path) {
            self.selection = Some(path.to_path_buf());
            Ok(())
        } else {
            Err(BrowserError::NotAFile(path.to_path_buf()))
        }
    }
}

/// Whether the extension of `path` maps to a format the image crate knows
pub fn is_image_file(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

fn list_dir(dir: &Path, options: BrowserOptions) -> Result<Vec<Entry>, BrowserError> {
    let read_error = |source| BrowserError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for item in fs::read_dir(dir).map_err(read_error)? {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        let name = item.file_name().to_string_lossy().into_owned();
        if !options.show_hidden && name.starts_with('.') {
            continue;
        }
        let path = item.path();
        // Follow symlinks so linked folders can be entered
        let is_dir = path.is_dir();
        if !is_dir && options.image_files_only && !is_image_file(&path) {
            continue;
        }
        entries.push(Entry { name, path, is_dir });
    }

    entries.sort_by(compare_entries);
    Ok(entries)
}

fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    b.is_dir
        .cmp(&a.is_dir)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

//! Configuration for sigstamp settings

use std::path::PathBuf;

use cosmic::cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use serde::{Deserialize, Serialize};

use crate::browser::BrowserOptions;
use crate::domain::{SIGNATURE_SIZE, Size};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, CosmicConfigEntry)]
#[version = 1]
pub struct SigstampConfig {
    /// File name of the flattened image, written into the home directory
    pub output_file_name: String,
    /// Width of a signature box in output pixels
    pub signature_width: u32,
    /// Height of a signature box in output pixels
    pub signature_height: u32,
    /// Directory the file browser opens in (None = Pictures, then home)
    #[serde(default)]
    pub start_directory: Option<PathBuf>,
    /// Whether the file browser lists dotfiles
    #[serde(default)]
    pub show_hidden_files: bool,
    /// Whether the file browser hides files that are not images
    #[serde(default = "default_image_files_only")]
    pub image_files_only: bool,
}

fn default_image_files_only() -> bool {
    true
}

impl SigstampConfig {
    /// Configuration ID for cosmic-config
    pub const ID: &'static str = "io.github.hojjatabdollahi.sigstamp";

    pub const DEFAULT_OUTPUT_FILE_NAME: &'static str = "final_image_with_signatures.png";

    /// Largest accepted signature width or height, in pixels
    pub const MAX_SIGNATURE_SIDE: u32 = 8192;

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match cosmic_config::Config::new(Self::ID, Self::VERSION) {
            Ok(config) => match Self::get_entry(&config) {
                Ok(entry) => entry.sanitized(),
                Err((errs, entry)) => {
                    log::warn!("Error loading config, using defaults: {:?}", errs);
                    entry.sanitized()
                }
            },
            Err(err) => {
                log::warn!("Could not create config handler: {:?}", err);
                Self::default()
            }
        }
    }

    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        if self.signature_width == 0 || self.signature_height == 0 {
            log::warn!(
                "Ignoring empty signature size {}x{}",
                self.signature_width,
                self.signature_height
            );
            self.signature_width = SIGNATURE_SIZE.width;
            self.signature_height = SIGNATURE_SIZE.height;
        }
        if self.signature_width > Self::MAX_SIGNATURE_SIDE
            || self.signature_height > Self::MAX_SIGNATURE_SIDE
        {
            log::warn!(
                "Signature size {}x{} capped to {} pixels per side",
                self.signature_width,
                self.signature_height,
                Self::MAX_SIGNATURE_SIDE
            );
            self.signature_width = self.signature_width.min(Self::MAX_SIGNATURE_SIDE);
            self.signature_height = self.signature_height.min(Self::MAX_SIGNATURE_SIDE);
        }
        if self.output_file_name.trim().is_empty() {
            self.output_file_name = Self::DEFAULT_OUTPUT_FILE_NAME.to_string();
        }
        self
    }

    /// Size given to newly added signatures
    pub fn signature_size(&self) -> Size {
        Size::new(self.signature_width, self.signature_height)
    }

    /// Where the flattened image is written
    pub fn output_path(&self) -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(&self.output_file_name)
    }

    /// Directory the file browser starts in
    pub fn start_directory(&self) -> PathBuf {
        self.start_directory
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            show_hidden: self.show_hidden_files,
            image_files_only: self.image_files_only,
        }
    }
}

impl Default for SigstampConfig {
    fn default() -> Self {
        Self {
            output_file_name: Self::DEFAULT_OUTPUT_FILE_NAME.to_string(),
            signature_width: SIGNATURE_SIZE.width,
            signature_height: SIGNATURE_SIZE.height,
            start_directory: None,
            show_hidden_files: false,
            image_files_only: default_image_files_only(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SigstampConfig::default();
        assert_eq!(config.signature_size(), Size::new(100, 50));
        assert!(
            config
                .output_path()
                .ends_with("final_image_with_signatures.png")
        );
        assert_eq!(config.browser_options(), BrowserOptions::default());
    }

    #[test]
    fn test_sanitized_restores_defaults() {
        let config = SigstampConfig {
            output_file_name: "  ".to_string(),
            signature_width: 0,
            signature_height: 80,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.signature_size(), SIGNATURE_SIZE);
        assert_eq!(config.output_file_name, "final_image_with_signatures.png");
    }

    #[test]
    fn test_sanitized_caps_oversized_signature() {
        let config = SigstampConfig {
            signature_width: u32::MAX,
            signature_height: 120,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(
            config.signature_size(),
            Size::new(SigstampConfig::MAX_SIGNATURE_SIDE, 120)
        );
    }

    #[test]
    fn test_start_directory_prefers_existing_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = SigstampConfig {
            start_directory: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(config.start_directory(), dir.path());

        let missing = SigstampConfig {
            start_directory: Some(dir.path().join("missing")),
            ..Default::default()
        };
        assert_ne!(missing.start_directory(), dir.path().join("missing"));
    }
}

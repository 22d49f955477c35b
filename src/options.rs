//! Extraction options.

use std::path::PathBuf;

/// Options controlling what an extraction produces.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Write images into this directory instead of listing their part paths
    pub image_dir: Option<PathBuf>,

    /// Pair external hyperlink targets with their anchor text
    pub hyperlinks: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            image_dir: None,
            hyperlinks: true,
        }
    }
}

impl ExtractOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write extracted images into `dir`, creating it if needed.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_dir = Some(dir.into());
        self
    }

    /// Enable or disable hyperlink correlation.
    pub fn with_hyperlinks(mut self, enabled: bool) -> Self {
        self.hyperlinks = enabled;
        self
    }
}

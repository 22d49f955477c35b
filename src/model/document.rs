//! Extracted document structures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// An external hyperlink found in the main document part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperlink {
    /// Flattened text of the element carrying the relationship id
    pub text: String,
    /// External target URL
    pub url: String,
}

impl Hyperlink {
    /// Create a new hyperlink pair.
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// An image referenced by the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ExtractedImage {
    /// Archive path of the image part (no output directory configured)
    Part(String),
    /// Absolute location the image bytes were written to
    File(PathBuf),
}

impl ExtractedImage {
    /// Archive path or written file location, as text.
    pub fn location(&self) -> String {
        match self {
            ExtractedImage::Part(path) => path.clone(),
            ExtractedImage::File(path) => path.display().to_string(),
        }
    }
}

impl fmt::Display for ExtractedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}

/// Content extracted from one .docx package.
///
/// `header`, `main` and `footer` hold the untrimmed concatenation of every
/// part of that kind; `text` is their trimmed concatenation, computed once
/// when the document is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    image_dir: Option<PathBuf>,

    header: String,
    main: String,
    footer: String,
    text: String,

    images: Vec<ExtractedImage>,
    hyperlinks: Vec<Hyperlink>,
    properties: BTreeMap<String, String>,
}

impl ExtractedDocument {
    /// Build a document from its text segments.
    pub fn new(header: String, main: String, footer: String) -> Self {
        let text = format!("{}{}{}", header, main, footer).trim().to_string();
        Self {
            header,
            main,
            footer,
            text,
            ..Default::default()
        }
    }

    pub(crate) fn with_images(mut self, images: Vec<ExtractedImage>) -> Self {
        self.images = images;
        self
    }

    pub(crate) fn with_hyperlinks(mut self, hyperlinks: Vec<Hyperlink>) -> Self {
        self.hyperlinks = hyperlinks;
        self
    }

    pub(crate) fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    pub(crate) fn with_image_dir(mut self, image_dir: Option<PathBuf>) -> Self {
        self.image_dir = image_dir;
        self
    }

    pub(crate) fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Absolute path of the source package, when read from disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory images were written to, if any.
    pub fn image_dir(&self) -> Option<&Path> {
        self.image_dir.as_deref()
    }

    /// Text of all header parts.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Text of the main document part.
    pub fn main(&self) -> &str {
        &self.main
    }

    /// Text of all footer parts.
    pub fn footer(&self) -> &str {
        &self.footer
    }

    /// Header, main and footer text, trimmed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Images in relationship order.
    pub fn images(&self) -> &[ExtractedImage] {
        &self.images
    }

    /// External hyperlinks in document order.
    pub fn hyperlinks(&self) -> &[Hyperlink] {
        &self.hyperlinks
    }

    /// Merged document properties keyed by unqualified tag name.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Look up one property.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl fmt::Display for ExtractedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

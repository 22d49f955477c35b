//! Error types for the docx2txt library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docx2txt operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting a package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required archive entry is absent.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// The image output directory could not be created.
    #[error("Unable to create image directory {path:?}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error serializing the extracted document.
    #[error("JSON serialization error: {0}")]
    Json(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

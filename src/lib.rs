//! # docx2txt
//!
//! Extract plain text, hyperlinks, document properties and images from
//! Word (.docx) packages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docx2txt::{process_file, ExtractOptions};
//!
//! // Header, body and footer text
//! let text = docx2txt::extract_text("document.docx")?;
//! println!("{}", text);
//!
//! // Everything, writing images to disk
//! let options = ExtractOptions::default().with_image_dir("images");
//! let doc = process_file("document.docx", &options)?;
//! for link in doc.hyperlinks() {
//!     println!("{} -> {}", link.text, link.url);
//! }
//! println!("Title: {:?}", doc.property("title"));
//! # Ok::<(), docx2txt::Error>(())
//! ```
//!
//! ## Lower-level API
//!
//! ```no_run
//! use docx2txt::container::OoxmlContainer;
//! use docx2txt::docx::{extract, resolve, HEADER};
//! use docx2txt::ExtractOptions;
//!
//! let container = OoxmlContainer::open("document.docx")?;
//! let table = resolve(&container)?;
//! println!("Headers: {:?}", table.paths(HEADER));
//! let doc = extract(&container, &table, &ExtractOptions::default())?;
//! # Ok::<(), docx2txt::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: [`process_file_async`] backed by Tokio

pub mod container;
pub mod docx;
pub mod error;
pub mod model;
pub mod options;
pub mod render;

// Re-exports
pub use container::{OoxmlContainer, Relationship};
pub use docx::{RelationshipEntry, RelationshipTable};
pub use error::{Error, Result};
pub use model::{ExtractedDocument, ExtractedImage, Hyperlink};
pub use options::ExtractOptions;

use std::path::Path;

/// Extract a package from disk.
///
/// The returned document records the absolute path of the source file.
///
/// # Example
///
/// ```no_run
/// use docx2txt::{process_file, ExtractOptions};
///
/// let doc = process_file("document.docx", &ExtractOptions::default())?;
/// println!("{}", doc.main());
/// # Ok::<(), docx2txt::Error>(())
/// ```
pub fn process_file(path: impl AsRef<Path>, options: &ExtractOptions) -> Result<ExtractedDocument> {
    let path = path.as_ref();
    log::debug!("extracting {}", path.display());
    let container = OoxmlContainer::open(path)?;
    let doc = process_container(&container, options)?;
    Ok(doc.with_path(std::path::absolute(path)?))
}

/// Extract a package held in memory.
///
/// # Example
///
/// ```no_run
/// use docx2txt::{process_bytes, ExtractOptions};
///
/// let data = std::fs::read("document.docx")?;
/// let doc = process_bytes(data, &ExtractOptions::default())?;
/// # Ok::<(), docx2txt::Error>(())
/// ```
pub fn process_bytes(data: Vec<u8>, options: &ExtractOptions) -> Result<ExtractedDocument> {
    let container = OoxmlContainer::from_bytes(data)?;
    process_container(&container, options)
}

/// Resolve and extract an already opened package.
pub fn process_container(
    container: &OoxmlContainer,
    options: &ExtractOptions,
) -> Result<ExtractedDocument> {
    let table = docx::resolve(container)?;
    docx::extract(container, &table, options)
}

/// Extract the trimmed header, main and footer text of a package.
///
/// # Example
///
/// ```no_run
/// let text = docx2txt::extract_text("document.docx")?;
/// # Ok::<(), docx2txt::Error>(())
/// ```
pub fn extract_text(path: impl AsRef<Path>) -> Result<String> {
    let options = ExtractOptions::default().with_hyperlinks(false);
    let doc = process_file(path, &options)?;
    Ok(render::to_text(&doc))
}

/// Extract a package from disk without blocking the async runtime.
///
/// The file is read with `tokio::fs`; parsing runs on the blocking pool.
#[cfg(feature = "async")]
pub async fn process_file_async(
    path: impl AsRef<Path>,
    options: ExtractOptions,
) -> Result<ExtractedDocument> {
    let path = std::path::absolute(path.as_ref())?;
    let data = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || process_bytes(data, &options))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))??;
    Ok(doc.with_path(path))
}

//! Relationship resolution.
//!
//! Walks `_rels/.rels` and the main document's own relationships file to
//! find which archive parts hold the document, its headers, footers,
//! images and properties, and which relationship ids point at external
//! hyperlinks.

use std::collections::HashMap;

use crate::container::{self, OoxmlContainer, Relationship, PACKAGE_RELS_PATH};
use crate::error::{Error, Result};

/// Simplified type of the main document relationship.
pub const OFFICE_DOCUMENT: &str = "officeDocument";
/// Simplified type of header parts.
pub const HEADER: &str = "header";
/// Simplified type of footer parts.
pub const FOOTER: &str = "footer";
/// Simplified type of image parts.
pub const IMAGE: &str = "image";
/// Simplified type of hyperlink relationships.
pub const HYPERLINK: &str = "hyperlink";

/// Main document location when the package does not declare one.
pub const DEFAULT_DOCUMENT_PART: &str = "word/document.xml";

/// A relationship keyed by its simplified type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipEntry {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Last segment of the type URI (e.g., "header")
    pub rel_type: String,
    /// Archive path, or the raw URL for external targets
    pub target: String,
    /// Whether the target lives outside the package
    pub external: bool,
}

impl RelationshipEntry {
    fn from_relationship(rel: Relationship, base_dir: &str) -> Self {
        let target = if rel.external {
            rel.target
        } else {
            container::resolve_path(base_dir, &rel.target)
        };
        Self {
            rel_type: simplify_rel_type(&rel.rel_type).to_string(),
            id: rel.id,
            target,
            external: rel.external,
        }
    }
}

/// Relationships of a package grouped by simplified type.
///
/// Each group keeps the order the entries were declared in: package-level
/// relationships first, then those of the main document part.
#[derive(Debug, Clone, Default)]
pub struct RelationshipTable {
    entries: Vec<RelationshipEntry>,
    by_type: HashMap<String, Vec<usize>>,
    external_targets: HashMap<String, String>,
    document_part: String,
}

impl RelationshipTable {
    /// Entries of one simplified type, empty if none were declared.
    pub fn get(&self, rel_type: &str) -> Vec<&RelationshipEntry> {
        self.by_type
            .get(rel_type)
            .map(|indices| indices.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Internal archive paths of one simplified type.
    pub fn paths(&self, rel_type: &str) -> Vec<&str> {
        self.get(rel_type)
            .into_iter()
            .filter(|entry| !entry.external)
            .map(|entry| entry.target.as_str())
            .collect()
    }

    /// Archive paths of every `*properties` part, in declaration order.
    pub fn properties_paths(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| !entry.external && entry.rel_type.ends_with("properties"))
            .map(|entry| entry.target.as_str())
            .collect()
    }

    /// URL of an external relationship id.
    pub fn external_target(&self, id: &str) -> Option<&str> {
        self.external_targets.get(id).map(String::as_str)
    }

    /// All external relationship targets keyed by id.
    pub fn external_targets(&self) -> &HashMap<String, String> {
        &self.external_targets
    }

    /// Archive path of the main document part.
    pub fn document_part(&self) -> &str {
        &self.document_part
    }

    /// Number of recorded relationships.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no relationships were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: RelationshipEntry) {
        self.by_type
            .entry(entry.rel_type.clone())
            .or_default()
            .push(self.entries.len());
        self.entries.push(entry);
    }

    /// Point the officeDocument key at exactly `part`.
    fn set_document_part(&mut self, part: String) {
        self.entries.retain(|entry| entry.rel_type != OFFICE_DOCUMENT);
        self.by_type.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            self.by_type
                .entry(entry.rel_type.clone())
                .or_default()
                .push(index);
        }
        self.push(RelationshipEntry {
            id: String::new(),
            rel_type: OFFICE_DOCUMENT.to_string(),
            target: part.clone(),
            external: false,
        });
        self.document_part = part;
    }
}

/// Last segment of a relationship type URI.
///
/// `http://.../relationships/officeDocument` -> `officeDocument`
pub fn simplify_rel_type(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Build the relationship table of a package.
///
/// `_rels/.rels` must exist. The main document's relationships file is
/// optional; a document without one simply has no headers, footers,
/// images or hyperlinks.
pub fn resolve(container: &OoxmlContainer) -> Result<RelationshipTable> {
    let mut table = RelationshipTable::default();

    let package_rels = container.read_relationships(PACKAGE_RELS_PATH)?;
    for rel in package_rels {
        table.push(RelationshipEntry::from_relationship(rel, ""));
    }

    let document_part = table
        .paths(OFFICE_DOCUMENT)
        .first()
        .map(|path| path.to_string())
        .unwrap_or_else(|| DEFAULT_DOCUMENT_PART.to_string());
    log::debug!("main document part: {}", document_part);

    let document_rels_path = container::rels_path_for(&document_part);
    match container.read_relationships(&document_rels_path) {
        Ok(rels) => {
            let base_dir = container::part_dir(&document_part);
            for rel in rels {
                let entry = RelationshipEntry::from_relationship(rel, base_dir);
                // Only the document's own ids can be referenced from its markup
                if entry.external {
                    table
                        .external_targets
                        .insert(entry.id.clone(), entry.target.clone());
                }
                table.push(entry);
            }
        }
        Err(Error::MissingPart(_)) => {
            log::debug!("no {}, document has no part relationships", document_rels_path);
        }
        Err(e) => return Err(e),
    }

    // The document part never declares a relationship to itself
    table.set_document_part(document_part);

    Ok(table)
}

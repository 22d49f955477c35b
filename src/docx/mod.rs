//! DOCX (Word) package extraction.
//!
//! [`resolve`] maps relationship types to archive parts; [`extract`]
//! turns those parts into an [`ExtractedDocument`](crate::ExtractedDocument).

mod extractor;
mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use extractor::{
    create_image_dir, extract, extract_image, xml_to_properties, xml_to_text,
    xml_to_text_with_links,
};
pub use resolver::{
    resolve, simplify_rel_type, RelationshipEntry, RelationshipTable, DEFAULT_DOCUMENT_PART,
    FOOTER, HEADER, HYPERLINK, IMAGE, OFFICE_DOCUMENT,
};

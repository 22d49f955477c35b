//! Synthetic .docx packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Wrap body markup in a `w:document`.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}</w:body></w:document>"#,
        W_NS, REL_NS, body
    )
}

/// Wrap paragraph markup in a header (`hdr`) or footer (`ftr`) root.
pub fn part_xml(root: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:{root} xmlns:w="{}" xmlns:r="{}">{}</w:{root}>"#,
        W_NS,
        REL_NS,
        body,
        root = root
    )
}

/// One paragraph holding one run of text.
pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
}

/// A zip entry plus optional relationship declarations.
pub struct Package {
    entries: Vec<(String, Vec<u8>)>,
}

impl Package {
    /// A package with `_rels/.rels` pointing at `word/document.xml`.
    pub fn new() -> Self {
        let rels = rels_xml(&[(
            "rId1",
            format!("{}/officeDocument", REL_NS),
            "word/document.xml".to_string(),
            false,
        )]);
        Self {
            entries: vec![("_rels/.rels".to_string(), rels.into_bytes())],
        }
    }

    /// Start from an empty archive.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, path: &str, data: impl AsRef<[u8]>) -> Self {
        self.entries.retain(|(p, _)| p != path);
        self.entries.push((path.to_string(), data.as_ref().to_vec()));
        self
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (path, data) in &self.entries {
            zip.start_file(path.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap();
        buffer
    }
}

/// Build a .rels document from `(id, type, target, external)` tuples.
pub fn rels_xml(rels: &[(&str, String, String, bool)]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">"#,
        PKG_REL_NS
    );
    for (id, rel_type, target, external) in rels {
        let mode = if *external { r#" TargetMode="External""# } else { "" };
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
            id, rel_type, target, mode
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Relationship of the given simplified type in the officeDocument namespace.
pub fn rel(id: &'static str, kind: &str, target: &str) -> (&'static str, String, String, bool) {
    (id, format!("{}/{}", REL_NS, kind), target.to_string(), false)
}

/// External hyperlink relationship.
pub fn link(id: &'static str, url: &str) -> (&'static str, String, String, bool) {
    (id, format!("{}/hyperlink", REL_NS), url.to_string(), true)
}

/// The "Hello" sample: a title paragraph and a hyperlink paragraph.
pub fn hello_package() -> Package {
    let body = format!(
        r#"{}<w:p><w:hyperlink r:id="rId4" w:history="1"><w:r><w:rPr><w:rStyle w:val="Hyperlink"/></w:rPr><w:t>This is a hyperlink.</w:t></w:r></w:hyperlink></w:p>"#,
        paragraph("Title")
    );
    Package::new()
        .entry("word/document.xml", document_xml(&body))
        .entry(
            "word/_rels/document.xml.rels",
            rels_xml(&[
                rel("rId1", "styles", "styles.xml"),
                link("rId4", "https://www.google.com/"),
            ]),
        )
}

//! In-memory .docx packages for unit tests.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::container::OoxmlContainer;

const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PKG_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

struct Rel {
    id: String,
    rel_type: String,
    target: String,
    external: bool,
}

pub(crate) struct PackageBuilder {
    document_path: String,
    parts: Vec<(String, Vec<u8>)>,
    package_rels: Vec<Rel>,
    document_rels: Vec<Rel>,
    write_package_rels: bool,
    write_document_rels: bool,
    encrypt_document_rels: bool,
}

impl PackageBuilder {
    pub(crate) fn new() -> Self {
        Self {
            document_path: "word/document.xml".to_string(),
            parts: Vec::new(),
            package_rels: Vec::new(),
            document_rels: Vec::new(),
            write_package_rels: true,
            write_document_rels: true,
            encrypt_document_rels: false,
        }
    }

    pub(crate) fn document(self, xml: &str) -> Self {
        self.document_at("word/document.xml", xml)
    }

    pub(crate) fn document_at(mut self, path: &str, xml: &str) -> Self {
        self.document_path = path.to_string();
        self.parts.push((path.to_string(), xml.as_bytes().to_vec()));
        self
    }

    pub(crate) fn header(self, name: &str, xml: &str) -> Self {
        self.document_part("header", name, xml.as_bytes())
    }

    pub(crate) fn footer(self, name: &str, xml: &str) -> Self {
        self.document_part("footer", name, xml.as_bytes())
    }

    pub(crate) fn image(self, name: &str, data: &[u8]) -> Self {
        self.document_part("image", name, data)
    }

    /// Add a raw archive entry with no relationship pointing at it.
    pub(crate) fn entry(mut self, path: &str, data: &str) -> Self {
        self.parts.push((path.to_string(), data.as_bytes().to_vec()));
        self
    }

    pub(crate) fn hyperlink(mut self, id: &str, url: &str) -> Self {
        self.document_rels.push(Rel {
            id: id.to_string(),
            rel_type: format!("{}/hyperlink", REL_NS),
            target: url.to_string(),
            external: true,
        });
        self
    }

    /// Declare a document relationship whose part is not in the archive.
    pub(crate) fn dangling(mut self, kind: &str, name: &str) -> Self {
        self.document_rels.push(Rel {
            id: format!("rId{}", self.document_rels.len() + 1),
            rel_type: format!("{}/{}", REL_NS, kind),
            target: name.to_string(),
            external: false,
        });
        self
    }

    pub(crate) fn core_properties(self, xml: &str) -> Self {
        let rel_type = format!("{}/metadata/core-properties", PKG_REL_NS);
        self.package_part(rel_type, "docProps/core.xml", xml)
    }

    pub(crate) fn app_properties(self, xml: &str) -> Self {
        let rel_type = format!("{}/extended-properties", REL_NS);
        self.package_part(rel_type, "docProps/app.xml", xml)
    }

    pub(crate) fn without_package_rels(mut self) -> Self {
        self.write_package_rels = false;
        self
    }

    pub(crate) fn without_document_rels(mut self) -> Self {
        self.write_document_rels = false;
        self
    }

    /// Store the document relationships as an AES-encrypted entry.
    pub(crate) fn encrypted_document_rels(mut self) -> Self {
        self.encrypt_document_rels = true;
        self
    }

    pub(crate) fn build(self) -> OoxmlContainer {
        OoxmlContainer::from_bytes(self.to_bytes()).expect("valid test package")
    }

    pub(crate) fn to_bytes(mut self) -> Vec<u8> {
        let office_document = Rel {
            id: "rId1".to_string(),
            rel_type: format!("{}/officeDocument", REL_NS),
            target: self.document_path.clone(),
            external: false,
        };
        self.package_rels.insert(0, office_document);

        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();

        if self.write_package_rels {
            zip.start_file("_rels/.rels", options).unwrap();
            zip.write_all(rels_xml(&self.package_rels).as_bytes()).unwrap();
        }
        if self.write_document_rels {
            let rels_path = crate::container::rels_path_for(&self.document_path);
            let rels_options = if self.encrypt_document_rels {
                options.with_aes_encryption(zip::AesMode::Aes256, "secret")
            } else {
                options
            };
            zip.start_file(rels_path, rels_options).unwrap();
            zip.write_all(rels_xml(&self.document_rels).as_bytes()).unwrap();
        }
        for (path, data) in &self.parts {
            zip.start_file(path.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap();
        buffer
    }

    fn document_part(mut self, kind: &str, name: &str, data: &[u8]) -> Self {
        let dir = crate::container::part_dir(&self.document_path);
        self.document_rels.push(Rel {
            id: format!("rId{}", self.document_rels.len() + 1),
            rel_type: format!("{}/{}", REL_NS, kind),
            target: name.to_string(),
            external: false,
        });
        self.parts
            .push((crate::container::resolve_path(dir, name), data.to_vec()));
        self
    }

    fn package_part(mut self, rel_type: String, path: &str, xml: &str) -> Self {
        self.package_rels.push(Rel {
            id: format!("rId{}", self.package_rels.len() + 2),
            rel_type,
            target: path.to_string(),
            external: false,
        });
        self.parts.push((path.to_string(), xml.as_bytes().to_vec()));
        self
    }
}

fn rels_xml(rels: &[Rel]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"{}\">",
        PKG_REL_NS
    );
    for rel in rels {
        let mode = if rel.external {
            " TargetMode=\"External\""
        } else {
            ""
        };
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"{}/>",
            rel.id,
            rel.rel_type,
            rel.target.replace('&', "&amp;"),
            mode
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

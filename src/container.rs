//! ZIP container abstraction for OOXML packages.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Fixed location of the package-level relationships part.
pub const PACKAGE_RELS_PATH: &str = "_rels/.rels";

/// A raw relationship entry as declared in a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Full relationship type URI
    pub rel_type: String,
    /// Target as written in the .rels file
    pub target: String,
    /// Whether the target lives outside the package
    pub external: bool,
}

/// OOXML container over a ZIP archive.
///
/// Every read pulls the whole entry into memory. The archive sits behind a
/// `RefCell` because the zip reader needs `&mut` access, so a container is
/// meant to be used by one extraction at a time.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docx2txt::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("document.docx")?;
    /// assert!(container.exists("word/document.xml"));
    /// # Ok::<(), docx2txt::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part as a string, normalizing its encoding to UTF-8.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a part as raw bytes.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive.by_name(path).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingPart(path.to_string()),
            e => Error::from(e),
        })?;
        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        log::trace!("read {} ({} bytes)", path, data.len());
        Ok(data)
    }

    /// Check if an entry exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all entries in the archive.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }

    /// Parse the relationships file at `rels_path`, in declaration order.
    pub fn read_relationships(&self, rels_path: &str) -> Result<Vec<Relationship>> {
        let content = self.read_xml(rels_path)?;
        parse_relationships(&content)
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}

/// Parse the content of a .rels file.
pub fn parse_relationships(content: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    let mut reader = quick_xml::Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut root = RootCheck::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                root.open()?;
                rels.extend(relationship(&e)?);
            }
            Ok(Event::Empty(e)) => {
                root.empty()?;
                rels.extend(relationship(&e)?);
            }
            Ok(Event::End(_)) => root.close(),
            Ok(Event::Text(e)) => root.text(&e)?,
            Ok(Event::CData(e)) => root.text(&e)?,
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    root.finish()?;
    Ok(rels)
}

fn relationship(e: &BytesStart<'_>) -> Result<Option<Relationship>> {
    if e.local_name().as_ref() != b"Relationship" {
        return Ok(None);
    }

    let mut rel = Relationship {
        id: String::new(),
        rel_type: String::new(),
        target: String::new(),
        external: false,
    };
    for attr in e.attributes().flatten() {
        let value = attr
            .unescape_value()
            .map_err(|err| Error::XmlParse(err.to_string()))?
            .into_owned();
        match attr.key.local_name().as_ref() {
            b"Id" => rel.id = value,
            b"Type" => rel.rel_type = value,
            b"Target" => rel.target = value,
            b"TargetMode" => rel.external = value.eq_ignore_ascii_case("external"),
            _ => {}
        }
    }

    if rel.id.is_empty() {
        log::warn!("skipping relationship without Id (target {:?})", rel.target);
        return Ok(None);
    }
    Ok(Some(rel))
}

/// Document-element bookkeeping for the event readers.
///
/// quick-xml reads fragments happily; a part must still hold exactly one
/// root element with nothing but whitespace around it.
#[derive(Debug, Default)]
pub(crate) struct RootCheck {
    depth: usize,
    seen: bool,
}

impl RootCheck {
    pub(crate) fn open(&mut self) -> Result<()> {
        self.enter()?;
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn empty(&mut self) -> Result<()> {
        self.enter()
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn text(&self, raw: &[u8]) -> Result<()> {
        if self.depth == 0 && !raw.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::XmlParse("text outside the root element".to_string()));
        }
        Ok(())
    }

    pub(crate) fn finish(&self) -> Result<()> {
        if !self.seen {
            return Err(Error::XmlParse("no root element".to_string()));
        }
        if self.depth > 0 {
            return Err(Error::XmlParse("unexpected end of document".to_string()));
        }
        Ok(())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth == 0 {
            if self.seen {
                return Err(Error::XmlParse("more than one root element".to_string()));
            }
            self.seen = true;
        }
        Ok(())
    }
}

/// Directory portion of a part path (`word/document.xml` -> `word`).
pub fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Basename of a part path (`word/media/image1.png` -> `image1.png`).
pub fn part_name(part: &str) -> &str {
    part.rsplit_once('/').map(|(_, name)| name).unwrap_or(part)
}

/// Path of the relationships file owned by `part`.
///
/// `word/document.xml` -> `word/_rels/document.xml.rels`
pub fn rels_path_for(part: &str) -> String {
    match part_dir(part) {
        "" => format!("_rels/{}.rels", part_name(part)),
        dir => format!("{}/_rels/{}.rels", dir, part_name(part)),
    }
}

/// Resolve a relationship target against the directory of its owning part.
///
/// A leading `/` makes the target package-root relative. `.` and `..`
/// segments are folded; the result never starts with `/`.
pub fn resolve_path(base_dir: &str, target: &str) -> String {
    if let Some(stripped) = target.strip_prefix('/') {
        return resolve_path("", stripped);
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// Parts are normally UTF-8, but older or non-standard producers write
/// UTF-16. Decoded UTF-16 content gets its XML declaration rewritten so
/// quick-xml does not try to re-interpret the UTF-8 string.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    let invalid = |e: std::string::FromUtf8Error| {
        Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    };

    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(invalid),
        [0xFF, 0xFE, rest @ ..] => {
            let content = decode_utf16(rest, u16::from_le_bytes)?;
            Ok(fix_xml_encoding_declaration(&content))
        }
        [0xFE, 0xFF, rest @ ..] => {
            let content = decode_utf16(rest, u16::from_be_bytes)?;
            Ok(fix_xml_encoding_declaration(&content))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            // ASCII markup in UTF-16 has a zero byte in every other position
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                Ok(fix_xml_encoding_declaration(&decode_utf16(bytes, u16::from_le_bytes)?))
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                Ok(fix_xml_encoding_declaration(&decode_utf16(bytes, u16::from_be_bytes)?))
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| to_unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn fix_xml_encoding_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    let Some(end_decl) = content.find("?>") else {
        return content.to_string();
    };

    let (decl, rest) = content.split_at(end_decl + 2);
    let fixed = decl
        .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='UTF-16'", "encoding='UTF-8'")
        .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
        .replace("encoding='utf-16'", "encoding='UTF-8'");
    format!("{}{}", fixed, rest)
}

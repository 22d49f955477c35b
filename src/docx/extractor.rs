//! Content extraction from resolved parts.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};

use super::resolver::{RelationshipTable, FOOTER, HEADER, IMAGE, OFFICE_DOCUMENT};
use crate::container::{self, OoxmlContainer, RootCheck};
use crate::error::{Error, Result};
use crate::model::{ExtractedDocument, ExtractedImage, Hyperlink};
use crate::options::ExtractOptions;

/// Extract text, hyperlinks, images and properties from a package.
pub fn extract(
    container: &OoxmlContainer,
    table: &RelationshipTable,
    options: &ExtractOptions,
) -> Result<ExtractedDocument> {
    let header = parts_to_text(container, &table.paths(HEADER))?;
    let footer = parts_to_text(container, &table.paths(FOOTER))?;

    let mut main = String::new();
    let mut hyperlinks = Vec::new();
    for path in table.paths(OFFICE_DOCUMENT) {
        let xml = container.read_xml(path)?;
        if options.hyperlinks {
            let (text, links) = xml_to_text_with_links(&xml, table.external_targets())?;
            main.push_str(&text);
            hyperlinks.extend(links);
        } else {
            main.push_str(&xml_to_text(&xml)?);
        }
    }

    let images = extract_images(container, &table.paths(IMAGE), options.image_dir.as_deref())?;

    let mut properties = BTreeMap::new();
    for path in table.properties_paths() {
        let xml = container.read_xml(path)?;
        properties.extend(xml_to_properties(&xml)?);
    }

    log::debug!(
        "extracted {} header, {} main, {} footer chars; {} images, {} hyperlinks, {} properties",
        header.len(),
        main.len(),
        footer.len(),
        images.len(),
        hyperlinks.len(),
        properties.len()
    );

    Ok(ExtractedDocument::new(header, main, footer)
        .with_images(images)
        .with_hyperlinks(hyperlinks)
        .with_properties(properties)
        .with_image_dir(options.image_dir.clone()))
}

fn parts_to_text(container: &OoxmlContainer, paths: &[&str]) -> Result<String> {
    let mut text = String::new();
    for path in paths {
        text.push_str(&xml_to_text(&container.read_xml(path)?)?);
    }
    Ok(text)
}

fn extract_images(
    container: &OoxmlContainer,
    paths: &[&str],
    image_dir: Option<&Path>,
) -> Result<Vec<ExtractedImage>> {
    let Some(dir) = image_dir else {
        return Ok(paths
            .iter()
            .map(|path| ExtractedImage::Part(path.to_string()))
            .collect());
    };

    create_image_dir(dir)?;
    paths
        .iter()
        .map(|path| {
            let data = container.read_binary(path)?;
            extract_image(&data, dir, path).map(ExtractedImage::File)
        })
        .collect()
}

/// Create the image output directory; an existing directory is fine.
pub fn create_image_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::OutputDirectory {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write one image into `dir` under the basename of its part path.
///
/// Returns the absolute path of the written file.
pub fn extract_image(data: &[u8], dir: &Path, part: &str) -> Result<PathBuf> {
    create_image_dir(dir)?;
    let dest = dir.join(container::part_name(part));
    fs::write(&dest, data)?;
    log::debug!("wrote {} ({} bytes)", dest.display(), data.len());
    Ok(std::path::absolute(&dest)?)
}

/// Convert a WordprocessingML part to plain text.
///
/// Every element is visited in document order: `t` contributes its text,
/// `tab` a tab, `br`/`cr` a newline and `p` two newlines. Namespaces are
/// ignored.
pub fn xml_to_text(xml: &str) -> Result<String> {
    let (text, _) = walk(xml, None)?;
    Ok(text)
}

/// Like [`xml_to_text`], also pairing external relationship ids found on
/// elements with the flattened text of those elements.
pub fn xml_to_text_with_links(
    xml: &str,
    external_targets: &HashMap<String, String>,
) -> Result<(String, Vec<Hyperlink>)> {
    walk(xml, Some(external_targets))
}

/// Flatten a properties part into unqualified tag -> text.
///
/// Every element gets an entry, empty when it has no text of its own.
/// Later elements overwrite earlier ones with the same name.
pub fn xml_to_properties(xml: &str) -> Result<BTreeMap<String, String>> {
    let mut props = BTreeMap::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root = RootCheck::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                root.open()?;
                mark_child(&mut stack);
                let name = local_name(&e);
                props.insert(name.clone(), String::new());
                stack.push(Frame::new(name));
            }
            Ok(Event::Empty(e)) => {
                root.empty()?;
                mark_child(&mut stack);
                props.insert(local_name(&e), String::new());
            }
            Ok(Event::Text(e)) => {
                root.text(&e)?;
                if let Some(frame) = stack.last().filter(|f| !f.has_child) {
                    let text = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                    props.entry(frame.name.clone()).or_default().push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                root.text(&e)?;
                if let Some(frame) = stack.last().filter(|f| !f.has_child) {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    props.entry(frame.name.clone()).or_default().push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                root.close();
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    check_closed(&stack)?;
    root.finish()?;
    Ok(props)
}

struct Frame {
    name: String,
    has_child: bool,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            has_child: false,
        }
    }
}

/// An element whose id matched an external target; text accumulates
/// until the element closes.
struct LinkCapture {
    depth: usize,
    index: usize,
}

fn walk(
    xml: &str,
    external_targets: Option<&HashMap<String, String>>,
) -> Result<(String, Vec<Hyperlink>)> {
    let mut text = String::new();
    let mut links: Vec<Hyperlink> = Vec::new();
    let mut captures: Vec<LinkCapture> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root = RootCheck::default();

    let mut reader = quick_xml::Reader::from_str(xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                root.open()?;
                mark_child(&mut stack);
                let name = local_name(&e);
                text.push_str(emission(&name));
                stack.push(Frame::new(name));

                if let Some(url) = linked_target(&e, external_targets)? {
                    captures.push(LinkCapture {
                        depth: stack.len(),
                        index: links.len(),
                    });
                    links.push(Hyperlink::new(String::new(), url));
                }
            }
            Ok(Event::Empty(e)) => {
                root.empty()?;
                mark_child(&mut stack);
                text.push_str(emission(&local_name(&e)));

                if let Some(url) = linked_target(&e, external_targets)? {
                    links.push(Hyperlink::new(String::new(), url));
                }
            }
            Ok(Event::Text(e)) => {
                root.text(&e)?;
                let content = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                append_text(&content, &stack, &captures, &mut text, &mut links);
            }
            Ok(Event::CData(e)) => {
                root.text(&e)?;
                let content = String::from_utf8_lossy(&e).into_owned();
                append_text(&content, &stack, &captures, &mut text, &mut links);
            }
            Ok(Event::End(_)) => {
                root.close();
                if captures.last().is_some_and(|c| c.depth == stack.len()) {
                    captures.pop();
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    check_closed(&stack)?;
    root.finish()?;
    Ok((text, links))
}

fn emission(name: &str) -> &'static str {
    match name {
        "tab" => "\t",
        "br" | "cr" => "\n",
        "p" => "\n\n",
        _ => "",
    }
}

fn append_text(
    content: &str,
    stack: &[Frame],
    captures: &[LinkCapture],
    text: &mut String,
    links: &mut [Hyperlink],
) {
    // Only the text before a run's first child element belongs to it
    if stack.last().is_some_and(|f| f.name == "t" && !f.has_child) {
        text.push_str(content);
    }
    for capture in captures {
        links[capture.index].text.push_str(content);
    }
}

/// URL of the first `*id` attribute that names an external target.
fn linked_target(
    e: &BytesStart<'_>,
    external_targets: Option<&HashMap<String, String>>,
) -> Result<Option<String>> {
    let Some(targets) = external_targets else {
        return Ok(None);
    };
    for attr in e.attributes().flatten() {
        if !attr.key.local_name().as_ref().ends_with(b"id") {
            continue;
        }
        let value = attr
            .unescape_value()
            .map_err(|err| Error::XmlParse(err.to_string()))?;
        if let Some(url) = targets.get(&*value) {
            return Ok(Some(url.clone()));
        }
    }
    Ok(None)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn mark_child(stack: &mut [Frame]) {
    if let Some(parent) = stack.last_mut() {
        parent.has_child = true;
    }
}

fn check_closed(stack: &[Frame]) -> Result<()> {
    match stack.last() {
        Some(frame) => Err(Error::XmlParse(format!(
            "unexpected end of document, <{}> is not closed",
            frame.name
        ))),
        None => Ok(()),
    }
}

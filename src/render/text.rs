//! Plain text and labeled detail renderers.

use std::fmt::Write;

use crate::model::ExtractedDocument;

/// Header, main and footer text, trimmed of surrounding whitespace.
pub fn to_text(doc: &ExtractedDocument) -> String {
    doc.text().to_string()
}

/// Labeled dump of every extracted field, one line per field.
///
/// ```text
/// path      : "/tmp/report.docx"
/// header    : "\n\nACME"
/// ```
pub fn to_details(doc: &ExtractedDocument) -> String {
    let path = doc
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let images: Vec<String> = doc.images().iter().map(|i| i.location()).collect();
    let hyperlinks: Vec<(&str, &str)> = doc
        .hyperlinks()
        .iter()
        .map(|link| (link.text.as_str(), link.url.as_str()))
        .collect();

    let mut output = String::new();
    detail_line(&mut output, "path", &path);
    detail_line(&mut output, "header", &doc.header());
    detail_line(&mut output, "main", &doc.main());
    detail_line(&mut output, "footer", &doc.footer());
    detail_line(&mut output, "images", &images);
    detail_line(&mut output, "hyperlinks", &hyperlinks);
    detail_line(&mut output, "properties", doc.properties());
    output
}

fn detail_line(output: &mut String, label: &str, value: &dyn std::fmt::Debug) {
    // Writing into a String cannot fail
    let _ = writeln!(output, "{:<10}: {:?}", label, value);
}

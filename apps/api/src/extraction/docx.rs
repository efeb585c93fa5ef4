use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use super::ExtractionError;

/// Main document part of a WordprocessingML package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Joins the text of every body paragraph with `\n`, in document order.
///
/// Paragraphs nested in tables are not body paragraphs and are skipped.
pub fn extract_text_from_docx(path: &Path) -> Result<String, ExtractionError> {
    let file = File::open(path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ExtractionError::Docx(format!("not a zip package: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractionError::Docx(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| ExtractionError::Docx(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    let paragraphs = body_paragraphs(&xml)?;
    debug!(paragraphs = paragraphs.len(), "Extracted DOCX paragraphs");
    Ok(paragraphs.join("\n"))
}

/// Walks `document.xml` and collects the text of each top-level `w:p`.
///
/// Paragraphs nested inside a body paragraph (text boxes in `w:txbxContent`) belong to a
/// drawing, not to the body, so neither they nor their text are collected.
fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0usize;
    let mut paragraph_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractionError::Docx(format!("malformed XML: {e}")))?;
        let at_body_level = table_depth == 0 && paragraph_depth == 1;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" => {
                    paragraph_depth += 1;
                    if table_depth == 0 && paragraph_depth == 1 {
                        current = Some(String::new());
                    }
                }
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match (e.name().as_ref(), current.as_mut()) {
                (b"w:p", None) if table_depth == 0 && paragraph_depth == 0 => {
                    paragraphs.push(String::new())
                }
                (b"w:tab", Some(p)) if at_body_level => p.push('\t'),
                (b"w:br" | b"w:cr", Some(p)) if at_body_level => p.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text && at_body_level => {
                if let Some(p) = current.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| ExtractionError::Docx(format!("bad text node: {e}")))?;
                    p.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" => {
                    if at_body_level {
                        if let Some(p) = current.take() {
                            paragraphs.push(p);
                        }
                    }
                    paragraph_depth = paragraph_depth.saturating_sub(1);
                }
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

//! Text extraction for ingested sources.
//!
//! Turns a source (file on disk, pasted note, YouTube URL) into a
//! [`ContentItem`] carrying the extracted text the classification and
//! planning stages operate on. PDF and DOCX bodies are extracted for real;
//! OCR and transcript fetching belong to the external extraction backend, so
//! image and transcript-less video sources degrade to `Error`-status items
//! instead of panicking or blocking.

use std::io::Read;
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::models::{ContentItem, ContentKind, ContentStatus};

/// Maximum decompressed bytes to read from a single ZIP entry (zip-bomb
/// protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Extraction failure. Recorded on the resulting item as `Error` status;
/// the pipeline itself never sees these as panics.
#[derive(Debug)]
pub enum ExtractError {
    UnsupportedExtension(String),
    Io(String),
    Pdf(String),
    Docx(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnsupportedExtension(ext) => {
                write!(f, "unsupported file extension: {}", ext)
            }
            ExtractError::Io(e) => write!(f, "read failed: {}", e),
            ExtractError::Pdf(e) => write!(f, "PDF extraction failed: {}", e),
            ExtractError::Docx(e) => write!(f, "DOCX extraction failed: {}", e),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Extract a file on disk into a content item.
///
/// Dispatches on the file extension: `pdf` and `docx` are parsed, `md` and
/// `txt` are read as-is, known image extensions produce an `Error` item
/// (OCR is the backend's job), anything else produces an `Error` item with
/// an unsupported-extension message. Total: failures become items, not
/// panics or propagated errors.
pub fn extract_path(path: &Path) -> ContentItem {
    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let reference = path.display().to_string();
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp") {
        return error_item(
            ContentKind::Image,
            &title,
            &reference,
            "image OCR requires the extraction backend",
        );
    }

    match extract_file_text(path, &ext) {
        Ok(text) => {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            let metadata = json!({
                "file_size": size,
                "extension": ext,
                "content_hash": content_hash(&text),
            });
            item(ContentKind::Document, &title, &reference, text, metadata)
        }
        Err(e) => error_item(ContentKind::Document, &title, &reference, &e.to_string()),
    }
}

/// Extract pasted text into a note item.
pub fn extract_note(text: &str, title: Option<&str>) -> ContentItem {
    let metadata = json!({
        "word_count": text.split_whitespace().count(),
        "character_count": text.chars().count(),
        "content_hash": content_hash(text),
    });
    let title = title.unwrap_or("Text Note");
    item(ContentKind::Note, title, title, text.to_string(), metadata)
}

/// Extract a YouTube URL into a video item.
///
/// Transcript fetching is the extraction backend's job; with a
/// caller-supplied transcript the item completes, without one it is recorded
/// as an `Error` item that still carries the URL.
pub fn extract_youtube(url: &str, transcript: Option<&str>) -> ContentItem {
    match transcript {
        Some(text) => {
            let metadata = json!({
                "url": url,
                "content_hash": content_hash(text),
            });
            item(
                ContentKind::Video,
                "YouTube Video",
                url,
                text.to_string(),
                metadata,
            )
        }
        None => error_item(
            ContentKind::Video,
            "YouTube Video",
            url,
            "transcript unavailable: fetching requires the extraction backend",
        ),
    }
}

fn extract_file_text(path: &Path, ext: &str) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| ExtractError::Io(e.to_string()))?;
    match ext {
        "pdf" => extract_pdf(&bytes),
        "docx" => extract_docx(&bytes),
        "md" | "txt" => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        other => Err(ExtractError::UnsupportedExtension(other.to_string())),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Docx("word/document.xml not found".to_string()))?;

    let mut doc_xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(ExtractError::Docx(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }

    docx_text_runs(&doc_xml)
}

/// Collect the text runs (`<w:t>` elements) of a DOCX document body,
/// separating them with spaces.
fn docx_text_runs(xml: &[u8]) -> Result<String, ExtractError> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    if let Ok(quick_xml::events::Event::Text(te)) = reader.read_event_into(&mut buf)
                    {
                        if !out.is_empty() {
                            out.push(' ');
                        }
                        out.push_str(te.unescape().unwrap_or_default().as_ref());
                    }
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out)
}

fn item(
    kind: ContentKind,
    title: &str,
    reference: &str,
    extracted_text: String,
    metadata: serde_json::Value,
) -> ContentItem {
    ContentItem {
        id: Uuid::new_v4().to_string(),
        kind,
        title: title.to_string(),
        raw_reference: reference.to_string(),
        extracted_text,
        metadata,
        created_at: Utc::now(),
        status: ContentStatus::Completed,
        categories: Vec::new(),
        relevance_score: None,
    }
}

fn error_item(kind: ContentKind, title: &str, reference: &str, message: &str) -> ContentItem {
    ContentItem {
        id: Uuid::new_v4().to_string(),
        kind,
        title: title.to_string(),
        raw_reference: reference.to_string(),
        extracted_text: String::new(),
        metadata: json!({ "error": message }),
        created_at: Utc::now(),
        status: ContentStatus::Error,
        categories: Vec::new(),
        relevance_score: None,
    }
}

fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn note_records_word_and_character_counts() {
        let item = extract_note("three short words", Some("Counts"));
        assert_eq!(item.kind, ContentKind::Note);
        assert_eq!(item.status, ContentStatus::Completed);
        assert_eq!(item.metadata["word_count"], 3);
        assert_eq!(item.metadata["character_count"], 17);
    }

    #[test]
    fn note_title_defaults() {
        let item = extract_note("body", None);
        assert_eq!(item.title, "Text Note");
    }

    #[test]
    fn youtube_without_transcript_is_error_status() {
        let item = extract_youtube("https://youtu.be/abc123", None);
        assert_eq!(item.kind, ContentKind::Video);
        assert_eq!(item.status, ContentStatus::Error);
        assert!(item.extracted_text.is_empty());
        assert_eq!(item.raw_reference, "https://youtu.be/abc123");
    }

    #[test]
    fn youtube_with_transcript_completes() {
        let item = extract_youtube("https://youtu.be/abc123", Some("welcome to the tutorial"));
        assert_eq!(item.status, ContentStatus::Completed);
        assert_eq!(item.extracted_text, "welcome to the tutorial");
        assert_eq!(item.metadata["url"], "https://youtu.be/abc123");
    }

    #[test]
    fn unsupported_extension_becomes_error_item() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"\x00\x01").unwrap();

        let item = extract_path(&path);
        assert_eq!(item.status, ContentStatus::Error);
        assert!(item.metadata["error"]
            .as_str()
            .unwrap()
            .contains("unsupported"));
    }

    #[test]
    fn image_extension_becomes_error_item() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let item = extract_path(&path);
        assert_eq!(item.kind, ContentKind::Image);
        assert_eq!(item.status, ContentStatus::Error);
    }

    #[test]
    fn invalid_pdf_becomes_error_item() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        let item = extract_path(&path);
        assert_eq!(item.status, ContentStatus::Error);
    }

    #[test]
    fn plain_text_file_extracts_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Meeting agenda\n\nattendees and action items").unwrap();

        let item = extract_path(&path);
        assert_eq!(item.kind, ContentKind::Document);
        assert_eq!(item.status, ContentStatus::Completed);
        assert!(item.extracted_text.contains("Meeting agenda"));
        assert_eq!(item.title, "notes.md");
    }

    #[test]
    fn docx_text_runs_joins_w_t_elements() {
        let xml = br#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>Project</w:t></w:r><w:r><w:t>scope</w:t></w:r></w:p>
                <w:p><w:r><w:t>and deliverables</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;
        let text = docx_text_runs(xml).unwrap();
        assert_eq!(text, "Project scope and deliverables");
    }

    #[test]
    fn docx_archive_roundtrip() {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer
                .write_all(
                    br#"<w:document xmlns:w="x"><w:body><w:p><w:r><w:t>budget review</w:t></w:r></w:p></w:body></w:document>"#,
                )
                .unwrap();
            writer.finish().unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        std::fs::write(&path, cursor.into_inner()).unwrap();

        let item = extract_path(&path);
        assert_eq!(item.status, ContentStatus::Completed);
        assert_eq!(item.extracted_text, "budget review");
    }

    #[test]
    fn missing_document_xml_is_docx_error() {
        let mut cursor = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("other.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        std::fs::write(&path, cursor.into_inner()).unwrap();

        let item = extract_path(&path);
        assert_eq!(item.status, ContentStatus::Error);
        assert!(item.metadata["error"]
            .as_str()
            .unwrap()
            .contains("document.xml"));
    }
}

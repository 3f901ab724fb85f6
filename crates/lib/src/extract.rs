//! # Format Extractors
//!
//! One extraction strategy per supported document format. Each strategy
//! converts a file's bytes into plain text and reports internal failures as
//! an [`ExtractError`]; the store layer downgrades any error to an
//! empty-text resource so that one malformed file cannot abort the sync of
//! the others.

use epub::doc::EpubDoc;
use pdf::file::FileOptions;
use scraper::Html;
use std::path::Path;
use thiserror::Error;

/// Errors raised while extracting text from a single document.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse PDF content: {0}")]
    PdfParse(String),
    #[error("Failed to parse EPUB container: {0}")]
    EpubParse(String),
}

/// The closed set of document formats the resource store understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
    Epub,
}

impl DocumentFormat {
    /// Maps a file extension to its format, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "epub" => Some(Self::Epub),
            _ => None,
        }
    }

    /// Resolves the format for a file name, if its extension is supported.
    pub fn for_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?;
        Self::from_extension(ext)
    }
}

/// Extracts plain text from the file at `path` according to `format`.
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Text => extract_text_from_plain(path),
        DocumentFormat::Pdf => extract_text_from_pdf(path),
        DocumentFormat::Epub => extract_text_from_epub(path),
    }
}

/// Reads a text file, dropping undecodable bytes rather than failing the
/// whole read.
fn extract_text_from_plain(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extracts per-page text from a PDF, concatenated in page order.
///
/// Pages that yield no text contribute nothing; this is not an error.
fn extract_text_from_pdf(path: &Path) -> Result<String, ExtractError> {
    let data = std::fs::read(path)?;
    let file = FileOptions::cached()
        .load(data.as_slice())
        .map_err(|e| ExtractError::PdfParse(e.to_string()))?;
    let resolver = file.resolver();
    let mut full_text = String::new();

    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| ExtractError::PdfParse(e.to_string()))?;
        let Some(content) = &page.contents else {
            continue;
        };
        let operations = content
            .operations(&resolver)
            .map_err(|e| ExtractError::PdfParse(e.to_string()))?;
        let mut page_text = String::new();
        for op in operations.iter() {
            if let pdf::content::Op::TextDraw { text } = op {
                page_text.push_str(&text.to_string_lossy());
            }
        }
        if !page_text.is_empty() {
            full_text.push_str(&page_text);
            full_text.push('\n');
        }
    }
    Ok(full_text)
}

/// Walks the EPUB spine in container order, stripping markup from each
/// document item and joining the sections with newlines.
fn extract_text_from_epub(path: &Path) -> Result<String, ExtractError> {
    let mut doc = EpubDoc::new(path).map_err(|e| ExtractError::EpubParse(e.to_string()))?;
    let mut sections = Vec::new();
    loop {
        if let Some((content, _mime)) = doc.get_current_str() {
            sections.push(strip_markup(&content));
        }
        if !doc.go_next() {
            break;
        }
    }
    Ok(sections.join("\n"))
}

/// Flattens an HTML fragment to its text content.
fn strip_markup(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn every_allowed_extension_has_a_format() {
        for ext in crate::constants::ALLOWED_EXTENSIONS {
            assert!(DocumentFormat::from_extension(ext).is_some(), "{ext}");
        }
    }

    #[test]
    fn extension_mapping_is_case_insensitive() {
        assert_eq!(DocumentFormat::from_extension("txt"), Some(DocumentFormat::Text));
        assert_eq!(DocumentFormat::from_extension("PDF"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("ePub"), Some(DocumentFormat::Epub));
        assert_eq!(DocumentFormat::from_extension("docx"), None);
    }

    #[test]
    fn file_name_resolution_requires_an_extension() {
        assert_eq!(DocumentFormat::for_file_name("notes.txt"), Some(DocumentFormat::Text));
        assert_eq!(DocumentFormat::for_file_name("no_extension"), None);
        assert_eq!(DocumentFormat::for_file_name("archive.tar.gz"), None);
    }

    #[test]
    fn plain_text_decoding_is_lossy() {
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        file.write_all(b"hello \xFF\xFE world").unwrap();

        let text = extract_text(file.path(), DocumentFormat::Text).unwrap();
        assert!(text.starts_with("hello "));
        assert!(text.ends_with(" world"));
    }

    #[test]
    fn corrupt_pdf_reports_a_parse_error() {
        let mut file = tempfile::NamedTempFile::with_suffix(".pdf").unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let err = extract_text(file.path(), DocumentFormat::Pdf).unwrap_err();
        assert!(matches!(err, ExtractError::PdfParse(_)));
    }

    #[test]
    fn corrupt_epub_reports_a_parse_error() {
        let mut file = tempfile::NamedTempFile::with_suffix(".epub").unwrap();
        file.write_all(b"this is not an epub").unwrap();

        let err = extract_text(file.path(), DocumentFormat::Epub).unwrap_err();
        assert!(matches!(err, ExtractError::EpubParse(_)));
    }

    #[test]
    fn markup_is_stripped_to_text() {
        let text = strip_markup("<html><body><h1>Title</h1><p>Body text.</p></body></html>");
        assert!(text.contains("Title"));
        assert!(text.contains("Body text."));
        assert!(!text.contains('<'));
    }
}

//! PDF text extraction. Never fails: every error is logged and yields the
//! text of the pages read before the failing one.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use lopdf::Document;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
enum PageError {
    #[error("could not isolate page: {0}")]
    Isolate(String),

    #[error("{0}")]
    Extract(String),

    #[error("extraction panicked, likely a malformed font or glyph table")]
    Panicked,
}

/// Reads the PDF at `path` and returns its page text joined by newlines.
pub fn extract_text_from_pdf(path: &Path) -> String {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Error extracting text from PDF {}: {e}", path.display());
            return String::new();
        }
    };

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    extract_text_from_mem(&bytes)
}

/// Same as `extract_text_from_pdf` for an in-memory document.
///
/// Pages are extracted one at a time; the first page that errors or panics
/// ends extraction and the text gathered up to it is returned.
pub fn extract_text_from_mem(bytes: &[u8]) -> String {
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Error extracting text from PDF: {e}");
            return String::new();
        }
    };

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut pages = Vec::with_capacity(page_numbers.len());

    for &page_number in &page_numbers {
        match extract_page(&doc, &page_numbers, page_number) {
            Ok(text) => pages.push(text),
            Err(e) => {
                error!(
                    "Error extracting text from PDF page {page_number} of {}: {e}",
                    page_numbers.len()
                );
                break;
            }
        }
    }

    join_pages(&pages)
}

/// Text of one page, extracted from a copy of `doc` holding only that page.
fn extract_page(doc: &Document, all_pages: &[u32], page_number: u32) -> Result<String, PageError> {
    let mut single = doc.clone();
    let others: Vec<u32> = all_pages
        .iter()
        .copied()
        .filter(|&n| n != page_number)
        .collect();
    single.delete_pages(&others);

    let mut bytes = Vec::new();
    single
        .save_to(&mut bytes)
        .map_err(|e| PageError::Isolate(e.to_string()))?;

    // pdf-extract can panic on malformed fonts; treat that like any other failure.
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(PageError::Extract(e.to_string())),
        Err(_) => Err(PageError::Panicked),
    }
}

/// Runs `extract_text_from_pdf` on the blocking pool.
pub async fn extract_text(path: PathBuf) -> String {
    match tokio::task::spawn_blocking(move || extract_text_from_pdf(&path)).await {
        Ok(text) => text,
        Err(e) => {
            error!("PDF extraction task failed: {e}");
            String::new()
        }
    }
}

/// Each page trimmed and followed by a newline, then the whole trimmed.
fn join_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.trim());
        text.push('\n');
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::fixtures::{pdf_from_pages, pdf_with_pages, FixturePage};

    #[test]
    fn test_join_pages_separates_with_single_newline() {
        let pages = vec!["\n\nHello\n".to_string(), "  World  \n".to_string()];
        assert_eq!(join_pages(&pages), "Hello\nWorld");
    }

    #[test]
    fn test_join_pages_keeps_blank_middle_page() {
        let pages = vec!["a".to_string(), "   ".to_string(), "b".to_string()];
        assert_eq!(join_pages(&pages), "a\n\nb");
    }

    #[test]
    fn test_join_pages_empty_document() {
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn test_missing_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let text = extract_text_from_pdf(&dir.path().join("does-not-exist.pdf"));
        assert_eq!(text, "");
    }

    #[test]
    fn test_corrupt_file_yields_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.pdf");
        std::fs::write(&path, b"%PDF-1.4\nthis is not really a pdf\n%%EOF").unwrap();
        assert_eq!(extract_text_from_pdf(&path), "");
    }

    #[test]
    fn test_two_page_pdf_joins_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two-pages.pdf");
        std::fs::write(&path, pdf_with_pages(&["Hello", "World"])).unwrap();
        assert_eq!(extract_text_from_pdf(&path), "Hello\nWorld");
    }

    #[test]
    fn test_panicking_page_keeps_earlier_pages() {
        let pdf = pdf_from_pages(&[FixturePage::Text("Hello"), FixturePage::UndefinedFont]);
        assert_eq!(extract_text_from_mem(&pdf), "Hello");
    }

    #[test]
    fn test_failing_page_stops_extraction() {
        let pdf = pdf_from_pages(&[
            FixturePage::Text("Hello"),
            FixturePage::UndefinedFont,
            FixturePage::Text("World"),
        ]);
        assert_eq!(extract_text_from_mem(&pdf), "Hello");
    }

    #[test]
    fn test_failing_first_page_yields_empty_text() {
        let pdf = pdf_from_pages(&[FixturePage::UndefinedFont, FixturePage::Text("World")]);
        assert_eq!(extract_text_from_mem(&pdf), "");
    }

    #[tokio::test]
    async fn test_async_extraction_matches_sync() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one-page.pdf");
        std::fs::write(&path, pdf_with_pages(&["Summary"])).unwrap();
        assert_eq!(extract_text(path).await, "Summary");
    }
}
